#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use s3hash::{EtagCalculator, EtagConfig};

fuzz_target!(|input: (u16, Vec<u8>)| {
    let (chunk_size, data) = input;
    let chunk_size = u64::from(chunk_size.max(1));
    let data_size = data.len() as u64;

    // Verify: spans partition the input exactly
    let spans: Vec<_> = s3hash::plan(data_size, chunk_size).unwrap().collect();
    assert_eq!(spans.len() as u64, data_size.div_ceil(chunk_size));
    let mut expected_start = 0u64;
    for (i, span) in spans.iter().enumerate() {
        assert_eq!(span.start, expected_start);
        assert!(span.len > 0 && span.len <= chunk_size);
        if i + 1 < spans.len() {
            assert_eq!(span.len, chunk_size);
        }
        expected_start = span.end();
    }
    assert_eq!(expected_start, data_size);

    // Verify: every calculation path agrees
    let calculator = EtagCalculator::new(EtagConfig::new(chunk_size).unwrap().with_buffer_size(7));
    let sequential = calculator
        .calculate(&mut Cursor::new(&data), data_size)
        .unwrap();
    let from_bytes = calculator.calculate_bytes(data.clone()).unwrap();
    let parallel = calculator
        .calculate_parallel(|| Ok(Cursor::new(&data)), data_size)
        .unwrap();
    assert_eq!(sequential, from_bytes);
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.parts(), (spans.len() as u64).max(1));

    // Verify: formatted etag parses back
    let reparsed: s3hash::Etag = sequential.to_string().parse().unwrap();
    assert_eq!(reparsed, sequential);

    // Verify: declaring one byte more than available is truncation
    let err = calculator
        .calculate(&mut Cursor::new(&data), data_size + 1)
        .unwrap_err();
    assert!(matches!(err, s3hash::EtagError::Truncated { .. }));
});
