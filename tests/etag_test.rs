// Integration tests for ETag calculation
// Tests cover: golden vectors, part layout, short reads, truncation, files

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;

use s3hash::{CancelToken, Etag, EtagCalculator, EtagConfig, EtagError};

const MIB: u64 = 1024 * 1024;

/// Returns at most `max` bytes per read call.
struct ShortReads<R> {
    inner: R,
    max: usize,
}

impl<R: Read> Read for ShortReads<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.max);
        self.inner.read(&mut buf[..n])
    }
}

impl<R: Seek> Seek for ShortReads<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("s3hash-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

// ============================================================================
// Golden Vectors
// ============================================================================

#[test]
fn test_golden_single_part() {
    let data = b"Time flies like an arrow; fruit flies like a banana";
    let etag = s3hash::calculate(&mut Cursor::new(&data[..]), MIB, data.len() as u64).unwrap();

    assert_eq!(etag.to_string(), "bf8043c1e6890929374ea8f19828acbb");
    assert_eq!(etag.parts(), 1);
}

#[test]
fn test_golden_multipart() {
    let data = b"0123456789".repeat(10_000_000);
    assert_eq!(data.len(), 100_000_000);

    let etag = s3hash::calculate(&mut Cursor::new(&data), 5 * MIB, data.len() as u64).unwrap();

    assert_eq!(etag.to_string(), "38a7e5991be21b577978abb001323b0a-20");
    assert_eq!(etag.parts(), 20);
}

#[test]
fn test_golden_multipart_parallel_and_bytes() {
    let data = b"0123456789".repeat(10_000_000);
    let calculator = EtagCalculator::new(EtagConfig::new(5 * MIB).unwrap());

    let from_bytes = calculator.calculate_bytes(data.clone()).unwrap();
    assert_eq!(from_bytes.to_string(), "38a7e5991be21b577978abb001323b0a-20");

    #[cfg(feature = "parallel")]
    {
        let parallel = calculator
            .calculate_parallel(|| Ok(Cursor::new(&data)), data.len() as u64)
            .unwrap();
        assert_eq!(parallel, from_bytes);
    }
}

// ============================================================================
// Part Layout
// ============================================================================

#[test]
fn test_single_part_is_plain_md5() {
    let data = b"The quick brown fox jumps over the lazy dog";
    for chunk_size in [43, 44, 10 * MIB] {
        let etag = s3hash::calculate(&mut Cursor::new(&data[..]), chunk_size, 43).unwrap();
        assert_eq!(etag.to_string(), "9e107d9d372bb6826bd81d3542a419d6");
    }
}

#[test]
fn test_suffix_matches_part_count() {
    let data = vec![0x5Au8; 1000];
    for (chunk_size, parts) in [(999, 2), (500, 2), (333, 4), (100, 10), (1, 1000)] {
        let etag = s3hash::calculate(&mut Cursor::new(&data), chunk_size, 1000).unwrap();
        assert_eq!(etag.parts(), parts);
        assert!(etag.to_string().ends_with(&format!("-{parts}")));
    }
}

#[test]
fn test_empty_input() {
    let etag = s3hash::calculate(&mut Cursor::new(Vec::new()), 5 * MIB, 0).unwrap();
    assert_eq!(etag.to_string(), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(etag.parts(), 1);
}

#[test]
fn test_zero_chunk_size_rejected_before_io() {
    struct Untouchable;

    impl Read for Untouchable {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("read before argument validation");
        }
    }

    impl Seek for Untouchable {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            panic!("seek before argument validation");
        }
    }

    let err = s3hash::calculate(&mut Untouchable, 0, 100).unwrap_err();
    assert!(matches!(err, EtagError::InvalidArgument { .. }));
}

#[test]
fn test_idempotent() {
    let data: Vec<u8> = (0..10_000).map(|i| (i * 13 % 256) as u8).collect();
    let calculator = EtagCalculator::new(EtagConfig::new(1024).unwrap());
    let mut source = Cursor::new(&data);

    let first = calculator.calculate(&mut source, 10_000).unwrap();
    let second = calculator.calculate(&mut source, 10_000).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_part_order_is_load_bearing() {
    let a = vec![1u8; 100];
    let b = vec![2u8; 100];
    let ab = [a.clone(), b.clone()].concat();
    let ba = [b, a].concat();

    let etag_ab = s3hash::calculate(&mut Cursor::new(&ab), 100, 200).unwrap();
    let etag_ba = s3hash::calculate(&mut Cursor::new(&ba), 100, 200).unwrap();
    assert_ne!(etag_ab, etag_ba);
    assert_eq!(etag_ab.parts(), etag_ba.parts());
}

// ============================================================================
// Short Reads and Truncation
// ============================================================================

#[test]
fn test_short_reads_give_same_digest() {
    let data = b"0123456789".repeat(10_000);
    let expected = s3hash::calculate(&mut Cursor::new(&data), 30_000, 100_000).unwrap();

    for max in [1, 7, 4096, 29_999] {
        let mut source = ShortReads {
            inner: Cursor::new(&data),
            max,
        };
        let etag = s3hash::calculate(&mut source, 30_000, 100_000).unwrap();
        assert_eq!(etag, expected, "max read = {max}");
    }
}

#[test]
fn test_truncated_input_is_an_error() {
    let data = vec![0u8; 1000];
    let err = s3hash::calculate(&mut Cursor::new(&data), 300, 1200).unwrap_err();
    match err {
        EtagError::Truncated {
            part,
            expected,
            actual,
        } => {
            assert_eq!(part, 3);
            assert_eq!(expected, 300);
            assert_eq!(actual, 100);
        }
        other => panic!("expected truncation, got {other}"),
    }
}

#[test]
fn test_truncated_single_part() {
    let data = vec![0u8; 10];
    let err = s3hash::calculate(&mut Cursor::new(&data), MIB, 11).unwrap_err();
    assert!(matches!(err, EtagError::Truncated { part: 0, .. }));
}

// ============================================================================
// Cancellation and Verification
// ============================================================================

#[test]
fn test_cancel_midway() {
    let token = CancelToken::new();
    let trigger = token.clone();
    let calculator = EtagCalculator::new(EtagConfig::new(10).unwrap())
        .with_cancel(token)
        .with_progress(move |p| {
            if p.parts_completed == 5 {
                trigger.cancel();
            }
        });

    let err = calculator
        .calculate(&mut Cursor::new(vec![0u8; 1000]), 1000)
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn test_verify_against_parsed_etag() {
    let data = b"0123456789".repeat(1000);
    let calculator = EtagCalculator::new(EtagConfig::new(3000).unwrap());
    let etag = calculator.calculate_bytes(data.clone()).unwrap();

    let parsed: Etag = format!("\"{etag}\"").parse().unwrap();
    assert!(
        calculator
            .verify(&mut Cursor::new(&data), data.len() as u64, &parsed)
            .unwrap()
    );
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_calculate_file() {
    let data = b"0123456789".repeat(1000);
    let path = temp_file("calculate_file", &data);

    let etag = s3hash::calculate_file(&path, 4096).unwrap();
    let expected = s3hash::calculate(&mut Cursor::new(&data), 4096, data.len() as u64).unwrap();
    assert_eq!(etag, expected);
    assert_eq!(etag.parts(), 3);

    #[cfg(feature = "parallel")]
    {
        let calculator = EtagCalculator::new(EtagConfig::new(4096).unwrap());
        assert_eq!(calculator.calculate_file_parallel(&path).unwrap(), expected);
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_calculate_missing_file() {
    let path = std::env::temp_dir().join("s3hash-definitely-missing-file");
    let err = s3hash::calculate_file(&path, 4096).unwrap_err();
    assert!(matches!(err, EtagError::Io(_)));
}
