#![no_main]

use libfuzzer_sys::fuzz_target;
use s3hash::Etag;

fuzz_target!(|text: &str| {
    // Parsing must never panic, and accepted input must format canonically
    if let Ok(etag) = text.parse::<Etag>() {
        let canonical = etag.to_string();
        assert_eq!(canonical.parse::<Etag>().unwrap(), etag);
        assert!(etag.parts() >= 1);
    }
});
