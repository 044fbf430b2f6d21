//! Upload verification example.
//!
//! Compares a local file against the ETag an object store reported for it,
//! trying the part sizes common upload tools use.
//!
//! Run with:
//!     cargo run --example verify_upload -- /path/to/file '"<etag>"'

use std::env;
use std::fs::File;

use s3hash::{Etag, EtagCalculator, EtagConfig};

const MIB: u64 = 1024 * 1024;

/// Part sizes used by popular S3 clients and SDKs.
const CANDIDATE_PART_SIZES: [u64; 6] = [5 * MIB, 8 * MIB, 15 * MIB, 16 * MIB, 64 * MIB, 100 * MIB];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (Some(path), Some(expected)) = (args.next(), args.next()) else {
        eprintln!("usage: verify_upload <file> <etag>");
        std::process::exit(2);
    };

    let expected: Etag = expected.parse()?;
    let mut file = File::open(&path)?;
    let size = file.metadata()?.len();

    for part_size in CANDIDATE_PART_SIZES {
        let calculator = EtagCalculator::new(EtagConfig::new(part_size)?);
        if calculator.verify(&mut file, size, &expected)? {
            println!("match: {} with {} MiB parts", expected, part_size / MIB);
            return Ok(());
        }
    }

    println!("no match for {} among the common part sizes", expected);
    std::process::exit(1);
}
