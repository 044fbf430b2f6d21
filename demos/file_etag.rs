//! File ETag example.
//!
//! Run with:
//!     cargo run --example file_etag -- /path/to/file [part size in MiB]
//!
//! Set `RUST_LOG=s3hash=debug` to see the calculation log.

use std::env;
use std::io::Write;

use s3hash::{EtagCalculator, EtagConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());
    let part_mib: u64 = match env::args().nth(2) {
        Some(arg) => arg.parse()?,
        None => 8,
    };

    let size = std::fs::metadata(&path)?.len();
    println!("File: {} ({} bytes)", path, size);
    println!("Part size: {} MiB\n", part_mib);

    let config = EtagConfig::new(part_mib * 1024 * 1024)?;
    let calculator = EtagCalculator::new(config).with_progress(|p| {
        eprint!("\r Complete {}", p);
        std::io::stderr().flush().ok();
    });

    #[cfg(feature = "parallel")]
    let etag = calculator.calculate_file_parallel(&path)?;
    #[cfg(not(feature = "parallel"))]
    let etag = calculator.calculate_file(&path)?;

    eprintln!();
    println!("{}", etag);

    Ok(())
}
