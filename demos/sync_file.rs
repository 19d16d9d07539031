//! File replacement example: streams a file to stdout with one rule applied.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file OLD NEW

use std::env;
use std::fs::File;
use std::io::{self, Write};

use replacers::{Ledger, Replacer, StreamConfig, TransformReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let pattern = args.next().unwrap_or_else(|| "replacers".to_string());
    let replacement = args.next().unwrap_or_else(|| "REPLACERS".to_string());

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    eprintln!("Replacing {:?} with {:?} in {} ({} bytes)\n", pattern, replacement, path, metadata.len());

    // Larger buffers for file I/O
    let config = StreamConfig::new(64 * 1024, 64 * 1024)?;
    let replacer = Replacer::with_ledger(pattern.into_bytes(), replacement.into_bytes(), Ledger::new());
    let mut reader = TransformReader::with_config(file, replacer, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = io::copy(&mut reader, &mut out)?;
    out.flush()?;

    let (_, replacer) = reader.into_inner();
    let replacements = replacer.ledger().map_or(0, |l| l.len());
    eprintln!("\nTotal: {} replacements, {} bytes written", replacements, written);

    Ok(())
}
