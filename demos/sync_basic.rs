//! Basic synchronous replacement with the low-level `transform` API.
//!
//! Run with:
//!     cargo run --example sync_basic

use replacers::{Backpressure, Ledger, Replacer, Transformer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let data = "Colour me impressed: the colour of the colourful flag.".repeat(4);
    let mut replacer = Replacer::with_ledger(&b"colour"[..], &b"color"[..], Ledger::new());

    println!("Replacing in {} bytes of data...\n", data.len());

    // Feed the stream in small batches through a small output buffer so
    // matches straddle batch boundaries.
    let batch_size = 7;
    let mut dst = [0u8; 16];
    let mut output = Vec::new();
    let mut pos = 0;
    let input = data.as_bytes();

    loop {
        let end = (pos + batch_size).min(input.len());
        let at_eof = end == input.len();
        let progress = replacer.transform(&mut dst, &input[pos..end], at_eof);
        output.extend_from_slice(&dst[..progress.written]);
        pos += progress.consumed;

        match progress.backpressure {
            Some(Backpressure::ShortDst) => println!("  output buffer full after {} bytes", output.len()),
            Some(Backpressure::ShortSrc) => {}
            None if at_eof && pos == input.len() => break,
            None => {}
        }
    }

    println!("\n{}\n", String::from_utf8(output)?);

    if let Some(ledger) = replacer.ledger() {
        for entry in ledger {
            println!("Replacement {}", entry);
        }
        println!("\nTotal: {} replacements", ledger.len());
    }

    Ok(())
}
