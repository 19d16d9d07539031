//! Async replacement example over a tokio reader.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use futures_util::StreamExt;
use replacers::{Replacer, StreamConfig, transform_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let data = "log line: status=FAIL\n".repeat(5000);
    println!("Async replacing in {} bytes of data...\n", data.len());

    // A tokio reader adapted to futures-io
    let reader = tokio::io::BufReader::new(data.as_bytes()).compat();

    let config = StreamConfig::default().with_dst_buffer_size(8192);
    let mut stream = transform_async(reader, Replacer::from_text("FAIL", "PASS"), config);

    let mut pieces = 0;
    let mut total_bytes = 0;
    let mut last = None;

    while let Some(piece) = stream.next().await {
        let piece = piece?;
        pieces += 1;
        total_bytes += piece.len();
        println!("  Piece {}: {:>6} bytes", pieces, piece.len());
        last = Some(piece);
    }

    if let Some(piece) = last {
        let tail = &piece[piece.len().saturating_sub(22)..];
        println!("\nLast line: {}", String::from_utf8_lossy(tail).trim_end());
    }
    println!("Total: {} pieces, {} bytes", pieces, total_bytes);

    Ok(())
}
