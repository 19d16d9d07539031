//! Rule table example: several replacements applied in order.
//!
//! Run with:
//!     cargo run --example replace_table

use std::io::Read;

use replacers::{CharRules, StringRules, TransformReader, replace_all, transform_bytes};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let mut rules = StringRules::new();
    rules.add("Hello", "Hi").add("World", "Gophers");

    let mut chain = replace_all(&rules);
    let out = transform_bytes(&mut chain, b"Hello, World");
    println!("{}", String::from_utf8_lossy(&out));

    // Later rules see the output of earlier ones
    let punctuation: CharRules = [('!', '?'), ('?', '‽')].into_iter().collect();
    let mut reader = TransformReader::new(&b"Really! Truly?"[..], replace_all(&punctuation));
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    println!("{}", text);

    Ok(())
}
