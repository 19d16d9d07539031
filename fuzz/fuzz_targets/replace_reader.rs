#![no_main]

use std::io::Read;

use libfuzzer_sys::fuzz_target;
use replacers::{ByteRules, StreamConfig, TransformReader, replace_all, replace_all_with_config, transform_bytes};

fuzz_target!(|data: Vec<u8>| {
    if data.len() < 3 {
        return;
    }
    let src_size = (data[0] % 32) as usize + 1;
    let dst_size = (data[1] % 32) as usize + 1;
    let link_capacity = (data[2] % 8) as usize + 1;
    let input = &data[3..];

    let rules: ByteRules = [(&b"ab"[..], &b"b"[..]), (&b"bb"[..], &b"abba"[..]), (&b"\x00"[..], &b""[..])]
        .into_iter()
        .collect();
    let config = StreamConfig::new(src_size, dst_size)
        .unwrap()
        .with_link_capacity(link_capacity);

    let expected = transform_bytes(&mut replace_all(&rules), input);

    let chain = replace_all_with_config(&rules, &config);
    let mut reader = TransformReader::with_config(input, chain, config).unwrap();
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();

    // Verify: reader output matches one-shot output for any buffer sizes
    assert_eq!(&out[..], &expected[..]);
});
