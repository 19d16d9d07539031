#![no_main]

use libfuzzer_sys::fuzz_target;
use replacers::{Ledger, Replacer, Transformer, transform_bytes};

fuzz_target!(|data: Vec<u8>| {
    // First bytes pick the rule and chunk sizes, the rest is the stream
    if data.len() < 4 {
        return;
    }
    let pattern_len = (data[0] % 8) as usize;
    let replacement_len = (data[1] % 8) as usize;
    let step = (data[2] % 16) as usize + 1;
    let dst_len = (data[3] % 16) as usize + 1;
    let rest = &data[4..];
    if rest.len() < pattern_len + replacement_len {
        return;
    }
    let (pattern, rest) = rest.split_at(pattern_len);
    let (replacement, input) = rest.split_at(replacement_len);

    let mut whole = Replacer::with_ledger(pattern.to_vec(), replacement.to_vec(), Ledger::new());
    let expected = transform_bytes(&mut whole, input);

    // Chunked run
    let mut chunked = Replacer::with_ledger(pattern.to_vec(), replacement.to_vec(), Ledger::new());
    let mut out = Vec::new();
    let mut dst = vec![0u8; dst_len];
    let mut pos = 0;
    loop {
        let end = (pos + step).min(input.len());
        let at_eof = end == input.len();
        let p = chunked.transform(&mut dst, &input[pos..end], at_eof);
        out.extend_from_slice(&dst[..p.written]);
        pos += p.consumed;
        if at_eof && pos == input.len() && p.backpressure.is_none() {
            break;
        }
    }

    // Verify: chunking does not change output or ledger
    assert_eq!(&out[..], &expected[..]);
    assert_eq!(whole.ledger(), chunked.ledger());

    // Verify: every entry spans the pattern in the input and the replacement in the output
    let ledger = chunked.ledger().unwrap();
    let mut prev_end = 0u64;
    for entry in ledger {
        assert!(entry.source_start >= prev_end);
        assert_eq!(&input[entry.source_start as usize..entry.source_end as usize], pattern);
        assert_eq!(&out[entry.dest_start as usize..entry.dest_end as usize], replacement);
        prev_end = entry.source_end;
    }
    if pattern.is_empty() {
        assert!(ledger.is_empty());
        assert_eq!(&out[..], input);
    }
});
