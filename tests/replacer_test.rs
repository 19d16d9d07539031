// Integration tests for the streaming replace API
// Tests cover: chunk boundaries, backpressure, ledgers, readers, chains, edge cases

use std::io::{Cursor, Read};

use replacers::{
    Backpressure, ByteRules, Chain, Ledger, LedgerEntry, Progress, Replacer, StreamConfig,
    StringRules, TransformError, TransformReader, Transformer, replace_all, transform_bytes,
};

/// Feeds `input` in `src_step`-sized pieces through `dst_len`-sized output
/// windows until the stream is finished.
fn drive<T: Transformer>(t: &mut T, input: &[u8], src_step: usize, dst_len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut dst = vec![0u8; dst_len];
    let mut pos = 0;

    for _ in 0..1_000_000 {
        let end = (pos + src_step).min(input.len());
        let at_eof = end == input.len();
        let p = t.transform(&mut dst, &input[pos..end], at_eof);
        out.extend_from_slice(&dst[..p.written]);
        pos += p.consumed;
        if at_eof && pos == input.len() && p.backpressure.is_none() {
            return out;
        }
    }
    panic!("transformer did not finish");
}

fn read_all<R: Read>(mut reader: R) -> Vec<u8> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out).expect("read should succeed");
    out
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_input() {
    let mut r = Replacer::from_text("abc", "X");
    let mut dst = [0u8; 8];

    let p = r.transform(&mut dst, b"", true);
    assert_eq!(p, Progress::done(0, 0));
    assert!(r.ledger().is_none(), "No ledger unless one is attached");
}

#[test]
fn test_all_matches_in_one_chunk() {
    let mut r = Replacer::from_text("abc", "ABC");
    let mut dst = [0u8; 100];

    let p = r.transform(&mut dst, b"abcdefgabcd", true);
    assert_eq!(&dst[..p.written], b"ABCdefgABCd");
    assert_eq!(p, Progress::done(11, 11));
}

#[test]
fn test_no_match_passes_through() {
    let input = b"nothing to see here";
    let mut r = Replacer::from_text("xyz", "!");
    assert_eq!(transform_bytes(&mut r, input), &input[..]);
}

#[test]
fn test_shrinking_and_growing_replacements() {
    let mut shrink = Replacer::from_text("long", "s");
    assert_eq!(transform_bytes(&mut shrink, b"long long ago"), &b"s s ago"[..]);

    let mut grow = Replacer::from_text("s", "long");
    assert_eq!(transform_bytes(&mut grow, b"s s ago"), &b"long long ago"[..]);

    let mut delete = Replacer::from_text(", ", "");
    assert_eq!(transform_bytes(&mut delete, b"a, b, c"), &b"abc"[..]);
}

#[test]
fn test_matches_do_not_overlap() {
    let mut r = Replacer::from_text("aa", "b");
    assert_eq!(transform_bytes(&mut r, b"aaa"), &b"ba"[..]);
    assert_eq!(transform_bytes(&mut r, b"aaaa"), &b"bb"[..]);
}

#[test]
fn test_replacement_is_not_rescanned() {
    let mut r = Replacer::from_text("a", "aa");
    assert_eq!(transform_bytes(&mut r, b"aba"), &b"aabaa"[..]);
}

// ============================================================================
// Chunk Boundaries
// ============================================================================

#[test]
fn test_match_split_across_calls() {
    let mut r = Replacer::from_text("abc", "R");
    let mut dst = [0u8; 5];

    let p = r.transform(&mut dst, b"abcde", false);
    assert_eq!(&dst[..p.written], b"Rde");
    assert_eq!(p, Progress::done(3, 5));

    let p = r.transform(&mut dst, b"fabcd", true);
    assert_eq!(&dst[..p.written], b"fRd");
    assert_eq!(p, Progress::done(3, 5));
}

#[test]
fn test_withheld_tail_is_short_src() {
    let mut r = Replacer::from_text("abc", "ABC");
    let mut dst = [0u8; 100];

    let p = r.transform(&mut dst, b"abcdefgabca", false);
    assert_eq!(&dst[..p.written], b"ABCdefgABC");
    assert_eq!(p.backpressure, Some(Backpressure::ShortSrc));
    assert_eq!(r.pending_input_len(), 1);

    let p = r.transform(&mut dst, b"", true);
    assert_eq!(&dst[..p.written], b"a");
    assert_eq!(p, Progress::done(1, 0));
}

#[test]
fn test_partial_match_released_at_eof() {
    let mut r = Replacer::from_text("abcabcabc", "R");
    assert_eq!(drive(&mut r, b"abcabcab", 3, 4), b"abcabcab");
}

#[test]
fn test_every_chunking_gives_same_output() {
    let input = b"the theme of the thesis: then there, the end";
    let expected = transform_bytes(&mut Replacer::from_text("the", "a"), input);

    for step in 1..=input.len() {
        for dst_len in [1, 2, 3, 7, 64] {
            let mut r = Replacer::from_text("the", "a");
            assert_eq!(
                drive(&mut r, input, step, dst_len),
                &expected[..],
                "step {step}, dst {dst_len}"
            );
        }
    }
}

// ============================================================================
// Destination Backpressure
// ============================================================================

#[test]
fn test_short_dst_then_resume() {
    let mut r = Replacer::from_text("abc", "ABC");
    let mut small = [0u8; 2];

    let p = r.transform(&mut small, b"ab", false);
    assert_eq!(p, Progress::short_src(0, 2));

    let p = r.transform(&mut small, b"cd", true);
    assert_eq!(&small[..p.written], b"AB");
    assert_eq!(p, Progress::short_dst(2, 1));
    assert_eq!(r.pending_output_len(), 1);

    let mut large = [0u8; 10];
    let p = r.transform(&mut large, b"de", true);
    assert_eq!(&large[..p.written], b"Cde");
    assert_eq!(p, Progress::done(3, 2));
}

#[test]
fn test_one_byte_destination() {
    let mut r = Replacer::from_text("x", "<long replacement>");
    assert_eq!(drive(&mut r, b"axbx", 4, 1), b"a<long replacement>b<long replacement>");
}

#[test]
fn test_empty_destination_defers_replacement() {
    let mut r = Replacer::from_text("a", "b");

    // The match is taken; its replacement waits for destination space.
    let p = r.transform(&mut [0u8; 0], b"aaa", true);
    assert_eq!(p, Progress::short_dst(0, 1));
    assert_eq!(r.pending_output_len(), 1);

    let mut dst = [0u8; 8];
    let p = r.transform(&mut dst, b"aa", true);
    assert_eq!(&dst[..p.written], b"bbb");
    assert_eq!(p, Progress::done(3, 2));
}

// ============================================================================
// Ledger
// ============================================================================

#[test]
fn test_ledger_records_spans() {
    let mut r = Replacer::with_ledger(&b"abc"[..], &b"ABC"[..], Ledger::new());
    assert_eq!(read_all(TransformReader::new(Cursor::new("abcdefgabcd"), &mut r)), b"ABCdefgABCd");

    let ledger = r.ledger().expect("ledger attached");
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.at(0), (0, 3, 0, 3));
    assert_eq!(ledger.at(1), (7, 10, 7, 10));
}

#[test]
fn test_ledger_multibyte_chars() {
    let mut r = Replacer::from_char('🍺', '🍻');
    r.set_ledger(Ledger::new());
    assert_eq!(transform_bytes(&mut r, "Cheers!🍺".as_bytes()), "Cheers!🍻".as_bytes());
    assert_eq!(r.ledger().map(|l| l.at(0)), Some((7, 11, 7, 11)));
}

#[test]
fn test_ledger_tracks_shifted_destination() {
    let mut r = Replacer::with_ledger(&b"abc"[..], &b"R"[..], Ledger::new());
    drive(&mut r, b"abcdefabcd", 5, 5);

    let ledger = r.take_ledger().expect("ledger attached");
    let entries: Vec<_> = ledger.iter().copied().collect();
    assert_eq!(
        entries,
        vec![LedgerEntry::new(0, 3, 0, 1), LedgerEntry::new(6, 9, 4, 5)]
    );
    assert!(r.ledger().is_none());
}

#[test]
fn test_ledger_iterate_stops_early() {
    let mut r = Replacer::with_ledger(&b"a"[..], &b"b"[..], Ledger::new());
    transform_bytes(&mut r, b"a-a-a-a");

    let ledger = r.ledger().expect("ledger attached");
    let mut seen = 0;
    let found = ledger.iterate(|entry| {
        seen += 1;
        match entry.source_start >= 4 {
            true => std::ops::ControlFlow::Break(entry.source_start),
            false => std::ops::ControlFlow::Continue(()),
        }
    });
    assert_eq!(found, Some(4));
    assert_eq!(seen, 3);
}

#[test]
fn test_reset_keeps_ledger_restarts_offsets() {
    let mut r = Replacer::with_ledger(&b"x"[..], &b"yy"[..], Ledger::new());
    transform_bytes(&mut r, b"axa");
    r.reset();
    assert_eq!(r.source_offset(), 0);
    assert_eq!(r.dest_offset(), 0);
    assert_eq!(r.ledger().map(Ledger::len), Some(1));

    // A new stream gets a new ledger.
    let first = r.set_ledger(Ledger::new()).expect("ledger attached");
    assert_eq!(first.at(0), (1, 2, 1, 3));

    transform_bytes(&mut r, b"x");
    let second = r.ledger().expect("ledger attached");
    assert_eq!(second.len(), 1);
    assert_eq!(second.at(0), (0, 1, 0, 2));
}

// ============================================================================
// Reader Driver With Long Data
// ============================================================================

#[test]
fn test_reader_long_prefix() {
    let mut input = "*".repeat(10000);
    input.push_str("abcdefgabcd");
    let mut expected = vec![b'*'; 10000];
    expected.extend_from_slice(b"ABCdefgABCd");

    let reader = TransformReader::new(input.as_bytes(), Replacer::from_text("abc", "ABC"));
    assert_eq!(read_all(reader), expected);
}

#[test]
fn test_reader_repeated_matches() {
    let input = "abc".repeat(10000) + "012";
    let expected = "ABC".repeat(10000) + "012";

    let reader = TransformReader::new(input.as_bytes(), Replacer::from_text("abc", "ABC"));
    assert_eq!(read_all(reader), expected.as_bytes());
}

#[test]
fn test_reader_misaligned_matches() {
    let input = "aaaa".to_string() + &"abcdefg".repeat(5000);
    let expected = "aaaa".to_string() + &"ABCdefg".repeat(5000);

    let reader = TransformReader::new(input.as_bytes(), Replacer::from_text("abc", "ABC"));
    assert_eq!(read_all(reader), expected.as_bytes());
}

#[test]
fn test_reader_replacement_larger_than_buffer() {
    let replacement = "A".repeat(5000);
    let reader = TransformReader::new(&b"aaabc"[..], Replacer::from_text("abc", &replacement));
    assert_eq!(read_all(reader), ("aa".to_string() + &replacement).as_bytes());
}

#[test]
fn test_reader_pattern_larger_than_buffer() {
    let pattern = "abc".repeat(2000);
    let input = "abc".repeat(10000);
    let reader = TransformReader::new(input.as_bytes(), Replacer::from_text(&pattern, "REPLACED"));
    assert_eq!(read_all(reader), "REPLACED".repeat(5).as_bytes());
}

#[test]
fn test_reader_long_near_miss() {
    let pattern = "abc".repeat(2000);
    let input = "abc".repeat(1999) + "ab" + &pattern;
    let expected = pattern[..5999].to_string() + "REPLACED";

    let reader = TransformReader::new(input.as_bytes(), Replacer::from_text(&pattern, "REPLACED"));
    assert_eq!(read_all(reader), expected.as_bytes());
}

#[test]
fn test_reader_tiny_buffers() {
    let config = StreamConfig::new(1, 1).expect("valid config");
    let reader = TransformReader::with_config(
        &b"one two three two one"[..],
        Replacer::from_text("two", "2"),
        config,
    )
    .expect("valid config");
    assert_eq!(read_all(reader), b"one 2 three 2 one");
}

// ============================================================================
// Chains and Rule Tables
// ============================================================================

#[test]
fn test_replace_all_in_order() {
    let mut rules = StringRules::new();
    rules.add("Hello", "Hi").add("World", "Gophers");

    let reader = TransformReader::new(&b"Hello, World"[..], replace_all(&rules));
    assert_eq!(read_all(reader), b"Hi, Gophers");
}

#[test]
fn test_chain_equals_sequential_passes() {
    let rules: ByteRules = [(&b"ab"[..], &b"ba"[..]), (&b"ba"[..], &b"c"[..]), (&b"cc"[..], &b"d"[..])]
        .into_iter()
        .collect();
    let input = b"abab aabb baba";

    let mut sequential = input.to_vec();
    for i in 0..3 {
        let (p, r) = replacers::RuleTable::at(&rules, i);
        sequential = transform_bytes(&mut Replacer::new(p, r), &sequential).to_vec();
    }

    for step in [1, 2, 5, 14] {
        for dst_len in [1, 3, 32] {
            let mut chain = replace_all(&rules);
            assert_eq!(drive(&mut chain, input, step, dst_len), sequential);
        }
    }
}

#[test]
fn test_chain_of_boxed_transformers() {
    let stages: Vec<Box<dyn Transformer>> = vec![
        Box::new(Replacer::from_char('a', 'b')),
        Box::new(Chain::new(vec![Replacer::from_text("bb", "c")])),
    ];
    let mut chain = Chain::new(stages);
    assert_eq!(transform_bytes(&mut chain, b"aab"), &b"cb"[..]);
}

// ============================================================================
// Edge Cases and Error Conditions
// ============================================================================

#[test]
fn test_empty_pattern_copies_input() {
    let mut r = Replacer::new(&b""[..], &b"ignored"[..]);
    assert_eq!(drive(&mut r, b"verbatim", 3, 2), b"verbatim");
}

#[test]
fn test_config_validation() {
    assert!(StreamConfig::new(0, 16).is_err());
    assert!(StreamConfig::new(16, 0).is_err());
    assert!(StreamConfig::new(16, 16).is_ok());

    let err = TransformReader::with_config(
        &b""[..],
        Replacer::from_text("a", "b"),
        StreamConfig::default().with_dst_buffer_size(0),
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::InvalidConfig { .. }));
}

#[test]
fn test_reset_allows_reuse() {
    let mut r = Replacer::from_text("abc", "X");
    let mut dst = [0u8; 8];

    let p = r.transform(&mut dst, b"ab", false);
    assert!(p.is_short_src());
    r.reset();
    assert_eq!(r.pending_input_len(), 0);

    assert_eq!(transform_bytes(&mut r, b"c abc"), &b"c X"[..]);
}
