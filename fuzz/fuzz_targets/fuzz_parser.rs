#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sparse::{Event, Parser, ParserOptions};

#[derive(Debug, Arbitrary)]
struct Input {
    flags: u8,
    max_depth: Option<u8>,
    /// Byte offsets at which the payload is split.
    splits: Vec<u16>,
    data: Vec<u8>,
}

fn options(input: &Input) -> ParserOptions {
    ParserOptions {
        consume_whitespace: input.flags & 1 != 0,
        trim_trailing_spaces: input.flags & 2 != 0,
        nameless_root_nodes: input.flags & 4 != 0,
        nameless_nested_nodes: input.flags & 8 != 0,
        max_depth: input.max_depth.map(usize::from),
        panic_on_error: false,
    }
}

fn run(options: ParserOptions, chunks: &[&[u8]]) -> Vec<Event> {
    let mut parser = Parser::new(options, Vec::new());
    for chunk in chunks {
        parser.feed_bytes(chunk);
    }
    parser.finish();
    assert!(!parser.is_open());
    parser.into_handler()
}

fn check(input: &Input) {
    let options = options(input);
    let data = input.data.as_slice();
    let whole = run(options, &[data]);

    // Exactly one terminal event, and it is the last one.
    let terminal = whole.iter().filter(|e| e.kind.is_terminal()).count();
    assert_eq!(terminal, 1);
    assert!(whole.last().is_some_and(|e| e.kind.is_terminal()));

    let mut cuts: Vec<usize> = input
        .splits
        .iter()
        .map(|&s| usize::from(s) % (data.len() + 1))
        .collect();
    cuts.sort_unstable();
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts.into_iter().chain([data.len()]) {
        chunks.push(&data[start..cut]);
        start = cut;
    }
    assert_eq!(run(options, &chunks), whole);

    if let Ok(text) = std::str::from_utf8(data) {
        let mut parser = Parser::new(options, Vec::new());
        parser.feed(text);
        parser.finish();
        assert_eq!(parser.into_handler(), whole);
    }
}

fuzz_target!(|input: Input| check(&input));
