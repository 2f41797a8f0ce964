use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use crate::{Event, EventKind, Parser, ParserOptions, Position};

/// Parses `chunks` in order and returns every emitted event.
pub(crate) fn events_for(options: ParserOptions, chunks: &[&str]) -> Vec<Event> {
    let mut parser = Parser::new(options, Vec::<Event>::new());
    for chunk in chunks {
        parser.feed(chunk);
    }
    parser.finish();
    parser.into_handler()
}

/// Shorthand for [`events_for`] with default options and a single chunk.
pub(crate) fn events(input: &str) -> Vec<Event> {
    events_for(ParserOptions::default(), &[input])
}

pub(crate) fn ev(kind: EventKind, text: &str, line: usize, column: usize) -> Event {
    Event::new(kind, text, Position::new(line, column))
}

/// One event per line, e.g. `1:1 name "root"`, for inline snapshots.
pub(crate) fn render(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "{} {} {:?}", event.position, event.kind, event.text);
    }
    out
}
