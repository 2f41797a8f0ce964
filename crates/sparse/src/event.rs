//! Events emitted by the streaming parser and the [`Handler`] seam that
//! receives them.
//!
//! Every event is one handler invocation carrying an [`EventKind`], the token
//! text and the source [`Position`]. `OpenNode` carries the node's name,
//! `CloseNode` and `Done` carry empty text, and `Error` carries the message.
//!
//! # Examples
//!
//! ```
//! use sparse::{Event, EventKind, Parser, ParserOptions, Position};
//!
//! let mut parser = Parser::new(ParserOptions::default(), Vec::<Event>::new());
//! parser.feed("root { name value }");
//! parser.finish();
//! let kinds: Vec<_> = parser.handler().iter().map(|e| e.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         EventKind::OpenNode,
//!         EventKind::Name,
//!         EventKind::Value,
//!         EventKind::CloseNode,
//!         EventKind::Done,
//!     ]
//! );
//! assert_eq!(parser.handler()[0].text, "root");
//! assert_eq!(parser.handler()[2].text, "value");
//! assert_eq!(parser.handler()[2].position, Position::new(1, 13));
//! ```
use alloc::{rc::Rc, string::String, vec::Vec};
use core::{cell::RefCell, fmt};

use crate::Position;

/// The kind of a parse event. Exactly one kind per handler invocation.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A node's `{`, carrying the node's name (empty for a nameless node).
    OpenNode,
    /// A node's `}`.
    CloseNode,
    /// The name of a statement that is not a block.
    Name,
    /// The scalar value of the node named by the preceding `Name`.
    Value,
    /// Successful end of input. Terminal.
    Done,
    /// Fatal failure; the text is the message. Terminal.
    Error,
}

impl EventKind {
    /// A stable lowercase label, e.g. `"open-node"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenNode => "open-node",
            Self::CloseNode => "close-node",
            Self::Name => "name",
            Self::Value => "value",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    /// Whether no event can follow this one.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned record of one handler invocation.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Token text; empty for structural events.
    pub text: String,
    /// Where the token (or delimiter) starts.
    pub position: Position,
}

impl Event {
    /// Builds an owned event.
    #[must_use]
    pub fn new(kind: EventKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at {}", self.kind, self.text, self.position)
    }
}

/// Receives parse events as soon as they are recognized.
///
/// Any `FnMut(EventKind, &str, Position)` closure is a handler, as is a
/// `Vec<Event>` (which records owned copies). Handlers are invoked inline,
/// strictly in source order.
pub trait Handler {
    /// Called once per parse event.
    fn event(&mut self, kind: EventKind, text: &str, position: Position);
}

impl<F> Handler for F
where
    F: FnMut(EventKind, &str, Position),
{
    #[inline]
    fn event(&mut self, kind: EventKind, text: &str, position: Position) {
        self(kind, text, position);
    }
}

impl Handler for Vec<Event> {
    fn event(&mut self, kind: EventKind, text: &str, position: Position) {
        self.push(Event::new(kind, text, position));
    }
}

/// A cloneable event recorder whose clones share one event list.
///
/// Useful when the parser owns its handler but the caller wants to read
/// events between chunks.
///
/// ```
/// use sparse::{EventLog, Parser, ParserOptions};
///
/// let log = EventLog::new();
/// let mut parser = Parser::new(ParserOptions::default(), log.clone());
/// parser.feed("a 1;");
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Removes and returns the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Handler for EventLog {
    fn event(&mut self, kind: EventKind, text: &str, position: Position) {
        self.events
            .borrow_mut()
            .push(Event::new(kind, text, position));
    }
}
