//! An incremental, callback-driven parser for nested name/value markup.
//!
//! Documents are sequences of statements. A statement is a name, optionally
//! followed by a value and ended by a newline or `;`, or a name followed by a
//! `{ ... }` block of nested statements:
//!
//! ```text
//! # comments run to the end of the line
//! server {
//!     listen 8080;
//!     root = "/srv/www"   // `=` between name and value is optional
//!     location { path "/static/*" }
//! }
//! ```
//!
//! A newline ends a statement, so a block's `{` belongs on the same line as
//! its name. A `{` on the following line opens a nameless node instead, which
//! is an error at the top level unless
//! [`ParserOptions::nameless_root_nodes`] is set.
//!
//! Text may arrive in arbitrary chunks. The [`Parser`] reports each name,
//! value and node boundary to a [`Handler`] as soon as it is recognized,
//! without buffering the document, and produces the same events however the
//! input was split.
//!
//! ```
//! use sparse::{Event, Parser, ParserOptions};
//!
//! let mut parser = Parser::new(ParserOptions::default(), Vec::<Event>::new());
//! parser.feed("server { listen 80");
//! parser.feed("80 }");
//! parser.finish();
//! assert!(!parser.has_error());
//! assert_eq!(parser.handler()[0].text, "server");
//! assert_eq!(parser.handler()[2].text, "8080");
//! ```
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chunk_utils;
mod error;
mod event;
mod options;
mod parser;
mod position;
mod token;
#[cfg(feature = "tree")]
pub mod tree;

#[cfg(test)]
mod tests;

pub use error::{ParserError, SyntaxError};
pub use event::{Event, EventKind, EventLog, Handler};
pub use options::ParserOptions;
pub use parser::Parser;
pub use position::Position;
