//! Folds the event stream into owned [`Node`]s.
//!
//! ```
//! use sparse::{ParserOptions, tree::parse_str};
//!
//! let nodes = parse_str("http { port 8080; tls { cert a.pem } }", ParserOptions::default())?;
//! let http = &nodes[0];
//! assert_eq!(http.child("port").and_then(|n| n.value.as_deref()), Some("8080"));
//! assert_eq!(http.child("tls").map(|n| n.children.len()), Some(1));
//! # Ok::<(), sparse::ParserError>(())
//! ```
use alloc::{string::String, vec::Vec};

use crate::{EventKind, Handler, Parser, ParserError, ParserOptions, Position};

/// A name with an optional value and any number of child nodes.
///
/// A statement such as `listen 80` becomes a node with a value and no
/// children; `server { ... }` becomes a node with children and no value.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The node name; empty for a nameless node.
    pub name: String,
    /// The value, if the statement carried one.
    pub value: Option<String>,
    /// Nested nodes, in source order.
    pub children: Vec<Node>,
    /// Position of the name, or of the `{` for a block.
    pub position: Position,
}

impl Node {
    fn new(name: &str, position: Position) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
            position,
        }
    }

    /// The first child called `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|n| n.name == name)
    }

    /// Every child called `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |n| n.name == name)
    }

    /// Whether the node was written without a name.
    #[must_use]
    pub fn is_nameless(&self) -> bool {
        self.name.is_empty()
    }
}

/// A [`Handler`] that assembles nodes.
///
/// Each `Name` event adds a node to the innermost open parent and a `Value`
/// attaches to it. `OpenNode` starts a node that becomes the new parent until
/// its `CloseNode`. On an `Error` event the partial tree is dropped.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    roots: Vec<Node>,
    /// Open parents, outermost first.
    stack: Vec<Node>,
    failed: bool,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn siblings(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        }
    }

    /// The completed top-level nodes, or `None` if the input was rejected
    /// or is still incomplete.
    #[must_use]
    pub fn into_nodes(self) -> Option<Vec<Node>> {
        (!self.failed && self.stack.is_empty()).then_some(self.roots)
    }
}

impl Handler for TreeBuilder {
    fn event(&mut self, kind: EventKind, text: &str, position: Position) {
        if self.failed {
            return;
        }
        match kind {
            EventKind::Name => self.siblings().push(Node::new(text, position)),
            EventKind::Value => {
                if let Some(node) = self.siblings().last_mut() {
                    node.value = Some(text.into());
                }
            }
            EventKind::OpenNode => self.stack.push(Node::new(text, position)),
            EventKind::CloseNode => {
                if let Some(node) = self.stack.pop() {
                    self.siblings().push(node);
                }
            }
            EventKind::Done => {}
            EventKind::Error => {
                self.failed = true;
                self.roots.clear();
                self.stack.clear();
            }
        }
    }
}

/// Parses a complete document into its top-level nodes.
///
/// # Errors
///
/// Returns the first syntax error; no partial tree is returned.
pub fn parse_str(text: &str, options: ParserOptions) -> Result<Vec<Node>, ParserError> {
    parse_chunks([text], options)
}

/// Parses a document delivered as a sequence of chunks.
///
/// # Errors
///
/// Returns the first syntax error; no partial tree is returned.
pub fn parse_chunks<'a, I>(chunks: I, options: ParserOptions) -> Result<Vec<Node>, ParserError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = Parser::new(options, TreeBuilder::new());
    for chunk in chunks {
        parser.feed(chunk);
        if !parser.is_open() {
            break;
        }
    }
    parser.finish();
    if let Some(err) = parser.error() {
        return Err(err.clone());
    }
    Ok(parser.into_handler().into_nodes().unwrap_or_default())
}
