//! Random well-formed documents, rendered together with the statements they
//! are expected to parse into.
use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::ParserOptions;

const WORD_CHARS: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', '0', '7', '_', '-', '.', '\u{e9}', '\u{1f600}',
];
const QUOTED_CHARS: &[char] = &[
    'a', ' ', '{', '}', ';', '#', '/', '*', '=', '\n', '\t', '\u{e9}', '\\', '"', '\'', '`',
];
const DELIMITERS: &[char] = &['"', '\'', '`'];
const SEPARATORS: &[&str] = &[" ", " = ", "=", "\t", "  "];
const VALUE_TERMINATORS: &[&str] = &[";", "\n", " ;", " # note\n", " // note\n", " /* note */;"];
const BARE_TERMINATORS: &[&str] = &[";", "\n", " # note\n", " ;"];
const AFTER_BLOCK: &[&str] = &["\n", " ", ";", ""];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
    /// `Some` for a block, even an empty one.
    pub(crate) children: Option<Vec<Statement>>,
}

#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub(crate) text: String,
    pub(crate) statements: Vec<Statement>,
}

fn pick<T: Copy>(g: &mut Gen, items: &[T]) -> T {
    g.choose(items).copied().unwrap_or(items[0])
}

fn word(g: &mut Gen, out: &mut String) -> String {
    let len = 1 + usize::arbitrary(g) % 5;
    let word: String = (0..len).map(|_| pick(g, WORD_CHARS)).collect();
    out.push_str(&word);
    word
}

fn quoted(g: &mut Gen, out: &mut String) -> String {
    let delim = pick(g, DELIMITERS);
    let len = usize::arbitrary(g) % 6;
    let mut text = String::new();
    out.push(delim);
    for _ in 0..len {
        let c = pick(g, QUOTED_CHARS);
        if c == delim || c == '\\' {
            out.push('\\');
        }
        out.push(c);
        text.push(c);
    }
    out.push(delim);
    text
}

fn token(g: &mut Gen, out: &mut String) -> String {
    if usize::arbitrary(g) % 4 == 0 {
        quoted(g, out)
    } else {
        word(g, out)
    }
}

fn value(g: &mut Gen, out: &mut String) -> String {
    if usize::arbitrary(g) % 3 == 0 {
        return quoted(g, out);
    }
    let words = 1 + usize::arbitrary(g) % 3;
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            let gap = if bool::arbitrary(g) { " " } else { "  " };
            out.push_str(gap);
            text.push_str(gap);
        }
        text.push_str(&word(g, out));
    }
    text
}

fn statements(g: &mut Gen, depth: usize, nested: bool, out: &mut String) -> Vec<Statement> {
    let count = usize::arbitrary(g) % 4;
    let mut result = Vec::with_capacity(count);
    for _ in 0..count {
        let block = depth > 0 && usize::arbitrary(g) % 3 == 0;
        if block {
            let name = if nested && bool::arbitrary(g) {
                String::new()
            } else {
                let name = token(g, out);
                out.push(' ');
                name
            };
            out.push('{');
            out.push_str(pick(g, &["\n", " ", "\n  "]));
            let children = statements(g, depth - 1, true, out);
            out.push('}');
            out.push_str(pick(g, AFTER_BLOCK));
            result.push(Statement {
                name,
                value: None,
                children: Some(children),
            });
        } else {
            let name = token(g, out);
            let value = if bool::arbitrary(g) {
                out.push_str(pick(g, SEPARATORS));
                let value = value(g, out);
                out.push_str(pick(g, VALUE_TERMINATORS));
                Some(value)
            } else {
                out.push_str(pick(g, BARE_TERMINATORS));
                None
            };
            result.push(Statement {
                name,
                value,
                children: None,
            });
        }
    }
    result
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut text = String::new();
        if bool::arbitrary(g) {
            text.push_str("# header\n");
        }
        let depth = usize::arbitrary(g) % 4;
        let statements = statements(g, depth, false, &mut text);
        if bool::arbitrary(g) {
            text.push_str("\n  ");
        }
        Self { text, statements }
    }
}

impl Arbitrary for ParserOptions {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            consume_whitespace: bool::arbitrary(g),
            trim_trailing_spaces: bool::arbitrary(g),
            nameless_root_nodes: bool::arbitrary(g),
            nameless_nested_nodes: bool::arbitrary(g),
            max_depth: Option::<u8>::arbitrary(g).map(|d| usize::from(d % 5)),
            panic_on_error: false,
        }
    }
}

#[cfg(feature = "tree")]
pub(crate) fn tree_matches(nodes: &[crate::tree::Node], statements: &[Statement]) -> bool {
    nodes.len() == statements.len()
        && nodes.iter().zip(statements).all(|(node, statement)| {
            node.name == statement.name
                && node.value == statement.value
                && match &statement.children {
                    Some(children) => tree_matches(&node.children, children),
                    None => node.children.is_empty(),
                }
        })
}
