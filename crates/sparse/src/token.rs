use alloc::string::String;

use crate::Position;

/// Accumulates the text of the name or value currently being read.
///
/// Besides the raw text the buffer tracks where the token began, whether it
/// was quoted, and the byte length of the trailing run of unescaped
/// whitespace so that trimming is a slice rather than a scan.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenBuffer {
    text: String,
    start: Position,
    trailing_space: usize,
    quoted: bool,
}

impl TokenBuffer {
    /// Resets the buffer for a new token beginning at `start`.
    pub(crate) fn begin(&mut self, start: Position, quoted: bool) {
        self.text.clear();
        self.start = start;
        self.trailing_space = 0;
        self.quoted = quoted;
    }

    /// Drops the text once it has been reported.
    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.trailing_space = 0;
        self.quoted = false;
    }

    /// Appends an ordinary character.
    pub(crate) fn push(&mut self, c: char) {
        self.text.push(c);
        self.trailing_space = 0;
    }

    /// Appends a whitespace character that is eligible for trimming.
    pub(crate) fn push_space(&mut self, c: char) {
        self.text.push(c);
        self.trailing_space += c.len_utf8();
    }

    /// Appends a character that arrived after a backslash. Escaped characters
    /// are never trimmed.
    pub(crate) fn push_escaped(&mut self, c: char) {
        self.push(c);
    }

    pub(crate) const fn start(&self) -> Position {
        self.start
    }

    /// The token text, without its trailing spaces when `trim` is set and
    /// the token was not quoted.
    pub(crate) fn text(&self, trim: bool) -> &str {
        if trim && !self.quoted {
            &self.text[..self.text.len() - self.trailing_space]
        } else {
            &self.text
        }
    }
}
