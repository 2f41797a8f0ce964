use core::fmt;

/// A 1-based line/column location in the source text.
///
/// Columns count Unicode scalar values, not bytes. Every consumed character
/// advances the position, including whitespace and comment characters that
/// never reach a token, so positions always describe the true source
/// location.
///
/// # Examples
///
/// ```
/// use sparse::Position;
///
/// let mut pos = Position::start();
/// pos.advance('a');
/// pos.advance('\n');
/// assert_eq!(pos, Position::new(2, 1));
/// assert_eq!(pos.to_string(), "2:1");
/// ```
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a position from explicit coordinates.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a document.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1)
    }

    /// Moves past `c`: a newline starts the next line, anything else moves
    /// one column right.
    #[inline]
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
