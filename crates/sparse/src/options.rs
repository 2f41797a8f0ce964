#![allow(clippy::struct_excessive_bools)]

/// Configuration options for the streaming parser.
///
/// Options are fixed for the lifetime of a parser. The four flags are
/// independent of one another; `max_depth` is an optional hardening limit.
///
/// # Examples
///
/// ```rust
/// use sparse::ParserOptions;
///
/// let options = ParserOptions {
///     nameless_root_nodes: true,
///     ..Default::default()
/// };
/// assert!(options.consume_whitespace);
/// assert!(options.nameless_root_nodes);
/// ```
///
/// # Default
///
/// `trim_trailing_spaces`, `nameless_nested_nodes` and `consume_whitespace`
/// are enabled; `nameless_root_nodes` is disabled and depth is unbounded.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether whitespace between tokens is skipped.
    ///
    /// When `false`, whitespace that follows a name (after the whitespace
    /// character that terminated the name) starts the value, so leading
    /// spaces are preserved in the value text. Names never contain
    /// unescaped whitespace regardless of this flag.
    ///
    /// # Default
    ///
    /// `true`
    pub consume_whitespace: bool,

    /// Whether the trailing run of spaces is stripped from unquoted tokens.
    ///
    /// Only the trailing run of unescaped, non-newline whitespace is
    /// removed. Quoted tokens and escaped whitespace are never trimmed.
    ///
    /// # Default
    ///
    /// `true`
    pub trim_trailing_spaces: bool,

    /// Whether top-level nodes may omit a name.
    ///
    /// ```text
    /// { child value }
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub nameless_root_nodes: bool,

    /// Whether nodes nested inside another node may omit a name.
    ///
    /// ```text
    /// list { { a 1 } { a 2 } }
    /// ```
    ///
    /// # Default
    ///
    /// `true`
    pub nameless_nested_nodes: bool,

    /// Maximum number of simultaneously open nodes.
    ///
    /// Opening a node beyond this depth is a fatal error. `None` leaves
    /// nesting bounded only by available memory.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of reporting them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl ParserOptions {
    /// Options with every flag disabled and no depth limit.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            consume_whitespace: false,
            trim_trailing_spaces: false,
            nameless_root_nodes: false,
            nameless_nested_nodes: false,
            max_depth: None,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }

    /// Returns a copy with `consume_whitespace` set to `value`.
    #[must_use]
    pub const fn with_consume_whitespace(mut self, value: bool) -> Self {
        self.consume_whitespace = value;
        self
    }

    /// Returns a copy with `trim_trailing_spaces` set to `value`.
    #[must_use]
    pub const fn with_trim_trailing_spaces(mut self, value: bool) -> Self {
        self.trim_trailing_spaces = value;
        self
    }

    /// Returns a copy with `nameless_root_nodes` set to `value`.
    #[must_use]
    pub const fn with_nameless_root_nodes(mut self, value: bool) -> Self {
        self.nameless_root_nodes = value;
        self
    }

    /// Returns a copy with `nameless_nested_nodes` set to `value`.
    #[must_use]
    pub const fn with_nameless_nested_nodes(mut self, value: bool) -> Self {
        self.nameless_nested_nodes = value;
        self
    }

    /// Returns a copy with the nesting limit set to `depth`.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether a node opened at `depth` (number of currently open nodes) may
    /// omit its name.
    pub(crate) const fn allows_nameless_at(&self, depth: usize) -> bool {
        if depth == 0 {
            self.nameless_root_nodes
        } else {
            self.nameless_nested_nodes
        }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::none()
            .with_trim_trailing_spaces(true)
            .with_nameless_nested_nodes(true)
            .with_consume_whitespace(true)
    }
}
