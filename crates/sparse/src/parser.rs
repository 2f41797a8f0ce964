//! The incremental parser: a character automaton driven by [`Parser`].
//!
//! Input arrives in arbitrary chunks. Each character is consumed exactly once
//! and the automaton carries every piece of in-flight state (the token being
//! read, an open quote, a pending backslash, a comment, a lone `/` that may
//! still start one) across chunk boundaries, so splitting a document never
//! changes the events it produces.
use alloc::{string::String, string::ToString, vec::Vec};
use core::fmt;

use crate::{
    Position,
    error::{ParserError, SyntaxError},
    event::{EventKind, Handler},
    options::ParserOptions,
    token::TokenBuffer,
};

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SeekingName,
    SeekingValue,
    ReadingName,
    ReadingValue,
}

impl Mode {
    const fn is_seeking(self) -> bool {
        matches!(self, Self::SeekingName | Self::SeekingValue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comment {
    Line,
    Block { start: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quote {
    delim: char,
    start: Position,
}

const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

#[inline]
fn emit<H: Handler>(handler: &mut H, kind: EventKind, text: &str, position: Position) {
    log::trace!("{kind} {text:?} at {position}");
    handler.event(kind, text, position);
}

/// Parser state minus the handler.
///
/// Methods take the handler as an argument so that token text borrowed from
/// the buffer can be handed to it without copying.
#[derive(Debug, Clone)]
struct Automaton {
    options: ParserOptions,
    mode: Mode,
    comment: Option<Comment>,
    /// Position of a backslash whose escaped character has not arrived yet.
    escape: Option<Position>,
    quote: Option<Quote>,
    /// Position of a `/` that may still begin `//` or `/*`.
    pending_slash: Option<Position>,
    /// An `=` has already been seen since the current name.
    separated: bool,
    /// Previous character inside a block comment, for spotting `*/`.
    last_char: Option<char>,
    buffer: TokenBuffer,
    error: Option<ParserError>,
    closed: bool,
    /// Positions of the `{` of every open node, innermost last.
    openings: Vec<Position>,
    pos: Position,
}

impl Automaton {
    fn new(options: ParserOptions) -> Self {
        Self {
            options,
            mode: Mode::SeekingName,
            comment: None,
            escape: None,
            quote: None,
            pending_slash: None,
            separated: false,
            last_char: None,
            buffer: TokenBuffer::default(),
            error: None,
            closed: false,
            openings: Vec::new(),
            pos: Position::start(),
        }
    }

    fn consume<H: Handler>(&mut self, c: char, handler: &mut H) {
        let at = self.pos;
        self.pos.advance(c);
        self.step(c, at, handler);
    }

    fn step<H: Handler>(&mut self, c: char, at: Position, handler: &mut H) {
        if self.escape.take().is_some() {
            self.buffer.push_escaped(c);
            return;
        }

        match self.comment {
            Some(Comment::Line) => {
                if c != '\n' {
                    return;
                }
                self.comment = None;
            }
            Some(Comment::Block { .. }) => {
                if self.last_char == Some('*') && c == '/' {
                    self.comment = None;
                    self.last_char = None;
                } else {
                    self.last_char = Some(c);
                }
                return;
            }
            None => {}
        }

        if let Some(slash) = self.pending_slash.take() {
            match c {
                '/' => {
                    self.begin_comment(Comment::Line, handler);
                    return;
                }
                '*' => {
                    self.begin_comment(Comment::Block { start: slash }, handler);
                    self.last_char = None;
                    return;
                }
                _ => self.ordinary('/', slash, handler),
            }
        }

        if let Some(quote) = self.quote {
            if c == '\\' {
                self.escape = Some(at);
            } else if c == quote.delim {
                self.quote = None;
                self.end_quoted(handler);
            } else {
                self.buffer.push(c);
            }
            return;
        }

        match c {
            '\\' => {
                if self.mode.is_seeking() {
                    self.begin_token(at, false, handler);
                }
                self.escape = Some(at);
            }
            '/' => self.pending_slash = Some(at),
            '#' => self.begin_comment(Comment::Line, handler),
            '{' => self.open_node(at, handler),
            '}' => self.close_node(at, handler),
            ';' => self.end_statement(handler),
            '=' => self.separator(at, handler),
            '\n' => self.newline(handler),
            c if is_quote(c) && self.mode.is_seeking() => {
                self.begin_token(at, true, handler);
                self.quote = Some(Quote { delim: c, start: at });
            }
            c if c.is_whitespace() => self.whitespace(c, at, handler),
            c => self.ordinary(c, at, handler),
        }
    }

    /// Starts a token at `at`, moving a seeking mode to its reading mode.
    ///
    /// A value starting means the held name belongs to a plain statement, so
    /// it is reported first.
    fn begin_token<H: Handler>(&mut self, at: Position, quoted: bool, handler: &mut H) {
        if self.mode == Mode::SeekingValue {
            self.report_name(handler);
        }
        self.buffer.begin(at, quoted);
        self.mode = match self.mode {
            Mode::SeekingName => Mode::ReadingName,
            Mode::SeekingValue => Mode::ReadingValue,
            reading => reading,
        };
    }

    fn ordinary<H: Handler>(&mut self, c: char, at: Position, handler: &mut H) {
        if self.mode.is_seeking() {
            self.begin_token(at, false, handler);
        }
        self.buffer.push(c);
    }

    fn whitespace<H: Handler>(&mut self, c: char, at: Position, handler: &mut H) {
        match self.mode {
            Mode::SeekingName => {}
            Mode::SeekingValue => {
                if !self.options.consume_whitespace {
                    self.begin_token(at, false, handler);
                    self.buffer.push_space(c);
                }
            }
            Mode::ReadingName => self.end_name(Mode::SeekingValue, handler),
            Mode::ReadingValue => self.buffer.push_space(c),
        }
    }

    fn newline<H: Handler>(&mut self, handler: &mut H) {
        match self.mode {
            Mode::SeekingName => {}
            Mode::SeekingValue => {
                self.report_name(handler);
                self.mode = Mode::SeekingName;
            }
            Mode::ReadingName => self.end_name(Mode::SeekingName, handler),
            Mode::ReadingValue => self.end_value(handler),
        }
    }

    fn end_statement<H: Handler>(&mut self, handler: &mut H) {
        self.flush_token(handler);
        self.mode = Mode::SeekingName;
    }

    fn separator<H: Handler>(&mut self, at: Position, handler: &mut H) {
        match self.mode {
            Mode::SeekingName => self.fail(SyntaxError::UnexpectedCharacter('='), at, handler),
            Mode::ReadingName => {
                self.end_name(Mode::SeekingValue, handler);
                self.separated = true;
            }
            Mode::SeekingValue if !self.separated => self.separated = true,
            Mode::SeekingValue | Mode::ReadingValue => self.ordinary('=', at, handler),
        }
    }

    fn begin_comment<H: Handler>(&mut self, comment: Comment, handler: &mut H) {
        // A value being read is only suspended; a name ends here.
        if self.mode == Mode::ReadingName {
            self.end_name(Mode::SeekingValue, handler);
        }
        self.comment = Some(comment);
    }

    fn end_quoted<H: Handler>(&mut self, handler: &mut H) {
        match self.mode {
            Mode::ReadingName => self.end_name(Mode::SeekingValue, handler),
            Mode::ReadingValue => self.end_value(handler),
            Mode::SeekingName | Mode::SeekingValue => {}
        }
    }

    fn open_node<H: Handler>(&mut self, at: Position, handler: &mut H) {
        if self.mode == Mode::ReadingValue {
            self.fail(SyntaxError::UnexpectedCharacter('{'), at, handler);
            return;
        }

        let depth = self.openings.len();
        let nameless = self.mode == Mode::SeekingName;
        if nameless && !self.options.allows_nameless_at(depth) {
            let err = if depth == 0 {
                SyntaxError::NamelessRootNode
            } else {
                SyntaxError::NamelessNestedNode
            };
            self.fail(err, at, handler);
            return;
        }
        if let Some(max) = self.options.max_depth {
            if depth >= max {
                self.fail(SyntaxError::DepthLimitExceeded(max), at, handler);
                return;
            }
        }

        self.openings.push(at);
        let name = if nameless {
            ""
        } else {
            self.buffer.text(self.options.trim_trailing_spaces)
        };
        emit(handler, EventKind::OpenNode, name, at);
        self.buffer.clear();
        self.mode = Mode::SeekingName;
        self.separated = false;
    }

    fn close_node<H: Handler>(&mut self, at: Position, handler: &mut H) {
        self.flush_token(handler);
        if self.openings.pop().is_none() {
            self.fail(SyntaxError::UnmatchedClose, at, handler);
            return;
        }
        emit(handler, EventKind::CloseNode, "", at);
        self.mode = Mode::SeekingName;
    }

    /// Finalizes the name being read. Moving to `SeekingValue` holds it in
    /// the buffer until a value or a `{` shows what kind of statement it
    /// starts; any other move reports it now.
    fn end_name<H: Handler>(&mut self, next: Mode, handler: &mut H) {
        if next != Mode::SeekingValue {
            self.report_name(handler);
        }
        self.mode = next;
        self.separated = false;
    }

    fn report_name<H: Handler>(&mut self, handler: &mut H) {
        let text = self.buffer.text(self.options.trim_trailing_spaces);
        emit(handler, EventKind::Name, text, self.buffer.start());
        self.buffer.clear();
    }

    fn end_value<H: Handler>(&mut self, handler: &mut H) {
        let text = self.buffer.text(self.options.trim_trailing_spaces);
        emit(handler, EventKind::Value, text, self.buffer.start());
        self.buffer.clear();
        self.mode = Mode::SeekingName;
        self.separated = false;
    }

    /// Reports whatever name or value is in flight and returns to
    /// `SeekingName`.
    fn flush_token<H: Handler>(&mut self, handler: &mut H) {
        match self.mode {
            Mode::ReadingName => self.end_name(Mode::SeekingName, handler),
            Mode::ReadingValue => self.end_value(handler),
            Mode::SeekingValue => {
                self.report_name(handler);
                self.mode = Mode::SeekingName;
                self.separated = false;
            }
            Mode::SeekingName => self.separated = false,
        }
    }

    fn finish<H: Handler>(&mut self, handler: &mut H) {
        if let Some(slash) = self.pending_slash.take() {
            self.ordinary('/', slash, handler);
        }
        if let Some(at) = self.escape {
            self.fail(SyntaxError::UnterminatedEscape, at, handler);
            return;
        }
        if let Some(quote) = self.quote {
            self.fail(SyntaxError::UnterminatedQuote(quote.delim), quote.start, handler);
            return;
        }
        if let Some(Comment::Block { start }) = self.comment {
            self.fail(SyntaxError::UnterminatedComment, start, handler);
            return;
        }
        self.flush_token(handler);
        if let Some(&innermost) = self.openings.last() {
            self.fail(SyntaxError::UnterminatedNode, innermost, handler);
            return;
        }

        log::debug!("finished at {}", self.pos);
        self.closed = true;
        emit(handler, EventKind::Done, "", self.pos);
    }

    fn fail<H: Handler>(&mut self, source: SyntaxError, at: Position, handler: &mut H) {
        let error = ParserError::new(source, at);
        log::debug!("parse failed: {error}");
        self.closed = true;
        emit(handler, EventKind::Error, &error.kind().to_string(), at);

        #[cfg(any(test, feature = "fuzzing"))]
        if self.options.panic_on_error {
            panic!("{error}");
        }

        self.error = Some(error);
    }
}

/// An incremental parser that reports names, values and node boundaries to a
/// [`Handler`] as soon as each is recognized.
///
/// ```
/// use sparse::{EventKind, Parser, ParserOptions, Position};
///
/// let mut names = Vec::new();
/// let mut parser = Parser::new(
///     ParserOptions::default(),
///     |kind: EventKind, text: &str, _: Position| {
///         if matches!(kind, EventKind::Name | EventKind::OpenNode) {
///             names.push(text.to_owned());
///         }
///     },
/// );
/// parser.feed("server { listen 80; ro");
/// parser.feed("ot /srv }");
/// parser.finish();
/// assert!(!parser.has_error());
/// drop(parser);
/// assert_eq!(names, ["server", "listen", "root"]);
/// ```
///
/// Cloning a parser (when its handler is `Clone`) yields an independent
/// instance that continues from the same point.
#[derive(Clone)]
pub struct Parser<H> {
    automaton: Automaton,
    /// Trailing bytes of an incomplete UTF-8 sequence from `feed_bytes`.
    carry: Vec<u8>,
    handler: H,
}

impl<H> fmt::Debug for Parser<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("automaton", &self.automaton)
            .field("carry", &self.carry)
            .finish_non_exhaustive()
    }
}

impl<H: Handler> Parser<H> {
    /// Creates an open parser at line 1, column 1.
    pub fn new(options: ParserOptions, handler: H) -> Self {
        Self {
            automaton: Automaton::new(options),
            carry: Vec::new(),
            handler,
        }
    }

    /// Consumes the next chunk of text.
    ///
    /// Does nothing once the parser is closed. Chunks may split the document
    /// anywhere; an empty chunk has no effect.
    pub fn feed(&mut self, chunk: &str) {
        if self.automaton.closed {
            return;
        }
        self.flush_carry();
        for c in chunk.chars() {
            if self.automaton.closed {
                break;
            }
            self.automaton.consume(c, &mut self.handler);
        }
    }

    /// Consumes the next chunk of raw bytes.
    ///
    /// Chunks may split a UTF-8 sequence; the incomplete tail is held until
    /// the next call. Invalid sequences decode to U+FFFD.
    pub fn feed_bytes(&mut self, chunk: &[u8]) {
        if self.automaton.closed {
            return;
        }
        let joined;
        let mut bytes = chunk;
        if !self.carry.is_empty() {
            let mut carried = core::mem::take(&mut self.carry);
            carried.extend_from_slice(chunk);
            joined = carried;
            bytes = &joined;
        }

        while !bytes.is_empty() && !self.automaton.closed {
            match bstr::decode_utf8(bytes) {
                (Some(c), n) => {
                    self.automaton.consume(c, &mut self.handler);
                    bytes = &bytes[n..];
                }
                (None, n) if n == bytes.len() && bytes[0] >= 0xC0 => {
                    log::debug!("holding {n} bytes of a split UTF-8 sequence");
                    self.carry.extend_from_slice(bytes);
                    return;
                }
                (None, n) => {
                    self.automaton.consume(REPLACEMENT, &mut self.handler);
                    bytes = &bytes[n.max(1)..];
                }
            }
        }
    }

    /// Ends the input.
    ///
    /// Reports any token still being read, then emits `Done`, or an `Error`
    /// if a node, quote, escape or block comment is left open. Calling this
    /// again, or after a failure, does nothing.
    pub fn finish(&mut self) {
        if self.automaton.closed {
            return;
        }
        self.flush_carry();
        self.automaton.finish(&mut self.handler);
    }

    fn flush_carry(&mut self) {
        if !self.carry.is_empty() {
            self.carry.clear();
            self.automaton.consume(REPLACEMENT, &mut self.handler);
        }
    }
}

impl<H> Parser<H> {
    /// Whether a fatal error has occurred.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.automaton.error.is_some()
    }

    /// The fatal error, if one occurred.
    #[must_use]
    pub const fn error(&self) -> Option<&ParserError> {
        self.automaton.error.as_ref()
    }

    /// The message of the fatal error, as carried by the `Error` event.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.automaton.error.as_ref().map(|e| e.kind().to_string())
    }

    /// Whether more input is accepted: neither finished nor failed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.automaton.closed
    }

    /// Number of currently open nodes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.automaton.openings.len()
    }

    /// Position of the next character to be consumed.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.automaton.pos
    }

    /// The options this parser was created with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.automaton.options
    }

    /// Borrows the handler.
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutably borrows the handler.
    pub const fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the parser, returning its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }
}
