//! Structural grammar driver.
//!
//! Plays the grammar engine's role for the external scanner:
//!
//! ```text
//! document := row (newline row)* newline?
//! row      := field (SEP field)*
//! field    := quoted_text | text | empty_field
//! newline  := "\r\n" | "\n" | "\r"
//! ```
//!
//! At every position where a field may start, `EMPTY_FIELD` is valid and
//! the scanner is asked first. Only when it declines does the driver lex a
//! quoted or unquoted field itself.
//!
//! # End of Input
//!
//! The scanner never treats end of input as a field boundary. The grammar
//! handles it instead: directly after a separator (`a,b,<EOF>`) it closes
//! the row with a zero-width `empty_field`; at the start of a row it ends
//! the document, so a trailing line terminator produces no extra row.
//!
//! # Error Recovery
//!
//! A field followed by anything other than the dialect separator, a line
//! terminator, or end of input starts recovery. The scanner is consulted
//! with `ERROR_SENTINEL` valid (and abstains), then everything up to the
//! next separator or line terminator becomes an `ERROR` node.

use dsv_scanner::{
    is_newline, Dialect, EmptyFieldScanner, LexerCursor, Scanner, SourceCursor, TokenKind,
    ValidSymbols, SERIALIZATION_BUFFER_SIZE,
};
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::span::Span;
use crate::syntax::{Node, NodeKind, RowCheckpoint, Tree};

/// Parser for one dialect, driving an external scanner `S`.
pub struct Parser<S: Scanner = EmptyFieldScanner> {
    dialect: Dialect,
    options: ParseOptions,
    scanner: S,
}

impl Parser {
    /// Create a parser with the dialect's registered scanner.
    pub fn new(dialect: Dialect) -> Self {
        Parser::with_scanner(dialect, dialect.scanner())
    }
}

impl<S: Scanner> Parser<S> {
    /// Create a parser around an arbitrary scanner implementation.
    pub fn with_scanner(dialect: Dialect, scanner: S) -> Self {
        Parser {
            dialect,
            options: ParseOptions::default(),
            scanner,
        }
    }

    /// Replace the parse options.
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a whole document.
    #[tracing::instrument(level = "debug", skip_all, fields(dialect = %self.dialect, len = source.len()))]
    pub fn parse(&mut self, source: &str) -> Tree {
        self.scanner.deserialize(&[]);
        let state = ParseState::new(self.dialect, self.options, source, 0);
        let tree = state.run(&mut self.scanner, Vec::new(), Vec::new());
        debug!(
            rows = tree.rows().len(),
            errors = tree.errors().len(),
            "parse complete"
        );
        tree
    }

    /// Parse `source` starting at `start`, keeping already-built rows.
    ///
    /// Used by the incremental re-parser after it restored scanner state.
    pub(crate) fn parse_from(
        &mut self,
        source: &str,
        start: u32,
        rows: Vec<Node>,
        checkpoints: Vec<RowCheckpoint>,
        errors: Vec<ParseError>,
    ) -> Tree {
        let mut state = ParseState::new(self.dialect, self.options, source, start);
        state.errors = errors;
        state.run(&mut self.scanner, rows, checkpoints)
    }

    pub(crate) fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }
}

/// Mutable state of one parse.
struct ParseState<'src> {
    dialect: Dialect,
    options: ParseOptions,
    cursor: SourceCursor<'src>,
    errors: Vec<ParseError>,
    /// Set once an error is hit with recovery disabled.
    halted: bool,
}

impl<'src> ParseState<'src> {
    fn new(dialect: Dialect, options: ParseOptions, source: &'src str, start: u32) -> Self {
        ParseState {
            dialect,
            options,
            cursor: SourceCursor::at(source, start),
            errors: Vec::new(),
            halted: false,
        }
    }

    fn run<S: Scanner>(
        mut self,
        scanner: &mut S,
        mut rows: Vec<Node>,
        mut checkpoints: Vec<RowCheckpoint>,
    ) -> Tree {
        let mut state_buf = [0u8; SERIALIZATION_BUFFER_SIZE];

        while !self.cursor.is_eof() {
            let len = scanner.serialize(&mut state_buf).min(SERIALIZATION_BUFFER_SIZE);
            checkpoints.push(RowCheckpoint {
                start: self.cursor.pos(),
                scanner_state: state_buf[..len].into(),
            });

            rows.push(self.row(scanner));

            if self.halted {
                break;
            }
            self.newline();
        }

        let end = self.cursor.source_len();
        Tree {
            dialect: self.dialect,
            root: Node::branch(NodeKind::Document, Span::new(0, end), rows),
            errors: self.errors,
            checkpoints,
        }
    }

    fn row<S: Scanner>(&mut self, scanner: &mut S) -> Node {
        let start = self.cursor.pos();
        let separator = self.dialect.separator();
        let mut children = Vec::new();
        let mut after_separator = false;

        loop {
            children.push(self.field(scanner, after_separator));
            if self.halted {
                break;
            }

            match self.cursor.lookahead() {
                Some(c) if c == separator => {
                    self.cursor.advance();
                    after_separator = true;
                }
                Some(c) if is_newline(c) => break,
                None => break,
                Some(found) => {
                    children.push(self.recover(scanner, found));
                    if self.halted {
                        break;
                    }
                    match self.cursor.lookahead() {
                        Some(c) if c == separator => {
                            self.cursor.advance();
                            after_separator = true;
                        }
                        _ => break,
                    }
                }
            }
        }

        Node::branch(NodeKind::Row, Span::new(start, self.cursor.pos()), children)
    }

    fn field<S: Scanner>(&mut self, scanner: &mut S, after_separator: bool) -> Node {
        let pos = self.cursor.pos();
        if self.empty_field(scanner, ValidSymbols::EMPTY_FIELD) {
            return Node::field(Node::leaf(NodeKind::EmptyField, Span::point(pos)));
        }

        match self.cursor.lookahead() {
            None => {
                debug_assert!(after_separator, "row started at end of input");
                trace!(pos, "empty field at end of input");
                Node::field(Node::leaf(NodeKind::EmptyField, Span::point(pos)))
            }
            Some('"') => self.quoted_field(),
            Some(_) => self.text_field(),
        }
    }

    /// Ask the scanner for an empty field at the cursor.
    ///
    /// The cursor is left where it was whatever the verdict.
    fn empty_field<S: Scanner>(&mut self, scanner: &mut S, valid: ValidSymbols) -> bool {
        let pos = self.cursor.pos();
        self.cursor.begin_token();
        let matched = scanner.scan(&mut self.cursor, valid)
            && self.cursor.result() == Some(TokenKind::EmptyField);
        if matched {
            self.cursor.rewind_to_token_end();
            debug_assert_eq!(
                self.cursor.pos(),
                self.cursor.token_start(),
                "empty field must be zero-width"
            );
        } else {
            self.cursor = SourceCursor::at(self.cursor.source(), pos);
        }
        trace!(pos, ?valid, matched, "scanner decision");
        matched
    }

    fn text_field(&mut self) -> Node {
        let start = self.cursor.pos();
        self.cursor
            .eat_until_any3(self.dialect.separator_byte(), b'\r', b'\n');
        Node::field(Node::leaf(
            NodeKind::Text,
            Span::new(start, self.cursor.pos()),
        ))
    }

    fn quoted_field(&mut self) -> Node {
        let start = self.cursor.pos();
        self.cursor.advance_ascii(1);

        loop {
            if !self.cursor.eat_until_quote() {
                let span = Span::new(start, self.cursor.pos());
                self.error(ParseError::UnterminatedQuote { span });
                if !self.options.recover {
                    self.halted = true;
                }
                return Node::field(Node::leaf(NodeKind::Error, span));
            }
            if self.cursor.peek_byte(1) == Some(b'"') {
                self.cursor.advance_ascii(2);
            } else {
                self.cursor.advance_ascii(1);
                break;
            }
        }

        Node::field(Node::leaf(
            NodeKind::QuotedText,
            Span::new(start, self.cursor.pos()),
        ))
    }

    /// Wrap unexpected input after a field in an `ERROR` node.
    fn recover<S: Scanner>(&mut self, scanner: &mut S, found: char) -> Node {
        let start = self.cursor.pos();

        let abstained =
            !self.empty_field(scanner, ValidSymbols::EMPTY_FIELD | ValidSymbols::ERROR_SENTINEL);
        debug_assert!(abstained, "scanner produced a token during error recovery");

        if self.options.recover {
            self.cursor
                .eat_until_any3(self.dialect.separator_byte(), b'\r', b'\n');
        } else {
            self.cursor.advance_ascii(self.cursor.source_len() - start);
            self.halted = true;
        }
        // Never leave an empty ERROR node: it would not consume `found`.
        if self.cursor.pos() == start {
            self.cursor.advance();
        }

        let span = Span::new(start, self.cursor.pos());
        self.error(ParseError::UnexpectedCharacter {
            found,
            expected: self.dialect.separator(),
            span,
        });
        debug!(%span, "recovered from unexpected input");
        Node::leaf(NodeKind::Error, span)
    }

    /// Consume one line terminator, if present.
    fn newline(&mut self) {
        match (self.cursor.peek_byte(0), self.cursor.peek_byte(1)) {
            (Some(b'\r'), Some(b'\n')) => self.cursor.advance_ascii(2),
            (Some(b'\r' | b'\n'), _) => self.cursor.advance_ascii(1),
            _ => {}
        }
    }

    fn error(&mut self, error: ParseError) {
        if self.errors.len() < self.options.max_errors {
            self.errors.push(error);
        }
    }
}
