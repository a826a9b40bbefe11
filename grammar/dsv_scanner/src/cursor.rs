//! Lexer cursor capability and a cursor over in-memory source.
//!
//! The grammar engine owns the cursor; the scanner only reads the
//! look-ahead, marks token ends, and records the result kind. [`LexerCursor`]
//! is that capability. [`SourceCursor`] implements it over a `&str` and is
//! what the structural grammar driver lexes with.
//!
//! # Token Boundaries
//!
//! A token starts wherever the cursor was when [`SourceCursor::begin_token`]
//! was called. Its end is the last position passed to
//! [`LexerCursor::mark_end`], or the current position if `mark_end` was
//! never called. Marking before advancing is how a scanner produces a
//! zero-width token while still peeking at input.

use crate::token::TokenKind;

/// Engine-owned lexer state as seen by an external scanner.
pub trait LexerCursor {
    /// The code point at the current position, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Move past the current code point. No-op at end of input.
    fn advance(&mut self);

    /// Record the current position as the end of the token under construction.
    fn mark_end(&mut self);

    /// Record the kind of token the scanner recognized.
    fn set_result(&mut self, kind: TokenKind);

    /// Returns `true` if the cursor has reached end of input.
    fn is_eof(&self) -> bool {
        self.lookahead().is_none()
    }
}

/// Cursor over a UTF-8 source string.
///
/// Positions are byte offsets and always fall on character boundaries.
/// The cursor is [`Copy`], enabling cheap snapshots around speculative
/// scanner calls.
#[derive(Clone, Copy, Debug)]
pub struct SourceCursor<'a> {
    source: &'a str,
    /// Current read position (byte offset of the look-ahead).
    pos: u32,
    /// Length of the source content, saturated at `u32::MAX`.
    source_len: u32,
    /// Where the current token started.
    token_start: u32,
    /// Last position passed to `mark_end` since the token started.
    marked_end: Option<u32>,
    /// Kind recorded by the last `set_result` since the token started.
    result: Option<TokenKind>,
}

impl<'a> SourceCursor<'a> {
    /// Create a cursor at byte 0.
    ///
    /// Sources longer than `u32::MAX` bytes are accepted, but anything past
    /// that offset reads as end of input.
    pub fn new(source: &'a str) -> Self {
        let source_len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        Self {
            source,
            pos: 0,
            source_len,
            token_start: 0,
            marked_end: None,
            result: None,
        }
    }

    /// Create a cursor at `pos`, clamped to the source length.
    ///
    /// `pos` must fall on a character boundary.
    pub fn at(source: &'a str, pos: u32) -> Self {
        let mut cursor = Self::new(source);
        cursor.pos = pos.min(cursor.source_len);
        cursor.token_start = cursor.pos;
        debug_assert!(
            source.is_char_boundary(cursor.pos as usize),
            "cursor position {pos} is not on a character boundary"
        );
        cursor
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// The source this cursor reads.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Start a new token at the current position.
    ///
    /// Clears any end mark and result left by a previous token.
    pub fn begin_token(&mut self) {
        self.token_start = self.pos;
        self.marked_end = None;
        self.result = None;
    }

    /// Where the current token started.
    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    /// Where the current token ends.
    #[inline]
    pub fn token_end(&self) -> u32 {
        self.marked_end.unwrap_or(self.pos)
    }

    /// Kind recorded for the current token, if any.
    #[inline]
    pub fn result(&self) -> Option<TokenKind> {
        self.result
    }

    /// Move the read position back to the end of the current token.
    ///
    /// Engines call this after a scanner returns so that look-ahead the
    /// scanner inspected past the token end is read again.
    pub fn rewind_to_token_end(&mut self) {
        self.pos = self.token_end();
    }

    /// Byte at `pos + n`, or `None` past the end of input.
    #[inline]
    pub fn peek_byte(&self, n: u32) -> Option<u8> {
        let at = self.pos.checked_add(n)?;
        if at >= self.source_len {
            return None;
        }
        self.source.as_bytes().get(at as usize).copied()
    }

    /// Advance past `bytes` ASCII bytes.
    ///
    /// Callers use this only after matching ASCII bytes with
    /// [`peek_byte`](Self::peek_byte), so the position stays on a
    /// character boundary.
    #[inline]
    pub fn advance_ascii(&mut self, bytes: u32) {
        self.pos = self.pos.saturating_add(bytes).min(self.source_len);
    }

    /// Advance to the next byte equal to `a`, `b`, or `c`, or to end of input.
    ///
    /// Returns the byte found, or `None` at end of input. All three needles
    /// must be ASCII so the cursor lands on a character boundary.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_any3(&mut self, a: u8, b: u8, c: u8) -> Option<u8> {
        debug_assert!(a.is_ascii() && b.is_ascii() && c.is_ascii());
        let remaining = &self.source.as_bytes()[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr3(a, b, c, remaining) {
            self.pos += offset as u32;
            Some(remaining[offset])
        } else {
            self.pos = self.source_len;
            None
        }
    }

    /// Advance to the next `"` byte, or to end of input.
    ///
    /// Returns `true` if a quote was found.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_quote(&mut self) -> bool {
        let remaining = &self.source.as_bytes()[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'"', remaining) {
            self.pos += offset as u32;
            true
        } else {
            self.pos = self.source_len;
            false
        }
    }
}

impl LexerCursor for SourceCursor<'_> {
    #[inline]
    fn lookahead(&self) -> Option<char> {
        self.source
            .get(self.pos as usize..self.source_len as usize)
            .and_then(|rest| rest.chars().next())
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "len_utf8() is at most 4"
    )]
    fn advance(&mut self) {
        if let Some(c) = self.lookahead() {
            self.pos += c.len_utf8() as u32;
        }
    }

    #[inline]
    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    #[inline]
    fn set_result(&mut self, kind: TokenKind) {
        self.result = Some(kind);
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }
}
