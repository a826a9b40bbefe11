//! The empty-field scanner and the plugin contract it fulfils.
//!
//! # Contract
//!
//! A grammar engine drives an external scanner through five operations:
//! `create`, `destroy`, `serialize`, `deserialize`, and `scan`. The engine
//! snapshots scanner state with `serialize` after tokens it may later
//! re-lex and restores it with `deserialize` before re-lexing. The engine's
//! loader is not part of this crate; [`Scanner`] is only the capability it
//! calls.
//!
//! # Decision Procedure
//!
//! ```text
//! ERROR_SENTINEL valid?  -> decline (parser is recovering)
//! EMPTY_FIELD not valid? -> decline (grammar decides *where*)
//! mark_end()                (token is zero-width from here on)
//! look-ahead separator?  -> EmptyField
//! look-ahead newline?    -> EmptyField
//! anything else / EOF    -> decline
//! ```

use crate::classify::closes_empty_field;
use crate::cursor::LexerCursor;
use crate::token::{TokenKind, ValidSymbols};

/// Bytes the engine reserves for one serialized scanner state.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// External scanner plugin contract.
///
/// Implementations must make `scan` a pure function of the cursor position
/// and the valid-symbol set; the engine replays and skips scanned regions
/// on that assumption.
pub trait Scanner {
    /// Create a fresh scanner for one parse.
    fn create() -> Self
    where
        Self: Sized;

    /// Release the scanner at the end of a parse.
    fn destroy(self)
    where
        Self: Sized,
    {
    }

    /// Write the scanner's state into `buffer` and return the byte count.
    fn serialize(&self, buffer: &mut [u8]) -> usize;

    /// Restore state previously written by [`serialize`](Self::serialize).
    ///
    /// An empty buffer means "reset to the initial state".
    fn deserialize(&mut self, buffer: &[u8]);

    /// Try to recognize an external token at the cursor.
    ///
    /// Returns `true` and records the kind on the cursor on a match.
    fn scan(&mut self, cursor: &mut dyn LexerCursor, valid: ValidSymbols) -> bool;
}

/// Stateless scanner recognizing zero-width empty fields.
///
/// One value serves every dialect; see [`Dialect::scanner`](crate::Dialect::scanner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmptyFieldScanner;

/// The handle carries nothing, so it can never fall out of sync.
const _: () = assert!(std::mem::size_of::<EmptyFieldScanner>() == 0);

impl Scanner for EmptyFieldScanner {
    fn create() -> Self {
        EmptyFieldScanner
    }

    fn serialize(&self, _buffer: &mut [u8]) -> usize {
        0
    }

    fn deserialize(&mut self, _buffer: &[u8]) {}

    fn scan(&mut self, cursor: &mut dyn LexerCursor, valid: ValidSymbols) -> bool {
        scan_empty_field(valid, cursor).is_some()
    }
}

/// Decide whether an empty field ends at the cursor.
///
/// On a match the cursor's token end is the position it had on entry and
/// its result is [`TokenKind::EmptyField`]. The cursor is never advanced.
#[inline]
pub fn scan_empty_field<C>(valid: ValidSymbols, cursor: &mut C) -> Option<TokenKind>
where
    C: LexerCursor + ?Sized,
{
    if valid.in_error_recovery() {
        return None;
    }
    if !valid.accepts(TokenKind::EmptyField) {
        return None;
    }

    cursor.mark_end();

    if closes_empty_field(cursor.lookahead()) {
        cursor.set_result(TokenKind::EmptyField);
        return Some(TokenKind::EmptyField);
    }
    None
}

#[cfg(test)]
mod tests;
