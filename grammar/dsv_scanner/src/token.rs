//! External token vocabulary.
//!
//! The grammar declares its external tokens in a fixed order, and the
//! engine hands the scanner a `bool` per token in that order. The
//! discriminants of [`TokenKind`] are that order.

use bitflags::bitflags;
use std::fmt;

/// Token kinds produced by, or signalled to, the external scanner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    /// Zero-width token marking a field with no characters.
    EmptyField = 0,
    /// Never produced. Valid only while the parser is recovering from an
    /// error, which is how the scanner learns it should stay out of the way.
    ErrorSentinel = 1,
}

impl TokenKind {
    /// All kinds, in external-token order.
    pub const ALL: [TokenKind; 2] = [TokenKind::EmptyField, TokenKind::ErrorSentinel];

    /// Position of this kind in the engine's valid-symbol array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by its external-token index.
    pub const fn from_index(index: usize) -> Option<TokenKind> {
        match index {
            0 => Some(TokenKind::EmptyField),
            1 => Some(TokenKind::ErrorSentinel),
            _ => None,
        }
    }

    /// Node name used by the grammar for this token.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::EmptyField => "empty_field",
            TokenKind::ErrorSentinel => "_error_sentinel",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Token kinds the parser currently accepts at the cursor position.
    ///
    /// The scanner only reads membership; which bits are set is decided
    /// entirely by the grammar's parse table.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ValidSymbols: u8 {
        /// An empty field is grammatically legal here.
        const EMPTY_FIELD = 1 << 0;
        /// The parser is in error recovery.
        const ERROR_SENTINEL = 1 << 1;
    }
}

impl ValidSymbols {
    /// Set containing exactly `kind`.
    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self::from_bits_truncate(1 << kind.index())
    }

    /// Check membership of a single kind.
    #[inline]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        self.contains(Self::single(kind))
    }

    /// Build a set from the engine's per-token `bool` array.
    ///
    /// Entries beyond the known kinds are ignored; kinds past the end of a
    /// short array are treated as not valid.
    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .enumerate()
            .filter(|&(_, &valid)| valid)
            .filter_map(|(i, _)| TokenKind::from_index(i))
            .fold(Self::empty(), |set, kind| set | Self::single(kind))
    }

    /// The inverse of [`from_flags`](Self::from_flags), in external-token order.
    pub fn to_flags(self) -> [bool; TokenKind::ALL.len()] {
        TokenKind::ALL.map(|kind| self.accepts(kind))
    }

    /// Whether the parser is in error recovery.
    #[inline]
    pub const fn in_error_recovery(self) -> bool {
        self.accepts(TokenKind::ErrorSentinel)
    }
}

impl From<TokenKind> for ValidSymbols {
    fn from(kind: TokenKind) -> Self {
        Self::single(kind)
    }
}
