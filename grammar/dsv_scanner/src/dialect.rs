//! Dialect registrations.
//!
//! The comma-, pipe-, and tab-separated grammars each register an external
//! scanner under their own name. All three get the same
//! [`EmptyFieldScanner`]: the look-ahead classifier already accepts every
//! dialect's separator, so there is nothing to configure per dialect.

use std::fmt;
use std::str::FromStr;

use crate::scanner::{EmptyFieldScanner, Scanner};

/// A delimiter-separated value convention.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Dialect {
    /// Comma-separated values (`.csv`).
    #[default]
    Comma,
    /// Pipe-separated values (`.psv`).
    Pipe,
    /// Tab-separated values (`.tsv`).
    Tab,
}

/// Error when a dialect name or file extension is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    #[error("unknown dialect `{0}` (expected one of: csv, psv, tsv)")]
    UnknownName(String),
    #[error("no dialect is associated with the `.{0}` extension")]
    UnknownExtension(String),
}

impl Dialect {
    /// All dialects, in registration order.
    pub const ALL: [Dialect; 3] = [Dialect::Comma, Dialect::Pipe, Dialect::Tab];

    /// Registration name, also the conventional file extension.
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Comma => "csv",
            Dialect::Pipe => "psv",
            Dialect::Tab => "tsv",
        }
    }

    /// The character the dialect's structural grammar separates fields with.
    pub const fn separator(self) -> char {
        match self {
            Dialect::Comma => ',',
            Dialect::Pipe => '|',
            Dialect::Tab => '\t',
        }
    }

    /// [`separator`](Self::separator) as a byte, for byte-level scanning.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "every separator is ASCII"
    )]
    pub const fn separator_byte(self) -> u8 {
        self.separator() as u8
    }

    /// Resolve a dialect from a file extension (case-insensitive, no dot).
    pub fn from_extension(extension: &str) -> Result<Self, DialectError> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(extension))
            .ok_or_else(|| DialectError::UnknownExtension(extension.to_owned()))
    }

    /// The external scanner registered for this dialect.
    ///
    /// Every dialect shares one implementation.
    pub fn scanner(self) -> EmptyFieldScanner {
        EmptyFieldScanner::create()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "comma" => Ok(Dialect::Comma),
            "psv" | "pipe" => Ok(Dialect::Pipe),
            "tsv" | "tab" => Ok(Dialect::Tab),
            _ => Err(DialectError::UnknownName(s.to_owned())),
        }
    }
}

/// External scanner entry point for the comma-separated grammar.
pub fn csv_scanner() -> EmptyFieldScanner {
    Dialect::Comma.scanner()
}

/// External scanner entry point for the pipe-separated grammar.
pub fn psv_scanner() -> EmptyFieldScanner {
    Dialect::Pipe.scanner()
}

/// External scanner entry point for the tab-separated grammar.
pub fn tsv_scanner() -> EmptyFieldScanner {
    Dialect::Tab.scanner()
}
