//! Empty-field scanner for delimiter-separated value grammars.
//!
//! A declarative grammar cannot express a rule that matches the empty
//! string, so an empty field (`a,,b`, `a,b,\n`) has no token of its own.
//! This crate supplies that token: a zero-width `EmptyField` produced by
//! an external scanner that the grammar engine calls whenever its parse
//! table allows an empty field at the current position.
//!
//! # Layers
//!
//! - [`classify`]: look-ahead predicates (separator, newline)
//! - [`TokenKind`] / [`ValidSymbols`]: the external token vocabulary
//! - [`LexerCursor`]: the engine-owned cursor the scanner observes and marks
//! - [`Scanner`] / [`EmptyFieldScanner`]: the plugin contract and its
//!   single stateless implementation
//! - [`Dialect`]: comma, pipe, and tab registrations sharing one scanner
//!
//! # Statelessness
//!
//! [`EmptyFieldScanner`] is zero-sized. Serialization always writes zero
//! bytes and deserialization of any buffer restores the same value, so
//! incremental and speculative re-parses can never observe stale scanner
//! state.

pub mod classify;
mod cursor;
mod dialect;
mod scanner;
mod token;

pub use classify::{is_newline, is_separator};
pub use cursor::{LexerCursor, SourceCursor};
pub use dialect::{csv_scanner, psv_scanner, tsv_scanner, Dialect, DialectError};
pub use scanner::{scan_empty_field, EmptyFieldScanner, Scanner, SERIALIZATION_BUFFER_SIZE};
pub use token::{TokenKind, ValidSymbols};
