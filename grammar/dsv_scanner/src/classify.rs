//! Look-ahead classification.
//!
//! Two total predicates over a single code point. Quotes, escapes, and
//! non-ASCII content are the structural grammar's business; the scanner
//! only needs to know whether the next code point closes a field.
//!
//! The separator set is the union of all three dialects' separators and is
//! deliberately not parameterized by the active dialect. A tab at the start
//! of an unquoted field in a comma-separated document therefore reads as a
//! field boundary.

/// Returns `true` if `c` separates fields in any supported dialect
/// (`,`, `\t`, or `|`).
#[inline]
pub const fn is_separator(c: char) -> bool {
    matches!(c, ',' | '\t' | '|')
}

/// Returns `true` if `c` terminates a line (`\n` or `\r`).
#[inline]
pub const fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Returns `true` if an empty field ends right before `c`.
///
/// End of input (`None`) is not a field boundary for the scanner: the
/// structural grammar owns that case so a trailing line terminator never
/// yields a phantom row.
#[inline]
pub const fn closes_empty_field(lookahead: Option<char>) -> bool {
    match lookahead {
        Some(c) => is_separator(c) || is_newline(c),
        None => false,
    }
}
