//! Structural grammar and language objects for delimiter-separated values.
//!
//! Drives [`dsv_scanner`]'s empty-field scanner the way a grammar engine
//! does: it owns the lexer cursor, decides where an empty field is legal,
//! asks the scanner whether one is present, and builds a syntax tree.
//!
//! ```
//! use dsv_grammar::{csv, NodeKind};
//!
//! let source = "a,,b\n";
//! let tree = csv().parser().parse(source);
//! assert_eq!(tree.to_sexp(), "(document (row (field (text)) (field (empty_field)) (field (text))))");
//! assert_eq!(tree.rows().len(), 1);
//! assert_eq!(tree.rows()[0].children()[1].children()[0].kind(), NodeKind::EmptyField);
//! ```

mod error;
mod incremental;
mod language;
mod options;
mod parser;
mod span;
mod syntax;

pub use dsv_scanner::Dialect;
pub use error::{LanguageError, ParseError};
pub use incremental::{Edit, ReparseStats};
pub use language::{
    csv, exports, psv, tsv, Language, LanguageObject, TypeTag, LANGUAGE_TYPE_TAG,
};
pub use options::{ParseOptions, DEFAULT_MAX_ERRORS};
pub use parser::Parser;
pub use span::Span;
pub use syntax::{Node, NodeKind, RowCheckpoint, Tree};
