//! Per-dialect language objects.
//!
//! Each dialect is exported as one opaque object bundling its structural
//! grammar with the shared empty-field scanner. Hosts that pass these
//! objects across a type-erased boundary tag them with [`LANGUAGE_TYPE_TAG`]
//! and verify the tag before use; marshalling into any particular host
//! runtime is left to the host.

use std::fmt;

use dsv_scanner::{Dialect, EmptyFieldScanner, TokenKind};

use crate::error::LanguageError;
use crate::parser::Parser;
use crate::syntax::NodeKind;

/// 128-bit tag identifying a language object.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeTag {
    pub lower: u64,
    pub upper: u64,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}:{:016X}", self.lower, self.upper)
    }
}

/// BLAKE2 hash of `"tree-sitter", "language"`, shared by every grammar
/// so hosts can recognize language objects regardless of which grammar
/// produced them.
pub const LANGUAGE_TYPE_TAG: TypeTag = TypeTag {
    lower: 0x8AF2_E521_2AD5_8ABF,
    upper: 0xD500_6CAD_83AB_BA16,
};

/// Structural grammar plus external scanner for one dialect.
#[derive(Debug, PartialEq, Eq)]
pub struct Language {
    dialect: Dialect,
}

static CSV: Language = Language {
    dialect: Dialect::Comma,
};
static PSV: Language = Language {
    dialect: Dialect::Pipe,
};
static TSV: Language = Language {
    dialect: Dialect::Tab,
};

/// Node kinds every dialect's grammar can produce.
const NODE_KINDS: [NodeKind; 7] = [
    NodeKind::Document,
    NodeKind::Row,
    NodeKind::Field,
    NodeKind::Text,
    NodeKind::QuotedText,
    NodeKind::EmptyField,
    NodeKind::Error,
];

impl Language {
    /// The language registered for `dialect`.
    pub fn for_dialect(dialect: Dialect) -> &'static Language {
        match dialect {
            Dialect::Comma => &CSV,
            Dialect::Pipe => &PSV,
            Dialect::Tab => &TSV,
        }
    }

    pub fn name(&self) -> &'static str {
        self.dialect.name()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// External tokens in declaration order, as the scanner sees them.
    pub fn external_tokens(&self) -> [TokenKind; 2] {
        TokenKind::ALL
    }

    pub fn node_kinds(&self) -> &'static [NodeKind] {
        &NODE_KINDS
    }

    /// A fresh external scanner for this language.
    pub fn scanner(&self) -> EmptyFieldScanner {
        self.dialect.scanner()
    }

    /// A parser for this language.
    pub fn parser(&self) -> Parser {
        Parser::new(self.dialect)
    }

    /// Wrap this language for a type-erased host boundary.
    pub fn export(&'static self) -> LanguageObject {
        LanguageObject {
            tag: LANGUAGE_TYPE_TAG,
            language: self,
        }
    }
}

/// Comma-separated values.
pub fn csv() -> &'static Language {
    &CSV
}

/// Pipe-separated values.
pub fn psv() -> &'static Language {
    &PSV
}

/// Tab-separated values.
pub fn tsv() -> &'static Language {
    &TSV
}

/// Opaque, type-tagged language object as handed to a host.
#[derive(Copy, Clone, Debug)]
pub struct LanguageObject {
    tag: TypeTag,
    language: &'static Language,
}

impl LanguageObject {
    /// Rebuild an object from a tag a host carried alongside it.
    pub fn from_parts(tag: TypeTag, language: &'static Language) -> Self {
        LanguageObject { tag, language }
    }

    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Unwrap the language after checking the tag.
    pub fn language(&self) -> Result<&'static Language, LanguageError> {
        if self.tag == LANGUAGE_TYPE_TAG {
            Ok(self.language)
        } else {
            Err(LanguageError::TypeTagMismatch {
                expected: LANGUAGE_TYPE_TAG,
                found: self.tag,
            })
        }
    }
}

/// Every language object keyed by dialect name, in registration order.
pub fn exports() -> [(&'static str, LanguageObject); 3] {
    Dialect::ALL.map(|dialect| {
        let language = Language::for_dialect(dialect);
        (language.name(), language.export())
    })
}
