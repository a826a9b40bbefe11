//! Concrete syntax tree.
//!
//! ```text
//! document
//! └── row*
//!     ├── field
//!     │   └── text | quoted_text | empty_field
//!     └── ERROR?
//! ```
//!
//! Nodes hold spans, not text. Pass the parsed source to
//! [`Node::text`] or [`Node::field_value`] to read contents.

use std::borrow::Cow;
use std::fmt;

use dsv_scanner::{Dialect, TokenKind};

use crate::error::ParseError;
use crate::span::Span;

/// Kind of a syntax node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    Document,
    Row,
    Field,
    /// Unquoted field content.
    Text,
    /// Quoted field content, quotes included.
    QuotedText,
    /// Zero-width field with no content.
    EmptyField,
    /// Input the grammar could not place.
    Error,
}

impl NodeKind {
    /// Node name as it appears in S-expressions.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Row => "row",
            NodeKind::Field => "field",
            NodeKind::Text => "text",
            NodeKind::QuotedText => "quoted_text",
            NodeKind::EmptyField => TokenKind::EmptyField.name(),
            NodeKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn leaf(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            children: Vec::new(),
        }
    }

    pub(crate) fn branch(kind: NodeKind, span: Span, children: Vec<Node>) -> Self {
        Node {
            kind,
            span,
            children,
        }
    }

    /// A field wrapping a single content node.
    pub(crate) fn field(content: Node) -> Self {
        Node::branch(NodeKind::Field, content.span, vec![content])
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether this node or any descendant is an `ERROR` node.
    pub fn has_error(&self) -> bool {
        self.kind == NodeKind::Error || self.children.iter().any(Node::has_error)
    }

    /// Source text covered by this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.to_range()).unwrap_or_default()
    }

    /// Fields of a row, in order. Empty for any other kind.
    pub fn fields(&self) -> impl Iterator<Item = &Node> {
        let is_row = self.kind == NodeKind::Row;
        self.children
            .iter()
            .filter(move |child| is_row && child.kind == NodeKind::Field)
    }

    /// Whether this is a field holding an empty field token.
    pub fn is_empty_field(&self) -> bool {
        self.kind == NodeKind::Field
            && self
                .children
                .first()
                .is_some_and(|c| c.kind == NodeKind::EmptyField)
    }

    /// Decoded value of a field node: unquoted text verbatim, quoted text
    /// with the surrounding quotes removed and `""` collapsed to `"`, and
    /// `""` for an empty field. `None` for non-field nodes.
    pub fn field_value<'s>(&self, source: &'s str) -> Option<Cow<'s, str>> {
        if self.kind != NodeKind::Field {
            return None;
        }
        let content = self.children.first()?;
        let raw = content.text(source);
        let value = match content.kind {
            NodeKind::EmptyField => Cow::Borrowed(""),
            NodeKind::QuotedText => unquote(raw),
            _ => Cow::Borrowed(raw),
        };
        Some(value)
    }

    /// Render as an S-expression of node names.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind.name());
        for child in &self.children {
            out.push(' ');
            child.write_sexp(out);
        }
        out.push(')');
    }
}

fn unquote(raw: &str) -> Cow<'_, str> {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    if inner.contains("\"\"") {
        Cow::Owned(inner.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(inner)
    }
}

/// Scanner state recorded at the start of a row.
///
/// The incremental re-parser resumes from these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowCheckpoint {
    /// Byte offset where the row starts.
    pub start: u32,
    /// Serialized scanner state at `start`.
    pub scanner_state: Box<[u8]>,
}

/// Result of parsing one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    pub(crate) dialect: Dialect,
    pub(crate) root: Node,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) checkpoints: Vec<RowCheckpoint>,
}

impl Tree {
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The `document` node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Rows in document order.
    pub fn rows(&self) -> &[Node] {
        self.root.children()
    }

    /// Recorded diagnostics, capped by `ParseOptions::max_errors`.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty() || self.root.has_error()
    }

    /// One checkpoint per row, in row order.
    pub fn checkpoints(&self) -> &[RowCheckpoint] {
        &self.checkpoints
    }

    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }

    /// Decoded field values, row by row.
    pub fn records<'s>(&self, source: &'s str) -> Vec<Vec<Cow<'s, str>>> {
        self.rows()
            .iter()
            .map(|row| row.fields().filter_map(|f| f.field_value(source)).collect())
            .collect()
    }
}
