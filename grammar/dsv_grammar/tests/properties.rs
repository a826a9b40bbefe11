//! End-to-end behavior of empty-field detection through the grammar driver.

use dsv_grammar::{csv, tsv, Dialect, NodeKind, Parser, Span, Tree};
use dsv_scanner::{scan_empty_field, SourceCursor, TokenKind, ValidSymbols};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse(dialect: Dialect, source: &str) -> Tree {
    Parser::new(dialect).parse(source)
}

fn empty_field_spans(tree: &Tree) -> Vec<Span> {
    tree.rows()
        .iter()
        .flat_map(|row| row.fields())
        .filter(|field| field.is_empty_field())
        .map(|field| field.span())
        .collect()
}

#[test]
fn field_between_two_commas_is_zero_width_empty_field() {
    let tree = csv().parser().parse("a,,b");
    assert_eq!(
        tree.to_sexp(),
        "(document (row (field (text)) (field (empty_field)) (field (text))))"
    );
    assert_eq!(empty_field_spans(&tree), [Span::point(2)]);
}

#[test]
fn trailing_comma_at_end_of_input_yields_one_row() {
    let source = "a,b,";
    let tree = parse(Dialect::Comma, source);
    assert_eq!(tree.rows().len(), 1);
    assert_eq!(tree.records(source), [["a", "b", ""]]);
    assert_eq!(empty_field_spans(&tree), [Span::point(4)]);
}

#[test]
fn trailing_comma_before_newline_then_new_row() {
    let source = "a,b,\nc,d";
    let tree = parse(Dialect::Comma, source);
    assert_eq!(tree.records(source), [vec!["a", "b", ""], vec!["c", "d"]]);
    assert_eq!(empty_field_spans(&tree), [Span::point(4)]);
}

#[test]
fn trailing_comma_and_newline_at_end_adds_no_phantom_row() {
    let source = "a,b,\n";
    let tree = parse(Dialect::Comma, source);
    assert_eq!(tree.rows().len(), 1);
    assert_eq!(tree.records(source), [["a", "b", ""]]);
}

#[test]
fn no_empty_field_without_trailing_separator() {
    let tree = parse(Dialect::Comma, "a,b");
    assert!(empty_field_spans(&tree).is_empty());
    assert!(!tree.to_sexp().contains("empty_field"));
}

#[test]
fn consecutive_tabs_in_tab_dialect() {
    let source = "a\t\tb";
    let tree = tsv().parser().parse(source);
    assert_eq!(tree.records(source), [["a", "", "b"]]);
    assert_eq!(empty_field_spans(&tree), [Span::point(2)]);
}

#[test]
fn consecutive_pipes_in_pipe_dialect() {
    let source = "a||b";
    let tree = parse(Dialect::Pipe, source);
    assert_eq!(tree.records(source), [["a", "", "b"]]);
}

#[test]
fn tab_opening_a_comma_field_reads_as_boundary() {
    // The classifier matches every dialect's separator. In a comma document
    // a field starting with a tab is taken as empty, and the tab itself
    // then lands in an ERROR node.
    let source = "a,\tb";
    let tree = parse(Dialect::Comma, source);
    assert_eq!(
        tree.to_sexp(),
        "(document (row (field (text)) (field (empty_field)) (ERROR)))"
    );
    assert!(tree.has_error());
}

#[test]
fn tab_inside_a_comma_field_is_content() {
    let source = "a,b\tc";
    let tree = parse(Dialect::Comma, source);
    assert_eq!(tree.records(source), [["a", "b\tc"]]);
    assert!(!tree.has_error());
}

#[test]
fn rows_keep_their_field_count() {
    let source = "h1,h2,h3\n,,\nx,,\n,y,\n";
    let tree = parse(Dialect::Comma, source);
    let counts: Vec<usize> = tree.rows().iter().map(|r| r.fields().count()).collect();
    assert_eq!(counts, [3, 3, 3, 3]);
    assert_eq!(
        tree.rows()[1].fields().map(|f| f.children()[0].kind()).collect::<Vec<_>>(),
        [NodeKind::EmptyField; 3]
    );
}

proptest! {
    #[test]
    fn scan_twice_same_verdict(source in "[ab,|\t\r\n]{0,10}", offset in 0usize..11, bits in 0u8..4) {
        let valid = ValidSymbols::from_bits_truncate(bits);
        let pos = u32::try_from(offset.min(source.len())).unwrap_or(0);
        let mut first = SourceCursor::at(&source, pos);
        let mut second = SourceCursor::at(&source, pos);
        prop_assert_eq!(
            scan_empty_field(valid, &mut first),
            scan_empty_field(valid, &mut second)
        );
        prop_assert_eq!(first.result(), second.result());
    }

    #[test]
    fn error_sentinel_means_no_token(source in "[ab,|\t\r\n]{0,10}", offset in 0usize..11) {
        let pos = u32::try_from(offset.min(source.len())).unwrap_or(0);
        let mut cursor = SourceCursor::at(&source, pos);
        let valid = ValidSymbols::EMPTY_FIELD | ValidSymbols::ERROR_SENTINEL;
        prop_assert_eq!(scan_empty_field(valid, &mut cursor), None);
        prop_assert_eq!(cursor.result(), None);
    }

    #[test]
    fn parse_is_deterministic(source in "[ab,\"\r\n]{0,20}") {
        prop_assert_eq!(parse(Dialect::Comma, &source), parse(Dialect::Comma, &source));
    }

    #[test]
    fn empty_fields_are_zero_width_and_not_at_row_end_of_input(source in "[ab,\n]{0,20}") {
        let tree = parse(Dialect::Comma, &source);
        for span in empty_field_spans(&tree) {
            prop_assert_eq!(span.start, span.end);
        }
        // No row ever starts at end of input.
        let len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        for row in tree.rows() {
            prop_assert!(row.span().start < len);
        }
    }
}

#[test]
fn empty_field_token_name_matches_node_name() {
    assert_eq!(NodeKind::EmptyField.name(), TokenKind::EmptyField.name());
}
