use super::*;
use crate::cursor::SourceCursor;
use proptest::prelude::*;

/// Cursor that records every interaction, for checking what the scanner
/// touches.
#[derive(Debug, Default)]
struct RecordingCursor {
    lookahead: Option<char>,
    advances: usize,
    marks: usize,
    peeks: std::cell::Cell<usize>,
    result: Option<TokenKind>,
}

impl RecordingCursor {
    fn before(lookahead: Option<char>) -> Self {
        Self {
            lookahead,
            ..Self::default()
        }
    }
}

impl LexerCursor for RecordingCursor {
    fn lookahead(&self) -> Option<char> {
        self.peeks.set(self.peeks.get() + 1);
        self.lookahead
    }

    fn advance(&mut self) {
        self.advances += 1;
    }

    fn mark_end(&mut self) {
        self.marks += 1;
    }

    fn set_result(&mut self, kind: TokenKind) {
        self.result = Some(kind);
    }
}

fn scan_at(source: &str, pos: u32, valid: ValidSymbols) -> (Option<TokenKind>, SourceCursor<'_>) {
    let mut cursor = SourceCursor::at(source, pos);
    cursor.begin_token();
    let verdict = scan_empty_field(valid, &mut cursor);
    (verdict, cursor)
}

// === Decision Procedure ===

#[test]
fn consecutive_commas_yield_empty_field() {
    // a,,b: the boundary between the commas.
    let (verdict, cursor) = scan_at("a,,b", 2, ValidSymbols::EMPTY_FIELD);
    assert_eq!(verdict, Some(TokenKind::EmptyField));
    assert_eq!(cursor.result(), Some(TokenKind::EmptyField));
    assert_eq!(cursor.token_start(), 2);
    assert_eq!(cursor.token_end(), 2);
}

#[test]
fn consecutive_tabs_yield_empty_field() {
    let (verdict, _) = scan_at("a\t\tb", 2, ValidSymbols::EMPTY_FIELD);
    assert_eq!(verdict, Some(TokenKind::EmptyField));
}

#[test]
fn separator_before_newline_yields_empty_field() {
    assert_eq!(scan_at("a,b,\n", 4, ValidSymbols::EMPTY_FIELD).0, Some(TokenKind::EmptyField));
    assert_eq!(scan_at("a,b,\r\n", 4, ValidSymbols::EMPTY_FIELD).0, Some(TokenKind::EmptyField));
}

#[test]
fn leading_separator_yields_empty_field() {
    assert_eq!(scan_at(",b", 0, ValidSymbols::EMPTY_FIELD).0, Some(TokenKind::EmptyField));
}

#[test]
fn end_of_input_declines() {
    let (verdict, cursor) = scan_at("a,b,", 4, ValidSymbols::EMPTY_FIELD);
    assert_eq!(verdict, None);
    assert_eq!(cursor.result(), None);
}

#[test]
fn field_content_declines() {
    assert_eq!(scan_at("a,b", 2, ValidSymbols::EMPTY_FIELD).0, None);
    assert_eq!(scan_at("a,\"b\"", 2, ValidSymbols::EMPTY_FIELD).0, None);
    assert_eq!(scan_at("a, b", 2, ValidSymbols::EMPTY_FIELD).0, None);
}

#[test]
fn declines_when_empty_field_not_valid() {
    let mut cursor = RecordingCursor::before(Some(','));
    assert_eq!(scan_empty_field(ValidSymbols::empty(), &mut cursor), None);
    // Legality is checked before any input is touched.
    assert_eq!(cursor.marks, 0);
    assert_eq!(cursor.peeks.get(), 0);
}

#[test]
fn declines_during_error_recovery() {
    for valid in [ValidSymbols::ERROR_SENTINEL, ValidSymbols::all()] {
        let mut cursor = RecordingCursor::before(Some(','));
        assert_eq!(scan_empty_field(valid, &mut cursor), None);
        assert_eq!(cursor.marks, 0);
        assert_eq!(cursor.peeks.get(), 0);
        assert_eq!(cursor.result, None);
    }
}

#[test]
fn marks_end_before_inspecting_lookahead() {
    let mut cursor = RecordingCursor::before(Some('x'));
    assert_eq!(scan_empty_field(ValidSymbols::EMPTY_FIELD, &mut cursor), None);
    assert_eq!(cursor.marks, 1);
    assert_eq!(cursor.peeks.get(), 1);
}

#[test]
fn never_advances() {
    for lookahead in [Some(','), Some('\n'), Some('x'), None] {
        let mut cursor = RecordingCursor::before(lookahead);
        let _ = scan_empty_field(ValidSymbols::EMPTY_FIELD, &mut cursor);
        assert_eq!(cursor.advances, 0, "advanced on {lookahead:?}");
    }
}

// === Plugin Contract ===

#[test]
fn scanner_handle_is_zero_sized() {
    assert_eq!(std::mem::size_of::<EmptyFieldScanner>(), 0);
}

#[test]
fn serialize_writes_nothing() {
    let scanner = EmptyFieldScanner::create();
    let mut buffer = [0xAAu8; SERIALIZATION_BUFFER_SIZE];
    assert_eq!(scanner.serialize(&mut buffer), 0);
    assert!(buffer.iter().all(|&b| b == 0xAA));
}

#[test]
fn serialize_into_empty_buffer() {
    assert_eq!(EmptyFieldScanner::create().serialize(&mut []), 0);
}

#[test]
fn deserialize_restores_same_state_from_any_buffer() {
    let fresh = EmptyFieldScanner::create();
    for buffer in [&[][..], &[0u8][..], &[1, 2, 3][..], &[0xFF; 64][..]] {
        let mut scanner = EmptyFieldScanner::create();
        scanner.deserialize(buffer);
        assert_eq!(scanner, fresh);
    }
}

#[test]
fn trait_scan_records_result_on_cursor() {
    let mut scanner = EmptyFieldScanner::create();
    let mut cursor = SourceCursor::at("a||b", 2);
    cursor.begin_token();
    assert!(scanner.scan(&mut cursor, ValidSymbols::EMPTY_FIELD));
    assert_eq!(cursor.result(), Some(TokenKind::EmptyField));
    assert_eq!(cursor.token_end(), 2);
    scanner.destroy();
}

#[test]
fn scanner_works_through_trait_object() {
    let mut scanner = EmptyFieldScanner::create();
    let mut cursor = SourceCursor::at("a,\n", 2);
    let dyn_cursor: &mut dyn LexerCursor = &mut cursor;
    assert!(scanner.scan(dyn_cursor, ValidSymbols::EMPTY_FIELD));
}

fn assert_send_sync<T: Send + Sync + Copy>() {}

#[test]
fn scanner_is_shareable_across_threads() {
    assert_send_sync::<EmptyFieldScanner>();
}

// === Properties ===

fn valid_symbols() -> impl Strategy<Value = ValidSymbols> {
    (0..=ValidSymbols::all().bits()).prop_map(ValidSymbols::from_bits_truncate)
}

proptest! {
    #[test]
    fn scan_is_deterministic(source in "[a-c,|\t\r\n\"]{0,12}", offset in 0usize..13, valid in valid_symbols()) {
        let pos = u32::try_from(offset.min(source.len())).unwrap_or(0);
        let (first, a) = scan_at(&source, pos, valid);
        let (second, b) = scan_at(&source, pos, valid);
        prop_assert_eq!(first, second);
        prop_assert_eq!(a.result(), b.result());
        prop_assert_eq!(a.token_end(), b.token_end());
    }

    #[test]
    fn error_sentinel_always_abstains(lookahead in proptest::option::of(any::<char>()), empty_valid in any::<bool>()) {
        let mut valid = ValidSymbols::ERROR_SENTINEL;
        valid.set(ValidSymbols::EMPTY_FIELD, empty_valid);
        let mut cursor = RecordingCursor::before(lookahead);
        prop_assert_eq!(scan_empty_field(valid, &mut cursor), None);
        prop_assert_eq!(cursor.result, None);
    }

    #[test]
    fn matches_are_zero_width(source in "[a-c,|\t\n]{0,12}", offset in 0usize..13) {
        let pos = u32::try_from(offset.min(source.len())).unwrap_or(0);
        let (verdict, cursor) = scan_at(&source, pos, ValidSymbols::EMPTY_FIELD);
        if verdict.is_some() {
            prop_assert_eq!(cursor.token_end(), pos);
            prop_assert_eq!(cursor.pos(), pos);
        }
    }
}
