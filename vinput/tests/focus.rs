mod common;

use common::FakeControl;
use vinput::focus::place_caret_at_end;
use vinput::value::Kind;

#[test]
fn test_caret_moves_to_end_for_text() {
    let mut control = FakeControl::with_selection();
    assert_eq!(place_caret_at_end(Kind::Text, "hello", &mut control), Some(5));
    assert_eq!(control.selection, Some((5, 5)));
}

#[test]
fn test_caret_counts_characters() {
    let mut control = FakeControl::with_selection();
    assert_eq!(place_caret_at_end(Kind::Password, "пароль", &mut control), Some(6));
}

#[test]
fn test_caret_on_empty_text() {
    let mut control = FakeControl::with_selection();
    assert_eq!(place_caret_at_end(Kind::Text, "", &mut control), Some(0));
}

#[test]
fn test_no_caret_for_numeric_like_kinds() {
    for kind in [Kind::Number, Kind::Color, Kind::Range] {
        let mut control = FakeControl::with_selection();
        assert_eq!(place_caret_at_end(kind, "12", &mut control), None);
        assert_eq!(control.selection, None);
    }
}

#[test]
fn test_control_without_selection_support() {
    let mut control = FakeControl::default();
    assert_eq!(place_caret_at_end(Kind::Text, "abc", &mut control), None);
    assert_eq!(control.selection, None);
}
