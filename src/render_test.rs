use super::*;

// =============================================================
// Card row styling
// =============================================================

#[test]
fn name_row_is_bold() {
    assert_eq!(row_font(RowKind::Name), "bold 12px sans-serif");
}

#[test]
fn hitpoint_rows_share_the_plain_font() {
    assert_eq!(row_font(RowKind::Hitpoints { down: true }), row_font(RowKind::Hitpoints { down: false }));
    assert_eq!(row_font(RowKind::Hitpoints { down: false }), "12px sans-serif");
}

#[test]
fn conditions_are_italic() {
    assert_eq!(row_font(RowKind::Condition), "italic 12px sans-serif");
}

#[test]
fn downed_hitpoints_use_the_warning_color() {
    assert_eq!(row_color(RowKind::Hitpoints { down: true }), CARD_DOWN_TEXT);
    assert_eq!(row_color(RowKind::Hitpoints { down: false }), CARD_TEXT);
    assert_eq!(row_color(RowKind::Name), CARD_TEXT);
}
