#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{CARD_BASELINE_DESCENT, CARD_LINE_HEIGHT, CARD_MIN_WIDTH, CARD_PADDING, CARD_POINTER_GAP};

fn token_named(name: &str, conditions: &[&str]) -> Token {
    let mut t = Token::new();
    t.set_name(name);
    t.set_conditions(conditions.iter().map(|c| (*c).to_string()).collect());
    t
}

#[test]
fn fixed_advance_counts_chars() {
    assert_eq!(FixedAdvance(10.0).text_width(RowKind::Condition, "abc"), 30.0);
    assert_eq!(FixedAdvance(10.0).text_width(RowKind::Condition, "é"), 10.0);
    assert_eq!(FixedAdvance(10.0).text_width(RowKind::Condition, ""), 0.0);
}

#[test]
fn rows_are_name_hitpoints_then_conditions_in_order() {
    let t = token_named("Mira", &["Prone", "Blinded", "Prone"]);
    let card = InfoCard::layout(&t, Point::new(0.0, 0.0), &FixedAdvance::default());
    let texts: Vec<&str> = card.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Mira", "HP 8/10", "Prone", "Blinded", "Prone"]);
    assert_eq!(card.rows[0].kind, RowKind::Name);
    assert_eq!(card.rows[1].kind, RowKind::Hitpoints { down: false });
    assert_eq!(card.rows[4].kind, RowKind::Condition);
}

#[test]
fn card_sits_offset_from_anchor() {
    let t = Token::new();
    let card = InfoCard::layout(&t, Point::new(100.0, 50.0), &FixedAdvance::default());
    assert_eq!(card.rect.x, 100.0 + CARD_POINTER_GAP);
    assert_eq!(card.rect.y, 50.0 + CARD_POINTER_GAP);
}

#[test]
fn height_grows_with_conditions() {
    let short = InfoCard::layout(&token_named("A", &[]), Point::default(), &FixedAdvance::default());
    let long = InfoCard::layout(&token_named("A", &["X", "Y", "Z"]), Point::default(), &FixedAdvance::default());
    assert_eq!(short.rect.height, 2.0 * CARD_LINE_HEIGHT + 2.0 * CARD_PADDING);
    assert_eq!(long.rect.height - short.rect.height, 3.0 * CARD_LINE_HEIGHT);
}

#[test]
fn width_fits_longest_row() {
    let t = token_named("A very long adventurer name", &[]);
    let card = InfoCard::layout(&t, Point::default(), &FixedAdvance(10.0));
    assert_eq!(card.rect.width, 27.0 * 10.0 + 2.0 * CARD_PADDING);
}

/// Bold names run wider than the other rows.
struct BoldName;

impl TextMeasure for BoldName {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, kind: RowKind, text: &str) -> f64 {
        let advance = if kind == RowKind::Name { 12.0 } else { 7.0 };
        text.chars().count() as f64 * advance
    }
}

#[test]
fn width_uses_each_row_font() {
    let t = token_named("Bartholomew", &["Frightened"]);
    let card = InfoCard::layout(&t, Point::default(), &BoldName);
    assert_eq!(card.rect.width, 11.0 * 12.0 + 2.0 * CARD_PADDING);
    let name = &card.rows[0];
    assert!(name.baseline.x + BoldName.text_width(RowKind::Name, &name.text) <= card.rect.right() - CARD_PADDING);
}

#[test]
fn baselines_step_by_line_height() {
    let t = token_named("Bo", &["Stunned"]);
    let card = InfoCard::layout(&t, Point::new(0.0, 0.0), &FixedAdvance::default());
    let first = card.rect.y + CARD_PADDING + CARD_LINE_HEIGHT - CARD_BASELINE_DESCENT;
    for (i, row) in card.rows.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let expected = first + i as f64 * CARD_LINE_HEIGHT;
        assert_eq!(row.baseline.y, expected);
    }
}

#[test]
fn width_has_a_floor() {
    let t = token_named("A", &[]);
    let card = InfoCard::layout(&t, Point::default(), &FixedAdvance(1.0));
    assert_eq!(card.rect.width, CARD_MIN_WIDTH);
}

#[test]
fn every_baseline_lies_inside_the_card() {
    let t = token_named("Bo", &["Stunned", "Poisoned"]);
    let card = InfoCard::layout(&t, Point::new(33.0, 44.0), &FixedAdvance::default());
    for row in &card.rows {
        assert!(card.rect.contains(row.baseline), "{row:?} outside {:?}", card.rect);
    }
}

#[test]
fn unclamped_hitpoints_are_shown_verbatim() {
    let mut t = Token::new();
    t.set_max_hitpoints(10);
    t.set_current_hitpoints(-3);
    let card = InfoCard::layout(&t, Point::default(), &FixedAdvance::default());
    assert_eq!(card.rows[1].text, "HP -3/10");
    assert_eq!(card.rows[1].kind, RowKind::Hitpoints { down: true });

    t.set_current_hitpoints(25);
    let card = InfoCard::layout(&t, Point::default(), &FixedAdvance::default());
    assert_eq!(card.rows[1].text, "HP 25/10");
}
