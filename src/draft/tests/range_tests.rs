//! Unit tests for character ranges.

use crate::draft::domain::TextRange;
use rstest::rstest;

#[rstest]
#[case(TextRange::new(0, 3), TextRange::new(2, 4), true)]
#[case(TextRange::new(0, 3), TextRange::new(3, 2), false)]
#[case(TextRange::new(5, 2), TextRange::new(0, 5), false)]
#[case(TextRange::new(1, 10), TextRange::new(4, 1), true)]
#[case(TextRange::new(2, 0), TextRange::new(0, 5), false)]
fn overlap_is_half_open(#[case] left: TextRange, #[case] right: TextRange, #[case] expected: bool) {
    assert_eq!(left.overlaps(&right), expected);
    assert_eq!(right.overlaps(&left), expected);
}

#[rstest]
fn splits_at_excludes_bounds() {
    let range = TextRange::new(4, 3);

    assert!(!range.splits_at(4));
    assert!(range.splits_at(5));
    assert!(range.splits_at(6));
    assert!(!range.splits_at(7));
}

#[rstest]
fn shifted_saturates_at_zero() {
    let range = TextRange::new(2, 3);

    assert_eq!(range.shifted(4), TextRange::new(6, 3));
    assert_eq!(range.shifted(-5), TextRange::new(0, 3));
}

#[rstest]
fn inverted_bounds_yield_empty_range() {
    let range = TextRange::from_bounds(7, 3);

    assert!(range.is_empty());
    assert_eq!(range.start(), 7);
}

#[rstest]
fn display_uses_half_open_notation() {
    assert_eq!(TextRange::new(4, 14).to_string(), "[4, 18)");
}
