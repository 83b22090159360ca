//! Half-open character ranges over the draft buffer.
//!
//! Offsets count Unicode scalar values, matching how the draft addresses its
//! text. The helpers here never fail; every invariant check elsewhere in the
//! crate is expressed in terms of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open range `[start, start + length)` of characters.
///
/// # Examples
///
/// ```
/// use draftline::draft::domain::TextRange;
///
/// let range = TextRange::new(4, 3);
/// assert_eq!(range.end(), 7);
/// assert!(range.contains(6));
/// assert!(!range.contains(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    start: usize,
    length: usize,
}

impl TextRange {
    /// Creates a range starting at `start` spanning `length` characters.
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Creates a range from its bounds. An inverted pair yields an empty range.
    #[must_use]
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Returns the first character offset covered by the range.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the number of characters covered by the range.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    /// Returns `true` when the range covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` when both ranges share at least one character.
    ///
    /// Adjacent ranges such as `[0, 3)` and `[3, 5)` do not overlap, and an
    /// empty range overlaps nothing.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end() && other.start < self.end()
    }

    /// Returns `true` when `point` lies inside the half-open range.
    #[must_use]
    pub const fn contains(&self, point: usize) -> bool {
        self.start <= point && point < self.end()
    }

    /// Returns `true` when `point` lies strictly between the bounds, so that
    /// splitting the text there would cut through the range.
    #[must_use]
    pub const fn splits_at(&self, point: usize) -> bool {
        self.start < point && point < self.end()
    }

    /// Translates both bounds by `delta`, saturating at zero.
    #[must_use]
    pub const fn shifted(&self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            length: self.length,
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Returns the character count of `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Maps a character offset to a byte index, clamping to the end of `text`.
pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(index, _)| index)
}

/// Returns the characters of `text` covered by `range`.
pub(crate) fn slice(text: &str, range: TextRange) -> &str {
    let start = byte_index(text, range.start());
    let end = byte_index(text, range.end());
    text.get(start..end).unwrap_or_default()
}
