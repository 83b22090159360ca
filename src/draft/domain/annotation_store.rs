//! Ordered, non-overlapping collection of annotations.

use serde::{Deserialize, Serialize};

use super::{Annotation, TextRange};
use crate::draft::error::OverlapError;

/// A single splice applied to the buffer: `removed` characters starting at
/// `start` were replaced with `inserted` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    /// First character offset touched by the edit.
    pub start: usize,
    /// Number of characters removed.
    pub removed: usize,
    /// Number of characters inserted.
    pub inserted: usize,
}

impl TextEdit {
    /// Describes an insertion of `inserted` characters at `start`.
    #[must_use]
    pub const fn insertion(start: usize, inserted: usize) -> Self {
        Self {
            start,
            removed: 0,
            inserted,
        }
    }

    /// Describes a removal of `removed` characters at `start`.
    #[must_use]
    pub const fn removal(start: usize, removed: usize) -> Self {
        Self {
            start,
            removed,
            inserted: 0,
        }
    }

    /// Describes replacing `removed` characters at `start` with `inserted`.
    #[must_use]
    pub const fn replacement(start: usize, removed: usize, inserted: usize) -> Self {
        Self {
            start,
            removed,
            inserted,
        }
    }

    /// Returns the change in buffer length.
    #[must_use]
    pub fn length_delta(&self) -> isize {
        let inserted = isize::try_from(self.inserted).unwrap_or(isize::MAX);
        let removed = isize::try_from(self.removed).unwrap_or(isize::MAX);
        inserted.saturating_sub(removed)
    }

    const fn removed_end(&self) -> usize {
        self.start.saturating_add(self.removed)
    }
}

/// Annotations sorted by start offset, pairwise disjoint.
///
/// # Examples
///
/// ```
/// use draftline::draft::domain::{Annotation, AnnotationStore, TextEdit, TextRange, UserId};
///
/// let mut store = AnnotationStore::new();
/// store
///     .insert(Annotation::user_mention(TextRange::new(4, 3), UserId::new("u")))
///     .expect("empty store accepts any annotation");
///
/// store.apply_edit(&TextEdit::insertion(0, 2));
/// assert_eq!(store.iter().next().map(Annotation::start), Some(6));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            annotations: Vec::new(),
        }
    }

    /// Builds a store from annotations in any order.
    ///
    /// # Errors
    ///
    /// Returns [`OverlapError`] when two of the annotations overlap.
    pub fn from_annotations(
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> Result<Self, OverlapError> {
        let mut store = Self::new();
        for annotation in annotations {
            store.insert(annotation)?;
        }
        Ok(store)
    }

    /// Inserts an annotation at its sorted position.
    ///
    /// Empty annotations are degenerate and are not stored.
    ///
    /// # Errors
    ///
    /// Returns [`OverlapError`] when the annotation overlaps a stored
    /// annotation. The store is left unchanged.
    pub fn insert(&mut self, annotation: Annotation) -> Result<(), OverlapError> {
        let requested = annotation.range();
        if let Some(existing) = self.overlapping(requested).next() {
            return Err(OverlapError {
                requested,
                existing: existing.clone(),
            });
        }
        if requested.is_empty() {
            return Ok(());
        }
        let position = self
            .annotations
            .partition_point(|stored| stored.start() < requested.start());
        self.annotations.insert(position, annotation);
        Ok(())
    }

    /// Removes and returns the annotation covering `offset`, if any.
    pub fn remove_at(&mut self, offset: usize) -> Option<Annotation> {
        let position = self
            .annotations
            .iter()
            .position(|annotation| annotation.range().contains(offset))?;
        Some(self.annotations.remove(position))
    }

    /// Removes and returns the first annotation covering `offset` that also
    /// satisfies `predicate`.
    pub fn remove_matching(
        &mut self,
        offset: usize,
        predicate: impl Fn(&Annotation) -> bool,
    ) -> Option<Annotation> {
        let position = self.annotations.iter().position(|annotation| {
            annotation.range().contains(offset) && predicate(annotation)
        })?;
        Some(self.annotations.remove(position))
    }

    /// Reconciles stored ranges with a buffer splice.
    ///
    /// Annotations ending at or before the edit are kept as they are,
    /// annotations starting at or after the removed span move by the length
    /// delta, and annotations whose text the edit touched are dropped. An
    /// edit that neither removes nor inserts leaves the store untouched.
    pub fn apply_edit(&mut self, edit: &TextEdit) {
        if edit.removed == 0 && edit.inserted == 0 {
            return;
        }
        let delta = edit.length_delta();
        self.annotations = self
            .annotations
            .iter()
            .filter_map(|annotation| {
                let range = annotation.range();
                let remapped = if range.end() <= edit.start {
                    range
                } else if range.start() >= edit.removed_end() {
                    range.shifted(delta)
                } else {
                    return None;
                };
                (!remapped.is_empty()).then(|| annotation.with_range(remapped))
            })
            .collect();
    }

    /// Drops annotations that no longer fit in a buffer of `text_len`
    /// characters.
    pub fn retain_within(&mut self, text_len: usize) {
        self.annotations
            .retain(|annotation| !annotation.range().is_empty() && annotation.range().end() <= text_len);
    }

    /// Returns the annotation covering `offset`, if any.
    #[must_use]
    pub fn covering(&self, offset: usize) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.range().contains(offset))
    }

    /// Returns stored annotations overlapping `range`.
    pub fn overlapping(&self, range: TextRange) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.range().overlaps(&range))
    }

    /// Returns `true` when inserting text at `offset` would cut through an
    /// annotation.
    #[must_use]
    pub fn splits_at(&self, offset: usize) -> bool {
        self.annotations
            .iter()
            .any(|annotation| annotation.range().splits_at(offset))
    }

    /// Iterates over annotations in ascending start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    /// Returns the annotations as a sorted slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the number of stored annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` when no annotations are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Appends an annotation known to start after every stored one.
    pub(crate) fn push_ordered(&mut self, annotation: Annotation) {
        debug_assert!(
            self.annotations
                .last()
                .is_none_or(|last| last.range().end() <= annotation.start()),
            "annotations must be appended in order",
        );
        self.annotations.push(annotation);
    }

    /// Removes every annotation.
    pub fn clear(&mut self) {
        self.annotations.clear();
    }
}

impl<'a> IntoIterator for &'a AnnotationStore {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
