//! Error types for draft editing and sending.
//!
//! Uses `thiserror` for typed variants that callers can inspect. Every
//! editing error is raised before the buffer is touched, so a failed call
//! leaves the draft exactly as it was.

use thiserror::Error;

use super::domain::{Annotation, ChannelId, TextRange};
use super::ports::sender::SendError;

/// Result type for draft operations.
pub type DraftResult<T> = Result<T, DraftError>;

/// An offset or length fell outside the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("range starting at {offset} with length {length} is outside a buffer of {text_len} characters")]
pub struct RangeError {
    /// The requested offset.
    pub offset: usize,
    /// The requested length.
    pub length: usize,
    /// The buffer length at the time of the call.
    pub text_len: usize,
}

impl RangeError {
    /// Creates a range error.
    #[must_use]
    pub const fn new(offset: usize, length: usize, text_len: usize) -> Self {
        Self {
            offset,
            length,
            text_len,
        }
    }
}

/// A new annotation would overlap one that is already stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("annotation at {requested} overlaps existing annotation at {}", .existing.range())]
pub struct OverlapError {
    /// The rejected range.
    pub requested: TextRange,
    /// The stored annotation it collides with.
    pub existing: Annotation,
}

/// Input rejected by draft validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The link target is not a syntactically valid URL.
    #[error("invalid link URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL text.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Linked text must contain at least one character.
    #[error("linked text cannot be empty")]
    EmptyLinkText,

    /// The annotation would overlap an existing one.
    #[error(transparent)]
    Overlap(#[from] OverlapError),

    /// A suggestion no longer matches the buffer it was computed for.
    #[error("suggestion for '{replace_from}' at {offset} no longer matches the draft")]
    StaleSuggestion {
        /// Trigger offset recorded by the suggestion.
        offset: usize,
        /// Trigger text recorded by the suggestion.
        replace_from: String,
    },
}

impl ValidationError {
    /// Creates an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by draft operations.
#[derive(Debug, Clone, Error)]
pub enum DraftError {
    /// An offset or length was outside the buffer.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The edit was rejected by validation rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A quoted message belongs to a different channel.
    #[error("cannot quote a message from channel {actual} in a draft for channel {expected}")]
    CrossChannel {
        /// The channel the draft is bound to.
        expected: ChannelId,
        /// The channel of the quoted message.
        actual: ChannelId,
    },

    /// The buffer is empty or whitespace-only.
    #[error("message text cannot be empty")]
    EmptyMessage,

    /// The send port rejected or failed to deliver the message.
    #[error("send failed: {0}")]
    Send(#[from] SendError),
}

impl DraftError {
    /// Returns `true` for caller offset/length mistakes.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    /// Returns `true` for validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<OverlapError> for DraftError {
    fn from(error: OverlapError) -> Self {
        Self::Validation(ValidationError::Overlap(error))
    }
}
