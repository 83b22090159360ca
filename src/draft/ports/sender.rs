//! Message send port.

use async_trait::async_trait;
use thiserror::Error;

use crate::draft::domain::{MessageId, OutgoingMessage};

/// Result type for send operations.
pub type SendResult<T> = Result<T, SendError>;

/// Port for publishing a finished draft.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Publishes `message` and returns the identifier it was assigned.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] when the message could not be published.
    async fn send(&self, message: OutgoingMessage) -> SendResult<MessageId>;
}

/// Errors reported by send adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendError {
    /// The transport could not be reached.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// The transport refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),
}
