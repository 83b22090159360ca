//! In-memory implementation of the `MessageSender` port.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::draft::{
    domain::{MessageId, OutgoingMessage, SentMessage},
    ports::sender::{MessageSender, SendError, SendResult},
};

/// Records every sent message instead of publishing it.
///
/// Thread-safe via internal [`RwLock`]. Suitable for unit tests only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageSender {
    sent: Arc<RwLock<Vec<SentMessage>>>,
}

impl InMemoryMessageSender {
    /// Creates an empty sender.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Returns the number of sent messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sent.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing has been sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageSender for InMemoryMessageSender {
    async fn send(&self, message: OutgoingMessage) -> SendResult<MessageId> {
        let message_id = MessageId::new();
        self.sent
            .write()
            .map_err(|e| SendError::Unavailable(e.to_string()))?
            .push(SentMessage {
                message_id,
                message,
            });
        Ok(message_id)
    }
}
