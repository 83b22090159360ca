//! Pass-through payloads carried by a draft: a quoted message and files.
//!
//! The draft does not inspect these beyond the quoted message's channel.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ChannelId, FileId, MessageId, UserId};

/// A previously sent message quoted by the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedMessage {
    /// Identifier of the quoted message.
    pub message_id: MessageId,
    /// Channel the quoted message was sent to.
    pub channel_id: ChannelId,
    /// Author of the quoted message.
    pub user_id: UserId,
    /// Plain text of the quoted message.
    pub text: String,
}

impl QuotedMessage {
    /// Creates a quoted message reference.
    #[must_use]
    pub fn new(
        message_id: MessageId,
        channel_id: ChannelId,
        user_id: UserId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            message_id,
            channel_id,
            user_id,
            text: text.into(),
        }
    }
}

/// A file attached to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Identifier of the uploaded file.
    pub id: FileId,
    /// File name shown to recipients.
    pub name: String,
    /// Download location, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    /// MIME type, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileAttachment {
    /// Creates a file attachment with no URL or MIME type.
    #[must_use]
    pub fn new(id: impl Into<FileId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            mime_type: None,
        }
    }

    /// Sets the download location.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}
