//! Rich-text message drafts with mentions, channel references, and links.
//!
//! A draft is a plain text buffer plus a set of annotations over character
//! ranges. Edits keep the annotations aligned, `@` and `#` triggers are
//! resolved to suggestions through a directory, and the finished draft is
//! rendered to a link-style markup before it is sent.
//!
//! # Architecture
//!
//! - **Domain**: the buffer, annotations, trigger detection, and markup codec
//!   ([`domain::MessageDraft`], [`domain::AnnotationStore`], [`domain::markup`])
//! - **Ports**: directory lookup and message sending
//!   ([`ports::directory::DirectoryLookup`], [`ports::sender::MessageSender`])
//! - **Adapters**: in-memory implementations of the ports
//! - **Services**: the epoch-guarded [`services::SuggestionEngine`] and the
//!   [`services::ComposeService`] session
//!
//! # Example
//!
//! ```
//! use draftline::draft::domain::{ChannelId, MessageDraft, TriggerKind, TriggerRules, Suggestion, UserSummary};
//!
//! let mut draft = MessageDraft::new(ChannelId::new("general"));
//! draft.insert_text(0, "abc @exa def 123").expect("offset is in range");
//!
//! let triggers = TriggerRules::default().detect(
//!     draft.text(),
//!     TriggerKind::Mention,
//!     8,
//!     draft.annotations(),
//! );
//! let trigger = triggers.first().expect("trigger detected");
//! assert_eq!(trigger.query, "exa");
//!
//! let suggestion = Suggestion::for_user(trigger, UserSummary::new("example.user.0", "example User 0"));
//! draft.insert_suggestion(&suggestion).expect("suggestion applies");
//! assert_eq!(
//!     draft.render(),
//!     "abc [example User 0](pn-user://example.user.0) def 123"
//! );
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
