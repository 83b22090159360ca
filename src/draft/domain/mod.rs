//! Domain types for message drafting.
//!
//! Everything here is synchronous and free of infrastructure: the buffer,
//! its annotations, trigger detection, and the markup codec.

mod annotation;
mod annotation_store;
mod attachments;
mod draft;
mod ids;
pub mod markup;
mod range;
mod suggestion;
mod trigger;

pub use annotation::{Annotation, AnnotationTarget, CHANNEL_SCHEME, USER_SCHEME};
pub use annotation_store::{AnnotationStore, TextEdit};
pub use attachments::{FileAttachment, QuotedMessage};
pub use draft::{
    ChannelRef, MessageDraft, OutgoingMessage, SendOptions, SentMessage, TextLinkSpan, UserRef,
};
pub use ids::{ChannelId, FileId, MessageId, UserId};
pub use markup::ParsedMarkup;
pub use range::TextRange;
pub use suggestion::{ChannelSummary, SuggestedTarget, Suggestion, UserSummary};
pub use trigger::{
    DEFAULT_MAX_QUERY_WORDS, DEFAULT_MIN_QUERY_CHARS, TriggerKind, TriggerMatch, TriggerRules,
    phrase_to_look_for,
};
