//! The annotated message buffer being composed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use super::annotation::{CHANNEL_SCHEME, USER_SCHEME};
use super::range::{byte_index, char_len, slice};
use super::{
    Annotation, AnnotationStore, AnnotationTarget, ChannelId, FileAttachment, FileId, MessageId,
    QuotedMessage, Suggestion, TextEdit, TextRange, UserId, markup,
};
use crate::draft::error::{DraftError, DraftResult, OverlapError, RangeError, ValidationError};

/// A draft message: plain text, annotations over it, and pass-through
/// payloads.
///
/// Every mutating method is atomic. It either applies completely and
/// reconciles the annotations, or fails without changing anything.
///
/// # Examples
///
/// ```
/// use draftline::draft::domain::{ChannelId, MessageDraft};
///
/// let mut draft = MessageDraft::new(ChannelId::new("general"));
/// draft.insert_text(0, "hello world").expect("offset 0 is always valid");
/// draft.add_linked_text(" docs", "https://example.com/docs", 11).expect("valid link");
///
/// assert_eq!(draft.render(), "hello world[ docs](https://example.com/docs)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    channel_id: ChannelId,
    text: String,
    annotations: AnnotationStore,
    quoted_message: Option<QuotedMessage>,
    files: Vec<FileAttachment>,
}

impl MessageDraft {
    /// Creates an empty draft bound to `channel_id`.
    #[must_use]
    pub const fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            text: String::new(),
            annotations: AnnotationStore::new(),
            quoted_message: None,
            files: Vec::new(),
        }
    }

    /// Creates a draft from canonical markup, e.g. to edit a sent message.
    #[must_use]
    pub fn from_markup(channel_id: ChannelId, markup: &str) -> Self {
        let parsed = markup::parse(markup);
        Self {
            channel_id,
            text: parsed.text,
            annotations: parsed.annotations,
            quoted_message: None,
            files: Vec::new(),
        }
    }

    /// Returns the channel the draft will be sent to.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the plain buffer.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the buffer length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    /// Returns `true` when the buffer holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the annotations in ascending start order.
    #[must_use]
    pub const fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Returns the quoted message, if any.
    #[must_use]
    pub const fn quoted_message(&self) -> Option<&QuotedMessage> {
        self.quoted_message.as_ref()
    }

    /// Returns the attached files.
    #[must_use]
    pub fn files(&self) -> &[FileAttachment] {
        &self.files
    }

    /// Returns the text covered by `range`.
    #[must_use]
    pub fn text_in(&self, range: TextRange) -> &str {
        slice(&self.text, range)
    }

    /// Inserts `text` at `offset`.
    ///
    /// Annotations starting at or after `offset` move right; an annotation the
    /// insertion lands inside is dropped because its text no longer matches.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when `offset` is past the end of the buffer.
    pub fn insert_text(&mut self, offset: usize, text: &str) -> DraftResult<TextEdit> {
        self.check_offset(offset, 0)?;
        let edit = TextEdit::insertion(offset, char_len(text));
        self.splice(edit, text);
        Ok(edit)
    }

    /// Removes up to `length` characters starting at `offset`.
    ///
    /// Lengths running past the end of the buffer are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when `offset` is past the end of the buffer.
    pub fn remove_text(&mut self, offset: usize, length: usize) -> DraftResult<TextEdit> {
        self.check_offset(offset, length)?;
        let removed = length.min(self.len() - offset);
        let edit = TextEdit::removal(offset, removed);
        self.splice(edit, "");
        Ok(edit)
    }

    /// Replaces the suggestion's trigger token with its display text and
    /// annotates the replacement, as one edit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::StaleSuggestion`] when the buffer no longer
    /// holds exactly the trigger token at the recorded offset, including when
    /// the token has since been extended, and [`ValidationError::Overlap`]
    /// when the token is already annotated.
    pub fn insert_suggestion(&mut self, suggestion: &Suggestion) -> DraftResult<TextRange> {
        let replaced = suggestion.replaced_range();
        if replaced.end() > self.len()
            || self.text_in(replaced) != suggestion.replace_from
            || !self.is_token_boundary(replaced.end())
        {
            return Err(ValidationError::StaleSuggestion {
                offset: suggestion.trigger_offset,
                replace_from: suggestion.replace_from.clone(),
            }
            .into());
        }
        self.check_no_overlap(replaced)?;

        let inserted = char_len(&suggestion.replace_to);
        let edit = TextEdit::replacement(replaced.start(), replaced.length(), inserted);
        let range = TextRange::new(replaced.start(), inserted);
        self.splice(edit, &suggestion.replace_to);
        self.annotations.insert(suggestion.annotation(range))?;
        Ok(range)
    }

    /// Inserts `text` at `offset` and links it to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] for a bad offset, and [`ValidationError`] when
    /// the URL does not parse, the text is empty, or the link would overlap an
    /// existing annotation. The draft is unchanged on error.
    pub fn add_linked_text(&mut self, text: &str, url: &str, offset: usize) -> DraftResult<TextRange> {
        self.check_offset(offset, 0)?;
        let target = parse_link_url(url)?;
        if text.is_empty() {
            return Err(ValidationError::EmptyLinkText.into());
        }
        let range = TextRange::new(offset, char_len(text));
        if let Some(existing) = self.annotations.iter().find(|a| a.range().splits_at(offset)) {
            return Err(DraftError::from(OverlapError {
                requested: range,
                existing: existing.clone(),
            }));
        }

        self.splice(TextEdit::insertion(offset, range.length()), text);
        self.annotations.insert(Annotation::text_link(range, target))?;
        Ok(range)
    }

    /// Unlinks the link covering `offset`, keeping its text.
    ///
    /// Returns the removed annotation, or `None` when no link covers
    /// `offset`; mentions and channel references are left alone.
    pub fn remove_linked_text(&mut self, offset: usize) -> Option<Annotation> {
        self.annotations.remove_matching(offset, Annotation::is_link)
    }

    /// Removes the annotation covering `offset`, keeping its text.
    pub fn remove_annotation_at(&mut self, offset: usize) -> Option<Annotation> {
        self.annotations.remove_at(offset)
    }

    /// Attaches `message` as the quoted message, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::CrossChannel`] when the message was sent to a
    /// different channel than the draft's.
    pub fn add_quote(&mut self, message: QuotedMessage) -> DraftResult<()> {
        if message.channel_id != self.channel_id {
            return Err(DraftError::CrossChannel {
                expected: self.channel_id.clone(),
                actual: message.channel_id,
            });
        }
        self.quoted_message = Some(message);
        Ok(())
    }

    /// Detaches the quoted message, returning it.
    pub fn remove_quote(&mut self) -> Option<QuotedMessage> {
        self.quoted_message.take()
    }

    /// Attaches a file. A file with the same id replaces the earlier one.
    pub fn add_file(&mut self, file: FileAttachment) {
        self.files.retain(|existing| existing.id != file.id);
        self.files.push(file);
    }

    /// Detaches the file with `file_id`, returning it.
    pub fn remove_file(&mut self, file_id: &FileId) -> Option<FileAttachment> {
        let position = self.files.iter().position(|file| &file.id == file_id)?;
        Some(self.files.remove(position))
    }

    /// Renders the draft as canonical markup.
    #[must_use]
    pub fn render(&self) -> String {
        markup::render(&self.text, &self.annotations)
    }

    /// Renders the draft as plain text with trigger characters restored.
    #[must_use]
    pub fn render_plain_text(&self) -> String {
        markup::render_plain_text(&self.text, &self.annotations)
    }

    /// Builds the payload handed to the send port.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::EmptyMessage`] when the buffer is empty or only
    /// whitespace.
    pub fn outgoing(&self, options: SendOptions) -> DraftResult<OutgoingMessage> {
        if self.text.trim().is_empty() {
            return Err(DraftError::EmptyMessage);
        }

        let mut outgoing = OutgoingMessage {
            channel_id: self.channel_id.clone(),
            text: self.render(),
            plain_text: self.render_plain_text(),
            mentioned_users: BTreeMap::new(),
            referenced_channels: BTreeMap::new(),
            text_links: Vec::new(),
            quoted_message: self.quoted_message.clone(),
            files: self.files.clone(),
            options,
        };
        for annotation in &self.annotations {
            let range = annotation.range();
            let name = self.text_in(range).to_owned();
            match annotation.target() {
                AnnotationTarget::User(id) => {
                    outgoing.mentioned_users.insert(
                        range.start(),
                        UserRef {
                            id: id.clone(),
                            name,
                        },
                    );
                }
                AnnotationTarget::Channel(id) => {
                    outgoing.referenced_channels.insert(
                        range.start(),
                        ChannelRef {
                            id: id.clone(),
                            name,
                        },
                    );
                }
                AnnotationTarget::Link(url) => outgoing.text_links.push(TextLinkSpan {
                    start: range.start(),
                    end: range.end(),
                    url: url.clone(),
                }),
            }
        }
        Ok(outgoing)
    }

    /// Empties the buffer and drops annotations, quote, and files.
    pub fn clear(&mut self) {
        self.text.clear();
        self.annotations.clear();
        self.quoted_message = None;
        self.files.clear();
    }

    fn is_token_boundary(&self, offset: usize) -> bool {
        self.text.chars().nth(offset).is_none_or(char::is_whitespace)
    }

    fn check_offset(&self, offset: usize, length: usize) -> Result<(), RangeError> {
        let text_len = self.len();
        if offset > text_len {
            return Err(RangeError::new(offset, length, text_len));
        }
        Ok(())
    }

    fn check_no_overlap(&self, range: TextRange) -> DraftResult<()> {
        match self.annotations.overlapping(range).next() {
            Some(existing) => Err(DraftError::from(OverlapError {
                requested: range,
                existing: existing.clone(),
            })),
            None => Ok(()),
        }
    }

    fn splice(&mut self, edit: TextEdit, replacement: &str) {
        let start = byte_index(&self.text, edit.start);
        let end = byte_index(&self.text, edit.start + edit.removed);
        self.text.replace_range(start..end, replacement);
        self.annotations.apply_edit(&edit);
        self.annotations.retain_within(self.len());
    }
}

fn parse_link_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|error| ValidationError::invalid_url(raw, error.to_string()))?;
    if matches!(url.scheme(), USER_SCHEME | CHANNEL_SCHEME) {
        return Err(ValidationError::invalid_url(
            raw,
            "reserved annotation scheme",
        ));
    }
    Ok(url)
}

/// Options passed through to the send port untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    /// Whether the message is stored in channel history.
    pub store_in_history: bool,
    /// Whether the transport should use a POST request.
    pub send_by_post: bool,
    /// Time-to-live in hours for stored messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_hours: Option<u32>,
    /// Arbitrary metadata forwarded with the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            store_in_history: true,
            send_by_post: false,
            ttl_hours: None,
            meta: None,
        }
    }
}

impl SendOptions {
    /// Sets the time-to-live.
    #[must_use]
    pub const fn with_ttl_hours(mut self, ttl_hours: u32) -> Self {
        self.ttl_hours = Some(ttl_hours);
        self
    }

    /// Sets the metadata payload.
    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// A mentioned user as reported to the send port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// The mentioned user.
    pub id: UserId,
    /// The display text used in the message.
    pub name: String,
}

/// A referenced channel as reported to the send port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    /// The referenced channel.
    pub id: ChannelId,
    /// The display text used in the message.
    pub name: String,
}

/// A link span as reported to the send port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLinkSpan {
    /// First linked character offset in the plain text.
    pub start: usize,
    /// Exclusive end offset in the plain text.
    pub end: usize,
    /// Link target.
    pub url: Url,
}

/// Everything the send port needs to publish a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Destination channel.
    pub channel_id: ChannelId,
    /// Canonical markup.
    pub text: String,
    /// Plain-text fallback with trigger characters restored.
    pub plain_text: String,
    /// Mentioned users keyed by offset in the plain text.
    pub mentioned_users: BTreeMap<usize, UserRef>,
    /// Referenced channels keyed by offset in the plain text.
    pub referenced_channels: BTreeMap<usize, ChannelRef>,
    /// Link spans in ascending order.
    pub text_links: Vec<TextLinkSpan>,
    /// Quoted message, if any.
    pub quoted_message: Option<QuotedMessage>,
    /// Attached files.
    pub files: Vec<FileAttachment>,
    /// Transport options.
    pub options: SendOptions,
}

/// Receipt for a successfully sent draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Identifier assigned by the send port.
    pub message_id: MessageId,
    /// The payload that was sent.
    pub message: OutgoingMessage,
}
