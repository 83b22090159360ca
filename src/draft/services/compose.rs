//! Compose session orchestration.
//!
//! [`ComposeService`] owns one [`MessageDraft`], forwards edits to it, runs
//! suggestion lookups in the background, and hands the finished message to a
//! [`MessageSender`].
//!
//! Lookups for the current buffer state live in a [`JoinSet`]. Every edit
//! replaces the set, which aborts superseded lookups and discards any result
//! they already produced.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use super::suggestion::{Epoch, SuggestionEngine, SuggestionResponse, SuggestionSet};
use crate::draft::{
    config::DraftConfig,
    domain::{
        Annotation, ChannelId, FileAttachment, FileId, MessageDraft, MessageId, QuotedMessage,
        SendOptions, Suggestion, TextRange,
    },
    error::DraftResult,
    ports::{directory::DirectoryLookup, sender::MessageSender},
};

/// Interactive editing session for a single draft.
///
/// Lookups need a Tokio runtime; outside one, edits still apply but no
/// suggestions are produced.
pub struct ComposeService<D, S>
where
    D: DirectoryLookup + 'static,
    S: MessageSender,
{
    draft: MessageDraft,
    engine: SuggestionEngine<D>,
    sender: Arc<S>,
    lookups: JoinSet<SuggestionResponse>,
}

impl<D, S> ComposeService<D, S>
where
    D: DirectoryLookup + 'static,
    S: MessageSender,
{
    /// Starts a session with an empty draft for `channel_id`.
    #[must_use]
    pub fn new(channel_id: ChannelId, directory: Arc<D>, sender: Arc<S>, config: DraftConfig) -> Self {
        Self::from_draft(MessageDraft::new(channel_id), directory, sender, config)
    }

    /// Resumes a session from an existing draft, such as one restored from
    /// markup.
    #[must_use]
    pub fn from_draft(
        draft: MessageDraft,
        directory: Arc<D>,
        sender: Arc<S>,
        config: DraftConfig,
    ) -> Self {
        let engine = SuggestionEngine::new(directory, draft.channel_id().clone(), config);
        Self {
            draft,
            engine,
            sender,
            lookups: JoinSet::new(),
        }
    }

    /// Returns the draft being edited.
    #[must_use]
    pub const fn draft(&self) -> &MessageDraft {
        &self.draft
    }

    /// Returns the current suggestion epoch.
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.engine.epoch()
    }

    /// Returns the number of lookups for the current buffer state whose
    /// results have not been taken yet.
    #[must_use]
    pub fn pending_lookups(&self) -> usize {
        self.lookups.len()
    }

    /// Inserts `text` at `offset` and refreshes suggestions around the
    /// resulting cursor.
    ///
    /// # Errors
    ///
    /// Returns [`crate::draft::error::DraftError::Range`] when `offset` is past
    /// the end of the buffer.
    pub fn insert_text(&mut self, offset: usize, text: &str) -> DraftResult<()> {
        let edit = self.draft.insert_text(offset, text)?;
        self.text_changed(edit.start.saturating_add(edit.inserted));
        Ok(())
    }

    /// Removes up to `length` characters at `offset` and refreshes
    /// suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::draft::error::DraftError::Range`] when `offset` is past
    /// the end of the buffer.
    pub fn remove_text(&mut self, offset: usize, length: usize) -> DraftResult<()> {
        let edit = self.draft.remove_text(offset, length)?;
        self.text_changed(edit.start);
        Ok(())
    }

    /// Replaces a trigger token with the chosen suggestion.
    ///
    /// Pending suggestions are retired without issuing new lookups.
    ///
    /// # Errors
    ///
    /// Returns an error when the suggestion no longer matches the buffer or
    /// would overlap an existing annotation.
    pub fn insert_suggestion(&mut self, suggestion: &Suggestion) -> DraftResult<TextRange> {
        let range = self.draft.insert_suggestion(suggestion)?;
        debug!(%range, "suggestion inserted");
        self.suppress_suggestions();
        Ok(range)
    }

    /// Inserts `text` linked to `url` at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid, the text is empty, the
    /// offset is out of range, or the offset falls inside an annotation.
    pub fn add_linked_text(&mut self, text: &str, url: &str, offset: usize) -> DraftResult<TextRange> {
        let range = self.draft.add_linked_text(text, url, offset)?;
        self.suppress_suggestions();
        Ok(range)
    }

    /// Unlinks the link covering `offset`, keeping its text.
    pub fn remove_linked_text(&mut self, offset: usize) -> Option<Annotation> {
        self.draft.remove_linked_text(offset)
    }

    /// Removes whichever annotation covers `offset`.
    pub fn remove_annotation_at(&mut self, offset: usize) -> Option<Annotation> {
        self.draft.remove_annotation_at(offset)
    }

    /// Attaches a quoted message from the draft's channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::draft::error::DraftError::CrossChannel`] when the quote
    /// belongs to another channel.
    pub fn add_quote(&mut self, message: QuotedMessage) -> DraftResult<()> {
        self.draft.add_quote(message)
    }

    /// Detaches the quoted message.
    pub fn remove_quote(&mut self) -> Option<QuotedMessage> {
        self.draft.remove_quote()
    }

    /// Attaches a file.
    pub fn add_file(&mut self, file: FileAttachment) {
        self.draft.add_file(file);
    }

    /// Detaches the file with `file_id`.
    pub fn remove_file(&mut self, file_id: &FileId) -> Option<FileAttachment> {
        self.draft.remove_file(file_id)
    }

    /// Waits for the next current suggestion set.
    ///
    /// Returns `None` once no lookups for the current epoch remain. A lookup
    /// task that panics counts as finished without suggestions.
    pub async fn next_suggestions(&mut self) -> Option<SuggestionSet> {
        while let Some(joined) = self.lookups.join_next().await {
            if let Some(set) = self.accept(joined) {
                return Some(set);
            }
        }
        None
    }

    /// Returns a current suggestion set if one has already arrived.
    pub fn try_next_suggestions(&mut self) -> Option<SuggestionSet> {
        while let Some(joined) = self.lookups.try_join_next() {
            if let Some(set) = self.accept(joined) {
                return Some(set);
            }
        }
        None
    }

    /// Renders the draft, hands it to the sender, and clears the draft.
    ///
    /// The draft is left untouched when sending fails.
    ///
    /// # Errors
    ///
    /// Returns [`crate::draft::error::DraftError::EmptyMessage`] for a blank
    /// draft, or [`crate::draft::error::DraftError::Send`] when the sender
    /// fails.
    pub async fn send(&mut self, options: SendOptions) -> DraftResult<MessageId> {
        let outgoing = self.draft.outgoing(options)?;
        let message_id = self.sender.send(outgoing).await?;
        info!(
            %message_id,
            channel_id = %self.draft.channel_id(),
            "draft sent"
        );
        self.draft.clear();
        self.suppress_suggestions();
        Ok(message_id)
    }

    fn accept(&self, joined: Result<SuggestionResponse, JoinError>) -> Option<SuggestionSet> {
        match joined {
            Ok(response) => self.engine.accept(response),
            Err(error) => {
                warn!(%error, epoch = %self.engine.epoch(), "suggestion lookup task failed");
                None
            }
        }
    }

    fn text_changed(&mut self, cursor: usize) {
        self.abort_in_flight();
        let requests = self.engine.begin_edit(&self.draft, cursor);
        if requests.is_empty() {
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!(
                count = requests.len(),
                "no async runtime available; skipping suggestion lookups"
            );
            return;
        };
        for request in requests {
            self.lookups.spawn_on(self.engine.lookup(request), &runtime);
        }
    }

    fn suppress_suggestions(&mut self) {
        self.abort_in_flight();
        self.engine.invalidate();
    }

    fn abort_in_flight(&mut self) {
        // Dropping the old set aborts its tasks and discards finished results.
        self.lookups = JoinSet::new();
    }
}
