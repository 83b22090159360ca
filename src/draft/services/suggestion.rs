//! Epoch-guarded mention and channel suggestions.
//!
//! Every text edit bumps the engine's epoch and produces lookup requests
//! tagged with it. A response is only turned into a [`SuggestionSet`] while
//! its tag still equals the current epoch, so a slow lookup can never apply
//! to a buffer that has since moved on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::draft::{
    config::{DraftConfig, UserSuggestionSource},
    domain::{ChannelId, MessageDraft, Suggestion, TriggerKind, TriggerMatch},
    ports::directory::{DirectoryError, DirectoryLookup},
};

/// Monotonic counter identifying one buffer state.
///
/// # Examples
///
/// ```
/// use draftline::draft::services::Epoch;
///
/// let epoch = Epoch::default();
/// assert_eq!(epoch.next().value(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch(u64);

impl Epoch {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the following epoch.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directory lookup to run for one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Epoch of the buffer state the trigger was found in.
    pub epoch: Epoch,
    /// The trigger to complete.
    pub trigger: TriggerMatch,
}

/// The outcome of a lookup, still subject to the epoch check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionResponse {
    /// Epoch copied from the request.
    pub epoch: Epoch,
    /// The trigger that was looked up.
    pub trigger: TriggerMatch,
    /// Suggestions found; empty when the lookup failed.
    pub suggestions: Vec<Suggestion>,
    /// The directory failure, if any.
    pub error: Option<DirectoryError>,
}

/// Suggestions for one trigger, valid for the current buffer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSet {
    /// Epoch the suggestions were computed for.
    pub epoch: Epoch,
    /// The trigger the suggestions complete.
    pub trigger: TriggerMatch,
    /// Candidates in directory order.
    pub suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    /// Returns the buffer offset of the trigger character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.trigger.range.start()
    }
}

/// Detects triggers and resolves them against a directory.
pub struct SuggestionEngine<D>
where
    D: DirectoryLookup,
{
    directory: Arc<D>,
    channel_id: ChannelId,
    config: DraftConfig,
    epoch: Epoch,
}

impl<D> SuggestionEngine<D>
where
    D: DirectoryLookup,
{
    /// Creates an engine for drafts bound to `channel_id`.
    #[must_use]
    pub const fn new(directory: Arc<D>, channel_id: ChannelId, config: DraftConfig) -> Self {
        Self {
            directory,
            channel_id,
            config,
            epoch: Epoch(0),
        }
    }

    /// Returns the current epoch.
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &DraftConfig {
        &self.config
    }

    /// Records a text edit and returns the lookups it calls for.
    ///
    /// Bumps the epoch, then scans the buffer for open `@` and `#` triggers
    /// outside existing annotations.
    pub fn begin_edit(&mut self, draft: &MessageDraft, cursor: usize) -> Vec<SuggestionRequest> {
        let epoch = self.invalidate();
        let rules = self.config.trigger_rules();
        TriggerKind::ALL
            .into_iter()
            .flat_map(|kind| rules.detect(draft.text(), kind, cursor, draft.annotations()))
            .map(|trigger| SuggestionRequest { epoch, trigger })
            .collect()
    }

    /// Bumps the epoch without issuing lookups, retiring every outstanding
    /// request.
    pub fn invalidate(&mut self) -> Epoch {
        self.epoch = self.epoch.next();
        self.epoch
    }

    /// Returns a self-contained future that resolves `request`.
    ///
    /// Directory failures are logged and yield an empty suggestion list.
    pub fn lookup(
        &self,
        request: SuggestionRequest,
    ) -> impl Future<Output = SuggestionResponse> + Send + 'static
    where
        D: 'static,
    {
        let directory = Arc::clone(&self.directory);
        let channel_id = self.channel_id.clone();
        let config = self.config.clone();
        async move {
            let SuggestionRequest { epoch, trigger } = request;
            debug!(%epoch, kind = %trigger.kind, query = %trigger.query, "issuing suggestion lookup");
            let result = match trigger.kind {
                TriggerKind::Mention => {
                    let users = match config.user_suggestion_source {
                        UserSuggestionSource::Channel => {
                            directory
                                .find_channel_members(&channel_id, &trigger.query, config.user_limit)
                                .await
                        }
                        UserSuggestionSource::Global => {
                            directory.find_users(&trigger.query, config.user_limit).await
                        }
                    };
                    users.map(|found| {
                        found
                            .into_iter()
                            .map(|user| Suggestion::for_user(&trigger, user))
                            .collect()
                    })
                }
                TriggerKind::ChannelReference => directory
                    .find_channels(&trigger.query, config.channel_limit)
                    .await
                    .map(|found| {
                        found
                            .into_iter()
                            .map(|channel| Suggestion::for_channel(&trigger, channel))
                            .collect()
                    }),
            };

            match result {
                Ok(suggestions) => SuggestionResponse {
                    epoch,
                    trigger,
                    suggestions,
                    error: None,
                },
                Err(error) => {
                    warn!(%epoch, kind = %trigger.kind, query = %trigger.query, %error, "suggestion lookup failed");
                    SuggestionResponse {
                        epoch,
                        trigger,
                        suggestions: Vec::new(),
                        error: Some(error),
                    }
                }
            }
        }
    }

    /// Turns a response into a suggestion set if it is still current.
    ///
    /// Stale responses are dropped silently.
    #[must_use]
    pub fn accept(&self, response: SuggestionResponse) -> Option<SuggestionSet> {
        if response.epoch != self.epoch {
            debug!(
                response_epoch = %response.epoch,
                current_epoch = %self.epoch,
                offset = response.trigger.range.start(),
                "discarding stale suggestion response"
            );
            return None;
        }
        Some(SuggestionSet {
            epoch: response.epoch,
            trigger: response.trigger,
            suggestions: response.suggestions,
        })
    }
}
