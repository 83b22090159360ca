//! Directory summaries and the suggestions built from them.

use serde::{Deserialize, Serialize};

use super::{Annotation, ChannelId, TextRange, TriggerMatch, UserId};

/// A user as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserSummary {
    /// Directory identifier.
    pub id: UserId,
    /// Human-readable name; may be empty.
    #[serde(default)]
    pub name: String,
}

impl UserSummary {
    /// Creates a user summary.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the name, or the id when the name is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// A channel as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelSummary {
    /// Directory identifier.
    pub id: ChannelId,
    /// Human-readable name; may be empty.
    #[serde(default)]
    pub name: String,
}

impl ChannelSummary {
    /// Creates a channel summary.
    #[must_use]
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the name, or the id when the name is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// The directory entry a suggestion would link to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedTarget {
    /// Completes a mention.
    User(UserSummary),
    /// Completes a channel reference.
    Channel(ChannelSummary),
}

/// A proposed completion for a trigger.
///
/// Suggestions are produced per edit and go stale as soon as the buffer
/// changes; accepting a stale one is rejected by the draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// Offset of the trigger character.
    pub trigger_offset: usize,
    /// The token text to replace, trigger character included.
    pub replace_from: String,
    /// The display text that replaces it.
    pub replace_to: String,
    /// The suggested directory entry.
    pub target: SuggestedTarget,
}

impl Suggestion {
    /// Builds a mention suggestion for `trigger`.
    #[must_use]
    pub fn for_user(trigger: &TriggerMatch, user: UserSummary) -> Self {
        Self {
            trigger_offset: trigger.range.start(),
            replace_from: trigger.token(),
            replace_to: user.display_name().to_owned(),
            target: SuggestedTarget::User(user),
        }
    }

    /// Builds a channel-reference suggestion for `trigger`.
    #[must_use]
    pub fn for_channel(trigger: &TriggerMatch, channel: ChannelSummary) -> Self {
        Self {
            trigger_offset: trigger.range.start(),
            replace_from: trigger.token(),
            replace_to: channel.display_name().to_owned(),
            target: SuggestedTarget::Channel(channel),
        }
    }

    /// Returns the range of the trigger token this suggestion replaces.
    #[must_use]
    pub fn replaced_range(&self) -> TextRange {
        TextRange::new(self.trigger_offset, self.replace_from.chars().count())
    }

    /// Returns the annotation the accepted suggestion produces over `range`.
    #[must_use]
    pub(crate) fn annotation(&self, range: TextRange) -> Annotation {
        match &self.target {
            SuggestedTarget::User(user) => Annotation::user_mention(range, user.id.clone()),
            SuggestedTarget::Channel(channel) => {
                Annotation::channel_reference(range, channel.id.clone())
            }
        }
    }
}
