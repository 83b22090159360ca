//! Configuration for compose sessions.
//!
//! # Examples
//!
//! ```
//! use draftline::draft::config::{DraftConfig, UserSuggestionSource};
//!
//! let config = DraftConfig::default();
//! assert_eq!(config.user_suggestion_source, UserSuggestionSource::Channel);
//! assert_eq!(config.user_limit, 10);
//!
//! let global = DraftConfig::global().with_user_limit(5);
//! assert_eq!(global.user_suggestion_source, UserSuggestionSource::Global);
//! assert_eq!(global.user_limit, 5);
//! ```

use serde::{Deserialize, Serialize};

use super::domain::{DEFAULT_MAX_QUERY_WORDS, DEFAULT_MIN_QUERY_CHARS, TriggerRules};

/// Where mention suggestions are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSuggestionSource {
    /// Only members of the draft's channel.
    #[default]
    Channel,
    /// Every user in the directory.
    Global,
}

/// Tunables for suggestion lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Where mention suggestions come from.
    pub user_suggestion_source: UserSuggestionSource,
    /// Maximum number of user suggestions per trigger.
    pub user_limit: usize,
    /// Maximum number of channel suggestions per trigger.
    pub channel_limit: usize,
    /// Minimum phrase length before a lookup is issued.
    pub min_query_chars: usize,
    /// Maximum number of words in a phrase.
    pub max_query_words: usize,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            user_suggestion_source: UserSuggestionSource::Channel,
            user_limit: 10,
            channel_limit: 10,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            max_query_words: DEFAULT_MAX_QUERY_WORDS,
        }
    }
}

impl DraftConfig {
    /// Creates a configuration that suggests users from the whole directory.
    #[must_use]
    pub fn global() -> Self {
        Self {
            user_suggestion_source: UserSuggestionSource::Global,
            ..Self::default()
        }
    }

    /// Sets the maximum number of user suggestions.
    #[must_use]
    pub const fn with_user_limit(mut self, limit: usize) -> Self {
        self.user_limit = limit;
        self
    }

    /// Sets the maximum number of channel suggestions.
    #[must_use]
    pub const fn with_channel_limit(mut self, limit: usize) -> Self {
        self.channel_limit = limit;
        self
    }

    /// Returns the trigger thresholds derived from this configuration.
    #[must_use]
    pub const fn trigger_rules(&self) -> TriggerRules {
        TriggerRules {
            min_chars: self.min_query_chars,
            max_words: self.max_query_words,
        }
    }
}
