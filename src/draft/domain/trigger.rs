//! Detection of unfinished mention and channel-reference tokens.
//!
//! A trigger is an `@` or `#` typed at the start of the text or after
//! whitespace, followed by a short phrase. Finding nothing is the normal
//! state and is not an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnnotationStore, TextRange};

/// Minimum number of characters a phrase needs before it is looked up.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

/// Maximum number of whitespace-separated words in a phrase.
pub const DEFAULT_MAX_QUERY_WORDS: usize = 2;

/// The kind of token a trigger character starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// `@` followed by part of a user name.
    Mention,
    /// `#` followed by part of a channel name.
    ChannelReference,
}

impl TriggerKind {
    /// Both trigger kinds, in detection order.
    pub const ALL: [Self; 2] = [Self::Mention, Self::ChannelReference];

    /// Returns the character that starts this kind of token.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Mention => '@',
            Self::ChannelReference => '#',
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mention => f.write_str("mention"),
            Self::ChannelReference => f.write_str("channel_reference"),
        }
    }
}

/// An unresolved token currently being typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerMatch {
    /// Which trigger character started the token.
    pub kind: TriggerKind,
    /// The phrase after the trigger character.
    pub query: String,
    /// The range of the whole token, trigger character included.
    pub range: TextRange,
}

impl TriggerMatch {
    /// Returns the token exactly as it appears in the buffer.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.query)
    }
}

/// Thresholds a phrase must meet to be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRules {
    /// Minimum phrase length in characters.
    pub min_chars: usize,
    /// Maximum number of whitespace-separated words.
    pub max_words: usize,
}

impl Default for TriggerRules {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_QUERY_CHARS,
            max_words: DEFAULT_MAX_QUERY_WORDS,
        }
    }
}

impl TriggerRules {
    /// Returns the phrase after the last `prefix` in `text` if it is long
    /// enough and has few enough words.
    #[must_use]
    pub fn phrase_to_look_for(&self, text: &str, prefix: char) -> Option<String> {
        let (_, tail) = text.rsplit_once(prefix)?;
        let phrase = tail.trim_end();
        self.accepts(phrase).then(|| phrase.to_owned())
    }

    /// Finds every open trigger of `kind` in `text`.
    ///
    /// Triggers inside existing annotations are skipped. The phrase is the
    /// first word after the trigger; when `cursor` is inside the word right
    /// after it, the phrase runs up to the cursor so two-word names can be
    /// completed.
    #[must_use]
    pub fn detect(
        &self,
        text: &str,
        kind: TriggerKind,
        cursor: usize,
        taken: &AnnotationStore,
    ) -> Vec<TriggerMatch> {
        let chars: Vec<char> = text.chars().collect();
        let prefix = kind.prefix();
        let mut matches = Vec::new();

        for (start, _) in chars.iter().enumerate().filter(|(_, ch)| **ch == prefix) {
            let at_boundary = start
                .checked_sub(1)
                .and_then(|before| chars.get(before))
                .is_none_or(|ch| ch.is_whitespace());
            if !at_boundary || taken.covering(start).is_some() {
                continue;
            }

            let end = phrase_end(&chars, start + 1, cursor);
            let range = TextRange::from_bounds(start, end);
            if taken.overlapping(range).next().is_some() {
                continue;
            }

            let query: String = chars
                .get(start + 1..end)
                .map(|phrase| phrase.iter().collect())
                .unwrap_or_default();
            if self.accepts(&query) {
                matches.push(TriggerMatch { kind, query, range });
            }
        }

        matches
    }

    fn accepts(&self, phrase: &str) -> bool {
        !phrase.starts_with(char::is_whitespace)
            && phrase.chars().count() >= self.min_chars
            && phrase.split_whitespace().count() <= self.max_words
    }
}

/// Returns the phrase after the last `prefix` in `text` using the default
/// thresholds.
///
/// # Examples
///
/// ```
/// use draftline::draft::domain::phrase_to_look_for;
///
/// assert_eq!(phrase_to_look_for("sas#h", '#'), None);
/// assert_eq!(phrase_to_look_for("sas#one", '#').as_deref(), Some("one"));
/// assert_eq!(phrase_to_look_for("sas#one two three", '#'), None);
/// ```
#[must_use]
pub fn phrase_to_look_for(text: &str, prefix: char) -> Option<String> {
    TriggerRules::default().phrase_to_look_for(text, prefix)
}

fn word_end(chars: &[char], from: usize) -> usize {
    chars
        .iter()
        .skip(from)
        .position(|ch| ch.is_whitespace())
        .map_or(chars.len(), |offset| from + offset)
}

fn phrase_end(chars: &[char], phrase_start: usize, cursor: usize) -> usize {
    let first_end = word_end(chars, phrase_start);
    let second_start = first_end + 1;
    let single_space = chars.get(first_end) == Some(&' ');
    let second_is_token = chars
        .get(second_start)
        .is_some_and(|ch| TriggerKind::ALL.iter().any(|kind| kind.prefix() == *ch));
    let extends = first_end > phrase_start && single_space && !second_is_token;
    if extends && cursor > second_start && cursor <= word_end(chars, second_start) {
        cursor
    } else {
        first_end
    }
}
