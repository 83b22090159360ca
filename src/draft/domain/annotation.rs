//! Positioned decorations over the draft buffer.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ChannelId, TextRange, UserId};

/// Scheme used by the codec for user mentions.
pub const USER_SCHEME: &str = "pn-user";

/// Scheme used by the codec for channel references.
pub const CHANNEL_SCHEME: &str = "pn-channel";

/// What an annotation points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationTarget {
    /// A mentioned user.
    User(UserId),
    /// A referenced channel.
    Channel(ChannelId),
    /// A hyperlink.
    Link(Url),
}

/// A typed annotation covering a range of the plain buffer.
///
/// Annotations have no identity beyond their position and target; two
/// annotations are equal when both match.
///
/// # Examples
///
/// ```
/// use draftline::draft::domain::{Annotation, TextRange, UserId};
///
/// let mention = Annotation::user_mention(TextRange::new(4, 14), UserId::new("example.user.0"));
/// assert_eq!(mention.start_char(), Some('@'));
/// assert_eq!(mention.range().end(), 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    range: TextRange,
    target: AnnotationTarget,
}

impl Annotation {
    /// Creates an annotation from its parts.
    #[must_use]
    pub const fn new(range: TextRange, target: AnnotationTarget) -> Self {
        Self { range, target }
    }

    /// Creates a user mention.
    #[must_use]
    pub const fn user_mention(range: TextRange, user_id: UserId) -> Self {
        Self::new(range, AnnotationTarget::User(user_id))
    }

    /// Creates a channel reference.
    #[must_use]
    pub const fn channel_reference(range: TextRange, channel_id: ChannelId) -> Self {
        Self::new(range, AnnotationTarget::Channel(channel_id))
    }

    /// Creates a hyperlink.
    #[must_use]
    pub const fn text_link(range: TextRange, url: Url) -> Self {
        Self::new(range, AnnotationTarget::Link(url))
    }

    /// Returns the covered range.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    /// Returns the first covered character offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.range.start()
    }

    /// Returns the annotation target.
    #[must_use]
    pub const fn target(&self) -> &AnnotationTarget {
        &self.target
    }

    /// Returns `true` for hyperlinks.
    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self.target, AnnotationTarget::Link(_))
    }

    /// Returns the trigger character conventionally shown before the
    /// annotated text, if the variant has one.
    #[must_use]
    pub const fn start_char(&self) -> Option<char> {
        match self.target {
            AnnotationTarget::User(_) => Some('@'),
            AnnotationTarget::Channel(_) => Some('#'),
            AnnotationTarget::Link(_) => None,
        }
    }

    /// Returns the codec target string: `pn-user://id`, `pn-channel://id`,
    /// or the link URL.
    #[must_use]
    pub fn target_uri(&self) -> String {
        match &self.target {
            AnnotationTarget::User(id) => format!("{USER_SCHEME}://{id}"),
            AnnotationTarget::Channel(id) => format!("{CHANNEL_SCHEME}://{id}"),
            AnnotationTarget::Link(url) => url.as_str().to_owned(),
        }
    }

    /// Returns a copy of the annotation moved to `range`.
    #[must_use]
    pub(crate) fn with_range(&self, range: TextRange) -> Self {
        Self {
            range,
            target: self.target.clone(),
        }
    }
}
