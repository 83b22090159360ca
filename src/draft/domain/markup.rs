//! Canonical wire markup for annotated drafts.
//!
//! Annotations are written as `[display text](target)` where the target is
//! `pn-user://<id>`, `pn-channel://<id>`, or the link URL. Plain text escapes
//! `\`, `[` and `]` with a backslash, and targets escape `\` and `)`, so that
//! every valid draft survives a render/parse round trip unchanged.
//!
//! # Examples
//!
//! ```
//! use draftline::draft::domain::{markup, Annotation, AnnotationStore, TextRange, UserId};
//!
//! let annotations = AnnotationStore::from_annotations([Annotation::user_mention(
//!     TextRange::new(4, 14),
//!     UserId::new("example.user.0"),
//! )])
//! .expect("single annotation cannot overlap");
//!
//! let rendered = markup::render("abc example User 0 def 123", &annotations);
//! assert_eq!(rendered, "abc [example User 0](pn-user://example.user.0) def 123");
//!
//! let parsed = markup::parse(&rendered);
//! assert_eq!(parsed.text, "abc example User 0 def 123");
//! assert_eq!(parsed.annotations, annotations);
//! ```

use url::Url;

use super::annotation::{CHANNEL_SCHEME, USER_SCHEME};
use super::{Annotation, AnnotationStore, AnnotationTarget, ChannelId, TextRange, UserId};

const ESCAPE: char = '\\';

/// Plain text and annotations recovered from markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMarkup {
    /// The plain buffer with every token stripped to its display text.
    pub text: String,
    /// Annotations positioned in `text`.
    pub annotations: AnnotationStore,
}

/// Renders `text` and its annotations as canonical markup.
#[must_use]
pub fn render(text: &str, annotations: &AnnotationStore) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for annotation in annotations {
        let range = annotation.range();
        push_text(&mut out, span(&chars, cursor, range.start()));
        out.push('[');
        push_text(&mut out, span(&chars, range.start(), range.end()));
        out.push_str("](");
        for ch in annotation.target_uri().chars() {
            if matches!(ch, ESCAPE | ')') {
                out.push(ESCAPE);
            }
            out.push(ch);
        }
        out.push(')');
        cursor = range.end();
    }

    push_text(&mut out, span(&chars, cursor, chars.len()));
    out
}

/// Renders `text` as plain text, restoring the trigger character in front of
/// mentions and channel references that do not already start with it.
#[must_use]
pub fn render_plain_text(text: &str, annotations: &AnnotationStore) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for annotation in annotations {
        let range = annotation.range();
        out.extend(span(&chars, cursor, range.start()));
        let display = span(&chars, range.start(), range.end());
        if let Some(start_char) = annotation.start_char()
            && display.first() != Some(&start_char)
        {
            out.push(start_char);
        }
        out.extend(display);
        cursor = range.end();
    }

    out.extend(span(&chars, cursor, chars.len()));
    out
}

/// Parses canonical markup back into plain text and annotations.
///
/// Parsing never fails: anything that does not form a complete token with a
/// recognised target is kept as literal text.
#[must_use]
pub fn parse(markup: &str) -> ParsedMarkup {
    let chars: Vec<char> = markup.chars().collect();
    let mut parsed = ParsedMarkup::default();
    let mut text_len = 0;
    let mut index = 0;

    while let Some(&ch) = chars.get(index) {
        if ch == ESCAPE
            && let Some(&escaped) = chars.get(index + 1).filter(|next| is_text_escapable(**next))
        {
            parsed.text.push(escaped);
            text_len += 1;
            index += 2;
            continue;
        }
        if ch == '['
            && let Some(token) = parse_token(&chars, index)
        {
            let length = token.display.chars().count();
            parsed.text.push_str(&token.display);
            parsed.annotations.push_ordered(Annotation::new(
                TextRange::new(text_len, length),
                token.target,
            ));
            text_len += length;
            index = token.next;
            continue;
        }
        parsed.text.push(ch);
        text_len += 1;
        index += 1;
    }

    parsed
}

struct Token {
    display: String,
    target: AnnotationTarget,
    next: usize,
}

fn parse_token(chars: &[char], open: usize) -> Option<Token> {
    let (display, close) = read_until(chars, open + 1, ']', is_text_escapable, Some('['))?;
    if display.is_empty() || chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let (uri, end) = read_until(chars, close + 2, ')', is_target_escapable, None)?;
    let target = parse_target(&uri)?;
    Some(Token {
        display,
        target,
        next: end + 1,
    })
}

/// Reads characters from `from` up to an unescaped `terminator`, returning
/// the unescaped content and the terminator's index.
fn read_until(
    chars: &[char],
    from: usize,
    terminator: char,
    escapable: fn(char) -> bool,
    forbidden: Option<char>,
) -> Option<(String, usize)> {
    let mut content = String::new();
    let mut index = from;
    loop {
        let ch = *chars.get(index)?;
        if ch == terminator {
            return Some((content, index));
        }
        if Some(ch) == forbidden {
            return None;
        }
        if ch == ESCAPE
            && let Some(&escaped) = chars.get(index + 1).filter(|next| escapable(**next))
        {
            content.push(escaped);
            index += 2;
            continue;
        }
        content.push(ch);
        index += 1;
    }
}

fn parse_target(uri: &str) -> Option<AnnotationTarget> {
    if let Some(id) = strip_scheme(uri, USER_SCHEME) {
        return (!id.is_empty()).then(|| AnnotationTarget::User(UserId::new(id)));
    }
    if let Some(id) = strip_scheme(uri, CHANNEL_SCHEME) {
        return (!id.is_empty()).then(|| AnnotationTarget::Channel(ChannelId::new(id)));
    }
    Url::parse(uri)
        .ok()
        .filter(|url| !matches!(url.scheme(), USER_SCHEME | CHANNEL_SCHEME))
        .map(AnnotationTarget::Link)
}

fn strip_scheme<'a>(uri: &'a str, scheme: &str) -> Option<&'a str> {
    uri.strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix("://"))
}

fn span(chars: &[char], start: usize, end: usize) -> &[char] {
    chars.get(start..end).unwrap_or_default()
}

fn push_text(out: &mut String, chars: &[char]) {
    for &ch in chars {
        if is_text_escapable(ch) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
}

const fn is_text_escapable(ch: char) -> bool {
    matches!(ch, ESCAPE | '[' | ']')
}

const fn is_target_escapable(ch: char) -> bool {
    matches!(ch, ESCAPE | ')')
}
