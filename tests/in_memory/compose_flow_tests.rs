//! Compose flow tests for [`ComposeService`] over the in-memory adapters.
//!
//! [`ComposeService`]: draftline::draft::services::ComposeService

use std::io;
use std::sync::Arc;

use crate::in_memory::helpers::{channel_id, directory, runtime, sender, start_session};
use draftline::draft::{
    adapters::memory::{InMemoryDirectory, InMemoryMessageSender},
    config::DraftConfig,
    domain::{ChannelId, FileAttachment, SendOptions, TriggerKind},
    ports::directory::DirectoryResult,
};
use rstest::rstest;
use tokio::runtime::Runtime;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Types a mention and a channel reference, accepts both, and sends.
#[rstest]
fn mention_and_channel_reference_are_sent(
    runtime: io::Result<Runtime>,
    channel_id: ChannelId,
    directory: DirectoryResult<Arc<InMemoryDirectory>>,
    sender: Arc<InMemoryMessageSender>,
) -> TestResult {
    let rt = runtime?;
    let mut service = start_session(
        channel_id,
        directory?,
        Arc::clone(&sender),
        DraftConfig::default(),
    );
    let _guard = rt.enter();

    service.insert_text(0, "ask @exa in #dev")?;
    let mut sets = Vec::new();
    while let Some(set) = rt.block_on(service.next_suggestions()) {
        sets.push(set);
    }
    sets.sort_by_key(|set| set.offset());

    let [mention_set, channel_set] = sets.as_slice() else {
        return Err(format!("expected two suggestion sets, got {}", sets.len()).into());
    };
    assert_eq!(mention_set.trigger.kind, TriggerKind::Mention);
    assert_eq!(mention_set.suggestions.len(), 2);
    assert_eq!(channel_set.trigger.kind, TriggerKind::ChannelReference);

    let channel = channel_set.suggestions.first().ok_or("no channel suggestion")?.clone();
    let mention = mention_set.suggestions.first().ok_or("no mention suggestion")?.clone();
    service.insert_suggestion(&channel)?;
    service.insert_suggestion(&mention)?;

    assert_eq!(
        service.draft().render(),
        "ask [example User 0](pn-user://example.user.0) in [development](pn-channel://dev)"
    );

    service.add_file(FileAttachment::new("f1", "notes.txt"));
    let message_id = rt.block_on(service.send(SendOptions::default()))?;

    let sent = sender.sent();
    let [message] = sent.as_slice() else {
        return Err(format!("expected one message, got {}", sent.len()).into());
    };
    assert_eq!(message.message_id, message_id);
    assert_eq!(message.message.mentioned_users.len(), 1);
    assert_eq!(message.message.referenced_channels.len(), 1);
    assert_eq!(message.message.files.len(), 1);
    assert!(service.draft().is_empty());
    Ok(())
}

/// Accepting the later trigger first keeps the earlier suggestion valid.
#[rstest]
fn earlier_suggestion_survives_later_replacement(
    runtime: io::Result<Runtime>,
    channel_id: ChannelId,
    directory: DirectoryResult<Arc<InMemoryDirectory>>,
    sender: Arc<InMemoryMessageSender>,
) -> TestResult {
    let rt = runtime?;
    let mut service = start_session(channel_id, directory?, sender, DraftConfig::default());
    let _guard = rt.enter();

    service.insert_text(0, "@exa and @exa")?;
    let mut sets = Vec::new();
    while let Some(set) = rt.block_on(service.next_suggestions()) {
        sets.push(set);
    }
    sets.sort_by_key(|set| set.offset());
    let first = sets.first().and_then(|set| set.suggestions.first()).ok_or("missing")?.clone();
    let last = sets.last().and_then(|set| set.suggestions.last()).ok_or("missing")?.clone();

    service.insert_suggestion(&last)?;
    service.insert_suggestion(&first)?;

    assert_eq!(service.draft().text(), "example User 0 and example User 1");
    assert_eq!(service.draft().annotations().len(), 2);
    Ok(())
}

/// Deleting part of a mention drops the mention but keeps later links aligned.
#[rstest]
fn deleting_into_mention_drops_it(
    runtime: io::Result<Runtime>,
    channel_id: ChannelId,
    directory: DirectoryResult<Arc<InMemoryDirectory>>,
    sender: Arc<InMemoryMessageSender>,
) -> TestResult {
    let rt = runtime?;
    let mut service = start_session(channel_id, directory?, sender, DraftConfig::default());
    let _guard = rt.enter();

    service.insert_text(0, "@exa ")?;
    let set = rt.block_on(service.next_suggestions()).ok_or("no suggestions")?;
    let suggestion = set.suggestions.first().ok_or("empty set")?.clone();
    service.insert_suggestion(&suggestion)?;
    let end = service.draft().len();
    service.add_linked_text("site", "https://example.com", end)?;

    service.remove_text(13, 1)?;

    assert_eq!(service.draft().text(), "example User  site");
    assert_eq!(
        service.draft().render(),
        "example User  [site](https://example.com/)"
    );
    Ok(())
}
