//! Restoring drafts from markup produced by a previous send.

use std::io;
use std::sync::Arc;

use crate::in_memory::helpers::{channel_id, directory, runtime, sender};
use draftline::draft::{
    adapters::memory::{InMemoryDirectory, InMemoryMessageSender},
    config::DraftConfig,
    domain::{ChannelId, MessageDraft, SendOptions},
    ports::directory::DirectoryResult,
    services::ComposeService,
};
use rstest::rstest;
use tokio::runtime::Runtime;

/// A sent draft can be reopened for editing with identical annotations.
#[rstest]
fn sent_markup_reopens_as_equal_draft(
    runtime: io::Result<Runtime>,
    channel_id: ChannelId,
    directory: DirectoryResult<Arc<InMemoryDirectory>>,
    sender: Arc<InMemoryMessageSender>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let directory = directory?;
    let mut draft = MessageDraft::new(channel_id.clone());
    draft.insert_text(0, "see [notes] \\ here: ")?;
    let end = draft.len();
    draft.add_linked_text("the doc", "https://example.com/a)b", end)?;
    let expected = draft.clone();

    let mut service = ComposeService::from_draft(
        draft,
        Arc::clone(&directory),
        Arc::clone(&sender),
        DraftConfig::default(),
    );
    rt.block_on(service.send(SendOptions::default()))?;
    let markup = sender
        .sent()
        .first()
        .map(|message| message.message.text.clone())
        .ok_or("nothing sent")?;

    let restored = MessageDraft::from_markup(channel_id, &markup);

    assert_eq!(restored.text(), expected.text());
    assert_eq!(restored.annotations(), expected.annotations());
    Ok(())
}
