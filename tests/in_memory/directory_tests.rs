//! Suggestion source and limit tests against the in-memory directory.

use std::io;
use std::sync::Arc;

use crate::in_memory::helpers::{channel_id, directory, runtime, sender, start_session};
use draftline::draft::{
    adapters::memory::{InMemoryDirectory, InMemoryMessageSender},
    config::DraftConfig,
    domain::{ChannelId, SuggestedTarget},
    ports::directory::DirectoryResult,
};
use rstest::rstest;
use tokio::runtime::Runtime;

fn suggested_ids(
    rt: &Runtime,
    channel_id: ChannelId,
    directory: Arc<InMemoryDirectory>,
    sender: Arc<InMemoryMessageSender>,
    config: DraftConfig,
) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let mut service = start_session(channel_id, directory, sender, config);
    let _guard = rt.enter();
    service.insert_text(0, "@example")?;
    let set = rt
        .block_on(service.next_suggestions())
        .ok_or("no suggestions")?;
    Ok(set
        .suggestions
        .iter()
        .map(|suggestion| match &suggestion.target {
            SuggestedTarget::User(user) => user.id.as_str().to_owned(),
            SuggestedTarget::Channel(channel) => channel.id.as_str().to_owned(),
        })
        .collect())
}

#[rstest]
#[case::channel_members(DraftConfig::default(), vec!["example.user.0", "example.user.1"])]
#[case::whole_directory(DraftConfig::global(), vec!["outsider", "example.user.0", "example.user.1"])]
#[case::limited(DraftConfig::global().with_user_limit(1), vec!["outsider"])]
fn suggestion_source_follows_config(
    runtime: io::Result<Runtime>,
    channel_id: ChannelId,
    directory: DirectoryResult<Arc<InMemoryDirectory>>,
    sender: Arc<InMemoryMessageSender>,
    #[case] config: DraftConfig,
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;

    let ids = suggested_ids(&rt, channel_id, directory?, sender, config)?;

    assert_eq!(ids, expected);
    Ok(())
}
