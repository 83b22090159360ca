//! Shared test helpers for in-memory integration tests.

use std::io;
use std::sync::Arc;

use draftline::draft::{
    adapters::memory::{InMemoryDirectory, InMemoryMessageSender},
    config::DraftConfig,
    domain::{ChannelId, ChannelSummary, UserId, UserSummary},
    ports::directory::DirectoryResult,
    services::ComposeService,
};
use rstest::fixture;
use tokio::runtime::Runtime;

/// Compose service wired to the in-memory adapters.
pub type MemoryComposeService = ComposeService<InMemoryDirectory, InMemoryMessageSender>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides the channel every test drafts into.
#[fixture]
pub fn channel_id() -> ChannelId {
    ChannelId::new("general")
}

/// Provides a directory with three users, two of them in `general`.
///
/// # Errors
///
/// Returns an error if the directory lock is poisoned.
#[fixture]
pub fn directory() -> DirectoryResult<Arc<InMemoryDirectory>> {
    let directory = InMemoryDirectory::with_entries(
        [
            UserSummary::new("example.user.0", "example User 0"),
            UserSummary::new("example.user.1", "example User 1"),
            UserSummary::new("outsider", "example Outsider"),
        ],
        [
            ChannelSummary::new("general", "general"),
            ChannelSummary::new("dev", "development"),
        ],
    );
    let general = ChannelId::new("general");
    directory.add_member(general.clone(), UserId::new("example.user.0"))?;
    directory.add_member(general, UserId::new("example.user.1"))?;
    Ok(Arc::new(directory))
}

/// Provides a fresh sender for each test.
#[fixture]
pub fn sender() -> Arc<InMemoryMessageSender> {
    Arc::new(InMemoryMessageSender::new())
}

/// Starts a compose session with an empty draft.
///
/// Lookups are spawned on whichever runtime is entered when text is edited.
pub fn start_session(
    channel_id: ChannelId,
    directory: Arc<InMemoryDirectory>,
    sender: Arc<InMemoryMessageSender>,
    config: DraftConfig,
) -> MemoryComposeService {
    ComposeService::new(channel_id, directory, sender, config)
}
