//! World state for compose BDD scenarios.

use std::sync::Arc;

use draftline::draft::{
    adapters::memory::{InMemoryDirectory, InMemoryMessageSender},
    config::DraftConfig,
    domain::{ChannelId, ChannelSummary, UserId, UserSummary},
    error::DraftError,
    services::{ComposeService, SuggestionSet},
};
use rstest::fixture;

pub type TestComposeService = ComposeService<InMemoryDirectory, InMemoryMessageSender>;

/// World state for compose BDD tests.
pub struct ComposeWorld {
    pub service: Option<TestComposeService>,
    pub sender: Arc<InMemoryMessageSender>,
    pub delivered: Vec<SuggestionSet>,
    pub last_error: Option<DraftError>,
}

impl Default for ComposeWorld {
    fn default() -> Self {
        Self {
            service: None,
            sender: Arc::new(InMemoryMessageSender::new()),
            delivered: Vec::new(),
            last_error: None,
        }
    }
}

impl ComposeWorld {
    /// Builds a session for `general` whose directory knows two example users
    /// and two channels.
    pub fn start_session(&mut self) -> eyre::Result<()> {
        let general = ChannelId::new("general");
        let directory = InMemoryDirectory::with_entries(
            [
                UserSummary::new("example.user.0", "example User 0"),
                UserSummary::new("someone.else", "someone else"),
            ],
            [
                ChannelSummary::new("general", "general"),
                ChannelSummary::new("random", "random"),
            ],
        );
        directory.add_member(general.clone(), UserId::new("example.user.0"))?;
        directory.add_member(general.clone(), UserId::new("someone.else"))?;

        self.service = Some(ComposeService::new(
            general,
            Arc::new(directory),
            Arc::clone(&self.sender),
            DraftConfig::default(),
        ));
        self.delivered.clear();
        self.last_error = None;
        Ok(())
    }

    pub fn service(&mut self) -> eyre::Result<&mut TestComposeService> {
        self.service
            .as_mut()
            .ok_or_else(|| eyre::eyre!("compose session not started"))
    }
}

#[fixture]
pub fn world() -> ComposeWorld {
    ComposeWorld::default()
}

pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
