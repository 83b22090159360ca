//! In-memory implementation of the `DirectoryLookup` port.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::draft::{
    domain::{ChannelId, ChannelSummary, UserId, UserSummary},
    ports::directory::{DirectoryError, DirectoryLookup, DirectoryResult},
};

/// In-memory user and channel directory.
///
/// Matches are case-insensitive prefixes of the name or the id, returned in
/// name order. Thread-safe via internal [`RwLock`]. Suitable for tests and
/// demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    store: Arc<RwLock<DirectoryStore>>,
}

#[derive(Debug, Default)]
struct DirectoryStore {
    users: Vec<UserSummary>,
    channels: Vec<ChannelSummary>,
    members: HashMap<ChannelId, HashSet<UserId>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `users` and `channels`.
    #[must_use]
    pub fn with_entries(
        users: impl IntoIterator<Item = UserSummary>,
        channels: impl IntoIterator<Item = ChannelSummary>,
    ) -> Self {
        let store = DirectoryStore {
            users: users.into_iter().collect(),
            channels: channels.into_iter().collect(),
            members: HashMap::new(),
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Adds or replaces a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] if the lock is poisoned.
    pub fn add_user(&self, user: UserSummary) -> DirectoryResult<()> {
        let mut guard = self.write()?;
        guard.users.retain(|existing| existing.id != user.id);
        guard.users.push(user);
        Ok(())
    }

    /// Adds or replaces a channel.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] if the lock is poisoned.
    pub fn add_channel(&self, channel: ChannelSummary) -> DirectoryResult<()> {
        let mut guard = self.write()?;
        guard.channels.retain(|existing| existing.id != channel.id);
        guard.channels.push(channel);
        Ok(())
    }

    /// Records `user_id` as a member of `channel_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] if the lock is poisoned.
    pub fn add_member(&self, channel_id: ChannelId, user_id: UserId) -> DirectoryResult<()> {
        self.write()?
            .members
            .entry(channel_id)
            .or_default()
            .insert(user_id);
        Ok(())
    }

    fn read(&self) -> DirectoryResult<std::sync::RwLockReadGuard<'_, DirectoryStore>> {
        self.store
            .read()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }

    fn write(&self) -> DirectoryResult<std::sync::RwLockWriteGuard<'_, DirectoryStore>> {
        self.store
            .write()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }
}

fn matches_prefix(name: &str, id: &str, prefix: &str) -> bool {
    let needle = prefix.to_lowercase();
    name.to_lowercase().starts_with(&needle) || id.to_lowercase().starts_with(&needle)
}

fn select_users<'a>(
    users: impl Iterator<Item = &'a UserSummary>,
    prefix: &str,
    limit: usize,
) -> Vec<UserSummary> {
    let mut found: Vec<UserSummary> = users
        .filter(|user| matches_prefix(&user.name, user.id.as_str(), prefix))
        .cloned()
        .collect();
    found.sort_by(|left, right| left.name.cmp(&right.name).then_with(|| left.id.cmp(&right.id)));
    found.truncate(limit);
    found
}

#[async_trait]
impl DirectoryLookup for InMemoryDirectory {
    async fn find_users(&self, prefix: &str, limit: usize) -> DirectoryResult<Vec<UserSummary>> {
        let guard = self.read()?;
        Ok(select_users(guard.users.iter(), prefix, limit))
    }

    async fn find_channels(
        &self,
        prefix: &str,
        limit: usize,
    ) -> DirectoryResult<Vec<ChannelSummary>> {
        let guard = self.read()?;
        let mut found: Vec<ChannelSummary> = guard
            .channels
            .iter()
            .filter(|channel| matches_prefix(&channel.name, channel.id.as_str(), prefix))
            .cloned()
            .collect();
        found.sort_by(|left, right| left.name.cmp(&right.name).then_with(|| left.id.cmp(&right.id)));
        found.truncate(limit);
        Ok(found)
    }

    async fn find_channel_members(
        &self,
        channel_id: &ChannelId,
        prefix: &str,
        limit: usize,
    ) -> DirectoryResult<Vec<UserSummary>> {
        let guard = self.read()?;
        let Some(members) = guard.members.get(channel_id) else {
            return Ok(Vec::new());
        };
        Ok(select_users(
            guard.users.iter().filter(|user| members.contains(&user.id)),
            prefix,
            limit,
        ))
    }
}
