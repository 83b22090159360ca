//! Directory lookup port.
//!
//! The directory resolves typed prefixes into users and channels. Lookups are
//! slow and may fail; callers treat failure as "no suggestions this round".

use async_trait::async_trait;
use thiserror::Error;

use crate::draft::domain::{ChannelId, ChannelSummary, UserSummary};

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Port for user and channel lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Finds users whose name or id starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the directory cannot be queried.
    async fn find_users(&self, prefix: &str, limit: usize) -> DirectoryResult<Vec<UserSummary>>;

    /// Finds channels whose name or id starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the directory cannot be queried.
    async fn find_channels(
        &self,
        prefix: &str,
        limit: usize,
    ) -> DirectoryResult<Vec<ChannelSummary>>;

    /// Finds members of `channel_id` whose name or id starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the directory cannot be queried.
    async fn find_channel_members(
        &self,
        channel_id: &ChannelId,
        prefix: &str,
        limit: usize,
    ) -> DirectoryResult<Vec<UserSummary>>;
}

/// Errors reported by directory adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// The directory refused the query.
    #[error("directory rejected query: {0}")]
    Rejected(String),
}
