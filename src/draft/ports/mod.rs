//! Port trait definitions for the draft subsystem.
//!
//! Ports define what drafting needs from the outside world: a directory to
//! resolve mention and channel prefixes, and a transport to send the result.

pub mod directory;
pub mod sender;

pub use directory::{DirectoryError, DirectoryLookup, DirectoryResult};
pub use sender::{MessageSender, SendError, SendResult};
