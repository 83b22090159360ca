//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing without a directory service or a transport.

mod directory;
mod sender;

pub use directory::InMemoryDirectory;
pub use sender::InMemoryMessageSender;
