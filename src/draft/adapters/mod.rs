//! Adapters for the draft ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryDirectory`]: user and channel directory backed by
//!   vectors, for tests and demos
//! - [`memory::InMemoryMessageSender`]: records outgoing messages instead of
//!   publishing them

pub mod memory;
