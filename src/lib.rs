//! Draftline: composing chat messages with mentions and links.
//!
//! This crate provides an editable message draft whose annotations (user
//! mentions, channel references, and text links) track the text as it is
//! edited, together with suggestion lookups for `@` and `#` triggers and a
//! markup format for sending and restoring drafts.
//!
//! # Architecture
//!
//! Draftline follows hexagonal architecture principles:
//!
//! - **Domain**: Pure drafting logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the user directory and transport
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`draft`]: Draft buffer, suggestions, markup, and the compose session

pub mod draft;
