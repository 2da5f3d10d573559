//! Group provisioning, inspection, and topic reconciliation against the
//! messaging platform.
//!
//! Public API surface:
//! - [`client`] — the [`MessagingClient`] seam
//! - [`provision`] — [`create_groups`]
//! - [`inspect`] — [`list_groups`] / [`group_topic`]
//! - [`topics`] — [`set_topics`]
//! - [`error`] — [`ChatError`]

pub mod client;
pub mod error;
pub mod inspect;
pub mod provision;
pub mod topics;

pub use client::MessagingClient;
pub use error::ChatError;
pub use inspect::{group_topic, list_groups};
pub use provision::{create_groups, GroupOutcome};
pub use topics::{set_topics, TopicOutcome};
