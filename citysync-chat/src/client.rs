//! Collaborator seam for the messaging platform.
//!
//! The procedures in this crate are generic over [`MessagingClient`]; the
//! HTTP binding lives in `citysync-clients`, and tests substitute fakes.

use citysync_core::{GroupId, GroupInfo, GroupName, GroupRecord};

use crate::error::ChatError;

/// Messaging-platform operations the group procedures rely on.
pub trait MessagingClient {
    /// Create one private group with the given platform-safe name.
    fn create_group(&self, name: &GroupName) -> Result<GroupRecord, ChatError>;

    /// List existing groups, optionally excluding archived ones.
    fn list_groups(&self, exclude_archived: bool) -> Result<Vec<GroupRecord>, ChatError>;

    /// Fetch one group's metadata, including its current topic.
    fn group_info(&self, id: &GroupId) -> Result<GroupInfo, ChatError>;

    /// Replace a group's topic text.
    fn set_topic(&self, id: &GroupId, topic: &str) -> Result<(), ChatError>;
}
