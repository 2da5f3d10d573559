//! Group inspection — listing and topic reads.

use citysync_core::{GroupId, GroupRecord};

use crate::client::MessagingClient;
use crate::error::ChatError;

/// List existing groups as name/id records. Archived groups are excluded;
/// they cannot host an active city conversation.
pub fn list_groups<M: MessagingClient>(client: &M) -> Result<Vec<GroupRecord>, ChatError> {
    client.list_groups(true)
}

/// Current topic text of one group; the empty string when no topic is set.
pub fn group_topic<M: MessagingClient>(client: &M, id: &GroupId) -> Result<String, ChatError> {
    Ok(client.group_info(id)?.topic)
}
