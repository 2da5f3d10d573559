//! Topic reconciliation — write a group's topic only when it differs.

use serde::Serialize;

use citysync_core::{GroupId, TopicAssignment};

use crate::client::MessagingClient;
use crate::inspect;

/// Outcome of reconciling one topic assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TopicOutcome {
    /// The topic differed and was replaced.
    Set { group: GroupId, topic: String },
    /// The current topic already matched; no write was issued.
    Unchanged { group: GroupId },
    /// The entry failed; later entries still ran.
    Failed { group: GroupId, reason: String },
}

/// Apply desired topics, in order, touching only groups whose current topic
/// differs from the desired text.
///
/// Entries fail independently: a failed read or write is recorded and the
/// next entry still runs.
pub fn set_topics<M: MessagingClient>(
    client: &M,
    assignments: &[TopicAssignment],
) -> Vec<TopicOutcome> {
    assignments
        .iter()
        .map(|assignment| reconcile_topic(client, assignment))
        .collect()
}

fn reconcile_topic<M: MessagingClient>(
    client: &M,
    assignment: &TopicAssignment,
) -> TopicOutcome {
    let group = assignment.group.clone();
    let current = match inspect::group_topic(client, &group) {
        Ok(topic) => topic,
        Err(err) => {
            tracing::warn!("could not read topic for {group}: {err}");
            return TopicOutcome::Failed {
                group,
                reason: err.to_string(),
            };
        }
    };

    if current == assignment.topic {
        tracing::debug!("topic for {group} already current");
        return TopicOutcome::Unchanged { group };
    }

    match client.set_topic(&group, &assignment.topic) {
        Ok(()) => {
            tracing::info!("set topic for {group}");
            TopicOutcome::Set {
                group,
                topic: assignment.topic.clone(),
            }
        }
        Err(err) => {
            tracing::warn!("could not set topic for {group}: {err}");
            TopicOutcome::Failed {
                group,
                reason: err.to_string(),
            }
        }
    }
}
