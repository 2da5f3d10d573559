//! Group provisioning — one private group per desired name.

use serde::Serialize;

use citysync_core::{GroupId, GroupName};

use crate::client::MessagingClient;

/// Outcome of one create-group attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GroupOutcome {
    /// The group now exists under `id`.
    Created { name: GroupName, id: GroupId },
    /// The platform refused this name; other names were still attempted.
    Failed { name: GroupName, reason: String },
}

/// Attempt to create every named group, in order.
///
/// Names fail independently: a refusal (name taken, invalid, quota) is
/// recorded and the next name is still attempted.
pub fn create_groups<M: MessagingClient>(client: &M, names: &[GroupName]) -> Vec<GroupOutcome> {
    let mut outcomes = Vec::with_capacity(names.len());
    for name in names {
        match client.create_group(name) {
            Ok(record) => {
                tracing::info!("created group {} ({})", record.name, record.id);
                outcomes.push(GroupOutcome::Created {
                    name: name.clone(),
                    id: record.id,
                });
            }
            Err(err) => {
                tracing::warn!("could not create group {name}: {err}");
                outcomes.push(GroupOutcome::Failed {
                    name: name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use citysync_core::GroupRecord;

    struct OneShotClient;

    impl MessagingClient for OneShotClient {
        fn create_group(&self, name: &GroupName) -> Result<GroupRecord, ChatError> {
            if name.0 == "taken" {
                return Err(ChatError::Api {
                    method: "conversations.create",
                    reason: "name_taken".to_string(),
                });
            }
            Ok(GroupRecord {
                id: GroupId::from(format!("G-{}", name.0)),
                name: name.0.clone(),
            })
        }

        fn list_groups(&self, _exclude_archived: bool) -> Result<Vec<GroupRecord>, ChatError> {
            Ok(vec![])
        }

        fn group_info(&self, _id: &GroupId) -> Result<citysync_core::GroupInfo, ChatError> {
            Err(ChatError::Malformed("not used".to_string()))
        }

        fn set_topic(&self, _id: &GroupId, _topic: &str) -> Result<(), ChatError> {
            Ok(())
        }
    }

    #[test]
    fn outcomes_follow_input_order() {
        let names = [GroupName::from("austin"), GroupName::from("boston")];
        let outcomes = create_groups(&OneShotClient, &names);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            &outcomes[0],
            GroupOutcome::Created { name, .. } if name.0 == "austin"
        ));
        assert!(matches!(
            &outcomes[1],
            GroupOutcome::Created { name, .. } if name.0 == "boston"
        ));
    }

    #[test]
    fn refused_name_becomes_failed_outcome() {
        let names = [GroupName::from("taken")];
        let outcomes = create_groups(&OneShotClient, &names);
        assert!(matches!(
            &outcomes[0],
            GroupOutcome::Failed { reason, .. } if reason.contains("name_taken")
        ));
    }
}
