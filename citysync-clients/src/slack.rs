//! Messaging-platform binding over the Slack Web API.
//!
//! Slack reports failures inside a 200 response (`ok: false` plus an error
//! code), so every body goes through the envelope parser before any data is
//! extracted.

use serde::Deserialize;

use citysync_chat::{ChatError, MessagingClient};
use citysync_core::{Credentials, GroupId, GroupInfo, GroupName, GroupRecord};

use crate::http::{agent, bearer, body_preview, send, send_json, HttpFailure};

const SLACK_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    agent: ureq::Agent,
    token: String,
}

impl SlackClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            agent: agent(),
            token: credentials.slack_token.clone(),
        }
    }

    fn get_body(
        &self,
        method: &'static str,
        query: &[(&str, &str)],
    ) -> Result<String, ChatError> {
        let url = format!("{SLACK_API_BASE}/{method}");
        let mut request = self.agent.get(&url).set("Authorization", &bearer(&self.token));
        for (name, value) in query {
            request = request.query(name, value);
        }
        send(request).map_err(|failure| chat_err(method, failure))
    }

    fn post_body(
        &self,
        method: &'static str,
        payload: serde_json::Value,
    ) -> Result<String, ChatError> {
        let url = format!("{SLACK_API_BASE}/{method}");
        let request = self.agent.post(&url).set("Authorization", &bearer(&self.token));
        send_json(request, payload).map_err(|failure| chat_err(method, failure))
    }
}

impl MessagingClient for SlackClient {
    fn create_group(&self, name: &GroupName) -> Result<GroupRecord, ChatError> {
        let payload = serde_json::json!({ "name": name.0, "is_private": true });
        let body = self.post_body("conversations.create", payload)?;
        let info = parse_channel(&body, "conversations.create")?;
        Ok(GroupRecord {
            id: info.id,
            name: info.name,
        })
    }

    fn list_groups(&self, exclude_archived: bool) -> Result<Vec<GroupRecord>, ChatError> {
        let exclude = if exclude_archived { "true" } else { "false" };
        let body = self.get_body(
            "conversations.list",
            &[
                ("types", "private_channel"),
                ("exclude_archived", exclude),
                ("limit", "1000"),
            ],
        )?;
        parse_channel_list(&body)
    }

    fn group_info(&self, id: &GroupId) -> Result<GroupInfo, ChatError> {
        let body = self.get_body("conversations.info", &[("channel", &id.0)])?;
        parse_channel(&body, "conversations.info")
    }

    fn set_topic(&self, id: &GroupId, topic: &str) -> Result<(), ChatError> {
        let payload = serde_json::json!({ "channel": id.0, "topic": topic });
        let body = self.post_body("conversations.setTopic", payload)?;
        parse_envelope(&body, "conversations.setTopic").map(|_| ())
    }
}

fn chat_err(method: &'static str, failure: HttpFailure) -> ChatError {
    match failure {
        HttpFailure::Status(code, body) => ChatError::Api {
            method,
            reason: format!("HTTP {code}: {}", body_preview(&body)),
        },
        HttpFailure::Transport(reason) => ChatError::Transport(reason),
    }
}

// ---------------------------------------------------------------------------
// Envelope parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    error: Option<String>,
    channel: Option<Channel>,
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
    name: String,
    topic: Option<TopicField>,
}

/// Topic lives one level down: `channel.topic.value`.
#[derive(Debug, Deserialize)]
struct TopicField {
    #[serde(default)]
    value: String,
}

fn parse_envelope(body: &str, method: &'static str) -> Result<Envelope, ChatError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|err| ChatError::Malformed(format!("{method} response: {err}")))?;
    if !envelope.ok {
        return Err(ChatError::Api {
            method,
            reason: envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(envelope)
}

fn parse_channel(body: &str, method: &'static str) -> Result<GroupInfo, ChatError> {
    let envelope = parse_envelope(body, method)?;
    let channel = envelope
        .channel
        .ok_or_else(|| ChatError::Malformed(format!("{method} returned no channel")))?;
    Ok(channel_info(channel))
}

fn parse_channel_list(body: &str) -> Result<Vec<GroupRecord>, ChatError> {
    let envelope = parse_envelope(body, "conversations.list")?;
    Ok(envelope
        .channels
        .into_iter()
        .map(|channel| GroupRecord {
            id: GroupId::from(channel.id),
            name: channel.name,
        })
        .collect())
}

fn channel_info(channel: Channel) -> GroupInfo {
    GroupInfo {
        id: GroupId::from(channel.id),
        name: channel.name,
        topic: channel.topic.map(|topic| topic.value).unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
