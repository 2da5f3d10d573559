//! Shared HTTP plumbing for the vendor bindings.

use std::time::Duration;

use citysync_roster::RosterError;

/// Error-message bodies are clipped to this many bytes.
const BODY_PREVIEW_LIMIT: usize = 300;

/// A failed HTTP exchange, before mapping into a domain error.
pub(crate) enum HttpFailure {
    /// Non-2xx response; carries the status and the (possibly empty) body.
    Status(u16, String),
    /// The call never produced a response.
    Transport(String),
}

/// Agent with bounded timeouts; one per client, clones share the pool.
pub(crate) fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(5))
        .timeout_read(Duration::from_secs(30))
        .timeout_write(Duration::from_secs(30))
        .build()
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Issue a GET-style request and return the body text.
pub(crate) fn send(request: ureq::Request) -> Result<String, HttpFailure> {
    finish(request.call())
}

/// Issue a request with a JSON payload and return the body text.
pub(crate) fn send_json(
    request: ureq::Request,
    payload: serde_json::Value,
) -> Result<String, HttpFailure> {
    finish(request.send_json(payload))
}

fn finish(result: Result<ureq::Response, ureq::Error>) -> Result<String, HttpFailure> {
    match result {
        Ok(response) => response
            .into_string()
            .map_err(|err| HttpFailure::Transport(format!("reading response body: {err}"))),
        Err(ureq::Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(HttpFailure::Status(code, body))
        }
        Err(ureq::Error::Transport(err)) => Err(HttpFailure::Transport(err.to_string())),
    }
}

/// Map a failed exchange into the roster error vocabulary.
pub(crate) fn roster_err(failure: HttpFailure) -> RosterError {
    match failure {
        HttpFailure::Status(code, body) => {
            RosterError::Api(format!("HTTP {code}: {}", body_preview(&body)))
        }
        HttpFailure::Transport(reason) => RosterError::Transport(reason),
    }
}

/// Clip a long body for inclusion in an error message.
pub(crate) fn body_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_PREVIEW_LIMIT {
        return trimmed.to_string();
    }
    let mut end = BODY_PREVIEW_LIMIT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
