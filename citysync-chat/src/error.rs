//! Error types for citysync-chat.

use thiserror::Error;

/// All errors that can arise from the messaging platform.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The platform acknowledged the call and refused it.
    #[error("{method} failed: {reason}")]
    Api { method: &'static str, reason: String },

    /// The call never produced a usable response (DNS, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}
