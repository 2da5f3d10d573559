//! Error types for citysync-roster.

use thiserror::Error;

/// All errors that can arise from the spreadsheet store or the form executor.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The remote API acknowledged the call and rejected it.
    #[error("api error: {0}")]
    Api(String),

    /// The call never produced a usable response (DNS, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The roster spreadsheet has no worksheet at the configured index.
    #[error("no worksheet at index {index} in the roster spreadsheet")]
    WorksheetMissing { index: usize },
}
