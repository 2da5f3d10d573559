//! HTTP bindings for the collaborator seams.
//!
//! - [`sheets`] — the spreadsheet store (Sheets v4)
//! - [`script`] — the form-copy executor (Apps Script execution API)
//! - [`slack`] — the messaging platform (Slack Web API)
//!
//! Each binding implements a trait from `citysync-roster` or `citysync-chat`;
//! nothing here is consulted by the procedures directly.

mod http;
pub mod script;
pub mod sheets;
pub mod slack;

pub use script::ScriptFormCopier;
pub use sheets::{SheetsSession, SheetsWorksheet};
pub use slack::SlackClient;
