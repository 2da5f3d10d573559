//! Roster reading and sheet reconciliation.
//!
//! [`read`] turns the Cities worksheet into a typed [`Roster`];
//! [`reconcile`] provisions missing per-city resources (responses sheet,
//! copied to-do form) and writes the references back. Both are generic over
//! the collaborator traits in [`session`].

pub mod error;
pub mod reader;
pub mod reconciler;
pub mod session;

pub use error::RosterError;
pub use reader::{read, Roster};
pub use reconciler::{reconcile, responses_sheet_title, RowOutcome, RunReport};
pub use session::{FormCopier, SpreadsheetSession, Worksheet};
