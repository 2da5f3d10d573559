//! Citysync core library — domain types, name normalization, configuration.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`normalize`] — city name to platform-safe group name
//! - [`config`] — [`SyncConfig`] and environment loading
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::{Credentials, SyncConfig};
pub use error::ConfigError;
pub use types::{
    CityName, CityRecord, FormUrl, GroupId, GroupInfo, GroupName, GroupRecord, SheetKey,
    SpreadsheetId, TopicAssignment,
};
