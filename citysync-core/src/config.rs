//! Runtime configuration.
//!
//! Nothing in the pipeline reads the process environment on its own; the
//! environment is consulted exactly once, in [`SyncConfig::from_env`], and the
//! resulting struct is passed to every component at construction.

use std::fmt;

use crate::error::ConfigError;
use crate::types::SpreadsheetId;

/// Key of the roster spreadsheet (the document holding the Cities worksheet).
pub const ROSTER_ID_VAR: &str = "CITYSYNC_ROSTER_ID";
/// OAuth bearer token for the spreadsheet store and the script executor.
pub const GOOGLE_TOKEN_VAR: &str = "CITYSYNC_GOOGLE_TOKEN";
/// Script project that hosts the form-copy function.
pub const COPY_SCRIPT_ID_VAR: &str = "CITYSYNC_COPY_SCRIPT_ID";
/// Bot token for the messaging platform.
pub const SLACK_TOKEN_VAR: &str = "CITYSYNC_SLACK_TOKEN";

/// Auth material for the vendor clients. `Debug` redacts the tokens.
#[derive(Clone)]
pub struct Credentials {
    pub google_token: String,
    pub copy_script_id: String,
    pub slack_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("google_token", &"<redacted>")
            .field("copy_script_id", &self.copy_script_id)
            .field("slack_token", &"<redacted>")
            .finish()
    }
}

/// Everything a sync run needs to know, assembled up front.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub roster_id: SpreadsheetId,
    pub credentials: Credentials,
}

impl SyncConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Tests pass a map; production
    /// code goes through [`SyncConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            roster_id: SpreadsheetId::from(require(&lookup, ROSTER_ID_VAR)?),
            credentials: Credentials {
                google_token: require(&lookup, GOOGLE_TOKEN_VAR)?,
                copy_script_id: require(&lookup, COPY_SCRIPT_ID_VAR)?,
                slack_token: require(&lookup, SLACK_TOKEN_VAR)?,
            },
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        None => Err(ConfigError::MissingVar { name }),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyVar { name }),
        Some(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn full_vars() -> HashMap<String, String> {
        vars(&[
            (ROSTER_ID_VAR, "roster-1"),
            (GOOGLE_TOKEN_VAR, "g-token"),
            (COPY_SCRIPT_ID_VAR, "script-1"),
            (SLACK_TOKEN_VAR, "s-token"),
        ])
    }

    #[test]
    fn from_lookup_reads_every_var() {
        let vars = full_vars();
        let config = SyncConfig::from_lookup(|name| vars.get(name).cloned()).expect("config");
        assert_eq!(config.roster_id.0, "roster-1");
        assert_eq!(config.credentials.google_token, "g-token");
        assert_eq!(config.credentials.copy_script_id, "script-1");
        assert_eq!(config.credentials.slack_token, "s-token");
    }

    #[test]
    fn missing_var_is_an_error() {
        let mut vars = full_vars();
        vars.remove(SLACK_TOKEN_VAR);
        let err = SyncConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar { name: SLACK_TOKEN_VAR });
    }

    #[test]
    fn blank_var_is_an_error() {
        let mut vars = full_vars();
        vars.insert(GOOGLE_TOKEN_VAR.to_string(), "   ".to_string());
        let err = SyncConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyVar { name: GOOGLE_TOKEN_VAR });
    }

    #[test]
    fn debug_redacts_tokens() {
        let vars = full_vars();
        let config = SyncConfig::from_lookup(|name| vars.get(name).cloned()).expect("config");
        let debug = format!("{:?}", config.credentials);
        assert!(!debug.contains("g-token"));
        assert!(!debug.contains("s-token"));
        assert!(debug.contains("script-1"));
    }
}
