pub mod groups;
pub mod roster;
pub mod sync;

use anyhow::{Context, Result};
use citysync_core::SyncConfig;

/// Load the runtime configuration from the process environment.
pub(crate) fn load_config() -> Result<SyncConfig> {
    SyncConfig::from_env().context("configuration incomplete (set the CITYSYNC_* variables)")
}
