//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::FreetierConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<FreetierConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &FreetierConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist a single `key = value` setting.
///
/// The file is left untouched if validation fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<FreetierConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
