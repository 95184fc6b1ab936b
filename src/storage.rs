//! Configuration persistence in the browser's localStorage.

use leafcheck_core::{AppConfig, ConfigError};

/// LocalStorage key holding the JSON configuration.
const LOCALSTORAGE_KEY: &str = "leafcheck-config";

/// Load the configuration, falling back to defaults when none is stored.
pub fn load_config() -> AppConfig {
    match load_from_local_storage() {
        Ok(Some(config)) => {
            log::info!("Loaded configuration from localStorage");
            config
        }
        Ok(None) => {
            log::debug!("No config found in localStorage, using defaults");
            AppConfig::default()
        }
        Err(e) => {
            log::warn!("Ignoring stored configuration: {}", e);
            AppConfig::default()
        }
    }
}

/// Read and validate the stored configuration, if any.
fn load_from_local_storage() -> Result<Option<AppConfig>, ConfigError> {
    let window = web_sys::window()
        .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

    let storage = window
        .local_storage()
        .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
        .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

    let json = storage
        .get_item(LOCALSTORAGE_KEY)
        .map_err(|e| ConfigError::StorageError(format!("Failed to read localStorage: {:?}", e)))?;

    json.map(|json| AppConfig::from_json(&json)).transpose()
}
