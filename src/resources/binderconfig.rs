//! Binder configuration resource.
//!
//! Settings loaded from an INI configuration file. Missing keys keep their
//! defaults, so a missing file is not an error for callers that ignore it.
//!
//! # Configuration File Format
//!
//! ```ini
//! [binder]
//! fail_fast = true
//! validate_on_register = true
//!
//! [pool]
//! default_capacity = 32
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_FAIL_FAST: bool = true;
const DEFAULT_VALIDATE_ON_REGISTER: bool = true;
const DEFAULT_POOL_CAPACITY: usize = 32;
const DEFAULT_CONFIG_PATH: &str = "./autowire.ini";

/// Binder configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct BinderConfig {
    /// Stop the bind driver at the first authoring error.
    pub fail_fast: bool,
    /// Check binding tables when behaviours are registered.
    pub validate_on_register: bool,
    /// Capacity used for object pools created without an explicit one.
    pub pool_capacity: usize,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            fail_fast: DEFAULT_FAIL_FAST,
            validate_on_register: DEFAULT_VALIDATE_ON_REGISTER,
            pool_capacity: DEFAULT_POOL_CAPACITY,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: fail_fast={}, validate_on_register={}, pool_capacity={}",
            self.fail_fast, self.validate_on_register, self.pool_capacity
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_owned())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [binder] section
        if let Some(fail_fast) = config.getbool("binder", "fail_fast").ok().flatten() {
            self.fail_fast = fail_fast;
        }
        if let Some(validate) = config
            .getbool("binder", "validate_on_register")
            .ok()
            .flatten()
        {
            self.validate_on_register = validate;
        }

        // [pool] section
        if let Some(capacity) = config.getuint("pool", "default_capacity").ok().flatten()
            && let Ok(capacity) = usize::try_from(capacity)
        {
            self.pool_capacity = capacity;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("binder", "fail_fast", Some(self.fail_fast.to_string()));
        config.set(
            "binder",
            "validate_on_register",
            Some(self.validate_on_register.to_string()),
        );
        config.set(
            "pool",
            "default_capacity",
            Some(self.pool_capacity.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BinderConfig::new();
        assert!(config.fail_fast);
        assert!(config.validate_on_register);
        assert_eq!(config.pool_capacity, 32);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut config = BinderConfig::new();
        config
            .load_from_str("[binder]\nfail_fast = false\n")
            .unwrap();
        assert!(!config.fail_fast);
        assert!(config.validate_on_register);
        assert_eq!(config.pool_capacity, 32);
    }

    #[test]
    fn test_pool_capacity() {
        let mut config = BinderConfig::new();
        config
            .load_from_str("[pool]\ndefault_capacity = 4\n")
            .unwrap();
        assert_eq!(config.pool_capacity, 4);
    }

    #[test]
    fn test_invalid_pool_capacity_keeps_default() {
        for value in ["-3", "99999999999999999999999", "lots"] {
            let mut config = BinderConfig::new();
            config
                .load_from_str(&format!("[pool]\ndefault_capacity = {value}\n"))
                .unwrap();
            assert_eq!(config.pool_capacity, DEFAULT_POOL_CAPACITY, "{value}");
        }
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut config = BinderConfig::with_path("/nonexistent/autowire.ini");
        assert!(config.load_from_file().is_err());
        assert!(config.fail_fast);
    }
}
