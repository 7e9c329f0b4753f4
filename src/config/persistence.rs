//! Configuration file persistence
//!
//! This module handles loading and saving the settings file in the
//! platform-specific config directory, with graceful fallback to defaults
//! when the file is missing or unreadable. It is the only file I/O in the
//! crate.

use crate::config::PortalSettings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "eduhelp";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Backup configuration file name (used during atomic writes)
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\eduhelp\`
/// - **macOS**: `~/Library/Application Support/eduhelp/`
/// - **Linux**: `~/.config/eduhelp/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be
/// determined (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be
/// determined.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists, creating it if necessary.
fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;

    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.clone(),
            source: Box::new(e),
        })?;
    }

    Ok(config_dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return
///    defaults
///
/// # Examples
///
/// ```ignore
/// let settings = load_config();
/// println!("Language: {:?}", settings.language);
/// ```
pub fn load_config() -> PortalSettings {
    load_config_internal()
        .unwrap_or_warn_default(PortalSettings::default(), "Failed to load configuration")
}

/// Internal implementation of config loading.
fn load_config_internal() -> Result<PortalSettings> {
    let config_path = get_config_file_path()?;

    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(PortalSettings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(&config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    // Handle empty file
    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(PortalSettings::default());
    }

    let settings = PortalSettings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
///
/// This function performs an atomic write by:
/// 1. Writing to a temporary backup file
/// 2. Replacing the original file with the backup
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigSave`: Failed to write the config file
pub fn save_config(settings: &PortalSettings) -> Result<()> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let backup_path = config_dir.join(CONFIG_BACKUP_NAME);

    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    // Write to backup file first (atomic write pattern)
    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    // Replace original with backup
    fs::rename(&backup_path, &config_path).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

/// Save configuration, ignoring errors.
///
/// This is useful for "best effort" saves where failure shouldn't
/// interrupt the application flow (e.g., saving on exit).
///
/// # Returns
///
/// Returns `true` if the save was successful, `false` otherwise.
pub fn save_config_silent(settings: &PortalSettings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary config directory.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_dir = temp_dir.path().join(APP_NAME);
            let config_file = config_dir.join(CONFIG_FILE_NAME);
            fs::create_dir_all(&config_dir).expect("Failed to create config dir");
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            fs::write(&self.config_file, content).expect("Failed to write config");
        }

        fn read_config(&self) -> String {
            fs::read_to_string(&self.config_file).expect("Failed to read config")
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Platform directory tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_config_dir_returns_path() {
        let result = get_config_dir();
        assert!(result.is_ok());

        let path = result.unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_get_config_file_path() {
        let result = get_config_file_path();
        assert!(result.is_ok());

        let path = result.unwrap();
        assert!(path.to_string_lossy().contains(CONFIG_FILE_NAME));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load tests with temp directory
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_valid_config() {
        let env = TestEnv::new();
        let settings = PortalSettings {
            language: Language::Ta,
            max_chat_history: 8,
            ..PortalSettings::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        env.write_config(&json);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let loaded = PortalSettings::from_json_sanitized(&contents).unwrap();

        assert_eq!(loaded.language, Language::Ta);
        assert_eq!(loaded.max_chat_history, 8);
    }

    #[test]
    fn test_load_partial_config_uses_defaults_for_missing() {
        let env = TestEnv::new();
        env.write_config(r#"{"language": "ta"}"#);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let settings: PortalSettings = serde_json::from_str(&contents).unwrap();

        assert_eq!(settings.language, Language::Ta);
        // Missing fields should have defaults
        assert_eq!(settings.max_chat_history, 16);
        assert_eq!(settings.search_debounce_ms, 300);
    }

    #[test]
    fn test_load_corrupted_config_returns_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let result: std::result::Result<PortalSettings, _> = serde_json::from_str(&contents);

        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"max_chat_history": 0, "max_attachment_mb": 9999}"#);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let settings = PortalSettings::from_json_sanitized(&contents).unwrap();

        assert_eq!(settings.max_chat_history, PortalSettings::MIN_CHAT_HISTORY);
        assert_eq!(settings.max_attachment_mb, PortalSettings::MAX_ATTACHMENT_MB);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save tests with temp directory
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_save_and_load_roundtrip() {
        let env = TestEnv::new();
        let original = PortalSettings {
            language: Language::Ta,
            max_chat_history: 4,
            max_attachment_mb: 5,
            search_debounce_ms: 500,
            cache_translations: false,
        };

        let json = serde_json::to_string_pretty(&original).unwrap();
        fs::write(&env.config_file, &json).unwrap();

        let contents = env.read_config();
        let loaded: PortalSettings = serde_json::from_str(&contents).unwrap();

        assert_eq!(original, loaded);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edge case tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_config_with_unknown_fields_ignored() {
        let env = TestEnv::new();
        env.write_config(r#"{"language": "en", "unknown_field": "value", "future_feature": true}"#);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let result: std::result::Result<PortalSettings, _> = serde_json::from_str(&contents);

        assert!(result.is_ok());
        assert_eq!(result.unwrap().language, Language::En);
    }

    #[test]
    fn test_config_with_null_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"language": null}"#);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let result: std::result::Result<PortalSettings, _> = serde_json::from_str(&contents);

        // null should fail since Language doesn't support null
        assert!(result.is_err());
    }

    #[test]
    fn test_config_with_wrong_types() {
        let env = TestEnv::new();
        env.write_config(r#"{"max_chat_history": "lots"}"#);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let result: std::result::Result<PortalSettings, _> = serde_json::from_str(&contents);

        assert!(result.is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Integration tests (use actual config directory)
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_graceful_fallback() {
        // The public API falls back to defaults rather than erroring
        let settings = load_config();

        // Whatever was on disk, the sanitized result stays in range
        assert!(settings.max_chat_history >= PortalSettings::MIN_CHAT_HISTORY);
        assert!(settings.max_chat_history <= PortalSettings::MAX_CHAT_HISTORY);
    }
}
