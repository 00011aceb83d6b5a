use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BoardroomError, Result};

/// Top-level configuration for Boardroom.
///
/// Loaded from `~/.boardroom/config.toml` by default. Secrets are never
/// stored here: the API key is read from the environment variable named by
/// [`GenerationConfig::api_key_env`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardroomConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl BoardroomConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BoardroomConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BoardroomError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Remote generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Transport-level timeout. Unset means wait until the call settles.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            api_key_env: "API_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl GenerationConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = BoardroomConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(
            config.generation.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert!((config.generation.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.generation.api_key_env, "API_KEY");
        assert!(config.generation.request_timeout_secs.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[generation]
base_url = "http://localhost:8080"
model = "gemini-2.5-pro"
temperature = 0.2
api_key_env = "BOARDROOM_KEY"
request_timeout_secs = 30
"#;
        let file = create_temp_config(content);
        let config = BoardroomConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.generation.base_url, "http://localhost:8080");
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert!((config.generation.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.generation.api_key_env, "BOARDROOM_KEY");
        assert_eq!(config.generation.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[generation]
model = "gemini-2.0-flash"
"#;
        let file = create_temp_config(content);
        let config = BoardroomConfig::load(file.path()).unwrap();
        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert_eq!(config.generation.api_key_env, "API_KEY");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_config_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = BoardroomConfig::load(file.path()).unwrap();
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = BoardroomConfig::load(file.path());
        assert!(matches!(result, Err(BoardroomError::Config(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = BoardroomConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.generation.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = BoardroomConfig::default();
        config.generation.request_timeout_secs = Some(90);
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = BoardroomConfig::load(&path).unwrap();
        assert_eq!(reloaded.generation.model, config.generation.model);
        assert_eq!(reloaded.generation.request_timeout_secs, Some(90));
    }

    #[test]
    fn test_resolve_api_key_from_named_variable() {
        let generation = GenerationConfig {
            api_key_env: "BOARDROOM_TEST_KEY_PRESENT".to_string(),
            ..GenerationConfig::default()
        };
        std::env::set_var("BOARDROOM_TEST_KEY_PRESENT", "secret");
        assert_eq!(generation.resolve_api_key().as_deref(), Some("secret"));
        std::env::remove_var("BOARDROOM_TEST_KEY_PRESENT");
    }

    #[test]
    fn test_resolve_api_key_blank_or_missing() {
        let generation = GenerationConfig {
            api_key_env: "BOARDROOM_TEST_KEY_BLANK".to_string(),
            ..GenerationConfig::default()
        };
        assert!(generation.resolve_api_key().is_none());

        std::env::set_var("BOARDROOM_TEST_KEY_BLANK", "   ");
        assert!(generation.resolve_api_key().is_none());
        std::env::remove_var("BOARDROOM_TEST_KEY_BLANK");
    }
}
