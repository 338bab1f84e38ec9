use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// External speech-to-text command; its stdout becomes the transcript.
    /// Absent means voice capture is unsupported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_command: Option<String>,

    /// Name shown in the greeting line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Desktop notification when a capture is accepted
    #[serde(default = "default_true")]
    pub notifications: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            voice_command: None,
            display_name: None,
            notifications: true,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("braintwo");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Normalize blank-but-present strings back to None
        let mut clean_config = self.clone();
        if clean_config
            .voice_command
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            clean_config.voice_command = None;
        }
        if clean_config
            .display_name
            .as_deref()
            .is_some_and(|n| n.trim().is_empty())
        {
            clean_config.display_name = None;
        }

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            voice_command: Some("whisper-mic --once".to_string()),
            display_name: Some("Sam".to_string()),
            notifications: false,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.voice_command, deserialized.voice_command);
        assert_eq!(config.display_name, deserialized.display_name);
        assert_eq!(config.notifications, deserialized.notifications);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.voice_command, None);
        assert!(config.notifications);
    }
}
