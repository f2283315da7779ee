//! Configuration file support for journal-analyzer.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! gemini_api_key = "your-api-key"
//! base_url = "https://generativelanguage.googleapis.com"
//! model = "gemini-2.5-flash"
//! timeout_secs = 120
//! connect_timeout_secs = 10
//!
//! [analysis]
//! temperature = 0.2
//! language = "indonesian"
//! max_document_size_mb = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{AnalysisConfig, ApiConfig};

/// Configuration file structure
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// API section
    #[serde(default)]
    pub api: ApiConfig,

    /// Analysis section
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }

    /// Template written by `journal-analyzer init`. The API key is left out so
    /// it is never persisted from the environment by accident.
    pub fn template() -> Self {
        let mut file = Self::default();
        file.api.gemini_api_key = None;
        file
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::PromptLanguage;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ConfigFile::template();
        config.api.model = "gemini-2.5-pro".to_string();
        config.analysis.language = PromptLanguage::English;

        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.api.model, "gemini-2.5-pro");
        assert_eq!(loaded.analysis.language, PromptLanguage::English);
    }

    #[test]
    fn test_template_omits_api_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        ConfigFile::template().save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("gemini_api_key"));
        assert!(content.contains("[analysis]"));
    }

    #[test]
    fn test_config_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/config.toml");
        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");

        std::fs::write(&path, "invalid = toml = content").unwrap();

        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }
}
