use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrendlensError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendlensConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout. Unset means the transport default (no timeout).
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_trend_duration")]
    pub default_trend_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the report is written to. Unset means the working directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_catalog_path() -> PathBuf {
    PathBuf::from("product_details.json")
}
fn default_trend_duration() -> u32 {
    6
}
fn default_export_file_name() -> String {
    crate::report::DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_trend_duration: default_trend_duration(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: default_export_file_name(),
        }
    }
}

impl ExportConfig {
    /// Directory reports are written to.
    pub fn directory_or_cwd(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl TrendlensConfig {
    /// Load config from ~/.config/trendlens/config.toml, creating defaults if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, writing defaults there if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| TrendlensError::Config(format!("Failed to read config: {e}")))?;
            let mut config: TrendlensConfig = toml::from_str(&contents)
                .map_err(|e| TrendlensError::Config(format!("Failed to parse config: {e}")))?;
            config.analysis.default_trend_duration = config.analysis.default_trend_duration.max(1);
            Ok(config)
        } else {
            let config = TrendlensConfig::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TrendlensError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TrendlensError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("trendlens").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = TrendlensConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_seconds, None);
        assert_eq!(config.analysis.default_trend_duration, 6);
        assert_eq!(config.export.file_name, "Trend_Report.txt");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://10.0.0.2:8080\"\n\n[analysis]\ndefault_trend_duration = 0\n",
        )
        .unwrap();

        let config = TrendlensConfig::load_from(&path).unwrap();

        assert_eq!(config.backend.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.catalog.path, PathBuf::from("product_details.json"));
        // Zero months is clamped to the one-month minimum.
        assert_eq!(config.analysis.default_trend_duration, 1);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [").unwrap();

        let err = TrendlensConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, TrendlensError::Config(_)));
    }

    #[test]
    fn test_save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = TrendlensConfig::default();
        config.backend.timeout_seconds = Some(30);
        config.export.directory = Some(PathBuf::from("/tmp/reports"));

        config.save_to(&path).unwrap();
        let loaded = TrendlensConfig::load_from(&path).unwrap();

        assert_eq!(loaded.backend.timeout_seconds, Some(30));
        assert_eq!(loaded.export.directory, Some(PathBuf::from("/tmp/reports")));
    }
}
