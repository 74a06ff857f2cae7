use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,

    /// Window geometry
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory finished downloads are written to
    pub output_dir: PathBuf,

    /// yt-dlp executable name or path
    pub yt_dlp_path: String,

    /// Optional ffmpeg binary or directory handed to yt-dlp
    pub ffmpeg_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,

    /// Height with the advanced panel hidden
    pub height: f32,

    /// Extra height while the advanced panel is shown
    pub advanced_panel_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Song downloads"),
            yt_dlp_path: "yt-dlp".to_string(),
            ffmpeg_location: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 325.0,
            advanced_panel_height: 100.0,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults.
    ///
    /// The file is only ever read; settings chosen in the window are not saved.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get configuration file path, if one exists
    fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("audio-downloader").join("config.yaml"))
            .filter(|path| path.exists())
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.app.yt_dlp_path.trim().is_empty() {
            anyhow::bail!("yt_dlp_path must not be empty");
        }

        if self.app.output_dir.as_os_str().is_empty() {
            anyhow::bail!("output_dir must not be empty");
        }

        let window = &self.window;
        if window.width <= 0.0 || window.height <= 0.0 || window.advanced_panel_height < 0.0 {
            anyhow::bail!("Window dimensions must be positive");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.app.output_dir, PathBuf::from("Song downloads"));
        assert_eq!(config.app.yt_dlp_path, "yt-dlp");
        assert_eq!(config.window.width, 450.0);
        assert_eq!(config.window.height, 325.0);
        assert_eq!(config.window.advanced_panel_height, 100.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs_err::write(&path, "app:\n  output_dir: /tmp/music\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.app.output_dir, PathBuf::from("/tmp/music"));
        assert_eq!(config.app.yt_dlp_path, "yt-dlp");
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        fs_err::write(&path, "app:\n  yt_dlp_path: \"  \"\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        fs_err::write(&path, "window:\n  width: 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        fs_err::write(&path, "app: [not, a, map]\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
