//! # Configuration
//!
//! A single TOML file, by default `<config dir>/dance-cat-to-mouse/config.toml`.
//! Missing keys fall back to their defaults, and a missing file is created
//! with the defaults on first start so players have something to edit when
//! their mat needs a different button layout.
//!
//! ```toml
//! fps = 30
//! fullscreen = true
//! allow_arrow_keys = false
//!
//! [[button_map]]
//! code = 65830
//! button = "cross"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::controller::button_map::{default_bindings, ButtonBinding};

const APP_DIR: &str = "dance-cat-to-mouse";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("fps must be between 1 and 240, got {0}")]
    InvalidFps(u32),

    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Frames (and game ticks) per second
    pub fps: u32,

    pub fullscreen: bool,

    /// Let the arrow keys stand in for the mat, for demos and debugging
    pub allow_arrow_keys: bool,

    /// Joystick GUID to prefer over the first attached one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joystick: Option<String>,

    /// Directory with `images/` and `sfx/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_dir: Option<PathBuf>,

    pub button_map: Vec<ButtonBinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 30,
            fullscreen: true,
            allow_arrow_keys: false,
            joystick: None,
            media_dir: None,
            button_map: default_bindings(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=240).contains(&self.fps) {
            return Err(ConfigError::InvalidFps(self.fps));
        }
        Ok(())
    }

    /// Load the configuration at `path`, writing the defaults there first
    /// if the file does not exist.
    pub async fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        let exists = tokio::fs::try_exists(path).await.map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if !exists {
            info!("No configuration at {}, writing defaults", path.display());
            let config = Self::default();
            config.save(path).await?;
            return Ok(config);
        }

        Self::load(path).await
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(path, content)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Button;

    #[tokio::test]
    async fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = Config::load_or_init(&path).await.unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load(&path).await.unwrap();
        assert_eq!(reloaded, Config::default());
    }

    #[tokio::test]
    async fn custom_settings_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = Config {
            fps: 60,
            fullscreen: false,
            allow_arrow_keys: true,
            joystick: Some("030000007900000011000000100100ab".to_string()),
            media_dir: Some(PathBuf::from("/opt/dance/media")),
            button_map: vec![ButtonBinding {
                code: 7,
                button: Button::Triangle,
            }],
        };
        config.save(&path).await.unwrap();

        assert_eq!(Config::load_or_init(&path).await.unwrap(), config);
    }

    #[tokio::test]
    async fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        tokio::fs::write(&path, "allow_arrow_keys = true\n").await.unwrap();

        let config = Config::load(&path).await.unwrap();
        assert!(config.allow_arrow_keys);
        assert_eq!(config.fps, 30);
        assert_eq!(config.button_map, default_bindings());
    }

    #[tokio::test]
    async fn rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        tokio::fs::write(&path, "fps = 0\n").await.unwrap();
        assert!(matches!(
            Config::load(&path).await,
            Err(ConfigError::InvalidFps(0))
        ));

        tokio::fs::write(&path, "[[button_map]]\ncode = 1\nbutton = \"star\"\n")
            .await
            .unwrap();
        assert!(matches!(Config::load(&path).await, Err(ConfigError::Parse(_))));
    }
}
