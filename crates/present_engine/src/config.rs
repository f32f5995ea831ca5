//! Configuration system

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Load configuration from file, falling back to defaults if the file
    /// is missing or malformed.
    fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("could not load config from {path}: {err}; using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Window settings.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Window width in screen coordinates.
    pub width: u32,
    /// Window height in screen coordinates.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "graphics".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Renderer settings.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RendererConfig {
    /// RGBA clear color for the default frame content.
    pub clear_color: [f32; 4],
    /// Explicitly enable or disable validation layers. Unset means enabled
    /// in debug builds only.
    pub enable_validation: Option<bool>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            enable_validation: None,
        }
    }
}

impl RendererConfig {
    /// Explicit layer names to request at instance creation.
    pub fn validation_layers(&self) -> Vec<String> {
        let enabled = self
            .enable_validation
            .unwrap_or(cfg!(debug_assertions));
        if enabled {
            vec!["VK_LAYER_KHRONOS_validation".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Top-level application configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Renderer settings.
    pub renderer: RendererConfig,
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.renderer.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(config.renderer.enable_validation.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [window]
            title = "demo"
            width = 1280
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "demo");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn validation_can_be_forced_off() {
        let config: AppConfig = toml::from_str(
            r#"
            [renderer]
            enable_validation = false
            "#,
        )
        .unwrap();

        assert!(config.renderer.validation_layers().is_empty());
    }

    #[test]
    fn validation_can_be_forced_on() {
        let config = RendererConfig {
            enable_validation: Some(true),
            ..Default::default()
        };

        assert_eq!(
            config.validation_layers(),
            vec!["VK_LAYER_KHRONOS_validation".to_string()]
        );
    }
}
