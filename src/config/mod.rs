//! Application configuration.
//!
//! Configuration is loaded from a TOML file in the platform config
//! directory. Every section falls back to its default when missing, so a
//! partial config file is always valid.

mod actions;
mod key;
mod keybindings;
mod loader;
mod resolver;

pub use actions::*;
pub use key::{Key, KeyBinding};
pub use keybindings::KeybindingsConfig;
pub use loader::{load, save_last_theme};
pub use resolver::KeyResolver;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub palette: PaletteConfig,
    pub api: ApiConfig,
    pub keybindings: KeybindingsConfig,
    /// Key of the theme that was open when the app last exited.
    pub last_theme: Option<String>,
}

/// Which color palette to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub name: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            name: "mocha".to_string(),
        }
    }
}

/// Storefront API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.palette.name, "mocha");
        assert!(config.last_theme.is_none());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: AppConfig = toml::from_str(
            r#"
            last_theme = "birthday"

            [api]
            base_url = "https://gift.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://gift.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.last_theme.as_deref(), Some("birthday"));
    }
}
