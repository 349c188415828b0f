use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::deck::DeckOptions;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "diorama";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(flatten)]
    pub options: OptionOverrides,
}

/// Partial deck options. Each layer (config, deck file, command line) only
/// sets what it mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_to_change: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presenter_notes: Option<bool>,
}

impl OptionOverrides {
    pub fn apply_to(&self, options: &mut DeckOptions) {
        if let Some(class_name) = &self.class_name {
            options.class_name = class_name.clone();
        }
        if let Some(footer) = &self.footer {
            options.footer = Some(footer.clone());
        }
        if let Some(navigation) = self.navigation {
            options.navigation = navigation;
        }
        if let Some(swipe) = self.swipe_to_change {
            options.swipe_to_change = swipe;
        }
        if let Some(presenter_notes) = self.presenter_notes {
            options.presenter_notes = presenter_notes;
        }
    }
}

/// Resolves deck options from lowest to highest precedence.
pub fn resolve_options(layers: &[&OptionOverrides]) -> DeckOptions {
    let mut options = DeckOptions::default();
    for layer in layers {
        layer.apply_to(&mut options);
    }
    options
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `diorama config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# diorama configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn option_overrides(&self) -> OptionOverrides {
        self.defaults
            .as_ref()
            .map(|d| d.options.clone())
            .unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.class_name" => defaults.options.class_name = Some(value.to_string()),
            "defaults.footer" => defaults.options.footer = Some(value.to_string()),
            "defaults.navigation" => defaults.options.navigation = Some(parse_bool(key, value)?),
            "defaults.swipe_to_change" => {
                defaults.options.swipe_to_change = Some(parse_bool(key, value)?)
            }
            "defaults.presenter_notes" => {
                defaults.options.presenter_notes = Some(parse_bool(key, value)?)
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.class_name, defaults.footer, defaults.navigation, defaults.swipe_to_change, defaults.presenter_notes"
            ),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be 'true' or 'false'."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.navigation", "yes").unwrap();
        config.set("defaults.footer", "RustConf 2026").unwrap();
        assert!(config.set("defaults.theme", "sepia").is_err());
        assert!(config.set("defaults.swipe_to_change", "maybe").is_err());
        assert!(config.set("defaults.transition", "fade").is_err());

        assert_eq!(config.theme(), "dark");
        let overrides = config.option_overrides();
        assert_eq!(overrides.navigation, Some(true));
        assert_eq!(overrides.footer.as_deref(), Some("RustConf 2026"));
        assert_eq!(overrides.swipe_to_change, None);
    }

    #[test]
    fn test_yaml_layout() {
        let yaml = "defaults:\n  theme: dark\n  presenter_notes: true\n  swipe_to_change: false\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.theme(), "dark");
        let overrides = config.option_overrides();
        assert_eq!(overrides.presenter_notes, Some(true));
        assert_eq!(overrides.swipe_to_change, Some(false));

        let back = serde_yaml::to_string(&config).unwrap();
        assert!(back.contains("presenter_notes: true"));
        assert!(!back.contains("footer"));
    }

    #[test]
    fn test_later_layers_win() {
        let config = OptionOverrides {
            navigation: Some(true),
            footer: Some("from config".to_string()),
            ..OptionOverrides::default()
        };
        let file = OptionOverrides {
            footer: Some("from deck".to_string()),
            swipe_to_change: Some(false),
            ..OptionOverrides::default()
        };
        let cli = OptionOverrides {
            swipe_to_change: Some(true),
            ..OptionOverrides::default()
        };

        let options = resolve_options(&[&config, &file, &cli]);
        assert!(options.navigation);
        assert!(options.swipe_to_change);
        assert!(!options.presenter_notes);
        assert_eq!(options.footer.as_deref(), Some("from deck"));
        assert_eq!(options.class_name, "");
    }

    #[test]
    fn test_missing_file_message() {
        let err = Config::load_from(Path::new("/nonexistent/diorama/config.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
