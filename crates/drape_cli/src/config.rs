//! Drape configuration file handling

use anyhow::{Context, Result};
use drape_theme::Mode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "drape.toml";

/// Top-level Drape configuration (drape.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DrapeConfig {
    #[serde(default)]
    pub tokens: TokensConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Directory the file was read from; token dirs are relative to it
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

/// Where token tables come from
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct TokensConfig {
    /// Directories scanned for `*.toml` token tables
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
    /// Install the built-in presets
    #[serde(default = "default_true")]
    pub builtin: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            builtin: true,
        }
    }
}

/// Selection used when a command is not given one
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub mode: Mode,
}

impl DrapeConfig {
    /// Load configuration from a file or a directory (looks for drape.toml)
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!("No {} found at {}", CONFIG_FILE, path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: DrapeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.root = config_path.parent().map(Path::to_path_buf);

        Ok(config)
    }

    /// `drape.toml` in the working directory if present, defaults otherwise
    pub fn discover() -> Result<Self> {
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            Self::load(local)
        } else {
            Ok(Self::default())
        }
    }

    /// Token directories with relative entries resolved against the config file
    pub fn token_dirs(&self) -> Vec<PathBuf> {
        self.tokens
            .dirs
            .iter()
            .map(|dir| match &self.root {
                Some(root) if dir.is_relative() => root.join(dir),
                _ => dir.clone(),
            })
            .collect()
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_sections_take_defaults() {
        let config: DrapeConfig = toml::from_str("[defaults]\nlanguage = \"holo\"\n").unwrap();
        assert!(config.tokens.builtin);
        assert!(config.tokens.dirs.is_empty());
        assert_eq!(config.defaults.language.as_deref(), Some("holo"));
        assert_eq!(config.defaults.mode, Mode::Light);
    }

    #[test]
    fn relative_dirs_follow_the_config_file() {
        let config = DrapeConfig {
            tokens: TokensConfig {
                dirs: vec![PathBuf::from("tokens"), PathBuf::from("/opt/tokens")],
                builtin: false,
            },
            root: Some(PathBuf::from("/work/app")),
            ..DrapeConfig::default()
        };
        assert_eq!(
            config.token_dirs(),
            vec![PathBuf::from("/work/app/tokens"), PathBuf::from("/opt/tokens")]
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let config: DrapeConfig =
            toml::from_str("[tokens]\ndirs = [\"a\"]\nbuiltin = false\n[defaults]\nmode = \"dark\"\n")
                .unwrap();
        let again: DrapeConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(again, config);
    }
}
