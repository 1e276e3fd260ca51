//! Design-language keys and light/dark modes

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of an installed design language.
///
/// The engine treats it as an opaque key into the token tables; nothing in the
/// resolver branches on a particular language.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignLanguage(String);

impl DesignLanguage {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DesignLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DesignLanguage {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DesignLanguage {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for DesignLanguage {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Color-scheme variant within a design language
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a mode name other than `light` or `dark`
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown mode `{0}` (expected `light` or `dark`)")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownMode(src.to_string())),
        }
    }
}
