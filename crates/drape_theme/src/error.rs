//! Resolution and token-loading errors

use crate::language::{DesignLanguage, Mode};
use crate::tokens::TokenPath;
use std::fmt;
use thiserror::Error;

/// Which token table a lookup missed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenTable {
    Semantic,
    Components,
}

impl fmt::Display for TokenTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Semantic => "semantic",
            Self::Components => "component",
        })
    }
}

/// Errors raised while resolving a theme
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ThemeError {
    /// The requested design language has no entry in one of the token tables
    #[error("no {table} tokens installed for design language `{design_language}`{}", mode_suffix(.mode))]
    MissingThemeVariant {
        design_language: DesignLanguage,
        /// `None` for the mode-independent component table
        mode: Option<Mode>,
        table: TokenTable,
    },

    /// A component placeholder names a semantic path that does not exist
    #[error(
        "component `{component}` field `{field}` of `{design_language}` ({mode}) refers to missing semantic token `{path}`"
    )]
    DanglingTokenReference {
        design_language: DesignLanguage,
        mode: Mode,
        component: String,
        field: TokenPath,
        path: TokenPath,
    },

    /// A caller-supplied override does not match the theme's shape
    #[error("invalid override at `{path}`: {reason}")]
    InvalidOverrideShape { path: String, reason: String },
}

fn mode_suffix(mode: &Option<Mode>) -> String {
    match mode {
        Some(mode) => format!(" in {mode} mode"),
        None => String::new(),
    }
}

/// Errors raised while reading token tables
#[derive(Debug, Error)]
pub enum TokenLoadError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("`{path}`: {message}")]
    InvalidValue { path: String, message: String },

    #[error("`{path}`: no {scale} step named `{step}`")]
    UnknownPrimitiveStep {
        path: String,
        scale: &'static str,
        step: String,
    },

    #[error("`{path}`: unknown typography role `{role}`")]
    UnknownTypographyRole { path: String, role: String },

    #[error("{mode} typography of `{design_language}` is missing role `{role}`")]
    MissingTypographyRole {
        design_language: DesignLanguage,
        mode: Mode,
        role: String,
    },

    #[error("token table is missing required section `{0}`")]
    MissingSection(String),

    #[error("`{0}` is not a valid token path")]
    InvalidPath(String),
}

impl TokenLoadError {
    pub(crate) fn invalid(path: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for theme resolution
pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variant_message_names_the_pair() {
        let err = ThemeError::MissingThemeVariant {
            design_language: "doesNotExist".into(),
            mode: Some(Mode::Light),
            table: TokenTable::Semantic,
        };
        assert_eq!(
            err.to_string(),
            "no semantic tokens installed for design language `doesNotExist` in light mode"
        );

        let err = ThemeError::MissingThemeVariant {
            design_language: "doesNotExist".into(),
            mode: None,
            table: TokenTable::Components,
        };
        assert_eq!(
            err.to_string(),
            "no component tokens installed for design language `doesNotExist`"
        );
    }

    #[test]
    fn dangling_reference_message_names_component_field_and_path() {
        let err = ThemeError::DanglingTokenReference {
            design_language: "holo".into(),
            mode: Mode::Dark,
            component: "card".into(),
            field: "background".parse().unwrap(),
            path: "colors.surface.missing".parse().unwrap(),
        };
        let message = err.to_string();
        assert!(message.contains("`card`"));
        assert!(message.contains("`background`"));
        assert!(message.contains("`colors.surface.missing`"));
    }
}
