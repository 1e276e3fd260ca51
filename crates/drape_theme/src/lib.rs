//! Drape Theme Engine
//!
//! Resolves design tokens for swappable design languages in light and dark
//! mode.
//!
//! # Overview
//!
//! A theme is built from three layers:
//! - **Primitive tokens**: one global set of raw scales (spacing steps, radii,
//!   font weights, line heights, letter spacing, shadows)
//! - **Semantic tokens**: per (design language, mode), roles such as
//!   `colors.text.primary` or `typography.bodyMedium`
//! - **Component tokens**: per design language, fields of named components
//!   (`button`, `card`, `appBar`, ...) that are literals or references into the
//!   semantic layer
//!
//! # Quick Start
//!
//! ```rust
//! use drape_theme::{builtin_registry, Mode, ThemeContext, TypographyRole};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(builtin_registry().unwrap());
//! let context = ThemeContext::new(registry, "classicMetal", Mode::Light).unwrap();
//!
//! let theme = context.active_theme();
//! let radius = theme.component("button").and_then(|b| b.number("borderRadius"));
//! let body = theme.text_style(TypographyRole::BodyMedium);
//! # assert!(radius.is_some() && body.line_height > body.font_size);
//!
//! context.set_mode(Mode::Dark).unwrap();
//! assert_eq!(context.active_theme().mode(), Mode::Dark);
//! ```
//!
//! # Token tables
//!
//! Design languages are data. Load a TOML token table with
//! [`TokenRegistry::load_toml_str`] (format documented in [`loader`]) or
//! install [`SemanticTokens`] and [`ComponentTokens`] directly.
//!
//! # Overrides
//!
//! ```rust
//! # use drape_theme::{builtin_registry, Mode, ThemeOverrides};
//! # let registry = builtin_registry().unwrap();
//! let overrides = ThemeOverrides::new().component("button", "borderRadius", 99.0);
//! let theme = registry
//!     .resolve(&"holo".into(), Mode::Light, Some(&overrides))
//!     .unwrap();
//! assert_eq!(theme.component("button").unwrap().number("borderRadius"), Some(99.0));
//! ```

pub mod component;
pub mod error;
pub mod language;
pub mod loader;
pub mod overrides;
pub mod presets;
pub mod registry;
pub mod resolver;
pub mod semantic;
pub mod state;
pub mod theme;
pub mod tokens;
pub mod validate;

// Re-export commonly used types
pub use component::{ComponentStyle, ComponentTokens, ComponentValue, ResolvedComponents};
pub use error::{Result, ThemeError, TokenLoadError, TokenTable};
pub use language::{DesignLanguage, Mode, UnknownMode};
pub use loader::LanguageTokens;
pub use overrides::ThemeOverrides;
pub use presets::{builtin_registry, Preset};
pub use registry::TokenRegistry;
pub use resolver::resolve;
pub use semantic::SemanticTokens;
pub use state::{SubscriptionId, ThemeContext, ThemeListener};
pub use theme::Theme;
pub use tokens::*;
pub use validate::{ValidationIssue, ValidationReport};
