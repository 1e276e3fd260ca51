//! Installed token tables
//!
//! A design language is installed by supplying one [`SemanticTokens`] per mode
//! and one [`ComponentTokens`]. The registry only stores and looks them up;
//! resolution lives in [`crate::resolver`].

use crate::component::ComponentTokens;
use crate::error::{Result, ThemeError, TokenLoadError, TokenTable};
use crate::language::{DesignLanguage, Mode};
use crate::loader::LanguageTokens;
use crate::overrides::ThemeOverrides;
use crate::semantic::SemanticTokens;
use crate::theme::Theme;
use crate::tokens::PrimitiveTokens;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// Token tables keyed by design language
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    primitives: Arc<PrimitiveTokens>,
    semantic: FxHashMap<(DesignLanguage, Mode), Arc<SemanticTokens>>,
    components: FxHashMap<DesignLanguage, Arc<ComponentTokens>>,
    display_names: FxHashMap<DesignLanguage, String>,
}

impl TokenRegistry {
    /// Empty registry over the default primitive layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry over a custom primitive layer
    pub fn with_primitives(primitives: PrimitiveTokens) -> Self {
        Self {
            primitives: Arc::new(primitives),
            ..Self::default()
        }
    }

    pub fn primitives(&self) -> &Arc<PrimitiveTokens> {
        &self.primitives
    }

    /// Install (or replace) the semantic set of one mode
    pub fn install_semantic(
        &mut self,
        language: impl Into<DesignLanguage>,
        mode: Mode,
        tokens: SemanticTokens,
    ) {
        let language = language.into();
        debug!("installing {} semantic tokens for `{}`", mode, language);
        self.semantic.insert((language, mode), Arc::new(tokens));
    }

    /// Install (or replace) the component table of a language
    pub fn install_components(&mut self, language: impl Into<DesignLanguage>, tokens: ComponentTokens) {
        let language = language.into();
        debug!(
            "installing {} component token set(s) for `{}`",
            tokens.len(),
            language
        );
        self.components.insert(language, Arc::new(tokens));
    }

    /// Install everything a parsed token document carries
    pub fn install(&mut self, tokens: LanguageTokens) {
        let LanguageTokens {
            name,
            display_name,
            semantic,
            components,
        } = tokens;

        for (mode, set) in semantic {
            self.install_semantic(name.clone(), mode, set);
        }
        if let Some(display_name) = display_name {
            self.display_names.insert(name.clone(), display_name);
        }
        self.install_components(name, components);
    }

    /// Parse a TOML token document and install it; returns the language name.
    ///
    /// Nothing is installed when parsing fails.
    pub fn load_toml_str(&mut self, src: &str) -> std::result::Result<DesignLanguage, TokenLoadError> {
        let tokens = LanguageTokens::from_toml_str(src, &self.primitives)?;
        let name = tokens.name.clone();
        self.install(tokens);
        Ok(name)
    }

    /// Semantic set for a (language, mode) pair
    pub fn semantic(&self, language: &DesignLanguage, mode: Mode) -> Result<&Arc<SemanticTokens>> {
        self.semantic
            .get(&(language.clone(), mode))
            .ok_or_else(|| ThemeError::MissingThemeVariant {
                design_language: language.clone(),
                mode: Some(mode),
                table: TokenTable::Semantic,
            })
    }

    /// Component table for a language
    pub fn components(&self, language: &DesignLanguage) -> Result<&Arc<ComponentTokens>> {
        self.components
            .get(language)
            .ok_or_else(|| ThemeError::MissingThemeVariant {
                design_language: language.clone(),
                mode: None,
                table: TokenTable::Components,
            })
    }

    /// True when both modes and the component table are installed
    pub fn contains(&self, language: &DesignLanguage) -> bool {
        self.components.contains_key(language)
            && Mode::ALL
                .into_iter()
                .all(|mode| self.semantic.contains_key(&(language.clone(), mode)))
    }

    /// Every language with at least one installed table, sorted by name
    pub fn languages(&self) -> Vec<DesignLanguage> {
        let mut languages: Vec<DesignLanguage> = self
            .semantic
            .keys()
            .map(|(language, _)| language.clone())
            .chain(self.components.keys().cloned())
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }

    /// Human-readable name, falling back to the key
    pub fn display_name<'a>(&'a self, language: &'a DesignLanguage) -> &'a str {
        self.display_names
            .get(language)
            .map(String::as_str)
            .unwrap_or(language.as_str())
    }

    /// Resolve a theme; see [`crate::resolver::resolve`]
    pub fn resolve(
        &self,
        language: &DesignLanguage,
        mode: Mode,
        overrides: Option<&ThemeOverrides>,
    ) -> Result<Theme> {
        crate::resolver::resolve(self, language, mode, overrides)
    }
}
