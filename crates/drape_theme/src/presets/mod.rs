//! Built-in design languages, shipped as token tables.

use crate::error::TokenLoadError;
use crate::language::DesignLanguage;
use crate::registry::TokenRegistry;
use std::fmt::{Display, Formatter};

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Brushed-metal desktop look.
    ClassicMetal,
    /// Translucent panels and glowing accents.
    Holo,
}

impl Preset {
    /// Design-language key the preset installs.
    pub fn id(self) -> &'static str {
        match self {
            Self::ClassicMetal => "classicMetal",
            Self::Holo => "holo",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ClassicMetal => "Classic Metal",
            Self::Holo => "Holo",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [Preset] {
        const PRESETS: [Preset; 2] = [Preset::ClassicMetal, Preset::Holo];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }

    pub fn language(self) -> DesignLanguage {
        DesignLanguage::new(self.id())
    }

    /// The preset's TOML token table.
    pub fn source(self) -> &'static str {
        match self {
            Self::ClassicMetal => include_str!("../../presets/classic_metal.toml"),
            Self::Holo => include_str!("../../presets/holo.toml"),
        }
    }

    /// Parse and install this preset into `registry`.
    pub fn install(self, registry: &mut TokenRegistry) -> Result<DesignLanguage, TokenLoadError> {
        registry.load_toml_str(self.source())
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Registry over the default primitives with every preset installed.
pub fn builtin_registry() -> Result<TokenRegistry, TokenLoadError> {
    let mut registry = TokenRegistry::new();
    for preset in Preset::all() {
        preset.install(&mut registry)?;
    }
    Ok(registry)
}
