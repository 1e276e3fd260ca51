//! The resolved theme

use crate::component::{ComponentStyle, ResolvedComponents};
use crate::language::{DesignLanguage, Mode};
use crate::semantic::SemanticTokens;
use crate::tokens::value::leaves;
use crate::tokens::{to_absolute, PrimitiveTokens, TextStyle, TokenLeaf, TypographyRecord, TypographyRole};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a component needs to style itself for one (language, mode)
///
/// A `Theme` is never modified after it is built. Changing the selection
/// builds a new one; layers that did not change are shared through `Arc`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    design_language: DesignLanguage,
    mode: Mode,
    primitive: Arc<PrimitiveTokens>,
    semantic: Arc<SemanticTokens>,
    components: ResolvedComponents,
}

impl Theme {
    pub(crate) fn new(
        design_language: DesignLanguage,
        mode: Mode,
        primitive: Arc<PrimitiveTokens>,
        semantic: Arc<SemanticTokens>,
        components: ResolvedComponents,
    ) -> Self {
        Self {
            design_language,
            mode,
            primitive,
            semantic,
            components,
        }
    }

    pub fn design_language(&self) -> &DesignLanguage {
        &self.design_language
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn primitive(&self) -> &PrimitiveTokens {
        &self.primitive
    }

    pub fn semantic(&self) -> &SemanticTokens {
        &self.semantic
    }

    pub fn components(&self) -> &ResolvedComponents {
        &self.components
    }

    /// Resolved fields of one component
    pub fn component(&self, name: &str) -> Option<&ComponentStyle> {
        self.components.get(name)
    }

    pub fn typography(&self, role: TypographyRole) -> &TypographyRecord {
        self.semantic.typography.get(role)
    }

    /// Typography role with its line height converted to an absolute value
    pub fn text_style(&self, role: TypographyRole) -> TextStyle {
        to_absolute(self.typography(role))
    }

    /// Flatten the theme to CSS custom properties (names without the `--`)
    ///
    /// Semantic colors become `color-<path>`, semantic spacing `spacing-<path>`,
    /// typography `typography-<role>-<field>` and component fields
    /// `<component>-<path>`, all in kebab-case.
    pub fn to_css_variable_map(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();

        for (path, color) in leaves(&self.semantic.colors) {
            vars.insert(css_name("color", path.segments()), color.to_value().to_css());
        }
        for (path, value) in leaves(&self.semantic.spacing) {
            vars.insert(css_name("spacing", path.segments()), value.to_value().to_css());
        }
        for (role, record) in self.semantic.typography.iter() {
            for field in TypographyRecord::FIELDS {
                let Some(value) = record.field(field) else {
                    continue;
                };
                let css = match field {
                    // unitless in CSS
                    "fontWeight" | "lineHeight" => value.as_number().map(|n| n.to_string()),
                    _ => None,
                }
                .unwrap_or_else(|| value.to_css());
                vars.insert(css_name("typography", &[role.key(), field][..]), css);
            }
        }
        for (name, style) in self.components.iter() {
            for (path, value) in leaves(style.fields()) {
                vars.insert(css_name(name, path.segments()), value.to_css());
            }
        }
        vars
    }
}

fn css_name<S: AsRef<str>>(prefix: &str, segments: &[S]) -> String {
    let mut name = kebab(prefix);
    for segment in segments {
        name.push('-');
        name.push_str(&kebab(segment.as_ref()));
    }
    name
}

/// `borderRadius` -> `border-radius`
fn kebab(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + 4);
    for (i, ch) in src.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
