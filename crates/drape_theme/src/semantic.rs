//! Semantic tokens: roles such as `text.primary` mapped to concrete values
//!
//! One [`SemanticTokens`] exists per (design language, mode) pair. It is the
//! layer component placeholders resolve against, addressed with dot paths
//! rooted at one of three sections:
//!
//! - `colors.<role path>` - e.g. `colors.interactive.primaryHover`
//! - `spacing.<role path>` - e.g. `spacing.layout.gutter`
//! - `typography.<role>.<field>` - e.g. `typography.bodyMedium.fontSize`

use crate::tokens::value::{leaves, lookup_leaf};
use crate::tokens::{Color, TokenGroup, TokenPath, TokenValue, TypographyRole, TypographyTokens};
use serde::Serialize;
use std::collections::BTreeSet;

/// Semantic token set for one design language in one mode
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SemanticTokens {
    /// Nested color roles (background, surface, text, border, interactive, feedback, ...)
    pub colors: TokenGroup<Color>,
    /// Component-level and layout-level gaps and paddings
    pub spacing: TokenGroup<f64>,
    pub typography: TypographyTokens,
}

impl SemanticTokens {
    pub const SECTIONS: [&'static str; 3] = ["colors", "spacing", "typography"];

    /// Resolve a dot path such as `colors.surface.elevated`
    pub fn lookup(&self, path: &TokenPath) -> Option<TokenValue> {
        let (section, rest) = path.split_first()?;
        match section {
            "colors" => lookup_leaf(&self.colors, &rest).map(|color| TokenValue::Color(*color)),
            "spacing" => lookup_leaf(&self.spacing, &rest).map(|value| TokenValue::Number(*value)),
            "typography" => {
                let [role, field] = rest.segments() else {
                    return None;
                };
                let role = TypographyRole::from_key(role)?;
                self.typography.get(role).field(field)
            }
            _ => None,
        }
    }

    /// Color role at `path` (relative to `colors`)
    pub fn color(&self, path: &str) -> Option<Color> {
        lookup_leaf(&self.colors, &path.parse().ok()?).copied()
    }

    /// Spacing role at `path` (relative to `spacing`)
    pub fn spacing(&self, path: &str) -> Option<f64> {
        lookup_leaf(&self.spacing, &path.parse().ok()?).copied()
    }

    /// Every addressable role key, as full dot paths
    pub fn role_keys(&self) -> BTreeSet<String> {
        let colors = leaves(&self.colors)
            .into_iter()
            .map(|(path, _)| format!("colors.{path}"));
        let spacing = leaves(&self.spacing)
            .into_iter()
            .map(|(path, _)| format!("spacing.{path}"));
        let typography = self.typography.iter().flat_map(|(role, _)| {
            crate::tokens::TypographyRecord::FIELDS
                .into_iter()
                .map(move |field| format!("typography.{role}.{field}"))
        });
        colors.chain(spacing).chain(typography).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tokens::value::insert;
    use crate::tokens::TypographyRecord;
    use indexmap::IndexMap;

    pub(crate) fn sample_semantic(surface: Color) -> SemanticTokens {
        let mut colors = TokenGroup::new();
        insert(&mut colors, &"surface.elevated".parse().unwrap(), surface).unwrap();
        insert(&mut colors, &"text.primary".parse().unwrap(), Color::from_hex(0x111111)).unwrap();
        insert(&mut colors, &"interactive.primary".parse().unwrap(), Color::from_hex(0x1E66F5))
            .unwrap();

        let mut spacing = TokenGroup::new();
        insert(&mut spacing, &"component.gap".parse().unwrap(), 8.0).unwrap();

        let mut roles = IndexMap::new();
        for role in TypographyRole::ALL {
            roles.insert(
                role,
                TypographyRecord {
                    font_family: "Inter".into(),
                    font_size: 14.0,
                    font_weight: 400,
                    line_height: 1.5,
                    letter_spacing: 0.0,
                },
            );
        }

        SemanticTokens {
            colors,
            spacing,
            typography: TypographyTokens::new(roles).unwrap(),
        }
    }

    #[test]
    fn looks_up_each_section() {
        let semantic = sample_semantic(Color::WHITE);
        assert_eq!(
            semantic.lookup(&"colors.surface.elevated".parse().unwrap()),
            Some(TokenValue::Color(Color::WHITE))
        );
        assert_eq!(
            semantic.lookup(&"spacing.component.gap".parse().unwrap()),
            Some(TokenValue::Number(8.0))
        );
        assert_eq!(
            semantic.lookup(&"typography.bodyMedium.fontFamily".parse().unwrap()),
            Some(TokenValue::Text("Inter".into()))
        );
    }

    #[test]
    fn missing_paths_do_not_resolve() {
        let semantic = sample_semantic(Color::WHITE);
        for path in [
            "colors.surface",
            "colors.surface.sunken",
            "shadows.sm",
            "typography.display.fontSize",
            "typography.bodyMedium",
            "typography.bodyMedium.fontStyle",
        ] {
            assert_eq!(semantic.lookup(&path.parse().unwrap()), None, "{path}");
        }
    }

    #[test]
    fn role_keys_cover_every_section() {
        let keys = sample_semantic(Color::WHITE).role_keys();
        assert!(keys.contains("colors.text.primary"));
        assert!(keys.contains("spacing.component.gap"));
        assert!(keys.contains("typography.h1.lineHeight"));
        assert_eq!(keys.len(), 3 + 1 + TypographyRole::ALL.len() * 5);
    }
}
