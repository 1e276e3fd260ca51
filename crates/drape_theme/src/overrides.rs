//! Per-call overrides punched in on top of a resolved theme
//!
//! ```rust
//! use drape_theme::ThemeOverrides;
//!
//! let overrides = ThemeOverrides::new()
//!     .component("button", "borderRadius", 99.0)
//!     .semantic("typography.h1.fontSize", 40.0);
//! # assert!(!overrides.is_empty());
//! ```
//!
//! Overrides are checked against the resolved theme before anything is merged:
//! every path must name an existing token of the same kind. A mismatch fails the
//! whole call with [`ThemeError::InvalidOverrideShape`] and the base theme is
//! left as it was.

use crate::component::{ComponentStyle, ResolvedComponents};
use crate::error::{Result, ThemeError, TokenLoadError};
use crate::loader::{expect_table, is_reference, Loader};
use crate::semantic::SemanticTokens;
use crate::tokens::value::insert;
use crate::tokens::{
    PrimitiveTokens, TokenGroup, TokenLeaf, TokenNode, TokenPath, TokenValue, TypographyRole,
};
use indexmap::IndexMap;
use std::sync::Arc;
use toml::{Table, Value};

#[derive(Clone, Debug, PartialEq)]
enum Target {
    Semantic,
    Component(String),
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    target: Target,
    path: String,
    value: TokenValue,
}

/// A partial theme: literal values that win over the resolved ones
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeOverrides {
    entries: Vec<Entry>,
}

impl ThemeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a component field, e.g. `("button", "padding.md", 14.0)`
    pub fn component(
        mut self,
        component: impl Into<String>,
        path: impl Into<String>,
        value: impl Into<TokenValue>,
    ) -> Self {
        self.entries.push(Entry {
            target: Target::Component(component.into()),
            path: path.into(),
            value: value.into(),
        });
        self
    }

    /// Override a semantic token by its full path, e.g. `colors.text.primary`
    pub fn semantic(mut self, path: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.entries.push(Entry {
            target: Target::Semantic,
            path: path.into(),
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read overrides from TOML with `[semantic]` and `[components.<name>]`
    /// sections. Primitive steps (`{ primitive = "radius.lg" }`) are resolved
    /// against `primitives`.
    pub fn from_toml_str(
        src: &str,
        primitives: &PrimitiveTokens,
    ) -> std::result::Result<Self, TokenLoadError> {
        let doc: Table = toml::from_str(src)?;
        let loader = Loader { primitives };
        let mut overrides = Self::new();

        for (section, value) in &doc {
            match section.as_str() {
                "semantic" => {
                    let root = TokenPath::default();
                    flatten(&loader, expect_table(value, "semantic")?, &root, &mut |path, value| {
                        overrides.entries.push(Entry {
                            target: Target::Semantic,
                            path: path.to_string(),
                            value,
                        });
                    })?;
                }
                "components" => {
                    for (name, fields) in expect_table(value, "components")? {
                        let root = TokenPath::default();
                        let path = format!("components.{name}");
                        flatten(&loader, expect_table(fields, &path)?, &root, &mut |path, value| {
                            overrides.entries.push(Entry {
                                target: Target::Component(name.clone()),
                                path: path.to_string(),
                                value,
                            });
                        })?;
                    }
                }
                other => {
                    return Err(TokenLoadError::invalid(
                        other,
                        "unknown override section (expected semantic or components)",
                    ))
                }
            }
        }
        Ok(overrides)
    }

    /// Merge onto resolved layers, producing new values.
    ///
    /// The inputs are never modified; an untouched semantic set is shared.
    pub(crate) fn apply(
        &self,
        semantic: &Arc<SemanticTokens>,
        components: &ResolvedComponents,
    ) -> Result<(Arc<SemanticTokens>, ResolvedComponents)> {
        let mut semantic_tree = TokenGroup::new();
        let mut component_trees: IndexMap<String, TokenGroup<TokenValue>> = IndexMap::new();

        for entry in &self.entries {
            let (tree, label) = match &entry.target {
                Target::Semantic => (&mut semantic_tree, format!("semantic.{}", entry.path)),
                Target::Component(name) => (
                    component_trees.entry(name.clone()).or_default(),
                    format!("components.{name}.{}", entry.path),
                ),
            };
            let path: TokenPath = entry
                .path
                .parse()
                .map_err(|_| shape(&label, "not a valid token path"))?;
            insert(tree, &path, entry.value.clone())
                .map_err(|prefix| shape(&label, format!("`{prefix}` is set as a value")))?;
        }

        let semantic = if semantic_tree.is_empty() {
            Arc::clone(semantic)
        } else {
            Arc::new(merge_semantic(semantic, &semantic_tree)?)
        };

        let mut styles = IndexMap::new();
        for (name, style) in components.iter() {
            let next = match component_trees.get(name) {
                Some(tree) => {
                    let root = TokenPath::default().child("components").child(name);
                    ComponentStyle::new(merge_group(style.fields(), tree, &root)?)
                }
                None => style.clone(),
            };
            styles.insert(name.to_string(), next);
        }
        if let Some(unknown) = component_trees
            .keys()
            .find(|name| components.get(name).is_none())
        {
            return Err(shape(
                format!("components.{unknown}"),
                "no such component in this theme",
            ));
        }

        Ok((semantic, ResolvedComponents::new(styles)))
    }
}

fn shape(path: impl std::fmt::Display, reason: impl Into<String>) -> ThemeError {
    ThemeError::InvalidOverrideShape {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Visit every leaf of an override table
fn flatten(
    loader: &Loader<'_>,
    table: &Table,
    prefix: &TokenPath,
    visit: &mut dyn FnMut(&TokenPath, TokenValue),
) -> std::result::Result<(), TokenLoadError> {
    for (key, value) in table {
        let path = prefix.child(key);
        match value {
            Value::Table(child) if !is_reference(child) => flatten(loader, child, &path, visit)?,
            _ => visit(&path, loader.value(value, &path)?),
        }
    }
    Ok(())
}

fn merge_semantic(base: &SemanticTokens, tree: &TokenGroup<TokenValue>) -> Result<SemanticTokens> {
    let mut merged = base.clone();
    for (section, node) in tree {
        let root = TokenPath::default().child("semantic").child(section);
        let TokenNode::Group(group) = node else {
            return Err(shape(&root, "cannot replace a whole section with a value"));
        };
        match section.as_str() {
            "colors" => merged.colors = merge_group(&base.colors, group, &root)?,
            "spacing" => merged.spacing = merge_group(&base.spacing, group, &root)?,
            "typography" => {
                for (role_key, fields) in group {
                    let role_path = root.child(role_key);
                    let role = TypographyRole::from_key(role_key)
                        .ok_or_else(|| shape(&role_path, "unknown typography role"))?;
                    let TokenNode::Group(fields) = fields else {
                        return Err(shape(&role_path, "cannot replace a typography role with a value"));
                    };
                    let mut record = merged.typography.get(role).clone();
                    for (field, value) in fields {
                        let field_path = role_path.child(field);
                        let TokenNode::Leaf(value) = value else {
                            return Err(shape(&field_path, "typography fields are values"));
                        };
                        record = record
                            .with_field(field, value)
                            .map_err(|reason| shape(&field_path, reason))?;
                    }
                    merged.typography = merged.typography.with_record(role, record);
                }
            }
            _ => return Err(shape(&root, "unknown semantic section")),
        }
    }
    Ok(merged)
}

/// Structural merge producing a new group; `over` must follow `base`'s shape
fn merge_group<V: TokenLeaf>(
    base: &TokenGroup<V>,
    over: &TokenGroup<TokenValue>,
    path: &TokenPath,
) -> Result<TokenGroup<V>> {
    let mut merged = base.clone();
    for (key, node) in over {
        let child_path = path.child(key);
        let existing = base
            .get(key)
            .ok_or_else(|| shape(&child_path, "no such token"))?;
        let next = match (existing, node) {
            (TokenNode::Group(existing), TokenNode::Group(node)) => {
                TokenNode::Group(merge_group(existing, node, &child_path)?)
            }
            (TokenNode::Leaf(existing), TokenNode::Leaf(value)) => {
                if existing.kind() != value.kind() {
                    return Err(shape(
                        &child_path,
                        format!("expected {}, found {}", existing.kind(), value.kind()),
                    ));
                }
                let leaf = V::from_value(value).ok_or_else(|| {
                    shape(&child_path, format!("cannot store {} here", value.kind()))
                })?;
                TokenNode::Leaf(leaf)
            }
            (TokenNode::Group(_), TokenNode::Leaf(_)) => {
                return Err(shape(&child_path, "is a group, cannot replace it with a value"))
            }
            (TokenNode::Leaf(_), TokenNode::Group(_)) => {
                return Err(shape(&child_path, "is a value, not a group"))
            }
        };
        merged.insert(key.clone(), next);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::tests::sample_semantic;
    use crate::tokens::Color;

    fn components() -> ResolvedComponents {
        let mut fields = TokenGroup::new();
        insert(&mut fields, &"borderRadius".parse().unwrap(), TokenValue::Number(8.0)).unwrap();
        insert(&mut fields, &"padding.md".parse().unwrap(), TokenValue::Number(12.0)).unwrap();
        insert(&mut fields, &"background".parse().unwrap(), TokenValue::Color(Color::WHITE)).unwrap();
        let mut styles = IndexMap::new();
        styles.insert("button".to_string(), ComponentStyle::new(fields));
        ResolvedComponents::new(styles)
    }

    fn reason_of(err: ThemeError) -> (String, String) {
        match err {
            ThemeError::InvalidOverrideShape { path, reason } => (path, reason),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn component_override_wins_and_keeps_the_rest() {
        let semantic = Arc::new(sample_semantic(Color::WHITE));
        let base = components();
        let overrides = ThemeOverrides::new().component("button", "borderRadius", 99.0);

        let (merged_semantic, merged) = overrides.apply(&semantic, &base).unwrap();
        let button = merged.get("button").unwrap();
        assert_eq!(button.number("borderRadius"), Some(99.0));
        assert_eq!(button.number("padding.md"), Some(12.0));
        assert_eq!(button.color("background"), Some(Color::WHITE));

        // inputs are untouched and the semantic set is shared
        assert_eq!(base.get("button").unwrap().number("borderRadius"), Some(8.0));
        assert!(Arc::ptr_eq(&semantic, &merged_semantic));
    }

    #[test]
    fn semantic_overrides_cover_every_section() {
        let semantic = Arc::new(sample_semantic(Color::WHITE));
        let overrides = ThemeOverrides::new()
            .semantic("colors.text.primary", Color::from_hex(0xFF0000))
            .semantic("spacing.component.gap", 10.0)
            .semantic("typography.h1.fontSize", 40.0);

        let (merged, _) = overrides.apply(&semantic, &components()).unwrap();
        assert_eq!(merged.color("text.primary"), Some(Color::from_hex(0xFF0000)));
        assert_eq!(merged.spacing("component.gap"), Some(10.0));
        assert_eq!(merged.typography.get(TypographyRole::H1).font_size, 40.0);
        assert_eq!(semantic.typography.get(TypographyRole::H1).font_size, 14.0);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let semantic = Arc::new(sample_semantic(Color::WHITE));
        let cases = [
            (
                ThemeOverrides::new().component("button", "borderRadius", "round"),
                "components.button.borderRadius",
            ),
            (
                ThemeOverrides::new().component("button", "padding", 4.0),
                "components.button.padding",
            ),
            (
                ThemeOverrides::new().component("button", "margin", 4.0),
                "components.button.margin",
            ),
            (
                ThemeOverrides::new().component("slider", "track", 4.0),
                "components.slider",
            ),
            (
                ThemeOverrides::new().semantic("colors.text.primary", 3.0),
                "semantic.colors.text.primary",
            ),
            (
                ThemeOverrides::new().semantic("typography.display.fontSize", 3.0),
                "semantic.typography.display",
            ),
            (
                ThemeOverrides::new().semantic("borders.width", 3.0),
                "semantic.borders",
            ),
            (
                ThemeOverrides::new().component("button", "padding..md", 3.0),
                "components.button.padding..md",
            ),
        ];

        for (overrides, expected_path) in cases {
            let (path, _) = reason_of(overrides.apply(&semantic, &components()).unwrap_err());
            assert_eq!(path, expected_path);
        }
    }

    #[test]
    fn reads_overrides_from_toml() {
        let src = r##"
[components.button]
borderRadius = { primitive = "radius.full" }
padding.md = 14

[semantic.colors.text]
primary = "#000000"
"##;
        let primitives = PrimitiveTokens::default();
        let overrides = ThemeOverrides::from_toml_str(src, &primitives).unwrap();
        let semantic = Arc::new(sample_semantic(Color::WHITE));
        let (merged_semantic, merged) = overrides.apply(&semantic, &components()).unwrap();

        let button = merged.get("button").unwrap();
        assert_eq!(button.number("borderRadius"), Some(primitives.radii.full));
        assert_eq!(button.number("padding.md"), Some(14.0));
        assert_eq!(merged_semantic.color("text.primary"), Some(Color::BLACK));
    }

    #[test]
    fn unknown_toml_sections_are_rejected() {
        let err = ThemeOverrides::from_toml_str("[primitive]\nx = 1\n", &PrimitiveTokens::default())
            .unwrap_err();
        assert!(matches!(err, TokenLoadError::InvalidValue { .. }));
    }
}
