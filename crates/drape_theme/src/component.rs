//! Component tokens: per-component shape, spacing and color fields
//!
//! Component tables are mode-independent. A field is either a literal value or
//! an explicit reference into the semantic layer, substituted when a theme is
//! resolved for a concrete mode.

use crate::tokens::value::{leaves, lookup, lookup_leaf};
use crate::tokens::{Color, Shadow, TokenGroup, TokenNode, TokenPath, TokenValue};
use indexmap::IndexMap;
use serde::Serialize;

/// A component field before resolution
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentValue {
    Literal(TokenValue),
    /// Take the value found at this path in the semantic set
    SemanticRef(TokenPath),
}

impl ComponentValue {
    pub fn literal(value: impl Into<TokenValue>) -> Self {
        Self::Literal(value.into())
    }

    pub fn semantic_ref(path: TokenPath) -> Self {
        Self::SemanticRef(path)
    }
}

/// One design language's component table
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentTokens {
    components: IndexMap<String, TokenGroup<ComponentValue>>,
}

/// A placeholder declared in a component table
#[derive(Clone, Debug, PartialEq)]
pub struct SemanticReference<'a> {
    pub component: &'a str,
    pub field: TokenPath,
    pub path: &'a TokenPath,
}

impl ComponentTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the fields of one component
    pub fn insert(&mut self, name: impl Into<String>, fields: TokenGroup<ComponentValue>) {
        self.components.insert(name.into(), fields);
    }

    pub fn get(&self, name: &str) -> Option<&TokenGroup<ComponentValue>> {
        self.components.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenGroup<ComponentValue>)> {
        self.components
            .iter()
            .map(|(name, fields)| (name.as_str(), fields))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Every placeholder in the table, in declaration order
    pub fn semantic_refs(&self) -> Vec<SemanticReference<'_>> {
        self.iter()
            .flat_map(|(component, fields)| {
                leaves(fields)
                    .into_iter()
                    .filter_map(move |(field, value)| match value {
                        ComponentValue::SemanticRef(path) => Some(SemanticReference {
                            component,
                            field,
                            path,
                        }),
                        ComponentValue::Literal(_) => None,
                    })
            })
            .collect()
    }
}

/// Component fields after placeholder substitution
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComponentStyle {
    fields: TokenGroup<TokenValue>,
}

impl ComponentStyle {
    pub fn new(fields: TokenGroup<TokenValue>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &TokenGroup<TokenValue> {
        &self.fields
    }

    /// Value at a dot path such as `padding.md`
    pub fn get(&self, path: &str) -> Option<&TokenValue> {
        lookup_leaf(&self.fields, &path.parse().ok()?)
    }

    /// Sub-group at a dot path, e.g. every size under `minHeight`
    pub fn group(&self, path: &str) -> Option<&TokenGroup<TokenValue>> {
        lookup(&self.fields, &path.parse().ok()?).and_then(TokenNode::as_group)
    }

    pub fn number(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_number()
    }

    pub fn color(&self, path: &str) -> Option<Color> {
        self.get(path)?.as_color()
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_text()
    }

    pub fn shadow(&self, path: &str) -> Option<Shadow> {
        self.get(path)?.as_shadow()
    }
}

/// Resolved component styles of a theme, keyed by component name
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedComponents {
    styles: IndexMap<String, ComponentStyle>,
}

impl ResolvedComponents {
    pub fn new(styles: IndexMap<String, ComponentStyle>) -> Self {
        Self { styles }
    }

    pub fn get(&self, name: &str) -> Option<&ComponentStyle> {
        self.styles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentStyle)> {
        self.styles.iter().map(|(name, style)| (name.as_str(), style))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::value::insert;

    fn button() -> TokenGroup<ComponentValue> {
        let mut fields = TokenGroup::new();
        insert(&mut fields, &"borderRadius".parse().unwrap(), ComponentValue::literal(8.0)).unwrap();
        insert(
            &mut fields,
            &"background".parse().unwrap(),
            ComponentValue::semantic_ref("colors.interactive.primary".parse().unwrap()),
        )
        .unwrap();
        insert(&mut fields, &"padding.md".parse().unwrap(), ComponentValue::literal(12.0)).unwrap();
        fields
    }

    #[test]
    fn lists_semantic_references() {
        let mut tokens = ComponentTokens::new();
        tokens.insert("button", button());

        let refs = tokens.semantic_refs();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].component, "button");
        assert_eq!(refs[0].field.to_string(), "background");
        assert_eq!(refs[0].path.to_string(), "colors.interactive.primary");
    }

    #[test]
    fn style_accessors_are_typed() {
        let mut fields = TokenGroup::new();
        insert(&mut fields, &"padding.md".parse().unwrap(), TokenValue::Number(12.0)).unwrap();
        insert(&mut fields, &"background".parse().unwrap(), TokenValue::Color(Color::WHITE)).unwrap();
        let style = ComponentStyle::new(fields);

        assert_eq!(style.number("padding.md"), Some(12.0));
        assert_eq!(style.color("background"), Some(Color::WHITE));
        assert_eq!(style.color("padding.md"), None);
        assert_eq!(style.number("padding"), None);
        assert_eq!(style.group("padding").map(|g| g.len()), Some(1));
        assert_eq!(style.text("missing"), None);
    }
}
