//! TOML token tables
//!
//! One document installs one design language:
//!
//! ```toml
//! name = "classicMetal"
//!
//! [common.spacing]              # merged under every mode, mode tables win
//! component.gap = { primitive = "spacing.3" }
//!
//! [light.colors.surface]
//! elevated = "#FFFFFF"
//!
//! [light.typography.bodyMedium]
//! fontFamily = "Inter"
//! fontSize = 14
//! fontWeight = "regular"
//! lineHeight = "normal"
//! letterSpacing = 0
//!
//! [components.button]
//! borderRadius = { primitive = "radius.md" }
//! background = { ref = "colors.interactive.primary" }
//! ```
//!
//! A table with the single key `ref` is a semantic reference (component tables
//! only). A table with the single key `primitive` takes a `<scale>.<step>` value
//! from the primitive layer, where the scale is one of `spacing`, `radius`,
//! `fontWeight`, `lineHeight`, `letterSpacing` or `shadow`. Any other table is
//! a group, including one whose only key happens to be a scale name.

use crate::component::{ComponentTokens, ComponentValue};
use crate::error::TokenLoadError;
use crate::language::{DesignLanguage, Mode};
use crate::semantic::SemanticTokens;
use crate::tokens::{
    Color, FontWeightToken, LetterSpacingToken, LineHeightToken, PrimitiveTokens, RadiusToken,
    ShadowToken, TokenGroup, TokenNode, TokenPath, TokenValue, TypographyRecord, TypographyRole,
    TypographyTokens,
};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use toml::{Table, Value};
use tracing::debug;

const REF_KEY: &str = "ref";
const PRIMITIVE_KEY: &str = "primitive";

/// Everything one token document installs
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageTokens {
    pub name: DesignLanguage,
    pub display_name: Option<String>,
    /// Semantic sets of the modes the document defines
    pub semantic: BTreeMap<Mode, SemanticTokens>,
    pub components: ComponentTokens,
}

impl LanguageTokens {
    /// Parse a token document, resolving primitive steps against `primitives`
    pub fn from_toml_str(src: &str, primitives: &PrimitiveTokens) -> Result<Self, TokenLoadError> {
        let doc: Table = toml::from_str(src)?;
        let loader = Loader { primitives };

        let name = match doc.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => DesignLanguage::new(name.trim()),
            Some(_) => return Err(TokenLoadError::invalid("name", "expected a non-empty string")),
            None => return Err(TokenLoadError::MissingSection("name".to_string())),
        };
        let display_name = match doc.get("displayName") {
            Some(Value::String(display)) => Some(display.clone()),
            Some(_) => return Err(TokenLoadError::invalid("displayName", "expected a string")),
            None => None,
        };

        let common = match doc.get("common") {
            Some(value) => expect_table(value, "common")?.clone(),
            None => Table::new(),
        };

        let mut semantic = BTreeMap::new();
        for mode in Mode::ALL {
            let Some(value) = doc.get(mode.as_str()) else {
                continue;
            };
            let table = merge_tables(&common, expect_table(value, mode.as_str())?);
            semantic.insert(mode, loader.semantic(&name, mode, &table)?);
        }
        if semantic.is_empty() {
            return Err(TokenLoadError::MissingSection("light".to_string()));
        }

        let components = match doc.get("components") {
            Some(value) => loader.components(expect_table(value, "components")?)?,
            None => return Err(TokenLoadError::MissingSection("components".to_string())),
        };

        for key in doc.keys() {
            if !matches!(
                key.as_str(),
                "name" | "displayName" | "common" | "light" | "dark" | "components"
            ) {
                return Err(TokenLoadError::invalid(key, "unknown top-level section"));
            }
        }

        debug!(
            "loaded design language `{}`: {} mode(s), {} component(s)",
            name,
            semantic.len(),
            components.len()
        );

        Ok(Self {
            name,
            display_name,
            semantic,
            components,
        })
    }
}

/// Converts TOML values into token values against one primitive layer
pub(crate) struct Loader<'a> {
    pub(crate) primitives: &'a PrimitiveTokens,
}

impl Loader<'_> {
    fn semantic(
        &self,
        language: &DesignLanguage,
        mode: Mode,
        table: &Table,
    ) -> Result<SemanticTokens, TokenLoadError> {
        let root = TokenPath::default().child(mode.as_str());

        let colors = match table.get("colors") {
            Some(value) => {
                let path = root.child("colors");
                self.group(expect_table(value, &path)?, &path, &|value, path| {
                    self.color(value, path)
                })?
            }
            None => TokenGroup::new(),
        };

        let spacing = match table.get("spacing") {
            Some(value) => {
                let path = root.child("spacing");
                self.group(expect_table(value, &path)?, &path, &|value, path| {
                    self.number(value, path)
                })?
            }
            None => TokenGroup::new(),
        };

        let typography_path = root.child("typography");
        let typography_table = match table.get("typography") {
            Some(value) => expect_table(value, &typography_path)?,
            None => {
                return Err(TokenLoadError::MissingSection(typography_path.to_string()));
            }
        };
        let mut roles = IndexMap::new();
        for (key, value) in typography_table {
            let path = typography_path.child(key);
            let role = TypographyRole::from_key(key).ok_or_else(|| {
                TokenLoadError::UnknownTypographyRole {
                    path: path.to_string(),
                    role: key.clone(),
                }
            })?;
            roles.insert(role, self.typography_record(expect_table(value, &path)?, &path)?);
        }
        let typography =
            TypographyTokens::new(roles).map_err(|role| TokenLoadError::MissingTypographyRole {
                design_language: language.clone(),
                mode,
                role: role.key().to_string(),
            })?;

        for key in table.keys() {
            if !SemanticTokens::SECTIONS.contains(&key.as_str()) {
                return Err(TokenLoadError::invalid(
                    root.child(key),
                    "unknown semantic section (expected colors, spacing or typography)",
                ));
            }
        }

        Ok(SemanticTokens {
            colors,
            spacing,
            typography,
        })
    }

    fn components(&self, table: &Table) -> Result<ComponentTokens, TokenLoadError> {
        let mut components = ComponentTokens::new();
        for (name, value) in table {
            let path = TokenPath::default().child("components").child(name);
            let fields = self.group(expect_table(value, &path)?, &path, &|value, path| {
                self.component_value(value, path)
            })?;
            components.insert(name.clone(), fields);
        }
        Ok(components)
    }

    /// Build a group, converting each leaf with `leaf`
    fn group<V>(
        &self,
        table: &Table,
        path: &TokenPath,
        leaf: &dyn Fn(&Value, &TokenPath) -> Result<V, TokenLoadError>,
    ) -> Result<TokenGroup<V>, TokenLoadError> {
        let mut group = TokenGroup::new();
        for (key, value) in table {
            let child = path.child(key);
            let node = match value {
                Value::Table(table) if !is_reference(table) => {
                    TokenNode::Group(self.group(table, &child, leaf)?)
                }
                _ => TokenNode::Leaf(leaf(value, &child)?),
            };
            group.insert(key.clone(), node);
        }
        Ok(group)
    }

    fn color(&self, value: &Value, path: &TokenPath) -> Result<Color, TokenLoadError> {
        match value {
            Value::String(src) => Color::parse(src).ok_or_else(|| {
                TokenLoadError::invalid(path, format!("`{src}` is not a color"))
            }),
            _ => Err(TokenLoadError::invalid(path, "expected a color string")),
        }
    }

    fn number(&self, value: &Value, path: &TokenPath) -> Result<f64, TokenLoadError> {
        match self.value(value, path)? {
            TokenValue::Number(number) => Ok(number),
            other => Err(TokenLoadError::invalid(
                path,
                format!("expected a number, found {}", other.kind()),
            )),
        }
    }

    fn component_value(
        &self,
        value: &Value,
        path: &TokenPath,
    ) -> Result<ComponentValue, TokenLoadError> {
        if let Value::Table(table) = value {
            if let Some(target) = table.get(REF_KEY) {
                let Value::String(target) = target else {
                    return Err(TokenLoadError::invalid(path, "`ref` must be a dot path string"));
                };
                let target: TokenPath = target
                    .parse()
                    .map_err(|_| TokenLoadError::InvalidPath(target.clone()))?;
                return Ok(ComponentValue::SemanticRef(target));
            }
        }
        Ok(ComponentValue::Literal(self.value(value, path)?))
    }

    /// Literal or primitive-step value
    pub(crate) fn value(&self, value: &Value, path: &TokenPath) -> Result<TokenValue, TokenLoadError> {
        match value {
            Value::Integer(number) => Ok(TokenValue::Number(*number as f64)),
            Value::Float(number) => Ok(TokenValue::Number(*number)),
            Value::String(src) => {
                if src.starts_with('#') || src.eq_ignore_ascii_case("transparent") {
                    Color::parse(src).map(TokenValue::Color).ok_or_else(|| {
                        TokenLoadError::invalid(path, format!("`{src}` is not a color"))
                    })
                } else {
                    Ok(TokenValue::Text(src.clone()))
                }
            }
            Value::Table(table) => match table.get(PRIMITIVE_KEY) {
                Some(target) if table.len() == 1 => self.primitive(target, path),
                _ => Err(TokenLoadError::invalid(path, "expected a value, found a table")),
            },
            other => Err(TokenLoadError::invalid(
                path,
                format!("unsupported value type `{}`", other.type_str()),
            )),
        }
    }

    /// `"<scale>.<step>"` looked up in the primitive layer
    fn primitive(&self, target: &Value, path: &TokenPath) -> Result<TokenValue, TokenLoadError> {
        let Value::String(target) = target else {
            return Err(TokenLoadError::invalid(path, "`primitive` must be a `<scale>.<step>` string"));
        };
        let Some((scale, step)) = target.split_once('.') else {
            return Err(TokenLoadError::invalid(
                path,
                format!("`{target}` is not a `<scale>.<step>` reference"),
            ));
        };
        let unknown = |scale: &'static str| TokenLoadError::UnknownPrimitiveStep {
            path: path.to_string(),
            scale,
            step: step.to_string(),
        };

        match scale {
            "spacing" => step
                .parse::<usize>()
                .ok()
                .and_then(|index| self.primitives.spacing(index))
                .map(TokenValue::Number)
                .ok_or_else(|| unknown("spacing")),
            "radius" => RadiusToken::from_name(step)
                .map(|token| TokenValue::Number(self.primitives.radius(token)))
                .ok_or_else(|| unknown("radius")),
            "fontWeight" => FontWeightToken::from_name(step)
                .map(|token| TokenValue::Number(self.primitives.font_weight(token).into()))
                .ok_or_else(|| unknown("font weight")),
            "lineHeight" => LineHeightToken::from_name(step)
                .map(|token| TokenValue::Number(self.primitives.line_height(token)))
                .ok_or_else(|| unknown("line height")),
            "letterSpacing" => LetterSpacingToken::from_name(step)
                .map(|token| TokenValue::Number(self.primitives.letter_spacing(token)))
                .ok_or_else(|| unknown("letter spacing")),
            "shadow" => ShadowToken::from_name(step)
                .map(|token| TokenValue::Shadow(self.primitives.shadow(token)))
                .ok_or_else(|| unknown("shadow")),
            _ => Err(TokenLoadError::invalid(path, format!("unknown primitive scale `{scale}`"))),
        }
    }

    fn typography_record(
        &self,
        table: &Table,
        path: &TokenPath,
    ) -> Result<TypographyRecord, TokenLoadError> {
        for key in table.keys() {
            if !TypographyRecord::FIELDS.contains(&key.as_str()) {
                return Err(TokenLoadError::invalid(
                    path.child(key),
                    "unknown typography field",
                ));
            }
        }
        let field = |name: &str| {
            table
                .get(name)
                .map(|value| (value, path.child(name)))
                .ok_or_else(|| TokenLoadError::invalid(path, format!("missing field `{name}`")))
        };

        let (value, field_path) = field("fontFamily")?;
        let font_family = match value {
            Value::String(family) => family.clone(),
            _ => return Err(TokenLoadError::invalid(field_path, "expected a font family name")),
        };

        let (value, field_path) = field("fontSize")?;
        let font_size = self.number(value, &field_path)?;
        if font_size <= 0.0 {
            return Err(TokenLoadError::invalid(field_path, "font size must be positive"));
        }

        let (value, field_path) = field("fontWeight")?;
        let font_weight = match value {
            Value::String(step) => FontWeightToken::from_name(step)
                .map(|token| self.primitives.font_weight(token))
                .ok_or_else(|| TokenLoadError::UnknownPrimitiveStep {
                    path: field_path.to_string(),
                    scale: "font weight",
                    step: step.clone(),
                })?,
            _ => {
                let weight = self.number(value, &field_path)?;
                if weight.fract() != 0.0 || !(1.0..=1000.0).contains(&weight) {
                    return Err(TokenLoadError::invalid(
                        field_path,
                        "font weight must be an integer in 1..=1000",
                    ));
                }
                weight as u16
            }
        };

        let (value, field_path) = field("lineHeight")?;
        let line_height = match value {
            Value::String(step) => LineHeightToken::from_name(step)
                .map(|token| self.primitives.line_height(token))
                .ok_or_else(|| TokenLoadError::UnknownPrimitiveStep {
                    path: field_path.to_string(),
                    scale: "line height",
                    step: step.clone(),
                })?,
            _ => self.number(value, &field_path)?,
        };
        if line_height <= 0.0 {
            return Err(TokenLoadError::invalid(
                field_path,
                "line height must be a positive multiplier",
            ));
        }

        let (value, field_path) = field("letterSpacing")?;
        let letter_spacing = match value {
            Value::String(step) => LetterSpacingToken::from_name(step)
                .map(|token| self.primitives.letter_spacing(token))
                .ok_or_else(|| TokenLoadError::UnknownPrimitiveStep {
                    path: field_path.to_string(),
                    scale: "letter spacing",
                    step: step.clone(),
                })?,
            _ => self.number(value, &field_path)?,
        };

        Ok(TypographyRecord {
            font_family,
            font_size,
            font_weight,
            line_height,
            letter_spacing,
        })
    }
}

/// `{ ref = .. }` or `{ primitive = .. }`; every other table is a group
pub(crate) fn is_reference(table: &Table) -> bool {
    table.len() == 1 && (table.contains_key(REF_KEY) || table.contains_key(PRIMITIVE_KEY))
}

pub(crate) fn expect_table<'a>(
    value: &'a Value,
    path: impl std::fmt::Display,
) -> Result<&'a Table, TokenLoadError> {
    match value {
        Value::Table(table) => Ok(table),
        other => Err(TokenLoadError::invalid(
            path,
            format!("expected a table, found {}", other.type_str()),
        )),
    }
}

/// Deep merge: values in `over` replace those in `base`, tables merge
fn merge_tables(base: &Table, over: &Table) -> Table {
    let mut merged = base.clone();
    for (key, value) in over {
        let next = match (merged.get(key), value) {
            (Some(Value::Table(base)), Value::Table(over)) if !is_reference(over) => {
                Value::Table(merge_tables(base, over))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}
