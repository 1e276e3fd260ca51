//! Semantic typography roles and the line-height unit converter
//!
//! Typography records carry a *relative* line height (a unitless multiplier such
//! as `1.5`). Renderers need absolute values, so text styles pass through
//! [`to_absolute`] before use.

use super::value::{TokenKind, TokenValue};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Typography roles every semantic set defines
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypographyRole {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    BodyLarge,
    BodyMedium,
    BodySmall,
    LabelLarge,
    LabelMedium,
    LabelSmall,
    Caption,
    Overline,
}

impl TypographyRole {
    pub const ALL: [TypographyRole; 14] = [
        TypographyRole::H1,
        TypographyRole::H2,
        TypographyRole::H3,
        TypographyRole::H4,
        TypographyRole::H5,
        TypographyRole::H6,
        TypographyRole::BodyLarge,
        TypographyRole::BodyMedium,
        TypographyRole::BodySmall,
        TypographyRole::LabelLarge,
        TypographyRole::LabelMedium,
        TypographyRole::LabelSmall,
        TypographyRole::Caption,
        TypographyRole::Overline,
    ];

    /// Role key as written in token tables and dot paths
    pub fn key(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::BodyLarge => "bodyLarge",
            Self::BodyMedium => "bodyMedium",
            Self::BodySmall => "bodySmall",
            Self::LabelLarge => "labelLarge",
            Self::LabelMedium => "labelMedium",
            Self::LabelSmall => "labelSmall",
            Self::Caption => "caption",
            Self::Overline => "overline",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}

impl fmt::Display for TypographyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One semantic typography entry; `line_height` is a multiplier of `font_size`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyRecord {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: f64,
}

impl TypographyRecord {
    pub const FIELDS: [&'static str; 5] = [
        "fontFamily",
        "fontSize",
        "fontWeight",
        "lineHeight",
        "letterSpacing",
    ];

    /// Field value by its table key
    pub fn field(&self, name: &str) -> Option<TokenValue> {
        match name {
            "fontFamily" => Some(TokenValue::Text(self.font_family.clone())),
            "fontSize" => Some(TokenValue::Number(self.font_size)),
            "fontWeight" => Some(TokenValue::Number(self.font_weight.into())),
            "lineHeight" => Some(TokenValue::Number(self.line_height)),
            "letterSpacing" => Some(TokenValue::Number(self.letter_spacing)),
            _ => None,
        }
    }

    /// Copy of this record with one field replaced.
    ///
    /// The error names what was wrong with the field or value.
    pub fn with_field(&self, name: &str, value: &TokenValue) -> Result<Self, String> {
        let mut next = self.clone();
        let expected = if name == "fontFamily" {
            TokenKind::Text
        } else {
            TokenKind::Number
        };
        if value.kind() != expected {
            return Err(format!("expected {expected}, found {}", value.kind()));
        }

        match (name, value) {
            ("fontFamily", TokenValue::Text(family)) => next.font_family = family.clone(),
            ("fontSize", TokenValue::Number(size)) => next.font_size = *size,
            ("fontWeight", TokenValue::Number(weight)) => {
                if weight.fract() != 0.0 || !(1.0..=1000.0).contains(weight) {
                    return Err(format!("font weight {weight} is not in 1..=1000"));
                }
                next.font_weight = *weight as u16;
            }
            ("lineHeight", TokenValue::Number(multiplier)) => next.line_height = *multiplier,
            ("letterSpacing", TokenValue::Number(spacing)) => next.letter_spacing = *spacing,
            _ => return Err(format!("unknown typography field `{name}`")),
        }
        Ok(next)
    }

    pub fn to_absolute(&self) -> TextStyle {
        to_absolute(self)
    }
}

/// Typography record with an absolute line height, ready for rendering
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    /// Same unit as `font_size`
    pub line_height: f64,
    pub letter_spacing: f64,
}

/// Convert a relative line-height multiplier into an absolute line height
pub fn to_absolute(record: &TypographyRecord) -> TextStyle {
    TextStyle {
        font_family: record.font_family.clone(),
        font_size: record.font_size,
        font_weight: record.font_weight,
        line_height: record.font_size * record.line_height,
        letter_spacing: record.letter_spacing,
    }
}

/// All typography roles of one semantic set
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypographyTokens {
    roles: IndexMap<TypographyRole, TypographyRecord>,
}

impl TypographyTokens {
    /// Build from a complete role map; returns the first missing role otherwise
    pub fn new(
        mut roles: IndexMap<TypographyRole, TypographyRecord>,
    ) -> Result<Self, TypographyRole> {
        if let Some(missing) = TypographyRole::ALL
            .into_iter()
            .find(|role| !roles.contains_key(role))
        {
            return Err(missing);
        }
        roles.sort_keys();
        Ok(Self { roles })
    }

    pub fn get(&self, role: TypographyRole) -> &TypographyRecord {
        // `new` guarantees every role is present.
        &self.roles[&role]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypographyRole, &TypographyRecord)> {
        self.roles.iter().map(|(role, record)| (*role, record))
    }

    /// Copy with one role replaced
    pub fn with_record(&self, role: TypographyRole, record: TypographyRecord) -> Self {
        let mut roles = self.roles.clone();
        roles.insert(role, record);
        Self { roles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(font_size: f64, line_height: f64) -> TypographyRecord {
        TypographyRecord {
            font_family: "Inter".to_string(),
            font_size,
            font_weight: 400,
            line_height,
            letter_spacing: 0.25,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn line_height_becomes_absolute() {
        assert_eq!(to_absolute(&record(16.0, 1.5)).line_height, 24.0);
        assert!(close(to_absolute(&record(10.0, 1.2)).line_height, 12.0));
    }

    #[test]
    fn absolute_line_height_preserves_the_ratio() {
        for (size, multiplier) in [(11.0, 1.45), (13.5, 1.333), (57.0, 1.12), (9.0, 2.0)] {
            let style = to_absolute(&record(size, multiplier));
            assert!(close(style.line_height / style.font_size, multiplier));
        }
    }

    #[test]
    fn other_fields_pass_through() {
        let style = record(14.0, 1.4).to_absolute();
        assert_eq!(style.font_family, "Inter");
        assert_eq!(style.font_size, 14.0);
        assert_eq!(style.font_weight, 400);
        assert_eq!(style.letter_spacing, 0.25);
    }

    #[test]
    fn with_field_checks_kinds() {
        let base = record(14.0, 1.4);
        let bigger = base.with_field("fontSize", &TokenValue::Number(18.0)).unwrap();
        assert_eq!(bigger.font_size, 18.0);
        assert!(base.with_field("fontSize", &TokenValue::Text("big".into())).is_err());
        assert!(base.with_field("fontWeight", &TokenValue::Number(450.5)).is_err());
        assert!(base.with_field("fontStyle", &TokenValue::Number(1.0)).is_err());
    }

    #[test]
    fn role_keys_round_trip() {
        for role in TypographyRole::ALL {
            assert_eq!(TypographyRole::from_key(role.key()), Some(role));
        }
        assert_eq!(TypographyRole::from_key("display"), None);
    }

    #[test]
    fn typography_tokens_require_every_role() {
        let mut roles = IndexMap::new();
        for role in TypographyRole::ALL.into_iter().skip(1) {
            roles.insert(role, record(14.0, 1.4));
        }
        assert_eq!(TypographyTokens::new(roles), Err(TypographyRole::H1));
    }
}
