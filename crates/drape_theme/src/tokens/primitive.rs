//! Primitive tokens: the raw scales every design language draws from
//!
//! The primitive layer is a single immutable instance per registry. Semantic and
//! component tables refer to its steps as `{ primitive = "<scale>.<step>" }`,
//! by name (`radius.md`) or by index (`spacing.4`). A step that does not exist
//! is a load error, never a silently invented value.

use super::shadow::{Shadow, ShadowToken, ShadowTokens};
use serde::Serialize;

/// Declares a named-step token enum together with the scale struct holding one
/// value per step.
macro_rules! named_scale {
    (
        $(#[$meta:meta])*
        $token:ident => $scale:ident ($value:ty) {
            $($variant:ident = $name:literal => $field:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
        pub enum $token {
            $($variant),+
        }

        impl $token {
            pub const ALL: &'static [$token] = &[$($token::$variant),+];

            /// Step name as written in token tables
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|token| token.name() == name)
            }
        }

        #[derive(Clone, Debug, PartialEq, Serialize)]
        pub struct $scale {
            $(pub $field: $value),+
        }

        impl $scale {
            pub fn get(&self, token: $token) -> $value {
                match token {
                    $($token::$variant => self.$field),+
                }
            }
        }
    };
}

named_scale! {
    /// Border-radius steps
    RadiusToken => RadiusTokens (f64) {
        None = "none" => none,
        Sm = "sm" => sm,
        Md = "md" => md,
        Lg = "lg" => lg,
        Full = "full" => full,
    }
}

named_scale! {
    /// Font-weight steps
    FontWeightToken => FontWeightTokens (u16) {
        Light = "light" => light,
        Regular = "regular" => regular,
        Medium = "medium" => medium,
        Semibold = "semibold" => semibold,
        Bold = "bold" => bold,
    }
}

named_scale! {
    /// Line-height multiplier steps
    LineHeightToken => LineHeightTokens (f64) {
        Tight = "tight" => tight,
        Snug = "snug" => snug,
        Normal = "normal" => normal,
        Relaxed = "relaxed" => relaxed,
    }
}

named_scale! {
    /// Letter-spacing steps
    LetterSpacingToken => LetterSpacingTokens (f64) {
        Tight = "tight" => tight,
        Normal = "normal" => normal,
        Wide = "wide" => wide,
        Wider = "wider" => wider,
    }
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            none: 0.0,
            sm: 4.0,
            md: 8.0,
            lg: 16.0,
            full: 9999.0,
        }
    }
}

impl Default for FontWeightTokens {
    fn default() -> Self {
        Self {
            light: 300,
            regular: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        }
    }
}

impl Default for LineHeightTokens {
    fn default() -> Self {
        Self {
            tight: 1.2,
            snug: 1.35,
            normal: 1.5,
            relaxed: 1.75,
        }
    }
}

impl Default for LetterSpacingTokens {
    fn default() -> Self {
        Self {
            tight: -0.5,
            normal: 0.0,
            wide: 0.5,
            wider: 1.0,
        }
    }
}

/// The global primitive layer
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveTokens {
    /// Spacing steps, indexed from 0
    pub spacing: Vec<f64>,
    pub radii: RadiusTokens,
    pub font_weights: FontWeightTokens,
    pub line_heights: LineHeightTokens,
    pub letter_spacings: LetterSpacingTokens,
    pub shadows: ShadowTokens,
}

impl PrimitiveTokens {
    /// Spacing value at `step`, if the scale has that many steps
    pub fn spacing(&self, step: usize) -> Option<f64> {
        self.spacing.get(step).copied()
    }

    pub fn radius(&self, token: RadiusToken) -> f64 {
        self.radii.get(token)
    }

    pub fn font_weight(&self, token: FontWeightToken) -> u16 {
        self.font_weights.get(token)
    }

    pub fn line_height(&self, token: LineHeightToken) -> f64 {
        self.line_heights.get(token)
    }

    pub fn letter_spacing(&self, token: LetterSpacingToken) -> f64 {
        self.letter_spacings.get(token)
    }

    pub fn shadow(&self, token: ShadowToken) -> Shadow {
        self.shadows.get(token)
    }
}

impl Default for PrimitiveTokens {
    fn default() -> Self {
        Self {
            spacing: vec![
                0.0, 2.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 32.0, 40.0, 48.0, 64.0,
            ],
            radii: RadiusTokens::default(),
            font_weights: FontWeightTokens::default(),
            line_heights: LineHeightTokens::default(),
            letter_spacings: LetterSpacingTokens::default(),
            shadows: ShadowTokens::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names_round_trip() {
        for token in RadiusToken::ALL {
            assert_eq!(RadiusToken::from_name(token.name()), Some(*token));
        }
        assert_eq!(FontWeightToken::from_name("semibold"), Some(FontWeightToken::Semibold));
        assert_eq!(LineHeightToken::from_name("huge"), None);
    }

    #[test]
    fn spacing_scale_is_indexed_from_zero() {
        let primitives = PrimitiveTokens::default();
        assert_eq!(primitives.spacing(0), Some(0.0));
        assert_eq!(primitives.spacing(3), Some(8.0));
        assert_eq!(primitives.spacing(primitives.spacing.len()), None);
    }

    #[test]
    fn named_lookups_follow_the_scale() {
        let primitives = PrimitiveTokens::default();
        assert_eq!(primitives.radius(RadiusToken::Md), 8.0);
        assert_eq!(primitives.font_weight(FontWeightToken::Bold), 700);
        assert_eq!(primitives.line_height(LineHeightToken::Normal), 1.5);
        assert_eq!(primitives.letter_spacing(LetterSpacingToken::Normal), 0.0);
    }
}
