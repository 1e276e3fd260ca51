//! Shadow presets of the primitive layer

use super::color::Color;
use serde::Serialize;

/// Named shadow steps
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowToken {
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

impl ShadowToken {
    pub const ALL: [ShadowToken; 5] = [
        ShadowToken::None,
        ShadowToken::Sm,
        ShadowToken::Md,
        ShadowToken::Lg,
        ShadowToken::Xl,
    ];

    /// Step name as written in token tables
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }
}

/// A box shadow definition
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color,
        }
    }

    pub const fn none() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            spread: 0.0,
            color: Color::TRANSPARENT,
        }
    }

    /// CSS `box-shadow` notation
    pub fn to_css(&self) -> String {
        if *self == Self::none() {
            return "none".to_string();
        }
        format!(
            "{}px {}px {}px {}px {}",
            self.offset_x, self.offset_y, self.blur, self.spread, self.color
        )
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::none()
    }
}

/// Complete set of shadow presets
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShadowTokens {
    pub none: Shadow,
    pub sm: Shadow,
    pub md: Shadow,
    pub lg: Shadow,
    pub xl: Shadow,
}

impl ShadowTokens {
    /// Get shadow by token key
    pub fn get(&self, token: ShadowToken) -> Shadow {
        match token {
            ShadowToken::None => self.none,
            ShadowToken::Sm => self.sm,
            ShadowToken::Md => self.md,
            ShadowToken::Lg => self.lg,
            ShadowToken::Xl => self.xl,
        }
    }
}

impl Default for ShadowTokens {
    fn default() -> Self {
        let base_color = Color::BLACK;
        Self {
            none: Shadow::none(),
            sm: Shadow::new(0.0, 1.0, 2.0, 0.0, base_color.with_alpha(0.05)),
            md: Shadow::new(0.0, 4.0, 6.0, -1.0, base_color.with_alpha(0.1)),
            lg: Shadow::new(0.0, 10.0, 15.0, -3.0, base_color.with_alpha(0.1)),
            xl: Shadow::new(0.0, 20.0, 25.0, -5.0, base_color.with_alpha(0.1)),
        }
    }
}
