//! Design tokens
//!
//! Tokens are the atomic values that make up a design language:
//! - Colors
//! - Primitive scales (spacing, radii, font weights, line heights, letter spacing)
//! - Shadows
//! - Typography records and their absolute text styles
//! - Generic token values and the dot-addressable groups that hold them

mod color;
mod primitive;
mod shadow;
mod typography;
pub mod value;

pub use color::*;
pub use primitive::*;
pub use shadow::*;
pub use typography::*;
pub use value::{InvalidPath, TokenGroup, TokenKind, TokenLeaf, TokenNode, TokenPath, TokenValue};
