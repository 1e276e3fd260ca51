//! Token values, dot paths and the nested groups that hold them

use super::color::Color;
use super::shadow::Shadow;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A concrete token value
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Color(Color),
    Number(f64),
    Text(String),
    Shadow(Shadow),
}

/// Kind of a [`TokenValue`], used to check override shapes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Color,
    Number,
    Text,
    Shadow,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Color => "color",
            Self::Number => "number",
            Self::Text => "text",
            Self::Shadow => "shadow",
        })
    }
}

impl TokenValue {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Color(_) => TokenKind::Color,
            Self::Number(_) => TokenKind::Number,
            Self::Text(_) => TokenKind::Text,
            Self::Shadow(_) => TokenKind::Shadow,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_shadow(&self) -> Option<Shadow> {
        match self {
            Self::Shadow(shadow) => Some(*shadow),
            _ => None,
        }
    }

    /// CSS notation; numbers are emitted as pixels
    pub fn to_css(&self) -> String {
        match self {
            Self::Color(color) => color.to_hex_string(),
            Self::Number(value) => format!("{value}px"),
            Self::Text(text) => text.clone(),
            Self::Shadow(shadow) => shadow.to_css(),
        }
    }
}

impl From<Color> for TokenValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for TokenValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Shadow> for TokenValue {
    fn from(shadow: Shadow) -> Self {
        Self::Shadow(shadow)
    }
}

/// Leaf types that can live in a token group.
///
/// Semantic colors hold [`Color`], semantic spacing holds `f64`, resolved
/// component fields hold any [`TokenValue`].
pub trait TokenLeaf: Clone {
    fn kind(&self) -> TokenKind;

    fn to_value(&self) -> TokenValue;

    /// Convert an override value into this leaf type, `None` if the kind differs
    fn from_value(value: &TokenValue) -> Option<Self>;
}

impl TokenLeaf for Color {
    fn kind(&self) -> TokenKind {
        TokenKind::Color
    }

    fn to_value(&self) -> TokenValue {
        TokenValue::Color(*self)
    }

    fn from_value(value: &TokenValue) -> Option<Self> {
        value.as_color()
    }
}

impl TokenLeaf for f64 {
    fn kind(&self) -> TokenKind {
        TokenKind::Number
    }

    fn to_value(&self) -> TokenValue {
        TokenValue::Number(*self)
    }

    fn from_value(value: &TokenValue) -> Option<Self> {
        value.as_number()
    }
}

impl TokenLeaf for TokenValue {
    fn kind(&self) -> TokenKind {
        TokenValue::kind(self)
    }

    fn to_value(&self) -> TokenValue {
        self.clone()
    }

    fn from_value(value: &TokenValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// Dot-separated path into a token tree, e.g. `colors.surface.elevated`
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct TokenPath(Vec<String>);

impl TokenPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New path with `segment` appended
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    /// First segment and the remaining path
    pub fn split_first(&self) -> Option<(&str, TokenPath)> {
        let (head, rest) = self.0.split_first()?;
        Some((head.as_str(), TokenPath(rest.to_vec())))
    }
}

/// Error returned when a dot path has an empty segment
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid token path `{0}`")]
pub struct InvalidPath(pub String);

impl FromStr for TokenPath {
    type Err = InvalidPath;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = src.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(InvalidPath(src.to_string()));
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl Serialize for TokenPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A node in a token tree: either a value or a named group of nodes
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenNode<V> {
    Leaf(V),
    Group(TokenGroup<V>),
}

/// Named children, kept in declaration order
pub type TokenGroup<V> = IndexMap<String, TokenNode<V>>;

impl<V> TokenNode<V> {
    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenGroup<V>> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => Some(group),
        }
    }
}

/// Walk `path` down from `group`
pub fn lookup<'a, V>(group: &'a TokenGroup<V>, path: &TokenPath) -> Option<&'a TokenNode<V>> {
    let (head, rest) = path.segments().split_first()?;
    let mut node = group.get(head)?;
    for segment in rest {
        node = node.as_group()?.get(segment)?;
    }
    Some(node)
}

/// Leaf value at `path`, `None` if missing or if the path ends on a group
pub fn lookup_leaf<'a, V>(group: &'a TokenGroup<V>, path: &TokenPath) -> Option<&'a V> {
    lookup(group, path)?.as_leaf()
}

/// Every leaf in the group as `(path, value)`, depth first in declaration order
pub fn leaves<V>(group: &TokenGroup<V>) -> Vec<(TokenPath, &V)> {
    fn walk<'a, V>(group: &'a TokenGroup<V>, prefix: &TokenPath, out: &mut Vec<(TokenPath, &'a V)>) {
        for (key, node) in group {
            let path = prefix.child(key);
            match node {
                TokenNode::Leaf(value) => out.push((path, value)),
                TokenNode::Group(child) => walk(child, &path, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(group, &TokenPath::default(), &mut out);
    out
}

/// Insert `value` at `path`, creating intermediate groups.
///
/// Fails with the offending prefix when the path runs through an existing leaf.
pub fn insert<V>(group: &mut TokenGroup<V>, path: &TokenPath, value: V) -> Result<(), TokenPath> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(path.clone());
    };

    let mut current = group;
    let mut walked = TokenPath::default();
    for segment in parents {
        walked = walked.child(segment);
        let node = current
            .entry(segment.clone())
            .or_insert_with(|| TokenNode::Group(TokenGroup::new()));
        current = match node {
            TokenNode::Group(child) => child,
            TokenNode::Leaf(_) => return Err(walked),
        };
    }
    current.insert(last.clone(), TokenNode::Leaf(value));
    Ok(())
}
