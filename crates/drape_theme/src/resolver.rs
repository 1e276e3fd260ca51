//! Theme resolution
//!
//! `resolve` is a pure function of the registry and its arguments:
//!
//! 1. take the registry's primitive layer
//! 2. look up the semantic set for (language, mode)
//! 3. look up the language's component table
//! 4. substitute every semantic reference in the component table
//! 5. merge caller overrides on top
//!
//! Nothing is substituted from another language or mode when a lookup misses.

use crate::component::{ComponentStyle, ComponentTokens, ComponentValue, ResolvedComponents};
use crate::error::{Result, ThemeError};
use crate::language::{DesignLanguage, Mode};
use crate::overrides::ThemeOverrides;
use crate::registry::TokenRegistry;
use crate::semantic::SemanticTokens;
use crate::theme::Theme;
use crate::tokens::{TokenGroup, TokenNode, TokenPath, TokenValue};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Build the theme for `language` in `mode`
pub fn resolve(
    registry: &TokenRegistry,
    language: &DesignLanguage,
    mode: Mode,
    overrides: Option<&ThemeOverrides>,
) -> Result<Theme> {
    let primitive = Arc::clone(registry.primitives());
    let semantic = registry.semantic(language, mode)?;
    let components = registry.components(language)?;

    let resolved = substitute(components, semantic, language, mode)?;

    let (semantic, resolved) = match overrides {
        Some(overrides) if !overrides.is_empty() => overrides.apply(semantic, &resolved)?,
        _ => (Arc::clone(semantic), resolved),
    };

    debug!(
        "resolved `{}` ({}): {} component(s)",
        language,
        mode,
        resolved.len()
    );
    Ok(Theme::new(
        language.clone(),
        mode,
        primitive,
        semantic,
        resolved,
    ))
}

/// Replace every semantic reference with the value it names
fn substitute(
    components: &ComponentTokens,
    semantic: &SemanticTokens,
    language: &DesignLanguage,
    mode: Mode,
) -> Result<ResolvedComponents> {
    let mut styles = IndexMap::with_capacity(components.len());
    for (name, fields) in components.iter() {
        let resolve_ref = |field: &TokenPath, path: &TokenPath| -> Result<TokenValue> {
            let value = semantic
                .lookup(path)
                .ok_or_else(|| ThemeError::DanglingTokenReference {
                    design_language: language.clone(),
                    mode,
                    component: name.to_string(),
                    field: field.clone(),
                    path: path.clone(),
                })?;
            trace!("{}.{} <- {} = {}", name, field, path, value.to_css());
            Ok(value)
        };
        let fields = substitute_group(fields, &TokenPath::default(), &resolve_ref)?;
        styles.insert(name.to_string(), ComponentStyle::new(fields));
    }
    Ok(ResolvedComponents::new(styles))
}

fn substitute_group(
    group: &TokenGroup<ComponentValue>,
    prefix: &TokenPath,
    resolve_ref: &dyn Fn(&TokenPath, &TokenPath) -> Result<TokenValue>,
) -> Result<TokenGroup<TokenValue>> {
    let mut out = TokenGroup::with_capacity(group.len());
    for (key, node) in group {
        let field = prefix.child(key);
        let node = match node {
            TokenNode::Group(child) => TokenNode::Group(substitute_group(child, &field, resolve_ref)?),
            TokenNode::Leaf(ComponentValue::Literal(value)) => TokenNode::Leaf(value.clone()),
            TokenNode::Leaf(ComponentValue::SemanticRef(path)) => {
                TokenNode::Leaf(resolve_ref(&field, path)?)
            }
        };
        out.insert(key.clone(), node);
    }
    Ok(out)
}
