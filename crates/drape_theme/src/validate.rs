//! Whole-registry integrity check
//!
//! The resolver stops at the first problem. `validate` walks every installed
//! language and reports all of them, so token tables can be checked before
//! they ship.

use crate::error::TokenTable;
use crate::language::{DesignLanguage, Mode};
use crate::registry::TokenRegistry;
use crate::tokens::TokenPath;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationIssue {
    /// A language lacks a table that resolution needs
    MissingVariant {
        language: DesignLanguage,
        mode: Option<Mode>,
        table: TokenTable,
    },
    /// A component reference does not resolve in one mode
    DanglingReference {
        language: DesignLanguage,
        mode: Mode,
        component: String,
        field: TokenPath,
        path: TokenPath,
    },
    /// Light and dark define different role keys
    AsymmetricModes {
        language: DesignLanguage,
        only_in_light: Vec<String>,
        only_in_dark: Vec<String>,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariant {
                language,
                mode: Some(mode),
                table,
            } => write!(f, "{language}: no {table} tokens for {mode} mode"),
            Self::MissingVariant {
                language,
                mode: None,
                table,
            } => write!(f, "{language}: no {table} tokens"),
            Self::DanglingReference {
                language,
                mode,
                component,
                field,
                path,
            } => write!(
                f,
                "{language} ({mode}): {component}.{field} refers to missing `{path}`"
            ),
            Self::AsymmetricModes {
                language,
                only_in_light,
                only_in_dark,
            } => {
                write!(f, "{language}: light and dark role keys differ")?;
                if !only_in_light.is_empty() {
                    write!(f, "; only in light: {}", only_in_light.join(", "))?;
                }
                if !only_in_dark.is_empty() {
                    write!(f, "; only in dark: {}", only_in_dark.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues concerning one language
    pub fn for_language<'a>(
        &'a self,
        language: &'a DesignLanguage,
    ) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.issues.iter().filter(move |issue| match issue {
            ValidationIssue::MissingVariant { language: l, .. }
            | ValidationIssue::DanglingReference { language: l, .. }
            | ValidationIssue::AsymmetricModes { language: l, .. } => l == language,
        })
    }
}

impl TokenRegistry {
    /// Check every installed language in both modes
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();

        for language in self.languages() {
            let components = match self.components(&language) {
                Ok(components) => Some(components),
                Err(_) => {
                    issues.push(ValidationIssue::MissingVariant {
                        language: language.clone(),
                        mode: None,
                        table: TokenTable::Components,
                    });
                    None
                }
            };

            let mut role_keys = Vec::with_capacity(Mode::ALL.len());
            for mode in Mode::ALL {
                let Ok(semantic) = self.semantic(&language, mode) else {
                    issues.push(ValidationIssue::MissingVariant {
                        language: language.clone(),
                        mode: Some(mode),
                        table: TokenTable::Semantic,
                    });
                    continue;
                };
                role_keys.push(semantic.role_keys());

                let Some(components) = components else {
                    continue;
                };
                for reference in components.semantic_refs() {
                    if semantic.lookup(reference.path).is_none() {
                        issues.push(ValidationIssue::DanglingReference {
                            language: language.clone(),
                            mode,
                            component: reference.component.to_string(),
                            field: reference.field.clone(),
                            path: reference.path.clone(),
                        });
                    }
                }
            }

            if let [light, dark] = role_keys.as_slice() {
                if light != dark {
                    issues.push(ValidationIssue::AsymmetricModes {
                        language: language.clone(),
                        only_in_light: light.difference(dark).cloned().collect(),
                        only_in_dark: dark.difference(light).cloned().collect(),
                    });
                }
            }
        }

        ValidationReport { issues }
    }
}
