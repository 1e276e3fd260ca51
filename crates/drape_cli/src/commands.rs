//! Subcommand implementations

use crate::config::DefaultsConfig;
use crate::Format;
use anyhow::{Context, Result};
use drape_theme::{DesignLanguage, Mode, Preset, ThemeOverrides, TokenRegistry, TypographyRole};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Design language and mode a command works on
#[derive(Debug, PartialEq)]
pub struct Selection {
    pub language: DesignLanguage,
    pub mode: Mode,
}

impl Selection {
    pub fn new(
        language: Option<String>,
        mode: Option<Mode>,
        defaults: &DefaultsConfig,
    ) -> Result<Self> {
        let language = language
            .or_else(|| defaults.language.clone())
            .context("No design language given and none configured in drape.toml [defaults]")?;
        Ok(Self {
            language: language.into(),
            mode: mode.unwrap_or(defaults.mode),
        })
    }
}

/// Install the presets (optionally) and every `*.toml` table under `dirs`
pub fn build_registry(builtin: bool, dirs: &[PathBuf]) -> Result<TokenRegistry> {
    let mut registry = TokenRegistry::new();
    if builtin {
        for preset in Preset::all() {
            preset
                .install(&mut registry)
                .with_context(|| format!("Failed to load built-in preset `{}`", preset.id()))?;
        }
    }
    for dir in dirs {
        for path in token_files(dir)? {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let language = registry
                .load_toml_str(&content)
                .with_context(|| format!("Failed to load token table {}", path.display()))?;
            debug!("installed `{}` from {}", language, path.display());
        }
    }
    Ok(registry)
}

/// `*.toml` files directly under `dir`, sorted by name
fn token_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read token directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    if files.is_empty() {
        warn!("no token tables found in {}", dir.display());
    }
    Ok(files)
}

pub fn list(registry: &TokenRegistry) -> Result<()> {
    let languages = registry.languages();
    if languages.is_empty() {
        info!("no design languages installed");
        return Ok(());
    }
    for language in languages {
        let modes: Vec<&str> = Mode::ALL
            .into_iter()
            .filter(|mode| registry.semantic(&language, *mode).is_ok())
            .map(Mode::as_str)
            .collect();
        let components = registry
            .components(&language)
            .map(|components| components.len())
            .unwrap_or(0);
        println!(
            "{:<16} {:<20} modes: {:<11} components: {}",
            language.as_str(),
            registry.display_name(&language),
            modes.join(","),
            components
        );
    }
    Ok(())
}

pub fn check(registry: &TokenRegistry) -> Result<()> {
    let report = registry.validate();
    if report.is_ok() {
        println!("{} design language(s) OK", registry.languages().len());
        return Ok(());
    }
    for issue in &report.issues {
        println!("error: {issue}");
    }
    anyhow::bail!("{} problem(s) found", report.issues.len())
}

pub fn resolve(
    registry: &TokenRegistry,
    selection: Selection,
    overrides: Option<&Path>,
    format: Format,
) -> Result<()> {
    let overrides = match overrides {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let overrides = ThemeOverrides::from_toml_str(&content, registry.primitives())
                .with_context(|| format!("Failed to parse overrides {}", path.display()))?;
            Some(overrides)
        }
        None => None,
    };

    let theme = registry.resolve(&selection.language, selection.mode, overrides.as_ref())?;
    let output = match format {
        Format::Json => serde_json::to_string_pretty(&theme).context("Failed to serialize theme")?,
        Format::Toml => toml::to_string_pretty(&theme).context("Failed to serialize theme")?,
    };
    println!("{output}");
    Ok(())
}

pub fn css(registry: &TokenRegistry, selection: Selection) -> Result<()> {
    let theme = registry.resolve(&selection.language, selection.mode, None)?;
    println!("{}", css_block(&theme.to_css_variable_map()));
    Ok(())
}

fn css_block<'a>(vars: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
    let mut out = String::from(":root {\n");
    for (name, value) in vars {
        out.push_str(&format!("  --{name}: {value};\n"));
    }
    out.push('}');
    out
}

pub fn text_styles(registry: &TokenRegistry, selection: Selection) -> Result<()> {
    let theme = registry.resolve(&selection.language, selection.mode, None)?;
    println!(
        "{:<12} {:<18} {:>6} {:>6} {:>8} {:>8}",
        "role", "family", "size", "weight", "line", "tracking"
    );
    for role in TypographyRole::ALL {
        let style = theme.text_style(role);
        println!(
            "{:<12} {:<18} {:>6} {:>6} {:>8.2} {:>8}",
            role.key(),
            style.font_family,
            style.font_size,
            style.font_weight,
            style.line_height,
            style.letter_spacing
        );
    }
    Ok(())
}
