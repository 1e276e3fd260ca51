use drape_theme::{
    builtin_registry, ComponentValue, Mode, Preset, ThemeError, TokenRegistry, TypographyRole,
};
use pretty_assertions::assert_eq;

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = Preset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["classicMetal", "holo"]);
}

#[test]
fn builtin_languages_pass_validation() {
    let registry = builtin_registry().unwrap();
    let report = registry.validate();
    assert!(report.is_ok(), "{:#?}", report.issues);
}

#[test]
fn every_reference_resolves_in_both_modes() {
    let registry = builtin_registry().unwrap();
    for language in registry.languages() {
        let components = registry.components(&language).unwrap();
        assert!(!components.semantic_refs().is_empty());

        for mode in Mode::ALL {
            let theme = registry
                .resolve(&language, mode, None)
                .unwrap_or_else(|err| panic!("{language} ({mode}): {err}"));

            for reference in components.semantic_refs() {
                let resolved = theme
                    .component(reference.component)
                    .and_then(|style| style.get(&reference.field.to_string()))
                    .cloned();
                let expected = theme.semantic().lookup(reference.path);
                assert_eq!(resolved, expected, "{language} {}.{}", reference.component, reference.field);
            }
        }
    }
}

#[test]
fn resolving_twice_gives_equal_themes() {
    let registry = builtin_registry().unwrap();
    for language in registry.languages() {
        for mode in Mode::ALL {
            assert_eq!(
                registry.resolve(&language, mode, None).unwrap(),
                registry.resolve(&language, mode, None).unwrap()
            );
        }
    }
}

#[test]
fn light_and_dark_define_the_same_role_keys() {
    let registry = builtin_registry().unwrap();
    for language in registry.languages() {
        let light = registry.semantic(&language, Mode::Light).unwrap();
        let dark = registry.semantic(&language, Mode::Dark).unwrap();
        assert_eq!(light.role_keys(), dark.role_keys(), "{language}");
        assert_ne!(
            light.color("surface.elevated"),
            dark.color("surface.elevated"),
            "{language} should have distinct light/dark surfaces"
        );
    }
}

#[test]
fn shared_tables_are_merged_into_each_mode() {
    let registry = builtin_registry().unwrap();
    let holo = Preset::Holo.language();
    for mode in Mode::ALL {
        let theme = registry.resolve(&holo, mode, None).unwrap();
        assert_eq!(theme.semantic().spacing("layout.gutter"), Some(24.0));
        let h1 = theme.text_style(TypographyRole::H1);
        assert_eq!(h1.font_size, 40.0);
        assert!((h1.line_height - 48.0).abs() < 1e-9);
    }
}

#[test]
fn transparent_component_values_stay_literal() {
    let registry = builtin_registry().unwrap();
    let holo = Preset::Holo.language();
    let input = registry.components(&holo).unwrap().get("input").unwrap();
    assert!(matches!(
        input.get("background"),
        Some(drape_theme::TokenNode::Leaf(ComponentValue::Literal(_)))
    ));
}

#[test]
fn unknown_language_is_rejected() {
    let registry = builtin_registry().unwrap();
    let err = registry
        .resolve(&"doesNotExist".into(), Mode::Light, None)
        .unwrap_err();
    assert!(matches!(err, ThemeError::MissingThemeVariant { .. }));
}

#[test]
fn custom_primitives_change_primitive_steps() {
    let mut primitives = drape_theme::PrimitiveTokens::default();
    primitives.radii.sm = 2.0;
    let mut registry = TokenRegistry::with_primitives(primitives);
    Preset::ClassicMetal.install(&mut registry).unwrap();

    let theme = registry
        .resolve(&Preset::ClassicMetal.language(), Mode::Light, None)
        .unwrap();
    assert_eq!(theme.component("button").unwrap().number("borderRadius"), Some(2.0));
    assert_eq!(theme.primitive().radii.sm, 2.0);
}
