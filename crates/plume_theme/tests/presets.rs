use plume_theme::{
    ColorScheme, ColorToken, RadiusToken, ScaledTheme, SizeToken, SpacingToken, ThemeConfig,
    ThemePreset,
};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["compact", "high-contrast", "plume"]);
}

#[test]
fn bundles_have_distinct_light_and_dark_backgrounds() {
    for preset in ThemePreset::all() {
        let bundle = preset.bundle();
        let light = bundle.for_scheme(ColorScheme::Light);
        let dark = bundle.for_scheme(ColorScheme::Dark);

        assert_ne!(
            light.colors().get(ColorToken::Background),
            dark.colors().get(ColorToken::Background),
            "Preset {:?} should have distinct light/dark backgrounds",
            preset
        );
        assert_eq!(light.color_scheme(), ColorScheme::Light);
        assert_eq!(dark.color_scheme(), ColorScheme::Dark);
    }
}

#[test]
fn compact_preset_shrinks_controls_but_keeps_radii() {
    let plume = ThemePreset::Plume.bundle().for_scheme(ColorScheme::Dark);
    let compact = ThemePreset::Compact.bundle().for_scheme(ColorScheme::Dark);

    assert!(compact.sizes().control_height < plume.sizes().control_height);
    assert_eq!(
        compact.radii().get(RadiusToken::Md),
        plume.radii().get(RadiusToken::Md)
    );
}

#[test]
fn scaled_theme_from_config_file_contents() {
    let config = ThemeConfig::from_toml_str(
        r#"
        preset = "compact"
        scale_factor = 1.5

        [radii]
        md = 4
        "#,
    )
    .expect("config should parse");
    let theme: ScaledTheme = config.build().expect("config should build");

    assert_eq!(theme.size(SizeToken::ControlHeight), 33.0);
    assert_eq!(theme.spacing(SpacingToken::Space4), 18.0);
    assert_eq!(theme.radius(RadiusToken::Md), 6.0);
}
