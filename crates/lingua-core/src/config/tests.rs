use super::*;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.lingua.log_level, "info");
    assert_eq!(cfg.locale.base, Locale::En);
    assert_eq!(cfg.locale.default, Locale::En);
    assert!(cfg.locale.catalog_dir.is_none());
    assert_eq!(cfg.source.kind, SourceKind::Local);
    assert_eq!(cfg.tracking.mode, TrackingMode::Off);
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
        [lingua]
        log_level = "debug"

        [locale]
        base = "en"
        default = "bg"
        catalog_dir = "./locales"

        [source]
        kind = "server"

        [tracking]
        mode = "count"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.lingua.log_level, "debug");
    assert_eq!(cfg.locale.default, Locale::Bg);
    assert_eq!(cfg.locale.catalog_dir.as_deref(), Some("./locales"));
    assert_eq!(cfg.source.kind, SourceKind::Server);
    assert_eq!(cfg.tracking.mode, TrackingMode::Count);
}

#[test]
fn test_config_partial_section_keeps_defaults() {
    let toml_str = r#"
        [locale]
        default = "bg"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.locale.base, Locale::En);
    assert_eq!(cfg.locale.default, Locale::Bg);
    assert_eq!(cfg.lingua.log_level, "info");
}

#[test]
fn test_config_rejects_unknown_locale() {
    let toml_str = r#"
        [locale]
        default = "fr"
    "#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__lingua_test__/lingua.toml").unwrap();
    assert_eq!(cfg.source.kind, SourceKind::Local);
}

#[test]
fn test_load_from_file_and_parse_error() {
    let tmp = std::env::temp_dir().join("__lingua_test_config_load__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();

    let good = tmp.join("good.toml");
    std::fs::write(&good, "[tracking]\nmode = \"log\"\n").unwrap();
    let cfg = load(good.to_str().unwrap()).unwrap();
    assert_eq!(cfg.tracking.mode, TrackingMode::Log);

    let bad = tmp.join("bad.toml");
    std::fs::write(&bad, "[tracking\nmode = ").unwrap();
    let err = load(bad.to_str().unwrap()).unwrap_err();
    assert!(
        matches!(err, LinguaError::Config(_)),
        "parse failure should be a config error, got {err}"
    );

    let _ = std::fs::remove_dir_all(&tmp);
}
