use footingplan_designer::{ExportFormat, Side};
use footingplan_settings::{Config, SettingsError};

fn customized() -> Config {
    let mut config = Config::default();
    config.typography.font_family = Some("Liberation Sans".to_string());
    config.annotation.per_foot_side = Side::Right;
    config.annotation.stack_per_foot = false;
    config.page.template_id = "a3-landscape".to_string();
    config.page.notes = vec!["Bearing capacity 150 kPa".to_string()];
    config.export.format = ExportFormat::Dxf;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config = customized();
    config.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[page]"));
    assert!(text.contains("a3-landscape"));

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = customized();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[page]\nfill_ratio = 0.85\n\n[annotation]\ntier_spacing = 60.0\n",
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.page.fill_ratio, 0.85);
    assert_eq!(config.annotation.tier_spacing, 60.0);
    assert_eq!(config.annotation.first_tier_offset, 30.0);
    assert_eq!(config.typography, Config::default().typography);
    assert_eq!(config.layout_options().policy.tier_spacing, 60.0);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"page": {"fill_ratio": 3.0}}"#).unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));

    std::fs::write(&path, "{").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Json(_))
    ));
}

#[test]
fn test_load_or_default() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());
    assert!(matches!(
        Config::load_from_file(&missing),
        Err(SettingsError::LoadError(_))
    ));
}
