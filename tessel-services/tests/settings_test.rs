use std::path::PathBuf;

use tessel_services::SettingsRegistry;
use tessel_theme::roles::MetricRole;
use tessel_theme::Palette;

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tessel-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_from_paths_applies_to_palette() {
    let path = temp_config(
        "settings",
        r#"
[field]
blink_rate_ms = 400
select_all_on_focus = false

[dock]
minimum_tab_width = 72.0

[extra]
answer = 42
"#,
    );

    let mut registry = SettingsRegistry::with_defaults();
    let results = smol::block_on(registry.load_paths([path.clone()]));
    std::fs::remove_file(&path).ok();

    assert!(results.iter().all(|r| r.is_ok()));
    assert!(!registry.select_all_on_focus());
    assert!(registry.config().other.contains_key("extra"));

    let mut palette = Palette::default();
    registry.apply(&mut palette);
    assert_eq!(palette.metric(MetricRole::BlinkRate), 400.0);
    assert_eq!(palette.metric(MetricRole::MinimumTabWidth), 72.0);
    assert_eq!(palette.metric(MetricRole::TabGap), 4.0);
}

#[test]
fn test_load_from_paths_reports_errors() {
    let bad = temp_config("bad-settings", "[field\nblink_rate_ms = 1");
    let missing = std::env::temp_dir().join("tessel-does-not-exist.toml");

    let mut registry = SettingsRegistry::with_defaults();
    let results = smol::block_on(registry.load_paths([bad.clone(), missing]));
    std::fs::remove_file(&bad).ok();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_err()));
    assert_eq!(registry.palette().metric(MetricRole::BlinkRate), 560.0);
}
