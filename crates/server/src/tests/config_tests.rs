use super::{apply_env_overrides, apply_file_settings, Settings};

use std::{collections::HashMap, path::PathBuf};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_bind_locally_without_advisor_key() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.gemini_model, "gemini-2.5-flash");
    assert!(settings.gemini_api_key.is_none());
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    let file_cfg: HashMap<String, String> = toml::from_str(
        r#"
bind_addr = "0.0.0.0:8080"
chart_dir = "/srv/charts"
gemini_model = "gemini-test"
"#,
    )
    .expect("toml");

    apply_file_settings(&mut settings, &file_cfg);
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.chart_dir, PathBuf::from("/srv/charts"));
    assert_eq!(settings.gemini_model, "gemini-test");
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:6000"),
            ("APP__BIND_ADDR", "127.0.0.1:7000"),
            ("CHART_DIR", "/tmp/a"),
            ("APP__CHART_DIR", "/tmp/b"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7000");
    assert_eq!(settings.chart_dir, PathBuf::from("/tmp/b"));
}

#[test]
fn blank_api_key_leaves_advisor_disabled() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env_from(&[("GEMINI_API_KEY", "  ")]));
    assert!(settings.gemini_api_key.is_none());

    apply_env_overrides(&mut settings, env_from(&[("GEMINI_API_KEY", "abc")]));
    assert_eq!(settings.gemini_api_key.as_deref(), Some("abc"));
}
