use vm_domain::config::Config;

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8310);
}

#[test]
fn explicit_zero_host_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 8310
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn default_app_name_applied() {
    let config = Config::default();
    assert_eq!(config.app.name, "vaultmate");
}

#[test]
fn default_session_id_knobs() {
    let config = Config::default();
    assert_eq!(config.sessions.id_length, 12);
    assert_eq!(config.sessions.max_id_attempts, 100);
}

#[test]
fn default_locale_is_english() {
    let config = Config::default();
    assert_eq!(config.templates.locale, "en");
}

#[test]
fn partial_config_keeps_other_defaults() {
    let toml_str = r#"
[app]
name = "notes-assistant"

[templates]
locale = "ar"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.app.name, "notes-assistant");
    assert_eq!(config.templates.locale, "ar");
    assert_eq!(config.sessions.id_length, 12);
}
