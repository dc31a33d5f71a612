use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Process-wide configuration, loaded once at startup and passed by
/// reference into every subsystem constructor.  There is no ambient
/// global lookup anywhere in the codebase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

impl Config {
    /// Sanity-check the loaded configuration.  Returns human-readable
    /// issue descriptions; empty means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.app.name.is_empty() {
            issues.push("app.name must not be empty".to_owned());
        }
        if self.sessions.id_length == 0 {
            issues.push("sessions.id_length must be a positive integer".to_owned());
        }
        if self.sessions.max_id_attempts == 0 {
            issues.push("sessions.max_id_attempts must be a positive integer".to_owned());
        }
        if self.templates.locale.is_empty() {
            issues.push("templates.locale must not be empty".to_owned());
        }
        issues
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Application identity
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default application name applied whenever a caller omits one.
    #[serde(default = "d_app_name")]
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { name: d_app_name() }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Server
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "d_8310")]
    pub port: u16,
    #[serde(default = "d_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8310,
            host: "127.0.0.1".into(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Directory holding `sessions.json` for the file-backed store.
    #[serde(default = "d_state_path")]
    pub state_path: PathBuf,

    /// Length of generated session ids (lowercase alphanumeric).
    #[serde(default = "d_12")]
    pub id_length: usize,

    /// Cap on the collision-avoidance loop when minting a fresh id.
    #[serde(default = "d_100")]
    pub max_id_attempts: u32,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            state_path: d_state_path(),
            id_length: 12,
            max_id_attempts: 100,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Instruction templates
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Active locale for instruction resolution.  Unknown locales fall
    /// back silently to the default locale at resolver construction.
    #[serde(default = "d_locale")]
    pub locale: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self { locale: d_locale() }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Default value helpers (serde)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn d_app_name() -> String {
    "vaultmate".into()
}
fn d_8310() -> u16 {
    8310
}
fn d_host() -> String {
    "127.0.0.1".into()
}
fn d_state_path() -> PathBuf {
    PathBuf::from("./data/state")
}
fn d_12() -> usize {
    12
}
fn d_100() -> u32 {
    100
}
fn d_locale() -> String {
    "en".into()
}
