//! AppState construction shared by `serve` and any future CLI commands
//! that need the full runtime without an HTTP listener.

use std::sync::Arc;

use anyhow::Context;

use vm_domain::config::Config;
use vm_sessions::{FileSessionStore, SessionManager};
use vm_templates::{BundleRegistry, InstructionResolver};

use crate::state::AppState;

/// Initialize every subsystem and return a fully-wired [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Session store & lifecycle manager ───────────────────────────
    let store = Arc::new(
        FileSessionStore::new(&config.sessions.state_path)
            .context("initializing session store")?,
    );
    let sessions = Arc::new(SessionManager::new(store.clone(), &config));

    // ── Instruction templates ────────────────────────────────────────
    let registry = BundleRegistry::embedded().context("loading instruction bundles")?;
    let templates = Arc::new(InstructionResolver::new(
        registry,
        Some(config.templates.locale.as_str()),
    ));
    tracing::info!(
        locale = templates.active_locale(),
        "instruction resolver ready"
    );

    Ok(AppState {
        config,
        sessions,
        store,
        templates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_state_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.sessions.state_path = dir.path().to_path_buf();
        config.templates.locale = "xx".into();

        let state = build_app_state(Arc::new(config)).unwrap();
        // Unknown locale fell back silently to the default.
        assert_eq!(state.templates.active_locale(), "en");
    }
}
