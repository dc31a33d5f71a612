use std::sync::Arc;

use vm_domain::config::Config;
use vm_sessions::{FileSessionStore, SessionManager};
use vm_templates::InstructionResolver;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Session lifecycle manager over the file-backed store.
    pub sessions: Arc<SessionManager>,
    /// Handle kept so the shutdown path can flush the store.
    pub store: Arc<FileSessionStore>,
    /// Instruction resolver for the configured locale.  Immutable after
    /// startup; per-request locale switching is deliberately not exposed.
    pub templates: Arc<InstructionResolver>,
}
