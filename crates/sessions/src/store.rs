//! Session store contract and the two shipped implementations.
//!
//! The store is the sole authority for the `(app_name, user_id, session_id)`
//! uniqueness invariant: `create` decides atomically (under the write lock)
//! whether a session is new or already existed, and reports that as a typed
//! [`CreateOutcome`] rather than an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use vm_domain::error::{Error, Result};
use vm_domain::session::{Event, Session};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Contract
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result of a `create` call.  A conflicting create is not a failure: the
/// existing session rides along so callers never need a second fetch.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    Created(Session),
    AlreadyExisted(Session),
}

/// Abstract persistence of sessions.
///
/// `get`/`list` report absence as values; `delete` fails with
/// [`Error::SessionNotFound`] so races between list and delete are
/// observable by the layer above.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<CreateOutcome>;

    async fn get(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>>;

    async fn list(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>>;

    async fn delete(&self, app_name: &str, user_id: &str, session_id: &str) -> Result<()>;

    /// Append one event to a session's log (called by the agent runner;
    /// the core never interprets event content).
    async fn append_event(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        event: Event,
    ) -> Result<Session>;
}

/// Composite map key.  Generated session ids are `[a-z0-9]` so the
/// separator cannot collide with them.
fn storage_key(app_name: &str, user_id: &str, session_id: &str) -> String {
    format!("{app_name}\u{1f}{user_id}\u{1f}{session_id}")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Shared map operations
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn map_create(
    sessions: &RwLock<HashMap<String, Session>>,
    app_name: &str,
    user_id: &str,
    session_id: &str,
) -> CreateOutcome {
    let mut sessions = sessions.write();
    let key = storage_key(app_name, user_id, session_id);
    if let Some(existing) = sessions.get(&key) {
        return CreateOutcome::AlreadyExisted(existing.clone());
    }
    let session = Session::new(app_name, user_id, session_id);
    sessions.insert(key, session.clone());
    CreateOutcome::Created(session)
}

fn map_get(
    sessions: &RwLock<HashMap<String, Session>>,
    app_name: &str,
    user_id: &str,
    session_id: &str,
) -> Option<Session> {
    sessions
        .read()
        .get(&storage_key(app_name, user_id, session_id))
        .cloned()
}

fn map_list(
    sessions: &RwLock<HashMap<String, Session>>,
    app_name: &str,
    user_id: &str,
) -> Vec<Session> {
    sessions
        .read()
        .values()
        .filter(|s| s.app_name == app_name && s.user_id == user_id)
        .cloned()
        .collect()
}

fn map_delete(
    sessions: &RwLock<HashMap<String, Session>>,
    app_name: &str,
    user_id: &str,
    session_id: &str,
) -> Result<()> {
    let removed = sessions
        .write()
        .remove(&storage_key(app_name, user_id, session_id));
    match removed {
        Some(_) => Ok(()),
        None => Err(Error::SessionNotFound {
            app_name: app_name.to_owned(),
            user_id: user_id.to_owned(),
            session_id: session_id.to_owned(),
        }),
    }
}

fn map_append_event(
    sessions: &RwLock<HashMap<String, Session>>,
    app_name: &str,
    user_id: &str,
    session_id: &str,
    event: Event,
) -> Result<Session> {
    let mut sessions = sessions.write();
    let session = sessions
        .get_mut(&storage_key(app_name, user_id, session_id))
        .ok_or_else(|| Error::SessionNotFound {
            app_name: app_name.to_owned(),
            user_id: user_id.to_owned(),
            session_id: session_id.to_owned(),
        })?;
    session.events.push(event);
    session.updated_at = Utc::now();
    Ok(session.clone())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// In-memory store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Purely in-memory store.  Reference implementation of the contract and
/// the store used by the lifecycle tests.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<CreateOutcome> {
        Ok(map_create(&self.sessions, app_name, user_id, session_id))
    }

    async fn get(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>> {
        Ok(map_get(&self.sessions, app_name, user_id, session_id))
    }

    async fn list(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>> {
        Ok(map_list(&self.sessions, app_name, user_id))
    }

    async fn delete(&self, app_name: &str, user_id: &str, session_id: &str) -> Result<()> {
        map_delete(&self.sessions, app_name, user_id, session_id)
    }

    async fn append_event(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        event: Event,
    ) -> Result<Session> {
        map_append_event(&self.sessions, app_name, user_id, session_id, event)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// File-backed store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Store persisted as `sessions.json` under the configured state path.
///
/// Mutations are written through immediately; `flush` exists for the
/// shutdown path so a clean exit never loses state.
pub struct FileSessionStore {
    sessions_path: PathBuf,
    sessions: RwLock<HashMap<String, Session>>,
}

impl FileSessionStore {
    /// Load or create the store at `state_path/sessions/sessions.json`.
    pub fn new(state_path: &Path) -> Result<Self> {
        let dir = state_path.join("sessions");
        std::fs::create_dir_all(&dir).map_err(Error::Io)?;

        let sessions_path = dir.join("sessions.json");
        let sessions = if sessions_path.exists() {
            let raw = std::fs::read_to_string(&sessions_path).map_err(Error::Io)?;
            serde_json::from_str(&raw).unwrap_or_default()
        } else {
            HashMap::new()
        };

        tracing::info!(
            sessions = sessions.len(),
            path = %sessions_path.display(),
            "session store loaded"
        );

        Ok(Self {
            sessions_path,
            sessions: RwLock::new(sessions),
        })
    }

    /// Persist the current session state to disk.
    pub fn flush(&self) -> Result<()> {
        let sessions = self.sessions.read();
        let json = serde_json::to_string_pretty(&*sessions)
            .map_err(|e| Error::Store(format!("serializing sessions: {e}")))?;
        std::fs::write(&self.sessions_path, json).map_err(Error::Io)?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn create(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<CreateOutcome> {
        let outcome = map_create(&self.sessions, app_name, user_id, session_id);
        if matches!(outcome, CreateOutcome::Created(_)) {
            self.flush()?;
        }
        Ok(outcome)
    }

    async fn get(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>> {
        Ok(map_get(&self.sessions, app_name, user_id, session_id))
    }

    async fn list(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>> {
        Ok(map_list(&self.sessions, app_name, user_id))
    }

    async fn delete(&self, app_name: &str, user_id: &str, session_id: &str) -> Result<()> {
        map_delete(&self.sessions, app_name, user_id, session_id)?;
        self.flush()
    }

    async fn append_event(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        event: Event,
    ) -> Result<Session> {
        let session = map_append_event(&self.sessions, app_name, user_id, session_id, event)?;
        self.flush()?;
        Ok(session)
    }
}
