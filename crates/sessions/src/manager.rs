//! Session lifecycle manager.
//!
//! Stateless orchestration over a [`SessionStore`]: every operation
//! round-trips to the store, so concurrent calls only contend inside the
//! store itself.  Creation is idempotent ("create-or-attach"): a conflicting
//! create returns the existing session instead of failing.

use std::sync::Arc;

use vm_domain::config::Config;
use vm_domain::error::{Error, Result};
use vm_domain::session::Session;

use crate::id;
use crate::store::{CreateOutcome, SessionStore};

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    default_app: String,
    id_length: usize,
    max_id_attempts: u32,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: &Config) -> Self {
        Self {
            store,
            default_app: config.app.name.clone(),
            id_length: config.sessions.id_length,
            max_id_attempts: config.sessions.max_id_attempts,
        }
    }

    /// The configured application name, applied whenever a caller omits one.
    fn app<'a>(&'a self, app_name: Option<&'a str>) -> &'a str {
        app_name.unwrap_or(&self.default_app)
    }

    /// Create a session, or attach to the existing one when the id is
    /// already taken.
    ///
    /// With `session_id` omitted, ids are minted at random and probed
    /// against the store until an unused one is found, capped at
    /// `max_id_attempts` so a misbehaving store cannot spin forever.
    pub async fn create_session(
        &self,
        app_name: Option<&str>,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<Session> {
        let app_name = self.app(app_name);

        let session_id = match session_id {
            Some(id) => id.to_owned(),
            None => self.mint_session_id(app_name, user_id).await?,
        };

        match self.store.create(app_name, user_id, &session_id).await? {
            CreateOutcome::Created(session) => {
                tracing::info!(user_id, session_id = %session.id, "session created");
                Ok(session)
            }
            CreateOutcome::AlreadyExisted(session) => {
                tracing::info!(
                    user_id,
                    session_id = %session.id,
                    "session already exists, attaching"
                );
                Ok(session)
            }
        }
    }

    /// Look up a session.  Absence is a value, not an error.
    pub async fn get_session(
        &self,
        app_name: Option<&str>,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>> {
        self.store.get(self.app(app_name), user_id, session_id).await
    }

    /// All sessions for one user, in store order.  Empty when the user has
    /// none.
    pub async fn list_sessions(
        &self,
        app_name: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<Session>> {
        self.store.list(self.app(app_name), user_id).await
    }

    /// Delete one session.  Returns `false` without touching the store's
    /// delete path when the session does not exist.
    pub async fn delete_session(
        &self,
        app_name: Option<&str>,
        user_id: &str,
        session_id: &str,
    ) -> Result<bool> {
        let app_name = self.app(app_name);

        if self.store.get(app_name, user_id, session_id).await?.is_none() {
            tracing::warn!(user_id, session_id, "session does not exist, cannot delete");
            return Ok(false);
        }

        match self.store.delete(app_name, user_id, session_id).await {
            Ok(()) => Ok(true),
            // Vanished between the existence check and the delete.
            Err(Error::SessionNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Delete every session the user has.
    ///
    /// Returns `(false, 0)` when there is nothing to delete, otherwise
    /// `(true, n)` where `n` counts the sessions *attempted* (a session
    /// vanishing mid-loop is tolerated and still counted).
    pub async fn delete_all_sessions(
        &self,
        app_name: Option<&str>,
        user_id: &str,
    ) -> Result<(bool, usize)> {
        let app_name = self.app(app_name);

        let sessions = self.store.list(app_name, user_id).await?;
        if sessions.is_empty() {
            tracing::warn!(user_id, "no sessions found, nothing to delete");
            return Ok((false, 0));
        }

        let total = sessions.len();
        for session in sessions {
            self.delete_session(Some(app_name), user_id, &session.id)
                .await?;
        }
        tracing::info!(user_id, deleted = total, "deleted all sessions for user");
        Ok((true, total))
    }

    /// Mint an id no live session of this user holds yet.
    async fn mint_session_id(&self, app_name: &str, user_id: &str) -> Result<String> {
        for _ in 0..self.max_id_attempts {
            let candidate = id::generate(self.id_length)?;
            if self
                .store
                .get(app_name, user_id, &candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }
        Err(Error::IdSpaceExhausted {
            attempts: self.max_id_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    fn manager_with_store() -> (SessionManager, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let manager = SessionManager::new(store.clone(), &Config::default());
        (manager, store)
    }

    #[tokio::test]
    async fn create_with_generated_id() {
        let (manager, _) = manager_with_store();
        let session = manager.create_session(None, "u1", None).await.unwrap();
        assert_eq!(session.id.len(), 12);
        assert_eq!(session.app_name, "vaultmate");
        assert_eq!(session.user_id, "u1");
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let (manager, store) = manager_with_store();
        let first = manager.create_session(None, "u1", Some("S1")).await.unwrap();
        let second = manager.create_session(None, "u1", Some("S1")).await.unwrap();
        assert_eq!(first.id, "S1");
        assert_eq!(second.id, "S1");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (manager, _) = manager_with_store();
        let session = manager.get_session(None, "u1", "nope").await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let (manager, _) = manager_with_store();
        manager
            .create_session(Some("notes"), "u1", Some("abc"))
            .await
            .unwrap();
        let fetched = manager
            .get_session(Some("notes"), "u1", "abc")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.app_name, "notes");
        assert_eq!(fetched.user_id, "u1");
        assert_eq!(fetched.id, "abc");
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let (manager, store) = manager_with_store();
        let deleted = manager.delete_session(None, "u1", "nope").await.unwrap();
        assert!(!deleted);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_existing_returns_true() {
        let (manager, store) = manager_with_store();
        manager.create_session(None, "u1", Some("s1")).await.unwrap();
        let deleted = manager.delete_session(None, "u1", "s1").await.unwrap();
        assert!(deleted);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_all_with_no_sessions() {
        let (manager, _) = manager_with_store();
        let (ok, count) = manager.delete_all_sessions(None, "u1").await.unwrap();
        assert!(!ok);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn delete_all_reports_count_and_empties_store() {
        let (manager, _) = manager_with_store();
        for _ in 0..3 {
            manager.create_session(None, "u1", None).await.unwrap();
        }
        let (ok, count) = manager.delete_all_sessions(None, "u1").await.unwrap();
        assert!(ok);
        assert_eq!(count, 3);
        assert!(manager.list_sessions(None, "u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_all_leaves_other_users_alone() {
        let (manager, _) = manager_with_store();
        manager.create_session(None, "u1", Some("a")).await.unwrap();
        manager.create_session(None, "u2", Some("b")).await.unwrap();

        manager.delete_all_sessions(None, "u1").await.unwrap();
        let remaining = manager.list_sessions(None, "u2").await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn recreate_after_delete_is_fresh() {
        let (manager, _) = manager_with_store();
        let first = manager.create_session(None, "u1", Some("s1")).await.unwrap();
        manager.delete_session(None, "u1", "s1").await.unwrap();
        let second = manager.create_session(None, "u1", Some("s1")).await.unwrap();
        assert_eq!(second.id, "s1");
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn minting_fails_once_id_space_is_exhausted() {
        let store = Arc::new(MemorySessionStore::new());
        let mut config = Config::default();
        config.sessions.id_length = 1;
        let manager = SessionManager::new(store, &config);

        // Occupy the entire one-character id space for this user.
        for c in "abcdefghijklmnopqrstuvwxyz0123456789".chars() {
            manager
                .create_session(None, "u1", Some(&c.to_string()))
                .await
                .unwrap();
        }

        let err = manager.create_session(None, "u1", None).await.unwrap_err();
        assert!(matches!(err, Error::IdSpaceExhausted { attempts: 100 }));
    }

    #[tokio::test]
    async fn caller_app_name_overrides_default() {
        let (manager, _) = manager_with_store();
        manager
            .create_session(Some("other-app"), "u1", Some("s1"))
            .await
            .unwrap();
        // Default app namespace does not see it.
        assert!(manager.get_session(None, "u1", "s1").await.unwrap().is_none());
        assert!(manager
            .get_session(Some("other-app"), "u1", "s1")
            .await
            .unwrap()
            .is_some());
    }
}
