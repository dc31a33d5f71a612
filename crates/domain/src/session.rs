//! Session data model.
//!
//! A session is a persistent conversational context keyed by
//! `(app_name, user_id, id)` with an append-only event log.  The store
//! exclusively owns persisted session state; nothing above it caches
//! sessions across calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One turn of conversation appended by the external agent runner.
/// The core never interprets event content, it only appends and counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Author label, e.g. `"user"` or an agent name.
    pub author: String,
    #[serde(default)]
    pub text: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(author: impl Into<String>, text: Option<String>) -> Self {
        Self {
            author: author.into(),
            text,
            timestamp: Utc::now(),
        }
    }
}

/// A single conversational session.
///
/// Invariant: the `(app_name, user_id, id)` triple is unique among live
/// sessions in a store — the store's `create` is the sole authority
/// enforcing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub app_name: String,
    pub user_id: String,
    pub id: String,
    /// Append-only, insertion order significant.
    #[serde(default)]
    pub events: Vec<Event>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            id: id.into(),
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
