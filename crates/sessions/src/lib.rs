//! Session management for VaultMate.
//!
//! Sessions are keyed by `(app_name, user_id, session_id)` and live in a
//! store behind the [`SessionStore`] trait.  [`SessionManager`] layers the
//! lifecycle semantics on top: collision-free id minting, idempotent
//! create-or-attach, and failure-tolerant bulk deletion.

pub mod id;
pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::{CreateOutcome, FileSessionStore, MemorySessionStore, SessionStore};
