//! Shared types for all VaultMate crates: configuration, errors, and the
//! session data model.

pub mod config;
pub mod error;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{Event, Session};
