/// Shared error type used across all VaultMate crates.
///
/// "Not found" and "nothing to delete" are *values* in this design
/// (`Option`, `bool`, empty `Vec`), never errors — the variants below cover
/// genuine failures only.  `SessionNotFound` is the one exception: it is the
/// store-level contract for deleting an absent session, and the session
/// manager converts it back into a value before it reaches any caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The collision-avoidance loop gave up minting a fresh session id.
    #[error("no unused session id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    /// Store-level delete of a session that does not exist.
    #[error("session not found: app={app_name} user={user_id} id={session_id}")]
    SessionNotFound {
        app_name: String,
        user_id: String,
        session_id: String,
    },

    /// Backing store unreachable or in an inconsistent state.
    #[error("store: {0}")]
    Store(String),

    #[error("template: {0}")]
    Template(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
