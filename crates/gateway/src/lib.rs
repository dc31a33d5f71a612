//! VaultMate gateway: HTTP surface and CLI over the session lifecycle
//! manager and the instruction resolver.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod state;
