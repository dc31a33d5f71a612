//! Localized instruction templates for VaultMate agents.
//!
//! Instruction text lives in per-locale TOML bundles embedded into the
//! binary at compile time.  [`InstructionResolver`] maps a `(group, key)`
//! pair plus the active locale to rendered instruction text, falling back
//! deterministically to the default locale when a bundle is missing.

pub mod bundle;
pub mod resolver;

pub use bundle::BundleRegistry;
pub use resolver::{InstructionResolver, DEFAULT_LOCALE};
