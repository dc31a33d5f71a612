//! Embedded locale bundles.
//!
//! A bundle is the set of named instruction templates for one `(locale,
//! group)` pair.  Bundles are TOML files under `locales/<locale>/` compiled
//! into the binary with `include_str!` and parsed once at startup into a
//! static registry — no dynamic loading keyed on locale strings at runtime.

use std::collections::HashMap;

use vm_domain::error::{Error, Result};

/// Template sources shipped with the crate.  Adding a locale or group means
/// adding a TOML file and one row here.
const EMBEDDED: &[(&str, &str, &str)] = &[
    // English (default locale)
    ("en", "root", include_str!("../locales/en/root.toml")),
    ("en", "chat", include_str!("../locales/en/chat.toml")),
    (
        "en",
        "manage_conversation",
        include_str!("../locales/en/manage_conversation.toml"),
    ),
    ("en", "take_notes", include_str!("../locales/en/take_notes.toml")),
    ("en", "summarize", include_str!("../locales/en/summarize.toml")),
    ("en", "clean", include_str!("../locales/en/clean.toml")),
    ("en", "markdown", include_str!("../locales/en/markdown.toml")),
    (
        "en",
        "extract_conversation",
        include_str!("../locales/en/extract_conversation.toml"),
    ),
    (
        "en",
        "get_transcript",
        include_str!("../locales/en/get_transcript.toml"),
    ),
    (
        "en",
        "interact_obsidian",
        include_str!("../locales/en/interact_obsidian.toml"),
    ),
    // Arabic (partial coverage; anything missing falls back to English)
    ("ar", "chat", include_str!("../locales/ar/chat.toml")),
    ("ar", "markdown", include_str!("../locales/ar/markdown.toml")),
    (
        "ar",
        "extract_conversation",
        include_str!("../locales/ar/extract_conversation.toml"),
    ),
];

/// One parsed bundle: template key → template source.
pub type Bundle = HashMap<String, String>;

/// Registry of all loaded bundles, keyed by locale then group.
#[derive(Debug)]
pub struct BundleRegistry {
    locales: HashMap<String, HashMap<String, Bundle>>,
}

impl BundleRegistry {
    /// Parse the embedded bundles.  A malformed bundle is a build problem,
    /// not a runtime condition, so this fails loudly at startup.
    pub fn embedded() -> Result<Self> {
        Self::from_sources(EMBEDDED.iter().copied())
    }

    /// Build a registry from explicit `(locale, group, toml_source)`
    /// triples.  Used by the embedded set and by tests.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    ) -> Result<Self> {
        let mut locales: HashMap<String, HashMap<String, Bundle>> = HashMap::new();
        let mut bundle_count = 0usize;

        for (locale, group, source) in sources {
            let bundle: Bundle = toml::from_str(source).map_err(|e| {
                Error::Template(format!("parsing bundle {locale}/{group}: {e}"))
            })?;
            locales
                .entry(locale.to_owned())
                .or_default()
                .insert(group.to_owned(), bundle);
            bundle_count += 1;
        }

        tracing::debug!(
            locales = locales.len(),
            bundles = bundle_count,
            "instruction bundles loaded"
        );
        Ok(Self { locales })
    }

    /// Whether any bundle exists for this locale.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Look up the bundle for `(locale, group)`.
    pub fn bundle(&self, locale: &str, group: &str) -> Option<&Bundle> {
        self.locales.get(locale)?.get(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bundles_parse() {
        let registry = BundleRegistry::embedded().unwrap();
        assert!(registry.has_locale("en"));
        assert!(registry.has_locale("ar"));
        assert!(!registry.has_locale("xx"));
    }

    #[test]
    fn every_embedded_bundle_has_instructions_key() {
        let registry = BundleRegistry::embedded().unwrap();
        for &(locale, group, _) in EMBEDDED {
            let bundle = registry.bundle(locale, group).unwrap();
            assert!(
                bundle.contains_key("INSTRUCTIONS"),
                "{locale}/{group} is missing INSTRUCTIONS"
            );
        }
    }

    #[test]
    fn malformed_bundle_is_rejected() {
        let err = BundleRegistry::from_sources([("en", "bad", "not toml ===")]).unwrap_err();
        assert!(err.to_string().contains("en/bad"));
    }
}
