//! Locale-aware instruction resolution.

use std::collections::HashMap;

use minijinja::{Environment, UndefinedBehavior};

use vm_domain::error::{Error, Result};

use crate::bundle::BundleRegistry;

/// Fallback locale; every group is guaranteed to exist here.
pub const DEFAULT_LOCALE: &str = "en";

/// Resolves `(group, key)` pairs to rendered instruction text for the
/// active locale.
///
/// Reads over the registry are lock-free; `set_locale` takes `&mut self`,
/// so callers sharing one resolver across locale contexts need their own
/// instance (or external synchronization) — construct one per context.
pub struct InstructionResolver {
    registry: BundleRegistry,
    env: Environment<'static>,
    active_locale: String,
}

impl InstructionResolver {
    /// Build a resolver over `registry`, activating `locale` when given.
    /// Unknown locales fall back silently to [`DEFAULT_LOCALE`].
    pub fn new(registry: BundleRegistry, locale: Option<&str>) -> Self {
        let mut env = Environment::new();
        // A placeholder with no matching variable is a hard error, not
        // silently rendered as empty text.
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let mut resolver = Self {
            registry,
            env,
            active_locale: DEFAULT_LOCALE.to_owned(),
        };
        if let Some(locale) = locale {
            resolver.set_locale(locale);
        }
        resolver
    }

    /// Activate `locale` if any bundle exists for it; otherwise keep the
    /// default locale.  An unknown locale is not an error by design.
    pub fn set_locale(&mut self, locale: &str) {
        if !locale.is_empty() && self.registry.has_locale(locale) {
            self.active_locale = locale.to_owned();
        } else {
            tracing::debug!(locale, "unknown locale, falling back to default");
            self.active_locale = DEFAULT_LOCALE.to_owned();
        }
    }

    pub fn active_locale(&self) -> &str {
        &self.active_locale
    }

    /// Resolve and render one instruction template.
    ///
    /// Returns `Ok(None)` when `group` or `key` is empty, or when the group
    /// exists in neither the active nor the default locale.  A missing key
    /// inside a found bundle is a programming error and surfaces as
    /// [`Error::Template`], as does an unresolved placeholder.
    pub fn get(
        &self,
        group: &str,
        key: &str,
        vars: &HashMap<String, String>,
    ) -> Result<Option<String>> {
        if group.is_empty() || key.is_empty() {
            return Ok(None);
        }

        let Some(bundle) = self
            .registry
            .bundle(&self.active_locale, group)
            .or_else(|| self.registry.bundle(DEFAULT_LOCALE, group))
        else {
            return Ok(None);
        };

        let template = bundle.get(key).ok_or_else(|| {
            Error::Template(format!("bundle {group} has no template key {key}"))
        })?;

        let rendered = self
            .env
            .render_str(template, vars)
            .map_err(|e| Error::Template(format!("rendering {group}/{key}: {e}")))?;
        Ok(Some(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded_resolver(locale: Option<&str>) -> InstructionResolver {
        InstructionResolver::new(BundleRegistry::embedded().unwrap(), locale)
    }

    #[test]
    fn unsupported_locale_matches_default() {
        let default = embedded_resolver(None);
        let fallback = embedded_resolver(Some("xx"));
        assert_eq!(fallback.active_locale(), DEFAULT_LOCALE);

        let vars = HashMap::new();
        assert_eq!(
            default.get("chat", "INSTRUCTIONS", &vars).unwrap(),
            fallback.get("chat", "INSTRUCTIONS", &vars).unwrap(),
        );
    }

    #[test]
    fn empty_group_or_key_is_absent() {
        let resolver = embedded_resolver(None);
        let vars = HashMap::new();
        assert!(resolver.get("", "INSTRUCTIONS", &vars).unwrap().is_none());
        assert!(resolver.get("chat", "", &vars).unwrap().is_none());
    }

    #[test]
    fn unknown_group_is_absent() {
        let resolver = embedded_resolver(None);
        assert!(resolver
            .get("no_such_group", "INSTRUCTIONS", &HashMap::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn arabic_chat_differs_from_english() {
        let en = embedded_resolver(None);
        let ar = embedded_resolver(Some("ar"));
        assert_eq!(ar.active_locale(), "ar");

        let vars = HashMap::new();
        let en_text = en.get("chat", "INSTRUCTIONS", &vars).unwrap().unwrap();
        let ar_text = ar.get("chat", "INSTRUCTIONS", &vars).unwrap().unwrap();
        assert_ne!(en_text, ar_text);
    }

    #[test]
    fn group_missing_in_active_locale_falls_back() {
        // `root` ships only in English; the Arabic resolver still finds it.
        let ar = embedded_resolver(Some("ar"));
        let text = ar
            .get("root", "INSTRUCTIONS", &HashMap::new())
            .unwrap()
            .unwrap();
        assert!(text.contains("manager agent"));
    }

    #[test]
    fn set_locale_after_construction() {
        let mut resolver = embedded_resolver(None);
        resolver.set_locale("ar");
        assert_eq!(resolver.active_locale(), "ar");
        resolver.set_locale("zz");
        assert_eq!(resolver.active_locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn variables_substitute_into_placeholders() {
        let registry = BundleRegistry::from_sources([(
            "en",
            "greet",
            r#"INSTRUCTIONS = "Assist {{ user }} with their {{ topic }} notes.""#,
        )])
        .unwrap();
        let resolver = InstructionResolver::new(registry, None);

        let vars = HashMap::from([
            ("user".to_owned(), "alice".to_owned()),
            ("topic".to_owned(), "rust".to_owned()),
        ]);
        let text = resolver.get("greet", "INSTRUCTIONS", &vars).unwrap().unwrap();
        assert_eq!(text, "Assist alice with their rust notes.");
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let registry = BundleRegistry::from_sources([(
            "en",
            "greet",
            r#"INSTRUCTIONS = "Assist {{ user }}.""#,
        )])
        .unwrap();
        let resolver = InstructionResolver::new(registry, None);

        let err = resolver
            .get("greet", "INSTRUCTIONS", &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn missing_key_in_found_bundle_is_an_error() {
        let resolver = embedded_resolver(None);
        let err = resolver
            .get("chat", "NO_SUCH_KEY", &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
