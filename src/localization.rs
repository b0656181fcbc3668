//! Localized message lookup
//!
//! Catalogs are embedded TOML files keyed by message id.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

/// Placeholder printed by a query when no vocabulary is configured
pub const MISSING_TABLE: &str = "missing-table";

pub const DEFAULT_LANGUAGE: &str = "en-US";

const CATALOGS: &[(&str, &str)] = &[
    ("en-US", include_str!("locales/en-US.toml")),
    ("fr-FR", include_str!("locales/fr-FR.toml")),
];

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Failed to parse message catalog {language}: {source}")]
    Parse {
        language: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A message catalog for one language
#[derive(Debug, Clone)]
pub struct Messages {
    language: String,
    table: HashMap<String, String>,
}

impl Messages {
    /// Load the catalog for `language`, falling back to the default language
    pub fn load(language: &str) -> Result<Self, LocaleError> {
        let (language, source) = match CATALOGS.iter().find(|(lang, _)| lang.eq_ignore_ascii_case(language)) {
            Some(&(lang, source)) => (lang, source),
            None => {
                warn!(language, fallback = DEFAULT_LANGUAGE, "no message catalog for language");
                Self::default_catalog()
            }
        };
        let table = toml::from_str(source).map_err(|source| LocaleError::Parse {
            language: language.to_string(),
            source,
        })?;
        Ok(Self {
            language: language.to_string(),
            table,
        })
    }

    fn default_catalog() -> (&'static str, &'static str) {
        CATALOGS[0]
    }

    /// Languages with an embedded catalog
    pub fn languages() -> impl Iterator<Item = &'static str> {
        CATALOGS.iter().map(|(lang, _)| *lang)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Message text for `key`, or the key itself if the catalog lacks it
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl Default for Messages {
    fn default() -> Self {
        let (language, _) = Self::default_catalog();
        Self::load(language).unwrap_or_else(|_| Self {
            language: language.to_string(),
            table: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_parses_and_has_missing_table() {
        for lang in Messages::languages() {
            let messages = Messages::load(lang).unwrap();
            assert_ne!(messages.get(MISSING_TABLE), MISSING_TABLE, "{lang}");
        }
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let messages = Messages::load("xx-XX").unwrap();
        assert_eq!(messages.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_language_match_is_case_insensitive() {
        assert_eq!(Messages::load("fr-fr").unwrap().language(), "fr-FR");
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(Messages::default().get("no-such-key"), "no-such-key");
    }
}
