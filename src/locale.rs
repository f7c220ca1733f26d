//! The locale registry: the closed set of languages the site is published in.
//!
//! A [`LocaleRegistry`] is built once from [`I18nConfig`](crate::config::I18nConfig)
//! and then passed by reference to everything that resolves or rewrites paths.
//! Exactly one locale is the default; it is served at the site root without a
//! path prefix, every other locale lives under `/<code>/`.

use crate::config::I18nConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LocaleError {
    #[error("locale set is empty")]
    Empty,
    #[error("duplicate locale code: {0}")]
    Duplicate(String),
    #[error("invalid locale code {0:?} (expected lowercase letters, optionally -region)")]
    InvalidCode(String),
    #[error("default locale {0:?} is not in the locale set")]
    UnknownDefault(String),
}

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    code: String,
    name: String,
    hreflang: String,
    direction: Direction,
}

impl Locale {
    /// Build a locale. An empty `hreflang` falls back to the code.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        hreflang: impl Into<String>,
        direction: Direction,
    ) -> Self {
        let code = code.into();
        let hreflang = hreflang.into();
        let hreflang = if hreflang.trim().is_empty() {
            code.clone()
        } else {
            hreflang
        };
        Self {
            code,
            name: name.into(),
            hreflang,
            direction,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Native display name, e.g. "Svenska".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hreflang(&self) -> &str {
        &self.hreflang
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}

/// The immutable set of supported locales.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
    #[serde(rename = "default")]
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry, checking the set is non-empty, codes are well formed
    /// and unique, and the default is one of them.
    pub fn new(locales: Vec<Locale>, default_code: &str) -> Result<Self, LocaleError> {
        if locales.is_empty() {
            return Err(LocaleError::Empty);
        }
        for (i, locale) in locales.iter().enumerate() {
            if !is_valid_code(&locale.code) {
                return Err(LocaleError::InvalidCode(locale.code.clone()));
            }
            if locales[..i].iter().any(|l| l.code == locale.code) {
                return Err(LocaleError::Duplicate(locale.code.clone()));
            }
        }
        let default_index = locales
            .iter()
            .position(|l| l.code == default_code)
            .ok_or_else(|| LocaleError::UnknownDefault(default_code.to_string()))?;
        Ok(Self {
            locales,
            default_index,
        })
    }

    pub fn from_config(config: &I18nConfig) -> Result<Self, LocaleError> {
        let locales = config
            .locales
            .iter()
            .map(|l| Locale::new(&l.code, &l.name, &l.hreflang, l.direction))
            .collect();
        Self::new(locales, &config.default_locale)
    }

    /// The ten-language set the site ships with, English as default.
    pub fn stock() -> Self {
        Self::from_config(&I18nConfig::default()).expect("stock locale set must be valid")
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn is_default(&self, code: &str) -> bool {
        self.default_locale().code == code
    }

    /// A registered locale that is rendered with a path prefix, i.e. any
    /// locale except the default.
    pub fn prefix_locale(&self, code: &str) -> Option<&Locale> {
        self.get(code).filter(|l| !self.is_default(&l.code))
    }

    /// Locales in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Unknown codes are treated as left-to-right.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.get(code).is_some_and(Locale::is_rtl)
    }

    /// Native name of a locale; the code itself when unknown.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map(Locale::name).unwrap_or(code)
    }

    /// Every locale except `current`, in registry order.
    pub fn others(&self, current: &str) -> Vec<&Locale> {
        self.locales.iter().filter(|l| l.code != current).collect()
    }
}

/// `xx` or `xx-yyyy`: lowercase ASCII language, optional alphanumeric region.
fn is_valid_code(code: &str) -> bool {
    let mut parts = code.splitn(2, '-');
    let lang = parts.next().unwrap_or_default();
    let lang_ok = (2..=8).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_lowercase());
    let region_ok = match parts.next() {
        None => true,
        Some(region) => {
            (1..=8).contains(&region.len())
                && region
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
    };
    lang_ok && region_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> LocaleRegistry {
        LocaleRegistry::new(
            vec![
                Locale::new("en", "English", "en-US", Direction::Ltr),
                Locale::new("sv", "Svenska", "sv-SE", Direction::Ltr),
                Locale::new("ar", "العربية", "ar-SA", Direction::Rtl),
            ],
            "en",
        )
        .unwrap()
    }

    #[test]
    fn stock_registry_shape() {
        let registry = LocaleRegistry::stock();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.default_locale().code(), "en");
        assert_eq!(
            registry.codes(),
            vec!["en", "sv", "de", "fr", "es", "it", "nl", "pl", "pt", "ar"]
        );
    }

    #[test]
    fn rtl_only_for_arabic() {
        let registry = LocaleRegistry::stock();
        assert!(registry.is_rtl("ar"));
        assert!(!registry.is_rtl("sv"));
        assert!(!registry.is_rtl("xx"));
    }

    #[test]
    fn display_names_are_native() {
        let registry = LocaleRegistry::stock();
        assert_eq!(registry.display_name("de"), "Deutsch");
        assert_eq!(registry.display_name("pt"), "Português");
        assert_eq!(registry.display_name("xx"), "xx");
    }

    #[test]
    fn prefix_locale_excludes_default() {
        let registry = three();
        assert!(registry.prefix_locale("en").is_none());
        assert_eq!(registry.prefix_locale("sv").map(Locale::code), Some("sv"));
        assert!(registry.prefix_locale("xx").is_none());
    }

    #[test]
    fn others_keeps_registry_order() {
        let registry = three();
        let others: Vec<&str> = registry.others("sv").iter().map(|l| l.code()).collect();
        assert_eq!(others, vec!["en", "ar"]);
    }

    #[test]
    fn hreflang_falls_back_to_code() {
        let locale = Locale::new("sv", "Svenska", "", Direction::Ltr);
        assert_eq!(locale.hreflang(), "sv");
    }

    #[test]
    fn empty_set_rejected() {
        assert_eq!(
            LocaleRegistry::new(vec![], "en").unwrap_err(),
            LocaleError::Empty
        );
    }

    #[test]
    fn duplicate_code_rejected() {
        let result = LocaleRegistry::new(
            vec![
                Locale::new("en", "English", "", Direction::Ltr),
                Locale::new("en", "English again", "", Direction::Ltr),
            ],
            "en",
        );
        assert_eq!(result.unwrap_err(), LocaleError::Duplicate("en".into()));
    }

    #[test]
    fn unknown_default_rejected() {
        let result = LocaleRegistry::new(
            vec![Locale::new("en", "English", "", Direction::Ltr)],
            "sv",
        );
        assert_eq!(result.unwrap_err(), LocaleError::UnknownDefault("sv".into()));
    }

    #[test]
    fn malformed_codes_rejected() {
        for bad in ["", "EN", "e", "en/", "en_US", "en-", "s v"] {
            let result =
                LocaleRegistry::new(vec![Locale::new(bad, "x", "", Direction::Ltr)], bad);
            assert!(
                matches!(result, Err(LocaleError::InvalidCode(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn region_codes_accepted() {
        let registry = LocaleRegistry::new(
            vec![
                Locale::new("en", "English", "", Direction::Ltr),
                Locale::new("pt-br", "Português (Brasil)", "pt-BR", Direction::Ltr),
            ],
            "en",
        )
        .unwrap();
        assert!(registry.contains("pt-br"));
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Rtl).unwrap(), "\"rtl\"");
        assert_eq!(Direction::Ltr.as_str(), "ltr");
    }
}
