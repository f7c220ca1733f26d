//! UI translation bundles.
//!
//! One JSON file per locale in the i18n directory (`i18n/en.json`,
//! `i18n/sv.json`, ...). Nested objects are flattened to dotted keys:
//!
//! ```json
//! { "nav": { "home": "Hem", "science": "Vetenskap" } }
//! ```
//!
//! becomes `nav.home` and `nav.science`. Bundles are loaded eagerly, once,
//! and every registered locale must have one. Lookups fall back from the
//! requested locale to the default locale and finally to the key itself, so
//! a missing translation degrades to English rather than failing the build.

use crate::locale::LocaleRegistry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no translation bundle for locale {code:?} (expected {path})")]
    MissingBundle { code: String, path: PathBuf },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{bundle}: key `{key}` must be a string or an object of strings")]
    NotAString { bundle: String, key: String },
}

/// Flattened strings of one locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    entries: BTreeMap<String, String>,
}

impl Bundle {
    /// Flatten a JSON object into dotted keys. `bundle` names the source in errors.
    pub fn from_json(bundle: &str, value: &Value) -> Result<Self, TranslationError> {
        let mut entries = BTreeMap::new();
        flatten("", value, bundle, &mut entries)?;
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(
    prefix: &str,
    value: &Value,
    bundle: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<(), TranslationError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&full, child, bundle, out)?;
            }
            Ok(())
        }
        Value::String(text) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), text.clone());
            Ok(())
        }
        _ => Err(TranslationError::NotAString {
            bundle: bundle.to_string(),
            key: if prefix.is_empty() {
                "(root)".to_string()
            } else {
                prefix.to_string()
            },
        }),
    }
}

/// Every locale's bundle plus the default to fall back to.
#[derive(Debug, Clone)]
pub struct Translations {
    default_code: String,
    bundles: BTreeMap<String, Bundle>,
}

impl Translations {
    /// Load `<dir>/<code>.json` for every registered locale.
    pub fn load(dir: &Path, registry: &LocaleRegistry) -> Result<Self, TranslationError> {
        let mut bundles = BTreeMap::new();
        for locale in registry.iter() {
            let path = dir.join(format!("{}.json", locale.code()));
            if !path.exists() {
                return Err(TranslationError::MissingBundle {
                    code: locale.code().to_string(),
                    path,
                });
            }
            let text = fs::read_to_string(&path).map_err(|source| TranslationError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value =
                serde_json::from_str(&text).map_err(|source| TranslationError::Json {
                    path: path.clone(),
                    source,
                })?;
            let bundle = Bundle::from_json(&path.display().to_string(), &value)?;
            debug!(locale = locale.code(), keys = bundle.len(), "loaded translation bundle");
            bundles.insert(locale.code().to_string(), bundle);
        }

        let translations = Self {
            default_code: registry.default_locale().code().to_string(),
            bundles,
        };
        translations.warn_missing(registry);
        Ok(translations)
    }

    /// Build from already-parsed bundles. Locales without a bundle get an
    /// empty one and fall back to the default for every key.
    pub fn from_bundles(
        registry: &LocaleRegistry,
        bundles: impl IntoIterator<Item = (String, Bundle)>,
    ) -> Self {
        let mut map: BTreeMap<String, Bundle> = bundles
            .into_iter()
            .filter(|(code, _)| registry.contains(code))
            .collect();
        for locale in registry.iter() {
            map.entry(locale.code().to_string()).or_default();
        }
        Self {
            default_code: registry.default_locale().code().to_string(),
            bundles: map,
        }
    }

    /// Translate `key` for `code`: that locale's string, else the default
    /// locale's, else the key itself.
    pub fn t<'a>(&'a self, code: &str, key: &'a str) -> &'a str {
        self.bundles
            .get(code)
            .and_then(|b| b.get(key))
            .or_else(|| self.bundles.get(&self.default_code).and_then(|b| b.get(key)))
            .unwrap_or(key)
    }

    pub fn bundle(&self, code: &str) -> Option<&Bundle> {
        self.bundles.get(code)
    }

    /// Keys of the default bundle that `code` does not translate.
    pub fn missing_keys(&self, code: &str) -> Vec<&str> {
        let Some(default) = self.bundles.get(&self.default_code) else {
            return Vec::new();
        };
        let target = self.bundles.get(code);
        default
            .keys()
            .filter(|key| target.is_none_or(|b| b.get(key).is_none()))
            .collect()
    }

    fn warn_missing(&self, registry: &LocaleRegistry) {
        for locale in registry.others(&self.default_code) {
            let missing = self.missing_keys(locale.code());
            if !missing.is_empty() {
                warn!(
                    locale = locale.code(),
                    count = missing.len(),
                    "translation bundle is missing keys; falling back to {}",
                    self.default_code
                );
                for key in missing {
                    debug!(locale = locale.code(), key, "missing translation");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Direction, Locale};
    use serde_json::json;
    use tempfile::TempDir;

    fn registry() -> LocaleRegistry {
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

    fn write_bundles(dir: &Path) {
        fs::write(
            dir.join("en.json"),
            r#"{"nav": {"home": "Home", "science": "Science"}, "footer": "Not medical advice"}"#,
        )
        .unwrap();
        fs::write(dir.join("sv.json"), r#"{"nav": {"home": "Hem"}}"#).unwrap();
        fs::write(dir.join("ar.json"), r#"{"nav": {"home": "الرئيسية"}}"#).unwrap();
    }

    #[test]
    fn nested_keys_flattened() {
        let bundle = Bundle::from_json("en", &json!({"a": {"b": {"c": "x"}}, "d": "y"})).unwrap();
        assert_eq!(bundle.get("a.b.c"), Some("x"));
        assert_eq!(bundle.get("d"), Some("y"));
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn non_string_leaf_rejected() {
        let err = Bundle::from_json("en.json", &json!({"nav": {"count": 3}})).unwrap_err();
        assert!(err.to_string().contains("nav.count"));
    }

    #[test]
    fn non_object_root_rejected() {
        assert!(Bundle::from_json("en.json", &json!(["a"])).is_err());
    }

    #[test]
    fn load_and_lookup() {
        let tmp = TempDir::new().unwrap();
        write_bundles(tmp.path());
        let t = Translations::load(tmp.path(), &registry()).unwrap();
        assert_eq!(t.t("sv", "nav.home"), "Hem");
        assert_eq!(t.t("ar", "nav.home"), "الرئيسية");
    }

    #[test]
    fn lookup_falls_back_to_default_then_key() {
        let tmp = TempDir::new().unwrap();
        write_bundles(tmp.path());
        let t = Translations::load(tmp.path(), &registry()).unwrap();
        assert_eq!(t.t("sv", "nav.science"), "Science");
        assert_eq!(t.t("sv", "nav.nowhere"), "nav.nowhere");
        assert_eq!(t.t("xx", "nav.home"), "Home");
    }

    #[test]
    fn missing_bundle_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("en.json"), "{}").unwrap();
        let err = Translations::load(tmp.path(), &registry()).unwrap_err();
        assert!(matches!(err, TranslationError::MissingBundle { ref code, .. } if code == "sv"));
    }

    #[test]
    fn invalid_json_is_error() {
        let tmp = TempDir::new().unwrap();
        write_bundles(tmp.path());
        fs::write(tmp.path().join("sv.json"), "{ not json").unwrap();
        let err = Translations::load(tmp.path(), &registry()).unwrap_err();
        assert!(matches!(err, TranslationError::Json { .. }));
    }

    #[test]
    fn missing_keys_against_default() {
        let tmp = TempDir::new().unwrap();
        write_bundles(tmp.path());
        let t = Translations::load(tmp.path(), &registry()).unwrap();
        assert_eq!(t.missing_keys("sv"), vec!["footer", "nav.science"]);
        assert!(t.missing_keys("en").is_empty());
    }

    #[test]
    fn from_bundles_fills_gaps() {
        let en = Bundle::from_json("en", &json!({"title": "Gangliosides"})).unwrap();
        let t = Translations::from_bundles(&registry(), [("en".to_string(), en)]);
        assert_eq!(t.t("ar", "title"), "Gangliosides");
        assert!(t.bundle("sv").is_some_and(Bundle::is_empty));
    }
}
