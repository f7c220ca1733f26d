//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults (the
//! ten-language set the site ships with) are overridden by the user's file in
//! the source root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_url = "https://narcolepsy-hypothesis.com"
//!
//! [i18n]
//! default_locale = "en"     # Rendered without a path prefix
//! i18n_dir = "i18n"         # Translation bundles: <i18n_dir>/<code>.json
//!
//! [[i18n.locales]]
//! code = "en"
//! name = "English"
//! hreflang = "en-US"
//! direction = "ltr"
//!
//! [[i18n.locales]]
//! code = "ar"
//! name = "العربية"
//! hreflang = "ar-SA"
//! direction = "rtl"
//!
//! [content]
//! root = "content"          # Collections live in <root>/{articles,diseases,references}
//! include_drafts = false    # Keep documents marked `draft: true`
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Tables merge
//! key by key; arrays replace wholesale, so a `[[i18n.locales]]` list in the
//! user file is the complete locale set.
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::{Direction, LocaleError, LocaleRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the source root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Locale configuration error: {0}")]
    Locale(#[from] LocaleError),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public origin of the published site, used for absolute alternate URLs.
    pub site_url: String,
    /// Locale set and translation bundle location.
    pub i18n: I18nConfig,
    /// Content collection settings.
    pub content: ContentConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://narcolepsy-hypothesis.com".to_string(),
            i18n: I18nConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Locale checks are delegated to [`LocaleRegistry::from_config`] so the
    /// registry and the config can never disagree on what is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site_url.starts_with("https://") || self.site_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site_url must start with http:// or https://".into(),
            ));
        }
        if self.content.root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.root must not be empty".into(),
            ));
        }
        if self.i18n.i18n_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "i18n.i18n_dir must not be empty".into(),
            ));
        }
        LocaleRegistry::from_config(&self.i18n)?;
        Ok(())
    }

    /// Build the locale registry described by this config.
    pub fn registry(&self) -> Result<LocaleRegistry, ConfigError> {
        Ok(LocaleRegistry::from_config(&self.i18n)?)
    }
}

/// Locale set, default locale, and translation bundle directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Code of the locale rendered without a path prefix.
    pub default_locale: String,
    /// Directory (relative to the source root) holding `<code>.json` bundles.
    pub i18n_dir: String,
    /// Every supported locale, in display order.
    pub locales: Vec<LocaleConfig>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        let locales = [
            ("en", "English", "en-US", Direction::Ltr),
            ("sv", "Svenska", "sv-SE", Direction::Ltr),
            ("de", "Deutsch", "de-DE", Direction::Ltr),
            ("fr", "Français", "fr-FR", Direction::Ltr),
            ("es", "Español", "es-ES", Direction::Ltr),
            ("it", "Italiano", "it-IT", Direction::Ltr),
            ("nl", "Nederlands", "nl-NL", Direction::Ltr),
            ("pl", "Polski", "pl-PL", Direction::Ltr),
            ("pt", "Português", "pt-PT", Direction::Ltr),
            ("ar", "العربية", "ar-SA", Direction::Rtl),
        ]
        .into_iter()
        .map(|(code, name, hreflang, direction)| LocaleConfig {
            code: code.to_string(),
            name: name.to_string(),
            hreflang: hreflang.to_string(),
            direction,
        })
        .collect();

        Self {
            default_locale: "en".to_string(),
            i18n_dir: "i18n".to_string(),
            locales,
        }
    }
}

/// One `[[i18n.locales]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Path prefix and `lang` value in content, e.g. `"sv"`.
    pub code: String,
    /// Native display name, e.g. `"Svenska"`.
    pub name: String,
    /// Region tag for alternate links, e.g. `"sv-SE"`. Falls back to `code`.
    #[serde(default)]
    pub hreflang: String,
    /// Text direction.
    #[serde(default)]
    pub direction: Direction,
}

/// Content collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory (relative to the source root) holding the collections.
    pub root: String,
    /// Keep documents marked `draft: true` in the manifest.
    pub include_drafts: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "content".to_string(),
            include_drafts: false,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# ganglio-site configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Public origin of the site. Used to build absolute hreflang URLs.
site_url = "https://narcolepsy-hypothesis.com"

# ---------------------------------------------------------------------------
# Internationalization
# ---------------------------------------------------------------------------
[i18n]
# The default locale is served at the root without a path prefix.
# Every other locale lives under /<code>/.
default_locale = "en"

# Translation bundles, one <code>.json file per locale.
i18n_dir = "i18n"

# The complete locale set. Declaring [[i18n.locales]] replaces the whole list.
# direction is "ltr" or "rtl".
[[i18n.locales]]
code = "en"
name = "English"
hreflang = "en-US"
direction = "ltr"

[[i18n.locales]]
code = "sv"
name = "Svenska"
hreflang = "sv-SE"
direction = "ltr"

[[i18n.locales]]
code = "de"
name = "Deutsch"
hreflang = "de-DE"
direction = "ltr"

[[i18n.locales]]
code = "fr"
name = "Français"
hreflang = "fr-FR"
direction = "ltr"

[[i18n.locales]]
code = "es"
name = "Español"
hreflang = "es-ES"
direction = "ltr"

[[i18n.locales]]
code = "it"
name = "Italiano"
hreflang = "it-IT"
direction = "ltr"

[[i18n.locales]]
code = "nl"
name = "Nederlands"
hreflang = "nl-NL"
direction = "ltr"

[[i18n.locales]]
code = "pl"
name = "Polski"
hreflang = "pl-PL"
direction = "ltr"

[[i18n.locales]]
code = "pt"
name = "Português"
hreflang = "pt-PT"
direction = "ltr"

[[i18n.locales]]
code = "ar"
name = "العربية"
hreflang = "ar-SA"
direction = "rtl"

# ---------------------------------------------------------------------------
# Content collections
# ---------------------------------------------------------------------------
[content]
# Holds articles/, diseases/ and references/.
root = "content"

# Keep documents marked `draft: true`.
include_drafts = false
"##
}
