//! # Ganglio Site
//!
//! Content and localization core of a multilingual static research site on
//! ganglioside biology and the diseases linked to it. Articles, disease pages
//! and bibliography references are authored as files; this crate validates
//! them, ties translations together, and computes every locale-dependent URL
//! and HTML fragment the page templates need.
//!
//! # Pipeline
//!
//! ```text
//! site.toml  →  LocaleRegistry                  (config → closed locale set)
//! content/   →  manifest.json                   (files → validated, typed entries)
//! i18n/      →  Translations                    (JSON bundles → flattened strings)
//! path       →  canonical path + alternates     (routing, pure)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, stock defaults, merging and validation |
//! | [`locale`] | The locale registry: codes, names, text direction, the default |
//! | [`routing`] | Locale resolution, canonical and localized paths, alternates |
//! | [`content`] | Collection schemas, front matter parsing and schema validation |
//! | [`types`] | Typed entries (`Article`, `Disease`, `Reference`) serialized in the manifest |
//! | [`naming`] | Entry ids, slugs and the `NNN-name` ordering convention |
//! | [`scan`] | Walks the collections and produces the scan manifest |
//! | [`translations`] | UI string bundles with fallback to the default locale |
//! | [`head`] | Maud fragments: `<html lang dir>`, hreflang links, language switcher |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Registry, Passed By Reference
//!
//! The locale set is read once from config into a [`locale::LocaleRegistry`]
//! and handed to routing, validation and rendering. There is no global list of
//! languages; a site with three locales and a site with ten run the same code.
//!
//! ## Default Locale Without Prefix
//!
//! The default locale lives at the site root (`/about/`), every other locale
//! under its code (`/sv/about/`). Routing is pure string work over the registry
//! and never fails: unknown prefixes are part of the path, unknown locales
//! resolve to the default.
//!
//! ## Validation Is Fatal
//!
//! A document that does not match its collection schema stops the scan with
//! an error naming the file and the field. Missing UI translations are not
//! fatal; they fall back to the default locale and are reported as warnings.
//!
//! ## Translations Share A Slug
//!
//! Entries are linked across locales only by their slug: the collection
//! path with the locale directory and order prefix removed
//! (`sv/hypothesis/010-overview` → `hypothesis/overview`).

pub mod config;
pub mod content;
pub mod head;
pub mod locale;
pub mod naming;
pub mod output;
pub mod routing;
pub mod scan;
pub mod translations;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
