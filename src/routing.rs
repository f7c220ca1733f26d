//! Locale-aware URL paths.
//!
//! Every logical page has one **canonical path** (`/hypothesis/overview/`) and
//! one **localized path** per locale. The default locale is served at the
//! canonical path; any other locale prefixes it with `/<code>`:
//!
//! ```text
//! canonical             en (default)            sv
//! /                     /                       /sv/
//! /hypothesis/overview/ /hypothesis/overview/   /sv/hypothesis/overview/
//! /about                /about                  /sv/about
//! ```
//!
//! All functions here are pure and infallible: anything that does not look
//! like a locale prefix is treated as part of the canonical path, and anything
//! that does not resolve to a locale resolves to the default. Input is
//! normalized (leading `/` added, repeated `/` collapsed, query and fragment
//! dropped) rather than rejected. The trailing slash of the input is kept.
//!
//! The laws the rest of the crate relies on, for every path `p` and locale `L`:
//!
//! - `canonicalize(localize(p, L)) == canonicalize(p)`
//! - `localize(localize(p, L), L) == localize(p, L)`
//! - `localize(p, default) == canonicalize(p)`

use crate::locale::{Locale, LocaleRegistry};
use serde::Serialize;

/// The locale a request path belongs to.
///
/// The first non-empty segment is compared against the registered non-default
/// codes; no match (including an empty path or `/`) means the default locale.
pub fn resolve_locale<'r>(registry: &'r LocaleRegistry, path: &str) -> &'r Locale {
    let (segments, _) = split_path(path);
    segments
        .first()
        .and_then(|first| registry.prefix_locale(first))
        .unwrap_or_else(|| registry.default_locale())
}

/// [`resolve_locale`] for a full URL (`https://host/sv/about/?q=1`).
pub fn resolve_locale_from_url<'r>(registry: &'r LocaleRegistry, url: &str) -> &'r Locale {
    resolve_locale(registry, url_path(url))
}

/// Strip locale prefixes, recovering the canonical path.
///
/// Only registered non-default codes count as prefixes: `/xx/about/` and
/// `/en/about/` come back unchanged (modulo normalization). Stacked prefixes
/// such as `/sv/de/about/` are all removed so the result is itself canonical.
pub fn canonicalize(registry: &LocaleRegistry, path: &str) -> String {
    let (segments, trailing_slash) = split_path(path);
    let start = segments
        .iter()
        .take_while(|segment| registry.prefix_locale(segment).is_some())
        .count();
    join_path(&segments[start..], trailing_slash)
}

/// Render `path` for `locale`.
///
/// The input may already carry a locale prefix; it is stripped first, so
/// localizing twice never double-prefixes. `locale` must come from `registry`.
pub fn localize(registry: &LocaleRegistry, path: &str, locale: &Locale) -> String {
    let canonical = canonicalize(registry, path);
    if registry.is_default(locale.code()) {
        canonical
    } else if canonical == "/" {
        format!("/{}/", locale.code())
    } else {
        format!("/{}{}", locale.code(), canonical)
    }
}

/// One localized variant of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub code: String,
    pub hreflang: String,
    pub path: String,
}

impl Alternate {
    /// Fully-qualified URL under `site_url`.
    pub fn url(&self, site_url: &str) -> String {
        absolute_url(site_url, &self.path)
    }
}

/// The page at every locale: one entry per registered locale, registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternates {
    canonical: String,
    entries: Vec<Alternate>,
}

impl Alternates {
    /// The locale-free path every entry was derived from.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.code == code)
            .map(|a| a.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alternate> {
        self.entries.iter()
    }

    /// Every entry paired with its fully-qualified URL under `site_url`.
    pub fn absolute<'a>(
        &'a self,
        site_url: &'a str,
    ) -> impl Iterator<Item = (&'a Alternate, String)> + 'a {
        self.entries.iter().map(move |alt| (alt, alt.url(site_url)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Equivalent paths of the page at `path` in every registered locale.
pub fn alternates(registry: &LocaleRegistry, path: &str) -> Alternates {
    let canonical = canonicalize(registry, path);
    let entries = registry
        .iter()
        .map(|locale| Alternate {
            code: locale.code().to_string(),
            hreflang: locale.hreflang().to_string(),
            path: localize(registry, &canonical, locale),
        })
        .collect();
    Alternates { canonical, entries }
}

/// [`alternates`] for a full request URL.
pub fn alternates_for_url(registry: &LocaleRegistry, url: &str) -> Alternates {
    alternates(registry, url_path(url))
}

/// Join a site origin and a path with exactly one `/` between them.
pub fn absolute_url(site_url: &str, path: &str) -> String {
    let base = site_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// The path component of a URL; the input itself when it has no scheme.
fn url_path(url: &str) -> &str {
    match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            match rest.find(['/', '?', '#']) {
                Some(idx) if rest[idx..].starts_with('/') => &rest[idx..],
                _ => "/",
            }
        }
        None => url,
    }
}

/// Non-empty segments of a path plus whether it ends in `/`.
fn split_path(path: &str) -> (Vec<&str>, bool) {
    let path = match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    };
    let segments = path.split('/').filter(|s| !s.is_empty()).collect();
    (segments, path.ends_with('/'))
}

fn join_path(segments: &[&str], trailing_slash: bool) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    if trailing_slash {
        out.push('/');
    }
    out
}
