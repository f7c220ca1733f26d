//! Locale-aware HTML fragments shared by every page template.
//!
//! These are the pieces of a page that depend on the locale set rather than
//! on page content: the `<html lang dir>` attributes, the `hreflang` alternate
//! links search engines use to pair translations, and the language switcher.
//!
//! All rendering goes through Maud, so every interpolated value is escaped.

use crate::locale::{Locale, LocaleRegistry};
use crate::routing::{Alternates, absolute_url};
use maud::{DOCTYPE, Markup, html};

/// Values for the root `<html>` element of a page in `locale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlAttrs<'a> {
    pub lang: &'a str,
    pub dir: &'static str,
}

pub fn html_attrs(locale: &Locale) -> HtmlAttrs<'_> {
    HtmlAttrs {
        lang: locale.code(),
        dir: locale.direction().as_str(),
    }
}

/// `<link rel="alternate">` for every locale, plus `x-default` pointing at the
/// default locale's URL.
pub fn alternate_links(alternates: &Alternates, registry: &LocaleRegistry, site_url: &str) -> Markup {
    html! {
        @for (alt, url) in alternates.absolute(site_url) {
            link rel="alternate" hreflang=(alt.hreflang) href=(url);
        }
        @if let Some(path) = alternates.get(registry.default_locale().code()) {
            link rel="alternate" hreflang="x-default" href=(absolute_url(site_url, path));
        }
    }
}

/// `<link rel="canonical">` for the page as rendered in `current`.
pub fn canonical_link(alternates: &Alternates, current: &Locale, site_url: &str) -> Markup {
    let path = alternates.get(current.code()).unwrap_or(alternates.canonical());
    html! {
        link rel="canonical" href=(absolute_url(site_url, path));
    }
}

/// Links to the current page in every locale, labelled with native names.
pub fn language_switcher(
    alternates: &Alternates,
    registry: &LocaleRegistry,
    current: &Locale,
) -> Markup {
    html! {
        nav.language-switcher aria-label="Language" {
            ul {
                @for alt in alternates.iter() {
                    @let is_current = alt.code == current.code();
                    li class=[is_current.then_some("current")] {
                        a href=(alt.path)
                            hreflang=(alt.hreflang)
                            lang=(alt.code)
                            aria-current=[is_current.then_some("page")] {
                            (registry.display_name(&alt.code))
                        }
                    }
                }
            }
        }
    }
}

/// Document shell for a page in `locale`: doctype, `<html lang dir>`, and the
/// alternate links in the head.
pub fn base_document(
    title: &str,
    locale: &Locale,
    alternates: &Alternates,
    registry: &LocaleRegistry,
    site_url: &str,
    content: Markup,
) -> Markup {
    let attrs = html_attrs(locale);
    html! {
        (DOCTYPE)
        html lang=(attrs.lang) dir=(attrs.dir) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (canonical_link(alternates, locale, site_url))
                (alternate_links(alternates, registry, site_url))
            }
            body {
                (language_switcher(alternates, registry, locale))
                (content)
            }
        }
    }
}
