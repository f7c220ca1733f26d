//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (article, disease, reference) is its semantic identity,
//! its positional index and title, with filesystem paths shown as secondary
//! context via indented lines. Translations of the same page are grouped
//! under one header, so the scan output reads as a translation-coverage
//! inventory.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Locales
//!     en English (default)
//!     sv Svenska
//!     ar العربية (rtl)
//!
//! Articles
//! 001 The hypothesis in brief [hypothesis]
//!     en: content/articles/en/hypothesis/010-overview.md
//!     sv: content/articles/sv/hypothesis/010-overview.md
//! 002 Gangliosides [science]
//!     en: content/articles/en/science/020-gangliosides.md
//!     Missing: sv, ar
//!
//! References
//! 001 Ahmed SS et al. (2015)
//!     Antibodies to influenza nucleoprotein cross-react with human...
//!     Source: content/references/ahmed-2015.yaml
//!
//! 2 articles, 0 diseases, 1 reference in 3 locales
//! ```
//!
//! ## Routes
//!
//! ```text
//! Path: /sv/about/
//! Locale: sv (Svenska)
//! Canonical: /about/
//!
//! Alternates
//!     en         en-US  https://example.org/about/ (default)
//!     sv         sv-SE  https://example.org/sv/about/ (current)
//!     x-default         https://example.org/about/
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::locale::LocaleRegistry;
use crate::routing;
use crate::scan::Manifest;
use crate::translations::Translations;
use crate::types::{Entry, Localized};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// `1 entry`, `3 entries`.
fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// All translations of one page.
struct SlugGroup<'a> {
    title: &'a str,
    detail: &'static str,
    sources: Vec<(&'a str, &'a str)>,
}

/// Group entries by slug in manifest order. The header title comes from the
/// default-locale entry when there is one.
fn group_by_slug<'a, T: Localized>(
    entries: &'a [Entry<T>],
    default_code: &str,
    detail: impl Fn(&T) -> &'static str,
) -> Vec<SlugGroup<'a>> {
    let mut slugs: Vec<&str> = Vec::new();
    for entry in entries {
        if !slugs.contains(&entry.slug.as_str()) {
            slugs.push(&entry.slug);
        }
    }

    slugs
        .into_iter()
        .map(|slug| {
            let members: Vec<&'a Entry<T>> = entries.iter().filter(|e| e.slug == slug).collect();
            let lead = members
                .iter()
                .copied()
                .find(|e| e.lang() == default_code)
                .unwrap_or(members[0]);
            SlugGroup {
                title: lead.data.title(),
                detail: detail(&lead.data),
                sources: members
                    .into_iter()
                    .map(|e| (e.lang(), e.source_path.as_str()))
                    .collect(),
            }
        })
        .collect()
}

fn push_groups(lines: &mut Vec<String>, heading: &str, groups: &[SlugGroup], registry: &LocaleRegistry) {
    lines.push(String::new());
    lines.push(heading.to_string());
    for (i, group) in groups.iter().enumerate() {
        lines.push(format!("{} {} [{}]", format_index(i + 1), group.title, group.detail));
        for (lang, source) in &group.sources {
            lines.push(format!("{}{}: {}", indent(1), lang, source));
        }
        let missing: Vec<&str> = registry
            .codes()
            .into_iter()
            .filter(|code| !group.sources.iter().any(|(lang, _)| lang == code))
            .collect();
        if !missing.is_empty() {
            lines.push(format!("{}Missing: {}", indent(1), missing.join(", ")));
        }
    }
}

fn locale_lines(registry: &LocaleRegistry) -> Vec<String> {
    let mut lines = vec!["Locales".to_string()];
    for locale in registry.iter() {
        let mut line = format!("{}{} {}", indent(1), locale.code(), locale.name());
        if registry.is_default(locale.code()) {
            line.push_str(" (default)");
        }
        if locale.is_rtl() {
            line.push_str(" (rtl)");
        }
        lines.push(line);
    }
    lines
}

// ============================================================================
// Scan
// ============================================================================

/// Format scan output: the locale set, then every collection grouped by slug.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let registry = &manifest.locales;
    let default_code = registry.default_locale().code();
    let mut lines = locale_lines(registry);

    let articles = group_by_slug(&manifest.articles, default_code, |a| a.section.as_str());
    push_groups(&mut lines, "Articles", &articles, registry);

    let diseases = group_by_slug(&manifest.diseases, default_code, |d| d.category.as_str());
    push_groups(&mut lines, "Diseases", &diseases, registry);

    lines.push(String::new());
    lines.push("References".to_string());
    for (i, reference) in manifest.references.iter().enumerate() {
        let data = &reference.data;
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            data.authors,
            data.year
        ));
        lines.push(format!("{}{}", indent(1), truncate_desc(&data.title, 60)));
        lines.push(format!("{}Source: {}", indent(1), reference.source_path));
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {} in {}",
        plural(manifest.articles.len(), "article", "articles"),
        plural(manifest.diseases.len(), "disease", "diseases"),
        plural(manifest.references.len(), "reference", "references"),
        plural(registry.len(), "locale", "locales"),
    ));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the `check` summary: entries and translation gaps per locale.
pub fn format_check_output(manifest: &Manifest, translations: &Translations) -> Vec<String> {
    let mut lines = vec!["Translations".to_string()];
    for locale in manifest.locales.iter() {
        let code = locale.code();
        let entries = manifest.articles_in(code).len()
            + manifest.diseases_in(code).len()
            + manifest.references_in(code).len();
        let keys = translations.bundle(code).map_or(0, |b| b.len());
        let missing = translations.missing_keys(code);

        let mut line = format!(
            "{}{} {}: {}, {}",
            indent(1),
            code,
            locale.name(),
            plural(entries, "entry", "entries"),
            plural(keys, "key", "keys")
        );
        if !missing.is_empty() {
            line.push_str(&format!(" ({} missing)", missing.len()));
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push(format!(
        "==> Content is valid ({} checked)",
        plural(manifest.entry_count(), "document", "documents")
    ));
    lines
}

pub fn print_check_output(manifest: &Manifest, translations: &Translations) {
    for line in format_check_output(manifest, translations) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Format how a path or URL resolves, and where the same page lives in every
/// locale.
pub fn format_routes_output(registry: &LocaleRegistry, site_url: &str, target: &str) -> Vec<String> {
    let current = routing::resolve_locale_from_url(registry, target);
    let alternates = routing::alternates_for_url(registry, target);
    let default_code = registry.default_locale().code();

    let mut lines = vec![
        format!("Path: {}", target),
        format!("Locale: {} ({})", current.code(), current.name()),
        format!("Canonical: {}", alternates.canonical()),
        String::new(),
        "Alternates".to_string(),
    ];

    for (alt, url) in alternates.absolute(site_url) {
        let marker = if alt.code == current.code() {
            " (current)"
        } else if alt.code == default_code {
            " (default)"
        } else {
            ""
        };
        lines.push(format!(
            "{}{:<10} {:<6} {}{}",
            indent(1),
            alt.code,
            alt.hreflang,
            url,
            marker
        ));
    }
    if let Some(path) = alternates.get(default_code) {
        lines.push(format!(
            "{}{:<10} {:<6} {}",
            indent(1),
            "x-default",
            "",
            routing::absolute_url(site_url, path)
        ));
    }
    lines
}

pub fn print_routes_output(registry: &LocaleRegistry, site_url: &str, target: &str) {
    for line in format_routes_output(registry, site_url, target) {
        println!("{}", line);
    }
}
