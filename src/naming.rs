//! Entry ids, slugs and the `NNN-name` ordering convention.
//!
//! A content file is identified by its path inside the collection directory,
//! minus the extension. That id is turned into a slug shared by all
//! translations of the same page:
//!
//! ```text
//! id                               slug                 order
//! en/hypothesis/010-overview       hypothesis/overview  Some(10)
//! sv/hypothesis/010-overview       hypothesis/overview  Some(10)
//! narcolepsy                       narcolepsy           None
//! ```
//!
//! A leading segment that is a registered locale code (the default's
//! included, content is usually grouped as `en/`, `sv/`, ...) is dropped, and
//! the `NNN-` prefix of the file name becomes the sort order.

use crate::locale::LocaleRegistry;

/// Result of parsing a numbered entry name like `020-Mechanism-of-Action`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Mechanism-of-Action`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-mechanism-of-action"` → number=Some(20), name="mechanism-of-action"
/// - `"001"` → number=Some(1), name=""
/// - `"narcolepsy"` → number=None, name="narcolepsy"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            return ParsedName {
                number: Some(num),
                name: name[dash_pos + 1..].to_string(),
            };
        }
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
    }
}

/// Identity of a content file inside its collection.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryId {
    pub id: String,
    pub slug: String,
    pub order: Option<u32>,
    /// Leading locale directory that was dropped from the slug, if any.
    pub locale_dir: Option<String>,
}

/// Derive id, slug and order from a collection-relative path without
/// extension, `/`-separated (`sv/hypothesis/010-overview`).
///
/// A number-only file name keeps its digits as the slug so it still names
/// something.
pub fn parse_entry_id(relative: &str, registry: &LocaleRegistry) -> EntryId {
    let mut segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    let mut locale_dir = None;
    if segments.len() > 1 && registry.contains(segments[0]) {
        locale_dir = Some(segments.remove(0).to_string());
    }

    let mut order = None;
    let mut slug_parts: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
    if let Some(last) = slug_parts.last_mut() {
        let parsed = parse_entry_name(last);
        order = parsed.number;
        if !parsed.name.is_empty() {
            *last = parsed.name;
        }
    }

    EntryId {
        id: relative.to_string(),
        slug: slug_parts.join("/"),
        order,
        locale_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_with_multi_word_name() {
        let p = parse_entry_name("020-mechanism-of-action");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "mechanism-of-action");
    }

    #[test]
    fn number_only_no_dash() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_entry_name("001-");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("guillain-barre");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "guillain-barre");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-first");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.name, "first");
    }

    // =========================================================================
    // Entry ids
    // =========================================================================

    #[test]
    fn locale_directory_dropped_from_slug() {
        let registry = LocaleRegistry::stock();
        let sv = parse_entry_id("sv/hypothesis/010-overview", &registry);
        let en = parse_entry_id("en/hypothesis/010-overview", &registry);
        assert_eq!(sv.slug, "hypothesis/overview");
        assert_eq!(sv.slug, en.slug);
        assert_eq!(sv.order, Some(10));
        assert_eq!(sv.id, "sv/hypothesis/010-overview");
        assert_eq!(sv.locale_dir.as_deref(), Some("sv"));
    }

    #[test]
    fn flat_file_keeps_name() {
        let registry = LocaleRegistry::stock();
        let id = parse_entry_id("narcolepsy", &registry);
        assert_eq!(id.slug, "narcolepsy");
        assert_eq!(id.order, None);
        assert_eq!(id.locale_dir, None);
    }

    #[test]
    fn file_named_like_a_locale_is_not_stripped() {
        let registry = LocaleRegistry::stock();
        assert_eq!(parse_entry_id("de", &registry).slug, "de");
    }

    #[test]
    fn unregistered_directory_kept() {
        let registry = LocaleRegistry::stock();
        let id = parse_entry_id("xx/page", &registry);
        assert_eq!(id.slug, "xx/page");
        assert_eq!(id.locale_dir, None);
    }

    #[test]
    fn number_only_file_keeps_digits() {
        let registry = LocaleRegistry::stock();
        let id = parse_entry_id("en/007", &registry);
        assert_eq!(id.slug, "007");
        assert_eq!(id.order, Some(7));
    }
}
