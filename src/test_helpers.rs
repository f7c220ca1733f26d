//! Shared test utilities for the ganglio-site test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! structures (`Manifest`, `Entry`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let overview = find_article(&manifest, "sv", "hypothesis/overview");
//! assert_eq!(overview.lang(), "sv");
//! assert_eq!(article_slugs(&manifest), vec!["hypothesis/overview", "science/gangliosides"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{Article, Disease, Entry, Localized, Reference};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups, panicking with the available keys on miss
// =========================================================================

fn find_entry<'a, T: Localized>(
    entries: &'a [Entry<T>],
    collection: &str,
    lang: &str,
    slug: &str,
) -> &'a Entry<T> {
    entries
        .iter()
        .find(|e| e.lang() == lang && e.slug == slug)
        .unwrap_or_else(|| {
            let keys: Vec<String> = entries
                .iter()
                .map(|e| format!("{}:{}", e.lang(), e.slug))
                .collect();
            panic!("{collection} entry '{lang}:{slug}' not found. Available: {keys:?}")
        })
}

/// Find an article by locale and slug. Panics if not found.
pub fn find_article<'a>(manifest: &'a Manifest, lang: &str, slug: &str) -> &'a Entry<Article> {
    find_entry(&manifest.articles, "article", lang, slug)
}

/// Find a disease by locale and slug. Panics if not found.
pub fn find_disease<'a>(manifest: &'a Manifest, lang: &str, slug: &str) -> &'a Entry<Disease> {
    find_entry(&manifest.diseases, "disease", lang, slug)
}

/// Find a reference by its `id` field. Panics if not found.
pub fn find_reference<'a>(manifest: &'a Manifest, id: &str) -> &'a Entry<Reference> {
    manifest
        .references
        .iter()
        .find(|r| r.data.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = manifest.references.iter().map(|r| r.data.id.as_str()).collect();
            panic!("reference '{id}' not found. Available: {ids:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Distinct article slugs in manifest order.
pub fn article_slugs(manifest: &Manifest) -> Vec<&str> {
    let mut slugs: Vec<&str> = Vec::new();
    for article in &manifest.articles {
        if !slugs.contains(&article.slug.as_str()) {
            slugs.push(&article.slug);
        }
    }
    slugs
}

/// Disease slugs present in one locale, manifest order.
pub fn disease_slugs<'a>(manifest: &'a Manifest, lang: &str) -> Vec<&'a str> {
    manifest
        .diseases_in(lang)
        .into_iter()
        .map(|d| d.slug.as_str())
        .collect()
}
