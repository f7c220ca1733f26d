//! Content scanning and manifest generation.
//!
//! Walks the content collections under the source root, validates every
//! document against its schema, and produces a [`Manifest`] the page
//! templates consume.
//!
//! ## Directory Structure
//!
//! ```text
//! site/                                    # Source root
//! ├── site.toml                            # Site configuration (optional)
//! ├── i18n/                                # Translation bundles, one per locale
//! │   ├── en.json
//! │   └── sv.json
//! └── content/
//!     ├── articles/
//!     │   ├── en/hypothesis/010-overview.md
//!     │   └── sv/hypothesis/010-overview.md   # same slug = same page
//!     ├── diseases/
//!     │   └── en/narcolepsy.md
//!     └── references/
//!         └── ahmed-2015.yaml
//! ```
//!
//! Files and directories starting with `.` or `_` are ignored.
//!
//! ## Validation
//!
//! The scan fails on the first problem, naming the file:
//! - front matter or data that does not parse
//! - a document that does not match its collection schema
//! - two documents with the same slug in the same locale and collection
//! - two references with the same `id`
//!
//! Dangling `relatedDiseases` slugs, unknown cited reference ids and a locale
//! directory that disagrees with the document's `lang` are only warned about.

use crate::config::{self, SiteConfig};
use crate::content::{self, CollectionKind, DocumentError, SchemaValidationError};
use crate::locale::LocaleRegistry;
use crate::naming;
use crate::types::{Article, Disease, Entry, Localized, Reference};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content root not found: {0}")]
    MissingContentRoot(PathBuf),
    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
    #[error("{path}: {source}")]
    Typed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate {collection} entry {slug:?} for locale {lang}: {first} and {second}")]
    Duplicate {
        collection: CollectionKind,
        slug: String,
        lang: String,
        first: String,
        second: String,
    },
    #[error("Duplicate reference id {id:?}: {first} and {second}")]
    DuplicateReferenceId {
        id: String,
        first: String,
        second: String,
    },
}

/// Manifest output from the scan stage
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub locales: LocaleRegistry,
    pub articles: Vec<Entry<Article>>,
    pub diseases: Vec<Entry<Disease>>,
    pub references: Vec<Entry<Reference>>,
}

impl Manifest {
    pub fn articles_in(&self, lang: &str) -> Vec<&Entry<Article>> {
        self.articles.iter().filter(|e| e.lang() == lang).collect()
    }

    pub fn diseases_in(&self, lang: &str) -> Vec<&Entry<Disease>> {
        self.diseases.iter().filter(|e| e.lang() == lang).collect()
    }

    pub fn references_in(&self, lang: &str) -> Vec<&Entry<Reference>> {
        self.references.iter().filter(|e| e.lang() == lang).collect()
    }

    /// Locales that have an entry with `slug` in `kind`, registry order.
    pub fn translations_of(&self, kind: CollectionKind, slug: &str) -> Vec<&str> {
        let present: BTreeSet<&str> = match kind {
            CollectionKind::Articles => langs_with_slug(&self.articles, slug),
            CollectionKind::Diseases => langs_with_slug(&self.diseases, slug),
            CollectionKind::References => langs_with_slug(&self.references, slug),
        };
        self.locales
            .iter()
            .map(|l| l.code())
            .filter(|code| present.contains(code))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.articles.len() + self.diseases.len() + self.references.len()
    }
}

fn langs_with_slug<'a, T: Localized>(entries: &'a [Entry<T>], slug: &str) -> BTreeSet<&'a str> {
    entries
        .iter()
        .filter(|e| e.slug == slug)
        .map(|e| e.lang())
        .collect()
}

/// Scan the source root into a manifest.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let registry = config.registry()?;

    let content_root = root.join(&config.content.root);
    if !content_root.is_dir() {
        return Err(ScanError::MissingContentRoot(content_root));
    }

    let collection = |kind| Collection {
        root,
        dir: content_root.join(CollectionKind::dir_name(kind)),
        kind,
        registry: &registry,
        include_drafts: config.content.include_drafts,
    };

    let articles: Vec<Entry<Article>> = collection(CollectionKind::Articles).scan()?;
    let diseases: Vec<Entry<Disease>> = collection(CollectionKind::Diseases).scan()?;
    let references: Vec<Entry<Reference>> = collection(CollectionKind::References).scan()?;
    check_reference_ids(&references)?;

    warn_dangling_links(&articles, &diseases, &references);

    info!(
        articles = articles.len(),
        diseases = diseases.len(),
        references = references.len(),
        locales = registry.len(),
        "content scanned"
    );

    Ok(Manifest {
        config,
        locales: registry,
        articles,
        diseases,
        references,
    })
}

/// One collection directory and what it takes to load it.
struct Collection<'a> {
    root: &'a Path,
    dir: PathBuf,
    kind: CollectionKind,
    registry: &'a LocaleRegistry,
    include_drafts: bool,
}

impl Collection<'_> {
    fn scan<T: DeserializeOwned + Localized>(&self) -> Result<Vec<Entry<T>>, ScanError> {
        if !self.dir.is_dir() {
            debug!(collection = %self.kind, "no collection directory, treating as empty");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for path in self.collect_documents()? {
            let entry: Entry<T> = self.load_entry(&path)?;
            if entry.data.is_draft() && !self.include_drafts {
                debug!(source = %entry.source_path, "skipping draft");
                continue;
            }
            entries.push(entry);
        }

        self.check_duplicates(&entries)?;
        let rank = |lang: &str| {
            self.registry
                .iter()
                .position(|l| l.code() == lang)
                .unwrap_or(usize::MAX)
        };
        entries.sort_by(|a, b| {
            (a.order.unwrap_or(u32::MAX), &a.slug, rank(a.lang()))
                .cmp(&(b.order.unwrap_or(u32::MAX), &b.slug, rank(b.lang())))
        });
        Ok(entries)
    }

    fn collect_documents(&self) -> Result<Vec<PathBuf>, ScanError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e));
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && self.accepts(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn accepts(&self, path: &Path) -> bool {
        let ext = extension(path);
        self.kind.extensions().contains(&ext.as_str())
    }

    fn load_entry<T: DeserializeOwned + Localized>(
        &self,
        path: &Path,
    ) -> Result<Entry<T>, ScanError> {
        let text = fs::read_to_string(path)?;
        let raw = if self.kind.is_data() {
            content::parse_data(&text, &extension(path))
        } else {
            content::parse_markdown(&text)
        }
        .map_err(|source| ScanError::Document {
            path: path.to_path_buf(),
            source,
        })?;

        let source_path = to_slash(path.strip_prefix(self.root).unwrap_or(path));
        let fields = content::validate(self.kind, &source_path, &raw.fields, self.registry)?;
        let data: T = serde_json::from_value(Value::Object(fields)).map_err(|source| {
            ScanError::Typed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let relative = to_slash(
            &path
                .strip_prefix(&self.dir)
                .unwrap_or(path)
                .with_extension(""),
        );
        let id = naming::parse_entry_id(&relative, self.registry);
        if let Some(dir) = id.locale_dir.as_deref().filter(|dir| *dir != data.lang()) {
            warn!(
                source = %source_path,
                directory = %dir,
                lang = %data.lang(),
                "locale directory does not match lang"
            );
        }

        Ok(Entry {
            id: id.id,
            slug: id.slug,
            order: id.order,
            source_path,
            body: raw.body,
            data,
        })
    }

    fn check_duplicates<T: Localized>(&self, entries: &[Entry<T>]) -> Result<(), ScanError> {
        let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
        for entry in entries {
            let key = (entry.lang(), entry.slug.as_str());
            if let Some(first) = seen.insert(key, &entry.source_path) {
                return Err(ScanError::Duplicate {
                    collection: self.kind,
                    slug: entry.slug.clone(),
                    lang: entry.lang().to_string(),
                    first: first.to_string(),
                    second: entry.source_path.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Citations resolve by `id`, so it must name exactly one reference.
fn check_reference_ids(references: &[Entry<Reference>]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for reference in references {
        if let Some(first) = seen.insert(&reference.data.id, &reference.source_path) {
            return Err(ScanError::DuplicateReferenceId {
                id: reference.data.id.clone(),
                first: first.to_string(),
                second: reference.source_path.clone(),
            });
        }
    }
    Ok(())
}

fn warn_dangling_links(
    articles: &[Entry<Article>],
    diseases: &[Entry<Disease>],
    references: &[Entry<Reference>],
) {
    let disease_slugs: BTreeSet<&str> = diseases.iter().map(|d| d.slug.as_str()).collect();
    for disease in diseases {
        for related in &disease.data.related_diseases {
            if !disease_slugs.contains(related.as_str()) {
                warn!(source = %disease.source_path, related = %related, "related disease not found");
            }
        }
    }

    let reference_ids: BTreeSet<&str> = references.iter().map(|r| r.data.id.as_str()).collect();
    let cited = articles
        .iter()
        .map(|a| (&a.source_path, &a.data.references))
        .chain(diseases.iter().map(|d| (&d.source_path, &d.data.references)));
    for (source, ids) in cited {
        for id in ids {
            if !reference_ids.contains(id.as_str()) {
                warn!(source = %source, reference = %id, "cited reference not found");
            }
        }
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Render a relative path with `/` separators on every platform.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
