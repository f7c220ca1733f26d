//! Typed content entries.
//!
//! These are what a validated document deserializes into, and what the scan
//! manifest serializes. Field names follow the authored front matter
//! (`pubDate`, `relatedDiseases`), hence `camelCase`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Site section an article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSection {
    Hypothesis,
    Science,
    Evidence,
    Background,
}

impl ArticleSection {
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleSection::Hypothesis => "hypothesis",
            ArticleSection::Science => "science",
            ArticleSection::Evidence => "evidence",
            ArticleSection::Background => "background",
        }
    }
}

/// Disease classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseCategory {
    /// Anti-ganglioside antibody disorders
    Autoimmune,
    /// Lysosomal storage diseases
    Storage,
    /// Pathogen-associated
    Infectious,
    Neurodegenerative,
    Sleep,
    Other,
}

impl DiseaseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiseaseCategory::Autoimmune => "autoimmune",
            DiseaseCategory::Storage => "storage",
            DiseaseCategory::Infectious => "infectious",
            DiseaseCategory::Neurodegenerative => "neurodegenerative",
            DiseaseCategory::Sleep => "sleep",
            DiseaseCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Article {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<NaiveDate>,
    pub section: ArticleSection,
    pub lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub draft: bool,
    /// Reference ids cited by the article.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Disease {
    pub title: String,
    pub description: String,
    pub category: DiseaseCategory,
    /// e.g. `["gq1b", "gt1b"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gangliosides: Vec<String>,
    /// e.g. `["Anti-GQ1b IgG"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antibodies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prognosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10: Option<String>,
    /// Orphanet code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orpha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omim: Option<String>,
    pub lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<NaiveDate>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    /// Slugs of other disease entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_diseases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differential_diagnosis: Vec<String>,
}

/// A bibliography entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Reference {
    pub id: String,
    pub authors: String,
    pub year: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub lang: String,
}

/// Shared accessors the scan needs from every entry type.
pub trait Localized {
    fn lang(&self) -> &str;
    fn title(&self) -> &str;
    fn is_draft(&self) -> bool {
        false
    }
}

impl Localized for Article {
    fn lang(&self) -> &str {
        &self.lang
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn is_draft(&self) -> bool {
        self.draft
    }
}

impl Localized for Disease {
    fn lang(&self) -> &str {
        &self.lang
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn is_draft(&self) -> bool {
        self.draft
    }
}

impl Localized for Reference {
    fn lang(&self) -> &str {
        &self.lang
    }
    fn title(&self) -> &str {
        &self.title
    }
}

/// A validated document plus where it came from.
///
/// Entries that describe the same page in different locales share a `slug`;
/// nothing else links them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    /// Path inside the collection directory without extension, e.g. `sv/020-overview`.
    pub id: String,
    /// Locale-free, order-free name, e.g. `overview`.
    pub slug: String,
    /// Sort key from an `NNN-` file name prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Path relative to the source root.
    pub source_path: String,
    /// Markdown body; empty for data documents.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    pub data: T,
}

impl<T: Localized> Entry<T> {
    pub fn lang(&self) -> &str {
        self.data.lang()
    }
}
