//! Content-collection schemas and validation.
//!
//! The site has three collections, each a directory under the content root:
//!
//! | Collection | Files | Shape |
//! |------------|-------|-------|
//! | `articles` | `.md` / `.mdx` with YAML front matter | [`ARTICLE_SCHEMA`] |
//! | `diseases` | `.md` / `.mdx` with YAML front matter | [`DISEASE_SCHEMA`] |
//! | `references` | `.json` / `.yaml` / `.yml` data files | [`REFERENCE_SCHEMA`] |
//!
//! Each schema is a flat list of [`FieldSpec`] descriptors. [`validate`] walks
//! the descriptors over a parsed document and stops at the first problem,
//! reporting the document, the field and what was expected. A document that
//! passes comes back normalized (nulls dropped, dates as `YYYY-MM-DD`) and is
//! ready to deserialize into the typed entries in [`crate::types`].
//!
//! Unknown fields are rejected, same as unknown keys in `site.toml`.

use crate::locale::LocaleRegistry;
use chrono::{DateTime, NaiveDate};
use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The three content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Articles,
    Diseases,
    References,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Articles,
        CollectionKind::Diseases,
        CollectionKind::References,
    ];

    /// Directory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            CollectionKind::Articles => "articles",
            CollectionKind::Diseases => "diseases",
            CollectionKind::References => "references",
        }
    }

    pub fn schema(self) -> &'static [FieldSpec] {
        match self {
            CollectionKind::Articles => ARTICLE_SCHEMA,
            CollectionKind::Diseases => DISEASE_SCHEMA,
            CollectionKind::References => REFERENCE_SCHEMA,
        }
    }

    /// File extensions (lowercase) that belong to this collection.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            CollectionKind::Articles | CollectionKind::Diseases => &["md", "mdx"],
            CollectionKind::References => &["json", "yaml", "yml"],
        }
    }

    /// Whether documents are pure data rather than front matter + body.
    pub fn is_data(self) -> bool {
        self == CollectionKind::References
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Any numeric value with no fractional part; `2015.0` becomes `2015`.
    Number,
    Bool,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    Date,
    StringList,
    Enum(&'static [&'static str]),
    /// A code from the locale registry.
    Locale,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Number => "a whole number",
            FieldKind::Bool => "a boolean",
            FieldKind::Date => "a date (YYYY-MM-DD)",
            FieldKind::StringList => "a list of strings",
            FieldKind::Enum(_) => "one of the listed values",
            FieldKind::Locale => "a registered locale code",
        }
    }
}

/// One field of a collection schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
    }
}

pub const ARTICLE_SECTIONS: &[&str] = &["hypothesis", "science", "evidence", "background"];

pub const DISEASE_CATEGORIES: &[&str] = &[
    "autoimmune",
    "storage",
    "infectious",
    "neurodegenerative",
    "sleep",
    "other",
];

pub const ARTICLE_SCHEMA: &[FieldSpec] = &[
    required("title", FieldKind::String),
    required("description", FieldKind::String),
    optional("pubDate", FieldKind::Date),
    optional("updatedDate", FieldKind::Date),
    required("section", FieldKind::Enum(ARTICLE_SECTIONS)),
    required("lang", FieldKind::Locale),
    optional("author", FieldKind::String),
    optional("draft", FieldKind::Bool),
    optional("references", FieldKind::StringList),
];

pub const DISEASE_SCHEMA: &[FieldSpec] = &[
    required("title", FieldKind::String),
    required("description", FieldKind::String),
    required("category", FieldKind::Enum(DISEASE_CATEGORIES)),
    optional("gangliosides", FieldKind::StringList),
    optional("antibodies", FieldKind::StringList),
    optional("symptoms", FieldKind::StringList),
    optional("triggers", FieldKind::StringList),
    optional("prognosis", FieldKind::String),
    optional("icd10", FieldKind::String),
    optional("orpha", FieldKind::String),
    optional("omim", FieldKind::String),
    required("lang", FieldKind::Locale),
    optional("pubDate", FieldKind::Date),
    optional("updatedDate", FieldKind::Date),
    optional("draft", FieldKind::Bool),
    optional("references", FieldKind::StringList),
    optional("relatedDiseases", FieldKind::StringList),
    optional("differentialDiagnosis", FieldKind::StringList),
];

pub const REFERENCE_SCHEMA: &[FieldSpec] = &[
    required("id", FieldKind::String),
    required("authors", FieldKind::String),
    required("year", FieldKind::Number),
    required("title", FieldKind::String),
    optional("journal", FieldKind::String),
    optional("volume", FieldKind::String),
    optional("pages", FieldKind::String),
    optional("doi", FieldKind::String),
    optional("pmid", FieldKind::String),
    optional("url", FieldKind::String),
    required("lang", FieldKind::Locale),
];

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    Missing,
    WrongType { expected: &'static str },
    NotInEnum {
        value: String,
        allowed: &'static [&'static str],
    },
    UnknownLocale { value: String, allowed: Vec<String> },
    UnknownField,
    NotAMapping,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Missing => write!(f, "is required but missing"),
            Problem::WrongType { expected } => write!(f, "must be {expected}"),
            Problem::NotInEnum { value, allowed } => {
                write!(f, "has value {value:?}, expected one of: {}", allowed.join(", "))
            }
            Problem::UnknownLocale { value, allowed } => write!(
                f,
                "has unregistered locale {value:?}, expected one of: {}",
                allowed.join(", ")
            ),
            Problem::UnknownField => write!(f, "is not a known field"),
            Problem::NotAMapping => write!(f, "must be a mapping of fields"),
        }
    }
}

/// A document failed its collection schema. Fatal for the build.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {collection} document {document}: field `{field}` {problem}")]
pub struct SchemaValidationError {
    pub collection: CollectionKind,
    pub document: String,
    pub field: String,
    pub problem: Problem,
}

/// Validate a parsed document against its collection schema.
///
/// On success returns the normalized field map: null values removed and
/// dates rewritten as `YYYY-MM-DD`.
pub fn validate(
    kind: CollectionKind,
    document: &str,
    value: &Value,
    registry: &LocaleRegistry,
) -> Result<Map<String, Value>, SchemaValidationError> {
    let fail = |field: &str, problem: Problem| SchemaValidationError {
        collection: kind,
        document: document.to_string(),
        field: field.to_string(),
        problem,
    };

    let Some(fields) = value.as_object() else {
        return Err(fail("(document)", Problem::NotAMapping));
    };

    let schema = kind.schema();
    let mut normalized = Map::new();

    for spec in schema {
        match fields.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(fail(spec.name, Problem::Missing));
                }
            }
            Some(field_value) => {
                let coerced =
                    check_field(spec.kind, field_value, registry).map_err(|p| fail(spec.name, p))?;
                normalized.insert(spec.name.to_string(), coerced);
            }
        }
    }

    if let Some(unknown) = fields.keys().find(|k| !schema.iter().any(|s| s.name == *k)) {
        return Err(fail(unknown, Problem::UnknownField));
    }

    Ok(normalized)
}

fn check_field(kind: FieldKind, value: &Value, registry: &LocaleRegistry) -> Result<Value, Problem> {
    let wrong_type = || Problem::WrongType {
        expected: kind.expected(),
    };
    match kind {
        FieldKind::String if value.is_string() => Ok(value.clone()),
        FieldKind::Number => whole_number(value).ok_or_else(wrong_type),
        FieldKind::Bool if value.is_boolean() => Ok(value.clone()),
        FieldKind::Date => value
            .as_str()
            .and_then(parse_date)
            .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
            .ok_or_else(wrong_type),
        FieldKind::StringList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Ok(value.clone()),
            _ => Err(wrong_type()),
        },
        FieldKind::Enum(allowed) => {
            let text = value.as_str().ok_or_else(wrong_type)?;
            if allowed.contains(&text) {
                Ok(value.clone())
            } else {
                Err(Problem::NotInEnum {
                    value: text.to_string(),
                    allowed,
                })
            }
        }
        FieldKind::Locale => {
            let code = value.as_str().ok_or_else(wrong_type)?;
            if registry.contains(code) {
                Ok(value.clone())
            } else {
                Err(Problem::UnknownLocale {
                    value: code.to_string(),
                    allowed: registry.codes().into_iter().map(String::from).collect(),
                })
            }
        }
        _ => Err(wrong_type()),
    }
}

fn whole_number(value: &Value) -> Option<Value> {
    if value.is_i64() || value.is_u64() {
        return Some(value.clone());
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && float.abs() <= i64::MAX as f64 {
        Some(Value::from(float as i64))
    } else {
        None
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

// =============================================================================
// Document parsing
// =============================================================================

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("missing front matter (expected a `---` fenced YAML block at the top)")]
    MissingFrontMatter,
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A document split into its fields and (for markdown) its body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub fields: Value,
    pub body: String,
}

/// Parse a markdown document: `---` fenced YAML front matter, then the body.
pub fn parse_markdown(text: &str) -> Result<RawDocument, DocumentError> {
    let (front, body) = split_front_matter(text).ok_or(DocumentError::MissingFrontMatter)?;
    let fields: Value = serde_yaml::from_str(&front)?;
    Ok(RawDocument {
        fields,
        body: body.to_string(),
    })
}

/// Parse a data document by extension (`json`, `yaml`, `yml`).
pub fn parse_data(text: &str, extension: &str) -> Result<RawDocument, DocumentError> {
    let fields: Value = if extension.eq_ignore_ascii_case("json") {
        serde_json::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    };
    Ok(RawDocument {
        fields,
        body: String::new(),
    })
}

/// Split `---\n<yaml>\n---\n<body>` into its two parts.
///
/// The block must open the document; anything else before it means there is
/// no front matter.
fn split_front_matter(text: &str) -> Option<(String, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let events =
        Parser::new_ext(text, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS).into_offset_iter();

    let mut front = String::new();
    let mut inside = false;
    for (event, range) in events {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => inside = true,
            Event::Text(chunk) if inside => front.push_str(&chunk),
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                let body = &text[range.end..];
                return Some((front, body.trim_start_matches(['\r', '\n'])));
            }
            _ => return None,
        }
    }
    None
}
