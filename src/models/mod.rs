//! Typed input records, deserialized from CMS JSON.

use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

pub mod author;
pub mod image;
pub mod post;
pub mod settings;
pub mod tag;

pub use author::Author;
pub use image::{Dimensions, ImageRef, StoredImage};
pub use post::{Article, ArticleTag};
pub use settings::SiteSettings;
pub use tag::Tag;

/// Errors raised while turning CMS JSON into records.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("image `{image}` has a url but no entry in image_dimensions")]
    MissingDimensions { image: String },

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("`{field}` is not an RFC 3339 timestamp: {value}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid {kind} record")]
    Json {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Treat an empty string like a missing one.
pub(crate) fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

/// Deserialize an explicit `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Page kind a document is composed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Index,
    Article,
    Author,
    Tag,
    /// Any other tag; passed through without a schema type.
    Other(String),
}

impl ContentType {
    /// schema.org type for this page kind.
    pub fn schema_type(&self) -> Option<&'static str> {
        match self {
            ContentType::Index => Some("WebSite"),
            ContentType::Article => Some("Article"),
            ContentType::Author => Some("Person"),
            ContentType::Tag => Some("Series"),
            ContentType::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Index => "index",
            ContentType::Article => "article",
            ContentType::Author => "author",
            ContentType::Tag => "tag",
            ContentType::Other(tag) => tag,
        }
    }
}

impl From<&str> for ContentType {
    fn from(tag: &str) -> Self {
        match tag {
            "index" => ContentType::Index,
            "article" => ContentType::Article,
            "author" => ContentType::Author,
            "tag" => ContentType::Tag,
            other => ContentType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every page record; used for page kinds without a
/// dedicated shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageRecord {
    pub path: Option<String>,
    pub description: Option<String>,
}

/// The record a document is composed from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRecord {
    Article(Article),
    Author(Author),
    Tag(Tag),
    Page(PageRecord),
}

impl ContentRecord {
    /// Deserialize `json` into the record shape `content_type` expects.
    pub fn from_json(content_type: &ContentType, json: &str) -> Result<Self, ModelError> {
        let record = match content_type {
            ContentType::Article => serde_json::from_str(json).map(ContentRecord::Article),
            ContentType::Author => serde_json::from_str(json).map(ContentRecord::Author),
            ContentType::Tag => serde_json::from_str(json).map(ContentRecord::Tag),
            ContentType::Index | ContentType::Other(_) => {
                serde_json::from_str::<PageRecord>(json).map(|page| {
                    ContentRecord::Page(PageRecord {
                        path: non_empty(page.path),
                        description: non_empty(page.description),
                    })
                })
            }
        };
        record.map_err(|source| ModelError::Json {
            kind: content_type.to_string(),
            source,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentRecord::Article(_) => "article",
            ContentRecord::Author(_) => "author",
            ContentRecord::Tag(_) => "tag",
            ContentRecord::Page(_) => "page",
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            ContentRecord::Article(a) => a.path.as_deref(),
            ContentRecord::Author(a) => a.path.as_deref(),
            ContentRecord::Tag(t) => t.path.as_deref(),
            ContentRecord::Page(p) => p.path.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ContentRecord::Article(a) => a.description.as_deref(),
            ContentRecord::Author(a) => a.description.as_deref(),
            ContentRecord::Tag(t) => t.description.as_deref(),
            ContentRecord::Page(p) => p.description.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_round_trips_tags() {
        for tag in ["index", "article", "author", "tag", "page"] {
            assert_eq!(ContentType::from(tag).as_str(), tag);
        }
        assert_eq!(ContentType::from("page"), ContentType::Other("page".into()));
        assert_eq!(ContentType::from("page").schema_type(), None);
        assert_eq!(ContentType::Tag.schema_type(), Some("Series"));
    }

    #[test]
    fn page_record_drops_empty_strings() {
        let record =
            ContentRecord::from_json(&ContentType::from("page"), r#"{"path":"","description":"x"}"#)
                .unwrap();
        assert_eq!(record.path(), None);
        assert_eq!(record.description(), Some("x"));
        assert_eq!(record.kind(), "page");
    }

    #[test]
    fn wrong_shape_reports_kind() {
        let err = ContentRecord::from_json(&ContentType::Tag, r#"{"path":7}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid tag record");
    }
}
