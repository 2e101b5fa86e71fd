use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::author::Author;
use super::image::{stored_image, ImageDimensions, StoredImage};
use super::{non_empty, ModelError};

/// Tag reference carried on an article. Names starting with `#` are
/// internal tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleTag {
    pub name: String,
}

impl ArticleTag {
    pub fn is_internal(&self) -> bool {
        self.name.starts_with('#')
    }
}

/// A published article.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawArticle")]
pub struct Article {
    pub path: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<ArticleTag>,
    pub feature_image: Option<StoredImage>,
    pub primary_author: Author,
}

#[derive(Deserialize)]
struct RawArticle {
    path: Option<String>,
    title: Option<String>,
    description: Option<String>,
    excerpt: Option<String>,
    published_at: Option<String>,
    updated_at: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    tags: Vec<ArticleTag>,
    feature_image: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    image_dimensions: ImageDimensions,
    primary_author: Author,
}

impl TryFrom<RawArticle> for Article {
    type Error = ModelError;

    fn try_from(raw: RawArticle) -> Result<Self, Self::Error> {
        Ok(Article {
            feature_image: stored_image(raw.feature_image, "feature_image", &raw.image_dimensions),
            published_at: parse_timestamp("published_at", raw.published_at)?,
            updated_at: parse_timestamp("updated_at", raw.updated_at)?,
            path: non_empty(raw.path),
            title: non_empty(raw.title),
            description: non_empty(raw.description),
            excerpt: non_empty(raw.excerpt),
            tags: raw.tags,
            primary_author: raw.primary_author,
        })
    }
}

impl Article {
    /// An article with no optional fields set.
    pub fn new(primary_author: Author) -> Self {
        Article {
            path: None,
            title: None,
            description: None,
            excerpt: None,
            published_at: None,
            updated_at: None,
            tags: Vec::new(),
            feature_image: None,
            primary_author,
        }
    }
}

fn parse_timestamp(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, ModelError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&value)
        .map(|d| Some(d.with_timezone(&Utc)))
        .map_err(|source| ModelError::InvalidTimestamp {
            field,
            value,
            source,
        })
}
