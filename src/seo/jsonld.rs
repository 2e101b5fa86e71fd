//! schema.org JSON-LD documents for site, article, author and tag pages.
//!
//! A document starts from the site-wide base (publisher, cover image,
//! canonical URL) and is then reshaped by the page record, one step at a
//! time. Every step takes the document by value and returns the next one.

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::i18n::Translate;
use crate::models::{
    Article, ArticleTag, Author, ContentRecord, ContentType, ImageRef, ModelError, SiteSettings,
    StoredImage, Tag,
};

use super::domain::DomainReplacer;
use super::full_escape;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const DEFAULT_PUBLISHER: &str = "freeCodeCamp.org";

/// Translation key for the home page description.
pub const SITE_DESCRIPTION_KEY: &str = "meta:description";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("a {record} record cannot describe a `{content_type}` page")]
    RecordMismatch {
        content_type: String,
        record: &'static str,
    },

    #[error(transparent)]
    Record(#[from] ModelError),

    #[error("failed to serialize JSON-LD")]
    Serialize(#[from] serde_json::Error),

    #[error("serialized JSON-LD is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageObject {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        ImageObject {
            kind: "ImageObject",
            url: url.into(),
            width,
            height,
        }
    }
}

impl From<&ImageRef> for ImageObject {
    fn from(image: &ImageRef) -> Self {
        ImageObject::new(image.url.clone(), image.width, image.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
    pub url: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebPage {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: String,
    pub url: String,
    #[serde(rename = "sameAs")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageObject>,
}

/// A lone keyword serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Keywords {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLdDocument {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageObject>,
    pub url: String,
    pub main_entity_of_page: WebPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(rename = "sameAs", skip_serializing_if = "Option::is_none")]
    pub same_as: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl JsonLdDocument {
    /// Apply `step` only when `value` is present.
    fn when<T>(self, value: Option<T>, step: impl FnOnce(Self, T) -> Self) -> Self {
        match value {
            Some(v) => step(self, v),
            None => self,
        }
    }

    /// Serialize with tab indentation.
    pub fn to_pretty_json(&self) -> Result<String, ComposeError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Builds JSON-LD documents. Holds the collaborators every document needs:
/// the publisher name, the image host rewriter and the translation lookup.
pub struct Composer<T> {
    publisher: String,
    domain: DomainReplacer,
    translator: T,
}

impl<T: Translate> Composer<T> {
    pub fn new(domain: DomainReplacer, translator: T) -> Self {
        Composer {
            publisher: DEFAULT_PUBLISHER.to_string(),
            domain,
            translator,
        }
    }

    pub fn with_publisher(mut self, name: impl Into<String>) -> Self {
        self.publisher = name.into();
        self
    }

    /// Compose and serialize the document for a page.
    pub fn compose(
        &self,
        content_type: &ContentType,
        site: &SiteSettings,
        data: Option<&ContentRecord>,
    ) -> Result<String, ComposeError> {
        self.build(content_type, site, data)?.to_pretty_json()
    }

    /// Compose the document for a page without serializing it.
    pub fn build(
        &self,
        content_type: &ContentType,
        site: &SiteSettings,
        data: Option<&ContentRecord>,
    ) -> Result<JsonLdDocument, ComposeError> {
        let doc = self.base(content_type, site);

        let doc = match (content_type, data) {
            (ContentType::Index, record) => {
                if record.is_some() {
                    debug!("ignoring record for index page");
                }
                JsonLdDocument {
                    description: Some(self.translator.translate(SITE_DESCRIPTION_KEY)),
                    ..doc
                }
            }
            (_, None) => doc,
            (_, Some(record)) => self.apply_record(content_type, site, record, doc)?,
        };

        debug!(
            "composed {} JSON-LD for {}",
            doc.schema_type.unwrap_or("untyped"),
            doc.url
        );
        Ok(doc)
    }

    fn base(&self, content_type: &ContentType, site: &SiteSettings) -> JsonLdDocument {
        let url = site.canonical_url();
        JsonLdDocument {
            context: SCHEMA_CONTEXT,
            schema_type: content_type.schema_type(),
            publisher: Some(Organization {
                kind: "Organization",
                name: self.publisher.clone(),
                url: url.clone(),
                logo: self.site_image(&site.logo),
            }),
            image: Some(self.site_image(&site.cover_image)),
            main_entity_of_page: WebPage {
                kind: "WebPage",
                id: url.clone(),
            },
            url,
            description: None,
            date_published: None,
            date_modified: None,
            keywords: None,
            headline: None,
            author: None,
            same_as: None,
            name: None,
        }
    }

    fn site_image(&self, image: &ImageRef) -> ImageObject {
        ImageObject::new(self.domain.rewrite(&image.url), image.width, image.height)
    }

    fn apply_record(
        &self,
        content_type: &ContentType,
        site: &SiteSettings,
        record: &ContentRecord,
        doc: JsonLdDocument,
    ) -> Result<JsonLdDocument, ComposeError> {
        let doc = doc
            .when(record.path(), |doc, path| JsonLdDocument {
                url: format!("{}{}", doc.url, path.strip_prefix('/').unwrap_or(path)),
                ..doc
            })
            .when(record.description(), |doc, text| JsonLdDocument {
                description: Some(full_escape(text)),
                ..doc
            });

        let doc = match (content_type, record) {
            (ContentType::Article, ContentRecord::Article(article)) => {
                self.article(doc, site, article)?
            }
            (ContentType::Author, ContentRecord::Author(author)) => {
                self.author_page(doc, site, author)?
            }
            (ContentType::Tag, ContentRecord::Tag(tag)) => tag_page(doc, tag)?,
            (ContentType::Other(_), _) => doc,
            (content_type, record) => {
                return Err(ComposeError::RecordMismatch {
                    content_type: content_type.to_string(),
                    record: record.kind(),
                })
            }
        };
        Ok(doc)
    }

    fn article(
        &self,
        doc: JsonLdDocument,
        site: &SiteSettings,
        article: &Article,
    ) -> Result<JsonLdDocument, ComposeError> {
        let feature_image = article
            .feature_image
            .as_ref()
            .map(StoredImage::resolve)
            .transpose()?;
        let author = self.compose_author(site, &article.primary_author)?;

        let doc = doc
            .when(article.published_at, |doc, at| JsonLdDocument {
                date_published: Some(iso_timestamp(at)),
                ..doc
            })
            .when(article.updated_at, |doc, at| JsonLdDocument {
                date_modified: Some(iso_timestamp(at)),
                ..doc
            })
            .when(keywords(&article.tags), |doc, keywords| JsonLdDocument {
                keywords: Some(keywords),
                ..doc
            })
            .when(article.excerpt.as_deref(), |doc, excerpt| JsonLdDocument {
                description: Some(full_escape(excerpt)),
                ..doc
            })
            .when(article.title.as_deref(), |doc, title| JsonLdDocument {
                headline: Some(full_escape(title)),
                ..doc
            })
            .when(feature_image, |doc, image| JsonLdDocument {
                image: Some((&image).into()),
                ..doc
            });

        Ok(JsonLdDocument {
            author: Some(author),
            ..doc
        })
    }

    fn author_page(
        &self,
        doc: JsonLdDocument,
        site: &SiteSettings,
        author: &Author,
    ) -> Result<JsonLdDocument, ComposeError> {
        let person = self.compose_author(site, author)?;
        let doc = page_image(doc, author.cover_image.as_ref(), author.feature_image.as_ref())?;
        // Author pages are the only kind without publisher info.
        Ok(JsonLdDocument {
            publisher: None,
            same_as: Some(person.same_as),
            name: Some(full_escape(&person.name)),
            ..doc
        })
    }

    /// The `Person` node for an author.
    ///
    /// `url` points at the site root, not the author's own page. Only the
    /// profile image is read, so only it needs dimensions.
    pub fn compose_author(
        &self,
        site: &SiteSettings,
        person: &Author,
    ) -> Result<Person, ComposeError> {
        let same_as = [
            person.website.as_deref().map(full_escape),
            person
                .facebook
                .as_deref()
                .map(|handle| format!("https://www.facebook.com/{}", handle)),
            person
                .twitter
                .as_deref()
                .map(|handle| handle.replacen('@', "https://twitter.com/", 1)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let image = person
            .profile_image
            .as_ref()
            .map(|image| image.resolve().map(|r| ImageObject::from(&r)))
            .transpose()?;

        Ok(Person {
            kind: "Person",
            name: person.name.clone(),
            url: self.domain.rewrite(&site.canonical_url()),
            same_as,
            image,
        })
    }
}

fn tag_page(doc: JsonLdDocument, tag: &Tag) -> Result<JsonLdDocument, ComposeError> {
    let doc = page_image(doc, tag.cover_image.as_ref(), tag.feature_image.as_ref())?;
    Ok(JsonLdDocument {
        name: tag.name.clone(),
        ..doc
    })
}

/// Archive pages show their cover image, else their feature image, else none.
/// Only the image that is shown needs dimensions.
fn page_image(
    doc: JsonLdDocument,
    cover: Option<&StoredImage>,
    feature: Option<&StoredImage>,
) -> Result<JsonLdDocument, ComposeError> {
    let image = cover.or(feature).map(StoredImage::resolve).transpose()?;
    Ok(JsonLdDocument {
        image: image.as_ref().map(ImageObject::from),
        ..doc
    })
}

/// Public tag names. Only set for articles with more than one tag.
fn keywords(tags: &[ArticleTag]) -> Option<Keywords> {
    if tags.len() <= 1 {
        return None;
    }
    let mut names: Vec<String> = tags
        .iter()
        .filter(|tag| !tag.is_internal())
        .map(|tag| tag.name.clone())
        .collect();
    Some(match names.len() {
        1 => Keywords::One(names.remove(0)),
        _ => Keywords::Many(names),
    })
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
