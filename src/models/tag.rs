use serde::Deserialize;

use super::image::{stored_image, ImageDimensions, StoredImage};
use super::{non_empty, ModelError};

/// A tag archive page record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTag")]
pub struct Tag {
    pub name: Option<String>,
    pub path: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<StoredImage>,
    pub feature_image: Option<StoredImage>,
}

#[derive(Deserialize)]
struct RawTag {
    name: Option<String>,
    path: Option<String>,
    description: Option<String>,
    cover_image: Option<String>,
    feature_image: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    image_dimensions: ImageDimensions,
}

impl TryFrom<RawTag> for Tag {
    type Error = ModelError;

    fn try_from(raw: RawTag) -> Result<Self, Self::Error> {
        let dims = &raw.image_dimensions;
        Ok(Tag {
            cover_image: stored_image(raw.cover_image, "cover_image", dims),
            feature_image: stored_image(raw.feature_image, "feature_image", dims),
            name: raw.name,
            path: non_empty(raw.path),
            description: non_empty(raw.description),
        })
    }
}

impl Tag {
    pub fn named(name: impl Into<String>) -> Self {
        Tag {
            name: Some(name.into()),
            path: None,
            description: None,
            cover_image: None,
            feature_image: None,
        }
    }
}
