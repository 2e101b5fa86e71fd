use serde::Deserialize;

use super::image::{stored_image, ImageDimensions, StoredImage};
use super::{non_empty, ModelError};

/// A staff profile, used both as an article's primary author and as the
/// record behind an author archive page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAuthor")]
pub struct Author {
    pub name: String,
    pub path: Option<String>,
    pub description: Option<String>,
    pub profile_image: Option<StoredImage>,
    pub cover_image: Option<StoredImage>,
    pub feature_image: Option<StoredImage>,
    pub website: Option<String>,
    /// Handle, usually with a leading `@`.
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

#[derive(Deserialize)]
struct RawAuthor {
    name: String,
    path: Option<String>,
    description: Option<String>,
    profile_image: Option<String>,
    cover_image: Option<String>,
    feature_image: Option<String>,
    website: Option<String>,
    twitter: Option<String>,
    facebook: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    image_dimensions: ImageDimensions,
}

impl TryFrom<RawAuthor> for Author {
    type Error = ModelError;

    fn try_from(raw: RawAuthor) -> Result<Self, Self::Error> {
        let dims = &raw.image_dimensions;
        Ok(Author {
            profile_image: stored_image(raw.profile_image, "profile_image", dims),
            cover_image: stored_image(raw.cover_image, "cover_image", dims),
            feature_image: stored_image(raw.feature_image, "feature_image", dims),
            name: raw.name,
            path: non_empty(raw.path),
            description: non_empty(raw.description),
            website: non_empty(raw.website),
            twitter: non_empty(raw.twitter),
            facebook: non_empty(raw.facebook),
        })
    }
}

impl Author {
    /// An author with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Author {
            name: name.into(),
            path: None,
            description: None,
            profile_image: None,
            cover_image: None,
            feature_image: None,
            website: None,
            twitter: None,
            facebook: None,
        }
    }
}
