use serde::Deserialize;

use super::image::{pair_image, ImageDimensions, ImageRef};
use super::ModelError;

/// Site-wide settings as exposed by the CMS settings endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSiteSettings")]
pub struct SiteSettings {
    /// Site URL without a trailing slash.
    pub url: String,
    pub logo: ImageRef,
    pub cover_image: ImageRef,
}

#[derive(Deserialize)]
struct RawSiteSettings {
    url: String,
    logo: Option<String>,
    cover_image: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    image_dimensions: ImageDimensions,
}

impl TryFrom<RawSiteSettings> for SiteSettings {
    type Error = ModelError;

    fn try_from(raw: RawSiteSettings) -> Result<Self, Self::Error> {
        let logo = pair_image(raw.logo, "logo", &raw.image_dimensions)?
            .ok_or(ModelError::MissingField("logo"))?;
        let cover_image = pair_image(raw.cover_image, "cover_image", &raw.image_dimensions)?
            .ok_or(ModelError::MissingField("cover_image"))?;
        Ok(SiteSettings::new(raw.url, logo, cover_image))
    }
}

impl SiteSettings {
    pub fn new(url: impl Into<String>, logo: ImageRef, cover_image: ImageRef) -> Self {
        let url = url.into();
        SiteSettings {
            url: url.trim_end_matches('/').to_string(),
            logo,
            cover_image,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|source| ModelError::Json {
            kind: "site settings".to_string(),
            source,
        })
    }

    /// Site URL with exactly one trailing slash.
    pub fn canonical_url(&self) -> String {
        format!("{}/", self.url)
    }
}
