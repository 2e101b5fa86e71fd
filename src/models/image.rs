use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ModelError;

/// Pixel size of a stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Image dimensions keyed by the record field they belong to
/// (`logo`, `cover_image`, `feature_image`, `profile_image`).
pub type ImageDimensions = HashMap<String, Dimensions>;

/// An image URL paired with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        ImageRef {
            url: url.into(),
            width,
            height,
        }
    }
}

/// An image URL as a content record carries it. Dimensions are only
/// required once the image is actually emitted, see [`StoredImage::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    field: &'static str,
    pub url: String,
    pub dimensions: Option<Dimensions>,
}

impl StoredImage {
    pub fn new(field: &'static str, url: impl Into<String>, dimensions: Option<Dimensions>) -> Self {
        StoredImage {
            field,
            url: url.into(),
            dimensions,
        }
    }

    /// An image with known dimensions.
    pub fn sized(field: &'static str, url: impl Into<String>, width: u32, height: u32) -> Self {
        StoredImage::new(field, url, Some(Dimensions { width, height }))
    }

    /// Record field the image came from.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Pair the URL with its dimensions.
    pub fn resolve(&self) -> Result<ImageRef, ModelError> {
        let d = self.dimensions.ok_or_else(|| ModelError::MissingDimensions {
            image: self.field.to_string(),
        })?;
        Ok(ImageRef::new(self.url.clone(), d.width, d.height))
    }
}

/// Pick up the image stored under `field`. An empty or absent URL yields `None`.
pub(crate) fn stored_image(
    url: Option<String>,
    field: &'static str,
    dims: &ImageDimensions,
) -> Option<StoredImage> {
    let url = url.filter(|u| !u.is_empty())?;
    Some(StoredImage::new(field, url, dims.get(field).copied()))
}

/// Pair a required image with its dimensions right away.
pub(crate) fn pair_image(
    url: Option<String>,
    field: &'static str,
    dims: &ImageDimensions,
) -> Result<Option<ImageRef>, ModelError> {
    stored_image(url, field, dims)
        .map(|image| image.resolve())
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> ImageDimensions {
        let mut map = HashMap::new();
        map.insert(
            "feature_image".to_string(),
            Dimensions {
                width: 1200,
                height: 630,
            },
        );
        map
    }

    #[test]
    fn pairs_url_with_dimensions() {
        let img = pair_image(Some("https://cdn/x.png".into()), "feature_image", &dims())
            .unwrap()
            .unwrap();
        assert_eq!(img, ImageRef::new("https://cdn/x.png", 1200, 630));
    }

    #[test]
    fn empty_url_is_absent() {
        assert!(pair_image(Some(String::new()), "feature_image", &dims())
            .unwrap()
            .is_none());
        assert!(stored_image(None, "cover_image", &dims()).is_none());
    }

    #[test]
    fn url_without_dimensions_is_rejected() {
        let err = pair_image(Some("https://cdn/c.png".into()), "cover_image", &dims()).unwrap_err();
        assert!(matches!(err, ModelError::MissingDimensions { ref image } if image == "cover_image"));
    }

    #[test]
    fn stored_image_defers_dimension_check() {
        let image = stored_image(Some("https://cdn/c.png".into()), "cover_image", &dims()).unwrap();
        assert_eq!(image.field(), "cover_image");
        assert_eq!(image.dimensions, None);
        assert!(image.resolve().is_err());

        let sized = StoredImage::sized("cover_image", "https://cdn/c.png", 10, 20);
        assert_eq!(sized.resolve().unwrap(), ImageRef::new("https://cdn/c.png", 10, 20));
    }
}
