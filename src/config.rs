//! `ldcompose.toml` configuration.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::seo::jsonld::DEFAULT_PUBLISHER;
use crate::seo::DomainReplacer;

pub const DEFAULT_CONFIG_FILE: &str = "ldcompose.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("`{field}` is not a valid URL: {value}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub site: SiteConfig,
    pub i18n: I18nConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public site URL image links are rewritten onto.
    pub url: Option<String>,
    /// CMS API origin images are stored under.
    pub source_api_url: Option<String>,
    pub publisher_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            url: None,
            source_api_url: None,
            publisher_name: DEFAULT_PUBLISHER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    pub locales_dir: PathBuf,
    pub locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        I18nConfig {
            locales_dir: PathBuf::from("locales"),
            locale: "en".to_string(),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&text)
    }

    /// Load `path`, or fall back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Command-line and environment values win over the file.
    pub fn with_overrides(
        mut self,
        site_url: Option<String>,
        source_api_url: Option<String>,
        locale: Option<String>,
    ) -> Self {
        if site_url.is_some() {
            self.site.url = site_url;
        }
        if source_api_url.is_some() {
            self.site.source_api_url = source_api_url;
        }
        if let Some(locale) = locale {
            self.i18n.locale = locale;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("site.url", self.site.url.as_deref())?;
        check_url("site.source_api_url", self.site.source_api_url.as_deref())?;
        if self.site.publisher_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.publisher_name must not be empty".to_string(),
            ));
        }
        if self.i18n.locale.trim().is_empty() {
            return Err(ConfigError::Validation("i18n.locale must not be empty".to_string()));
        }
        Ok(())
    }

    /// Image host rewriter; a no-op unless both hosts are configured.
    pub fn domain_replacer(&self) -> DomainReplacer {
        match (&self.site.source_api_url, &self.site.url) {
            (Some(source), Some(target)) => DomainReplacer::new(source.as_str(), target.as_str()),
            _ => DomainReplacer::identity(),
        }
    }
}

fn check_url(field: &'static str, value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(value) = value {
        Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            source,
        })?;
    }
    Ok(())
}
