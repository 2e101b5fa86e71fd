//! Localized strings.
//!
//! Catalogs are JSON files laid out as `<locales_dir>/<locale>/<namespace>.json`.
//! Keys are written `namespace:dotted.path` (`meta:description`); a key
//! without a namespace is looked up in `translation`.

use log::{debug, info, warn};
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "translation";
pub const FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("locale file `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Lookup of a localized string by key.
pub trait Translate: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

type Catalog = HashMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: String,
    namespaces: Catalog,
    fallback: Option<Catalog>,
}

impl Translator {
    /// A translator with no strings; every lookup returns its key.
    pub fn empty(locale: impl Into<String>) -> Self {
        Translator {
            locale: locale.into(),
            ..Default::default()
        }
    }

    /// Build a catalog in memory from namespace name to JSON tree.
    pub fn from_map(locale: impl Into<String>, namespaces: HashMap<String, Value>) -> Self {
        Translator {
            locale: locale.into(),
            namespaces,
            fallback: None,
        }
    }

    /// Load every namespace for `locale` from `dir`. Keys missing there are
    /// looked up in the English catalog when one exists.
    pub fn load(dir: &Path, locale: &str) -> Result<Self, I18nError> {
        let namespaces = load_catalog(&dir.join(locale))?;
        info!("Loaded {} namespace(s) for locale {}", namespaces.len(), locale);

        let fallback_dir = dir.join(FALLBACK_LOCALE);
        let fallback = if locale != FALLBACK_LOCALE && fallback_dir.is_dir() {
            Some(load_catalog(&fallback_dir)?)
        } else {
            None
        };

        Ok(Translator {
            locale: locale.to_string(),
            namespaces,
            fallback,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Look up `key`, trying the fallback catalog second.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let (namespace, path) = key.split_once(':').unwrap_or((DEFAULT_NAMESPACE, key));
        find(&self.namespaces, namespace, path).or_else(|| {
            let found = find(self.fallback.as_ref()?, namespace, path);
            if found.is_some() {
                debug!("{} missing for {}, using {}", key, self.locale, FALLBACK_LOCALE);
            }
            found
        })
    }

    /// Translate `key` and fill `{{name}}` placeholders from `vars`.
    /// Placeholders with no matching variable are kept as written.
    pub fn translate_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let text = self.translate(key);
        placeholder_re()
            .replace_all(&text, |caps: &Captures| {
                vars.iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

impl Translate for Translator {
    fn translate(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text.to_string(),
            None => {
                warn!("Missing translation for {} in locale {}", key, self.locale);
                key.to_string()
            }
        }
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("placeholder pattern is valid")
    })
}

fn find<'a>(catalog: &'a Catalog, namespace: &str, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(catalog.get(namespace)?, |node, segment| node.get(segment))?
        .as_str()
}

fn load_catalog(dir: &Path) -> Result<Catalog, I18nError> {
    let entries = fs::read_dir(dir).map_err(|e| I18nError::Io(dir.to_path_buf(), e))?;
    let mut catalog = HashMap::new();

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().map(|ext| ext != "json").unwrap_or(true) {
            continue;
        }
        let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = fs::read_to_string(&path).map_err(|e| I18nError::Io(path.clone(), e))?;
        let tree: Value =
            serde_json::from_str(&text).map_err(|e| I18nError::Json(path.clone(), e))?;
        catalog.insert(namespace.to_string(), tree);
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, locale: &str, namespace: &str, body: &str) {
        let locale_dir = dir.join(locale);
        fs::create_dir_all(&locale_dir).unwrap();
        fs::write(locale_dir.join(format!("{namespace}.json")), body).unwrap();
    }

    #[test]
    fn namespaced_and_nested_keys() {
        let t = Translator::from_map(
            "en",
            HashMap::from([
                ("meta".to_string(), json!({"description": "Learn to code"})),
                ("translation".to_string(), json!({"buttons": {"menu": "Menu"}})),
            ]),
        );
        assert_eq!(t.translate("meta:description"), "Learn to code");
        assert_eq!(t.translate("buttons.menu"), "Menu");
        assert_eq!(t.lookup("buttons"), None);
    }

    #[test]
    fn missing_key_returns_key() {
        let t = Translator::empty("en");
        assert_eq!(t.translate("meta:description"), "meta:description");
    }

    #[test]
    fn interpolates_known_placeholders() {
        let t = Translator::from_map(
            "en",
            HashMap::from([(
                "translation".to_string(),
                json!({"by": "By {{ name }} in {{topic}} ({{missing}})"}),
            )]),
        );
        assert_eq!(
            t.translate_with("by", &[("name", "Quincy"), ("topic", "Rust")]),
            "By Quincy in Rust ({{missing}})"
        );
    }

    #[test]
    fn load_reads_namespaces_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en", "meta", r#"{"description":"English","title":"Home"}"#);
        write(dir.path(), "es", "meta", r#"{"description":"Español"}"#);
        fs::write(dir.path().join("es").join("README.md"), "ignored").unwrap();

        let t = Translator::load(dir.path(), "es").unwrap();
        assert_eq!(t.locale(), "es");
        assert_eq!(t.translate("meta:description"), "Español");
        assert_eq!(t.translate("meta:title"), "Home");
    }

    #[test]
    fn load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en", "meta", "{not json");
        let err = Translator::load(dir.path(), "en").unwrap_err();
        assert!(matches!(err, I18nError::Json(..)));
    }

    #[test]
    fn load_missing_locale_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Translator::load(dir.path(), "fr").unwrap_err();
        assert!(matches!(err, I18nError::Io(..)));
        assert!(err.to_string().contains("fr"));
    }
}
