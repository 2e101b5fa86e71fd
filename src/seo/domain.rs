/// Rewrites image URLs served from the CMS API host onto the public site.
///
/// All images, the site logo included, live under the same directory
/// structure on both hosts, so only the origin prefix changes. URLs that do
/// not start with the source host pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainReplacer {
    source: Option<String>,
    target: String,
}

impl DomainReplacer {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        DomainReplacer {
            source: Some(source.trim_end_matches('/').to_string()).filter(|s| !s.is_empty()),
            target: target.trim_end_matches('/').to_string(),
        }
    }

    /// A replacer that leaves every URL alone.
    pub fn identity() -> Self {
        DomainReplacer::default()
    }

    pub fn rewrite(&self, url: &str) -> String {
        let Some(source) = self.source.as_deref() else {
            return url.to_string();
        };
        match url.strip_prefix(source) {
            // Only whole host matches: `https://cms.a.org` must not eat `https://cms.a.organic`.
            Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => {
                format!("{}{}", self.target, rest)
            }
            _ => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacer() -> DomainReplacer {
        DomainReplacer::new("https://cms.example.org/", "https://www.example.org/news")
    }

    #[test]
    fn rewrites_source_host_prefix() {
        assert_eq!(
            replacer().rewrite("https://cms.example.org/content/images/2024/logo.png"),
            "https://www.example.org/news/content/images/2024/logo.png"
        );
    }

    #[test]
    fn passes_through_foreign_urls() {
        let url = "https://cdn.other.net/content/images/a.png";
        assert_eq!(replacer().rewrite(url), url);
    }

    #[test]
    fn requires_host_boundary() {
        let url = "https://cms.example.organic/a.png";
        assert_eq!(replacer().rewrite(url), url);
    }

    #[test]
    fn bare_host_rewrites() {
        assert_eq!(replacer().rewrite("https://cms.example.org"), "https://www.example.org/news");
    }

    #[test]
    fn identity_is_noop() {
        let url = "https://cms.example.org/a.png";
        assert_eq!(DomainReplacer::identity().rewrite(url), url);
        assert_eq!(DomainReplacer::new("", "https://x").rewrite(url), url);
    }
}
