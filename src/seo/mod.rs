pub mod domain;
pub mod jsonld;

// Re-export commonly used items
pub use domain::DomainReplacer;
pub use jsonld::{ComposeError, Composer, JsonLdDocument};

/// Escape text for safe embedding in HTML, including single quotes.
pub fn full_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap serialized JSON-LD in a script tag for a page head.
/// `</` inside the payload is written as `<\/` so it cannot close the tag.
pub fn to_script_tag(json: &str) -> String {
    format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        json.replace("</", "<\\/")
    )
}
