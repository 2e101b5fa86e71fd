//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

use ldcompose::config::DEFAULT_CONFIG_FILE;

/// Compose schema.org JSON-LD for a CMS page
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Page kind: index, article, author or tag
    #[arg(short = 't', long = "type")]
    pub content_type: String,

    /// Site settings JSON
    #[arg(short, long)]
    pub site: PathBuf,

    /// Page record JSON (post, author or tag)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Wrap the output in a `<script type="application/ld+json">` tag
    #[arg(long)]
    pub script: bool,

    /// Public site URL image links are rewritten onto
    #[arg(long, env = "SITE_URL")]
    pub site_url: Option<String>,

    /// CMS API origin images are stored under
    #[arg(long, env = "GHOST_API_URL")]
    pub source_api_url: Option<String>,

    /// Locale used for translated strings
    #[arg(short, long)]
    pub locale: Option<String>,
}
