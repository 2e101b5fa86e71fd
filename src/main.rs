mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use std::fs;

use cli::Cli;
use ldcompose::config::Config;
use ldcompose::i18n::Translator;
use ldcompose::models::{ContentRecord, ContentType, SiteSettings};
use ldcompose::seo::{self, Composer};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_overrides(cli.site_url, cli.source_api_url, cli.locale);
    config.validate()?;

    let translator = if config.i18n.locales_dir.is_dir() {
        Translator::load(&config.i18n.locales_dir, &config.i18n.locale)?
    } else {
        warn!(
            "Locales directory {} not found, translated strings fall back to their keys",
            config.i18n.locales_dir.display()
        );
        Translator::empty(config.i18n.locale.as_str())
    };

    let content_type = ContentType::from(cli.content_type.as_str());

    let site_json = fs::read_to_string(&cli.site)
        .with_context(|| format!("reading {}", cli.site.display()))?;
    let site = SiteSettings::from_json(&site_json)?;

    let record = match &cli.data {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(ContentRecord::from_json(&content_type, &json)?)
        }
        None => None,
    };

    let composer = Composer::new(config.domain_replacer(), translator)
        .with_publisher(config.site.publisher_name.as_str());
    let json = composer.compose(&content_type, &site, record.as_ref())?;

    if cli.script {
        println!("{}", seo::to_script_tag(&json));
    } else {
        println!("{}", json);
    }
    Ok(())
}
