//! schema.org JSON-LD metadata for CMS pages.
//!
//! [`seo::Composer`] turns site settings plus an article, author or tag
//! record into a tab-indented JSON-LD document ready for a page head.

pub mod config;
pub mod i18n;
pub mod models;
pub mod seo;
