//! # rs-tagscrape
//!
//! Declarative extraction of structured records from HTML documents.
//!
//! A [`Config`] names the elements to locate (by element name and attribute
//! values), what to read from them (text or an attribute), how matches group
//! into records, and which checks a page must pass before its results are
//! trusted.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_tagscrape::{can_extract, dom, extract, Config};
//!
//! let config = Config::from_yaml_str(r#"
//! scraping:
//!   tags:
//!     - id: link
//!       tag: {name: a}
//!       content_type: href
//!     - id: headline
//!       tag: {attrs: {class: headline}}
//!   groups:
//!     - id: teaser
//!       contains: [link, headline]
//!       tag: {name: div, attrs: {class: teaser}}
//! validation:
//!   existing_tags: [{name: div, attrs: {class: teaser}}]
//! "#)?;
//!
//! let doc = dom::parse(r#"
//!     <div class="teaser"><a href="/one"><span class="headline">One</span></a></div>
//!     <div class="teaser"><a href="/two"><span class="headline">Two</span></a></div>
//! "#);
//!
//! assert!(can_extract(&doc, &config));
//! let data = extract(&doc, &config)?;
//! assert_eq!(data[0].group_id.as_deref(), Some("teaser"));
//! assert_eq!(data[0].results[1].get("link"), Some("/two"));
//! # Ok::<(), rs_tagscrape::Error>(())
//! ```
//!
//! ## Modes
//!
//! - **Flat**: no groups configured. One record holding every field, each
//!   matched across the whole document.
//! - **Grouped**: one [`GroupData`] per group definition, holding one record
//!   per matched container. Fields are matched inside the container only.
//!
//! When a field matches several elements their values are joined with `|`.
//! A field or container that matches nothing aborts the extraction.

mod error;

/// Document tree adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Element-matching predicates.
pub mod tag;

/// Reading text or attribute values from matched elements.
pub mod content;

/// Page shape checks run before extraction.
pub mod validation;

/// Extraction schema and config file loading.
pub mod config;

/// Extraction engine.
pub mod scraper;

/// Date-derived output paths and file names.
pub mod fileutils;

// Public API - re-exports
pub use config::{
    load_config, Config, ConfigReader, GroupScrapingConfig, Schema, ScrapingConfig,
    TagScrapingConfig,
};
pub use content::ContentType;
pub use error::{Error, Result};
pub use scraper::{GroupData, Record, Scraper};
pub use tag::{AttrValue, TagDefinition};
pub use validation::{ExistingStringInTag, ValidationConfig};

use dom::Document;

/// Whether `doc` passes the config's validation checks.
///
/// Always `true` when the config has no `validation` section. A `false`
/// verdict is not an error; callers decide whether to extract anyway.
#[must_use]
pub fn can_extract(doc: &Document, config: &Config) -> bool {
    Scraper::new(config).can_scrape(doc)
}

/// Extract all records from a parsed document.
///
/// # Errors
///
/// Returns [`Error::ElementNotFound`] when a field or group container matches
/// nothing, and [`Error::AttributeMissing`] when a matched element lacks the
/// attribute a field reads. No partial output is returned.
pub fn extract(doc: &Document, config: &Config) -> Result<Vec<GroupData>> {
    Scraper::new(config).extract(doc)
}

/// Parse `html` and extract all records from it.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_html(html: &str, config: &Config) -> Result<Vec<GroupData>> {
    extract(&dom::parse(html), config)
}

/// Decode raw HTML bytes using their declared charset, then extract.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_bytes(html: &[u8], config: &Config) -> Result<Vec<GroupData>> {
    extract(&dom::parse_bytes(html), config)
}
