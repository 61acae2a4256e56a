//! Extraction Engine
//!
//! Turns a document and a [`Config`] into ordered [`GroupData`]:
//!
//! - **Flat mode**: one record holding every field, matched document-wide.
//! - **Grouped mode**: per group definition, one record per matched
//!   container, with member fields matched inside that container only.
//!
//! Extraction is all-or-nothing. The first field or container that matches
//! nothing aborts the run with [`Error::ElementNotFound`], and attribute read
//! failures propagate unchanged.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{Config, GroupScrapingConfig, Schema, TagScrapingConfig};
use crate::content::{self, ContentType, DEFAULT_DELIMITER};
use crate::dom::Scope;
use crate::error::{Error, Result};
use crate::tag::{self, TagDefinition};
use crate::validation;

/// Field values of one matched group container (or the whole page in flat
/// mode), in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. A repeated id replaces the earlier value in place.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((id, value)),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, value)| value.as_str())
    }

    /// Field ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(id, _)| id.as_str())
    }

    /// `(id, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(id, value)| (id.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (id, value) in iter {
            record.insert(id, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (id, value) in &self.fields {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

/// Output of one group definition, or the single flat-mode result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupData {
    /// One record per matched container, in document order.
    pub results: Vec<Record>,
    /// Group id; `None` in flat mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Render extraction results as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if serialization fails.
pub fn to_json_pretty(data: &[GroupData]) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(Error::Serialize)
}

/// Field definitions belonging to a group, in `tags` order.
///
/// Ids in `contains` with no matching field are ignored.
#[must_use]
pub fn group_tags<'c>(contains: &[String], tags: &'c [TagScrapingConfig]) -> Vec<&'c TagScrapingConfig> {
    tags.iter().filter(|tag| contains.contains(&tag.id)).collect()
}

/// Locate every match of `def` below `scope` and join what is read from them.
///
/// # Errors
///
/// [`Error::ElementNotFound`] when nothing matches, or the first
/// [`Error::AttributeMissing`] raised while reading.
pub fn extract_tag<S: Scope + ?Sized>(
    scope: &S,
    def: &TagDefinition,
    content_type: &ContentType,
) -> Result<String> {
    let elements = tag::locate(scope, def);
    if elements.is_empty() {
        return Err(Error::ElementNotFound { tag: def.clone() });
    }

    let values = elements
        .iter()
        .map(|el| content::read(el, content_type))
        .collect::<Result<Vec<_>>>()?;

    trace!(matches = values.len(), %def, "extracted field");
    Ok(content::concatenate(&values, DEFAULT_DELIMITER))
}

/// Extraction engine bound to one config.
///
/// # Example
///
/// ```rust
/// use rs_tagscrape::{dom, Config, Scraper};
///
/// let config = Config::from_yaml_str(r#"
/// scraping:
///   tags:
///     - id: title
///       tag: {name: h1}
/// "#)?;
/// let doc = dom::parse("<h1>  Hello\n world </h1>");
///
/// let data = Scraper::new(&config).extract(&doc)?;
/// assert_eq!(data[0].results[0].get("title"), Some("Hello world"));
/// # Ok::<(), rs_tagscrape::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scraper<'c> {
    config: &'c Config,
}

impl<'c> Scraper<'c> {
    #[must_use]
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Run the config's validation checks; `true` when none are configured.
    pub fn can_scrape<S: Scope + ?Sized>(&self, scope: &S) -> bool {
        self.config
            .validation
            .as_ref()
            .is_none_or(|validation| validation::validate(scope, validation))
    }

    /// Extract all records from `scope`.
    ///
    /// # Errors
    ///
    /// See [`extract_tag`]; any failure aborts the whole extraction.
    pub fn extract<S: Scope + ?Sized>(&self, scope: &S) -> Result<Vec<GroupData>> {
        match &self.config.scraping {
            Schema::Flat { tags } => {
                debug!(fields = tags.len(), "extracting in flat mode");
                Ok(vec![Self::extract_tags(scope, tags)?])
            }
            Schema::Grouped { tags, groups } => {
                debug!(groups = groups.len(), "extracting in grouped mode");
                groups
                    .iter()
                    .map(|group| Self::extract_group(scope, group, tags))
                    .collect()
            }
        }
    }

    fn extract_tags<S: Scope + ?Sized>(scope: &S, tags: &[TagScrapingConfig]) -> Result<GroupData> {
        Ok(GroupData {
            results: vec![Self::extract_record(scope, tags.iter())?],
            group_id: None,
        })
    }

    fn extract_group<S: Scope + ?Sized>(
        scope: &S,
        group: &GroupScrapingConfig,
        tags: &[TagScrapingConfig],
    ) -> Result<GroupData> {
        let containers = tag::locate(scope, &group.tag);
        if containers.is_empty() {
            return Err(Error::ElementNotFound {
                tag: group.tag.clone(),
            });
        }

        let members = group_tags(&group.contains, tags);
        debug!(
            group = %group.id,
            containers = containers.len(),
            fields = members.len(),
            "extracting group"
        );

        let results = containers
            .iter()
            .map(|container| Self::extract_record(container, members.iter().copied()))
            .collect::<Result<Vec<_>>>()?;

        Ok(GroupData {
            results,
            group_id: Some(group.id.clone()),
        })
    }

    fn extract_record<'t, S: Scope + ?Sized>(
        scope: &S,
        tags: impl Iterator<Item = &'t TagScrapingConfig>,
    ) -> Result<Record> {
        let mut record = Record::new();
        for field in tags {
            let value = extract_tag(scope, &field.tag, &field.content_type)?;
            record.insert(field.id.clone(), value);
        }
        Ok(record)
    }
}
