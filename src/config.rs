//! Extraction schema and config loading.
//!
//! A config document has a `scraping` section (field definitions plus
//! optional groups) and an optional `validation` section:
//!
//! ```yaml
//! scraping:
//!   tags:
//!     - id: article_link
//!       tag: {name: a, attrs: {class: teaser-right__link}}
//!       content_type: href
//!   groups:
//!     - id: teaser
//!       contains: [article_link]
//!       tag: {name: div, attrs: {class: teaser-right twelve}}
//! validation:
//!   existing_tags: [{name: div, attrs: {class: teaser-right twelve}}]
//! ```
//!
//! Files ending in `.json` or `.jsonl` are read as JSON, everything else as
//! YAML. Both are parsed into the same untyped tree before typing, so
//! equivalent documents load into equal [`Config`] values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::ContentType;
use crate::error::{Error, Result};
use crate::tag::TagDefinition;
use crate::validation::ValidationConfig;

/// One extracted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagScrapingConfig {
    pub id: String,
    pub tag: TagDefinition,
    #[serde(default)]
    pub content_type: ContentType,
}

/// A repeating container; each match yields one record of the `contains` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupScrapingConfig {
    pub id: String,
    pub contains: Vec<String>,
    pub tag: TagDefinition,
}

/// The `scraping` section as written in config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapingConfig {
    pub tags: Vec<TagScrapingConfig>,
    #[serde(default)]
    pub groups: Option<Vec<GroupScrapingConfig>>,
}

/// The `scraping` section with its extraction mode resolved.
///
/// A missing or empty `groups` list selects [`Schema::Flat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScrapingConfig", into = "ScrapingConfig")]
pub enum Schema {
    /// One record built from document-wide matches of every field.
    Flat { tags: Vec<TagScrapingConfig> },
    /// One record set per group, fields searched inside each container.
    Grouped {
        tags: Vec<TagScrapingConfig>,
        groups: Vec<GroupScrapingConfig>,
    },
}

impl From<ScrapingConfig> for Schema {
    fn from(raw: ScrapingConfig) -> Self {
        match raw.groups {
            Some(groups) if !groups.is_empty() => Self::Grouped {
                tags: raw.tags,
                groups,
            },
            _ => Self::Flat { tags: raw.tags },
        }
    }
}

impl From<Schema> for ScrapingConfig {
    fn from(schema: Schema) -> Self {
        match schema {
            Schema::Flat { tags } => Self { tags, groups: None },
            Schema::Grouped { tags, groups } => Self {
                tags,
                groups: Some(groups),
            },
        }
    }
}

impl Schema {
    /// All field definitions in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[TagScrapingConfig] {
        match self {
            Self::Flat { tags } | Self::Grouped { tags, .. } => tags,
        }
    }

    /// Group definitions; empty in flat mode.
    #[must_use]
    pub fn groups(&self) -> &[GroupScrapingConfig] {
        match self {
            Self::Flat { .. } => &[],
            Self::Grouped { groups, .. } => groups,
        }
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped { .. })
    }
}

/// Root of a config document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub scraping: Schema,
    #[serde(default)]
    pub validation: Option<ValidationConfig>,
}

impl Config {
    /// Type an untyped config tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] if the top level is not a mapping or
    /// a field is missing or mistyped.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        ensure_mapping(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a YAML config document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] on invalid YAML or schema mismatch.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_value(SourceFormat::Yaml.parse(text)?)
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] on invalid JSON or schema mismatch.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(SourceFormat::Json.parse(text)?)
    }
}

fn ensure_mapping(value: &serde_json::Value) -> Result<()> {
    if value.is_object() {
        return Ok(());
    }
    let found = match value {
        serde_json::Value::Null => "nothing",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a mapping",
    };
    Err(Error::ConfigFormat(format!(
        "top level of config must be a mapping, found {found}"
    )))
}

/// Syntax of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Pick the syntax from the file extension, defaulting to YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json" | "jsonl") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Parse text into an untyped tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] when the text is not valid in this syntax.
    pub fn parse(self, text: &str) -> Result<serde_json::Value> {
        let value = match self {
            Self::Yaml => serde_yaml_ng::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        Ok(value)
    }
}

/// Reads a config file from disk.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    path: PathBuf,
    format: SourceFormat,
}

impl ConfigReader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SourceFormat::from_path(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Read the raw, untyped config tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] if the file cannot be read and
    /// [`Error::ConfigFormat`] if it does not parse to a mapping.
    pub fn read(&self) -> Result<serde_json::Value> {
        let text = fs::read_to_string(&self.path).map_err(|source| Error::ConfigRead {
            path: self.path.clone(),
            source,
        })?;
        let value = self.format.parse(&text)?;
        ensure_mapping(&value)?;
        Ok(value)
    }

    /// Read and type the config.
    ///
    /// # Errors
    ///
    /// See [`ConfigReader::read`] and [`Config::from_value`].
    pub fn load(&self) -> Result<Config> {
        Config::from_value(self.read()?)
    }
}

/// Load a typed config from `path`.
///
/// # Errors
///
/// See [`ConfigReader::load`].
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    ConfigReader::new(path.as_ref()).load()
}
