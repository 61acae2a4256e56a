//! Content Extractor
//!
//! Reads one value out of one matched element: either a named attribute,
//! returned verbatim, or the element's whitespace-normalized text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::Element;
use crate::error::{Error, Result};

/// Delimiter placed between values when one field matches several elements.
pub const DEFAULT_DELIMITER: &str = "|";

/// Config keyword selecting text content explicitly.
const TEXT_KEYWORD: &str = "text";

/// What to read from a matched element.
///
/// In config files this is the optional `content_type` string: absent,
/// `null`, empty or `"text"` select [`ContentType::Text`]. Any other value
/// names the attribute to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ContentType {
    /// Normalized text of the element and its descendants.
    #[default]
    Text,
    /// Raw value of the named attribute.
    Attribute(String),
}

impl From<Option<String>> for ContentType {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.is_empty() && name != TEXT_KEYWORD => Self::Attribute(name),
            _ => Self::Text,
        }
    }
}

impl From<ContentType> for Option<String> {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Text => None,
            ContentType::Attribute(name) => Some(name),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str(TEXT_KEYWORD),
            Self::Attribute(name) => write!(f, "attribute {name}"),
        }
    }
}

/// Collapse every whitespace run into a single space and trim both ends.
///
/// # Example
///
/// ```rust
/// use rs_tagscrape::content::clean_string;
///
/// assert_eq!(clean_string(" test      \nthis\n  thing        "), "test this thing");
/// ```
#[must_use]
pub fn clean_string(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element.
#[must_use]
pub fn extract_text<E: Element + ?Sized>(element: &E) -> String {
    clean_string(&element.text_content())
}

/// Read a value from `element` according to `content_type`.
///
/// # Errors
///
/// Returns [`Error::AttributeMissing`] when an attribute is requested that
/// the element does not carry.
pub fn read<E: Element + ?Sized>(element: &E, content_type: &ContentType) -> Result<String> {
    match content_type {
        ContentType::Text => Ok(extract_text(element)),
        ContentType::Attribute(name) => {
            element
                .attribute(name)
                .ok_or_else(|| Error::AttributeMissing {
                    attribute: name.clone(),
                })
        }
    }
}

/// Join values extracted from several matches into one field value.
#[must_use]
pub fn concatenate<S: AsRef<str>>(values: &[S], delimiter: &str) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(delimiter)
}
