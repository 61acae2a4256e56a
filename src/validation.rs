//! Document Validator
//!
//! Checks that a page has the expected shape before extraction results are
//! trusted. A failed check is a verdict, not an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::extract_text;
use crate::dom::Scope;
use crate::tag::{self, TagDefinition};

/// Requires `include_string` to occur in the normalized text of the first
/// element matching `tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingStringInTag {
    pub include_string: String,
    pub tag: TagDefinition,
}

/// Shape checks for a page. Absent lists are vacuously satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub existing_tags: Option<Vec<TagDefinition>>,
    #[serde(default)]
    pub existing_strings_in_tags: Option<Vec<ExistingStringInTag>>,
}

/// Whether `required` occurs in the normalized text of the first match of `def`.
///
/// A missing element fails the check.
pub fn is_text_in_tag<S: Scope + ?Sized>(scope: &S, def: &TagDefinition, required: &str) -> bool {
    tag::find_first(scope, def).is_some_and(|el| extract_text(&el).contains(required))
}

/// Evaluate every check in `config` against `scope`.
///
/// Tag-existence and string checks are evaluated independently; the
/// verdict is their conjunction.
pub fn validate<S: Scope + ?Sized>(scope: &S, config: &ValidationConfig) -> bool {
    let all_tags_present = config
        .existing_tags
        .iter()
        .flatten()
        .all(|def| tag::exists(scope, def));

    let all_strings_present = config
        .existing_strings_in_tags
        .iter()
        .flatten()
        .all(|check| is_text_in_tag(scope, &check.tag, &check.include_string));

    debug!(all_tags_present, all_strings_present, "validated document");

    all_tags_present && all_strings_present
}
