//! Tag Matcher
//!
//! A [`TagDefinition`] is a pure value describing which elements to pick: an
//! optional element name and a set of attribute constraints. Matching is
//! evaluated against any [`Scope`] so the predicate never depends on a
//! particular tree backend.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::{Element, Scope};

/// Attributes whose value is a whitespace separated list of tokens.
///
/// A text constraint on one of these matches the full value, the value with
/// its whitespace collapsed to single spaces, or any single token. So
/// `{class: teaser}` and `{class: "teaser big"}` both match
/// `class="teaser\n  big"`.
const MULTI_VALUED_ATTRIBUTES: &[&str] = &[
    "class",
    "rel",
    "rev",
    "accept-charset",
    "headers",
    "accesskey",
    "dropzone",
];

/// Required value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// `true`: attribute must be present. `false`: attribute must be absent.
    Flag(bool),
    /// Attribute must equal the decimal rendering of the number.
    Integer(i64),
    /// Attribute must equal the string.
    Text(String),
}

impl AttrValue {
    fn matches(&self, attribute: &str, actual: Option<&str>) -> bool {
        match (self, actual) {
            (Self::Flag(required), actual) => *required == actual.is_some(),
            (_, None) => false,
            (Self::Integer(expected), Some(actual)) => actual == expected.to_string(),
            (Self::Text(expected), Some(actual)) => {
                actual == expected
                    || (MULTI_VALUED_ATTRIBUTES.contains(&attribute)
                        && matches_token_list(actual, expected))
            }
        }
    }
}

fn matches_token_list(actual: &str, expected: &str) -> bool {
    let tokens: Vec<&str> = actual.split_ascii_whitespace().collect();
    tokens.contains(&expected) || tokens.join(" ") == expected
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Element-matching predicate.
///
/// `None` on either axis means "no constraint on that axis". All attribute
/// constraints must hold at once.
///
/// # Example
///
/// ```rust
/// use rs_tagscrape::{dom, tag::{self, TagDefinition}};
///
/// let doc = dom::parse(r#"<a class="teaser link" href="/a">A</a><a href="/b">B</a>"#);
/// let def = TagDefinition::new(Some("a")).with_attr("class", "teaser");
///
/// assert_eq!(tag::locate(&doc, &def).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attrs: Option<BTreeMap<String, AttrValue>>,
}

impl TagDefinition {
    /// Definition with an optional element name and no attribute constraints.
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            attrs: None,
        }
    }

    /// Add one attribute constraint.
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// Test one element against this definition.
    pub fn matches<E: Element + ?Sized>(&self, element: &E) -> bool {
        let Some(tag_name) = element.tag_name() else {
            return false;
        };

        if let Some(name) = &self.name {
            if !tag_name.eq_ignore_ascii_case(name) {
                return false;
            }
        }

        self.attrs.iter().flatten().all(|(key, value)| {
            value.matches(key, element.attribute(key).as_deref())
        })
    }
}

impl fmt::Display for TagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name {}", self.name.as_deref().unwrap_or("<any>"))?;
        match &self.attrs {
            Some(attrs) if !attrs.is_empty() => {
                let rendered: Vec<String> = attrs.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, " and attrs {{{}}}", rendered.join(", "))
            }
            _ => write!(f, " and no attrs"),
        }
    }
}

/// Locate all elements below `scope` that satisfy `def`, in document order.
#[must_use]
pub fn locate<'s, S: Scope + ?Sized>(scope: &'s S, def: &TagDefinition) -> Vec<S::Element<'s>> {
    scope
        .elements()
        .into_iter()
        .filter(|el| def.matches(el))
        .collect()
}

/// First element below `scope` that satisfies `def`.
#[must_use]
pub fn find_first<'s, S: Scope + ?Sized>(scope: &'s S, def: &TagDefinition) -> Option<S::Element<'s>> {
    scope.elements().into_iter().find(|el| def.matches(el))
}

/// Whether any element below `scope` satisfies `def`.
#[must_use]
pub fn exists<S: Scope + ?Sized>(scope: &S, def: &TagDefinition) -> bool {
    find_first(scope, def).is_some()
}
