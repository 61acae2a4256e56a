//! Document Tree Adapter
//!
//! Wraps the `dom_query` crate behind two small traits so the matcher,
//! extractor and validator never depend on a concrete tree backend:
//!
//! - [`Scope`]: something elements can be searched *below* (a whole document
//!   or one element's subtree).
//! - [`Element`]: one matched node with a name, attributes and text.
//!
//! `dom_query::Document` and `dom_query::Selection` implement both.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

use crate::encoding;

/// A region of a document tree that can be searched for elements.
pub trait Scope {
    /// Element handle produced by this scope.
    type Element<'s>: Element + Scope
    where
        Self: 's;

    /// All elements strictly below this scope, in document order.
    fn elements(&self) -> Vec<Self::Element<'_>>;
}

/// Read access to a single element.
pub trait Element {
    /// Lowercase element name, `None` for non-element nodes.
    fn tag_name(&self) -> Option<String>;

    /// Raw attribute value, unprocessed.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Text of the element and all descendants, concatenated.
    fn text_content(&self) -> String;
}

impl Scope for Document {
    type Element<'s>
        = Selection<'s>
    where
        Self: 's;

    fn elements(&self) -> Vec<Selection<'_>> {
        self.select("*")
            .nodes()
            .iter()
            .map(|node| Selection::from(*node))
            .collect()
    }
}

impl<'a> Scope for Selection<'a> {
    type Element<'s>
        = Selection<'a>
    where
        Self: 's;

    fn elements(&self) -> Vec<Selection<'a>> {
        self.select("*")
            .nodes()
            .iter()
            .map(|node| Selection::from(*node))
            .collect()
    }
}

impl Element for Selection<'_> {
    fn tag_name(&self) -> Option<String> {
        tag_name(self)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        get_attribute(self, name)
    }

    fn text_content(&self) -> String {
        text_content(self).to_string()
    }
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse raw HTML bytes, honouring a declared charset.
///
/// See [`encoding::transcode_to_utf8`] for the detection rules.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Document {
    Document::from(encoding::transcode_to_utf8(html))
}
