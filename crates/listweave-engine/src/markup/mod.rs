//! # Markup Conversion
//!
//! Converts between the projection and a generic tag tree that a host renderer
//! walks: `ul`/`ol` containers holding `li` elements, with every other record
//! as an element named after it.
//!
//! ## Modules
//!
//! - **`write`**: projection to tag tree, and tag tree to HTML text
//! - **`read`**: tag tree to flat records, discarding what a list cannot hold
//! - **`html`**: a small HTML fragment reader producing tag trees

pub mod html;
pub mod read;
pub mod write;

use serde::Serialize;

use crate::model::{ListStyle, ListType};

pub use html::parse_html;
pub use read::from_markup;
pub use write::{to_html, to_markup};

/// A node of a generic tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MarkupNode {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

impl MarkupNode {
    pub fn element(name: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Element {
            name: name.into(),
            attributes: Vec::new(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text(text.into())
    }

    /// Adds an attribute; no-op on text nodes.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let MarkupNode::Element { attributes, .. } = &mut self {
            attributes.push((key.into(), value.into()));
        }
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            MarkupNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            MarkupNode::Text(_) => None,
        }
    }
}

const LIST_STYLE_PROPERTY: &str = "list-style-type";

/// Inline `style` attribute value for a container style.
pub(crate) fn style_attribute(style: ListStyle) -> String {
    format!("{LIST_STYLE_PROPERTY}:{style}")
}

/// Reads a container style from an inline `style` attribute, if it fits.
pub(crate) fn parse_style_attribute(value: &str, list_type: ListType) -> Option<ListStyle> {
    value
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .find(|(property, _)| property.trim().eq_ignore_ascii_case(LIST_STYLE_PROPERTY))
        .and_then(|(_, style)| ListStyle::parse(style.trim()))
        .filter(|style| style.fits(list_type))
}
