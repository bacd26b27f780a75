use std::fmt;

use serde::{Deserialize, Serialize};

/// The two recognized list types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Bulleted,
    Numbered,
}

impl ListType {
    /// Markup tag of a container of this type.
    pub fn tag(self) -> &'static str {
        match self {
            ListType::Bulleted => "ul",
            ListType::Numbered => "ol",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ul" => Some(ListType::Bulleted),
            "ol" => Some(ListType::Numbered),
            _ => None,
        }
    }

    /// Styles a container of this type may carry.
    pub fn styles(self) -> &'static [ListStyle] {
        match self {
            ListType::Bulleted => &[ListStyle::Disc, ListStyle::Circle, ListStyle::Square],
            ListType::Numbered => &[
                ListStyle::Decimal,
                ListStyle::LowerRoman,
                ListStyle::UpperRoman,
                ListStyle::LowerAlpha,
                ListStyle::UpperAlpha,
            ],
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListType::Bulleted => f.write_str("bulleted"),
            ListType::Numbered => f.write_str("numbered"),
        }
    }
}

/// Marker style of a list container (`list-style-type` in markup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyle {
    Disc,
    Circle,
    Square,
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerAlpha,
    UpperAlpha,
}

impl ListStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ListStyle::Disc => "disc",
            ListStyle::Circle => "circle",
            ListStyle::Square => "square",
            ListStyle::Decimal => "decimal",
            ListStyle::LowerRoman => "lower-roman",
            ListStyle::UpperRoman => "upper-roman",
            ListStyle::LowerAlpha => "lower-alpha",
            ListStyle::UpperAlpha => "upper-alpha",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let all = ListType::Bulleted
            .styles()
            .iter()
            .chain(ListType::Numbered.styles());
        all.copied().find(|style| style.as_str() == value)
    }

    /// The list type this style belongs to.
    pub fn list_type(self) -> ListType {
        match self {
            ListStyle::Disc | ListStyle::Circle | ListStyle::Square => ListType::Bulleted,
            _ => ListType::Numbered,
        }
    }

    pub fn fits(self, list_type: ListType) -> bool {
        self.list_type() == list_type
    }
}

impl fmt::Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes carried by a list item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAttributes {
    pub list_type: ListType,
    pub indent: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ListStyle>,
}

impl ListAttributes {
    pub fn new(list_type: ListType, indent: usize) -> Self {
        Self {
            list_type,
            indent,
            style: None,
        }
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// What a record is: a list item or any other block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordKind {
    ListItem(ListAttributes),
    /// Any non-list block, named by its markup element (`p`, `h1`, `div` ...).
    Other { name: String },
}

/// A single block of the flat record sequence.
///
/// Identity is positional: a record is addressed by its index in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub kind: RecordKind,
    pub text: String,
}

impl Record {
    pub fn list_item(list_type: ListType, indent: usize, text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::ListItem(ListAttributes::new(list_type, indent)),
            text: text.into(),
        }
    }

    pub fn bulleted(indent: usize, text: impl Into<String>) -> Self {
        Self::list_item(ListType::Bulleted, indent, text)
    }

    pub fn numbered(indent: usize, text: impl Into<String>) -> Self {
        Self::list_item(ListType::Numbered, indent, text)
    }

    pub fn block(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Other { name: name.into() },
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::block("p", text)
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self.kind, RecordKind::ListItem(_))
    }

    pub fn list_attributes(&self) -> Option<&ListAttributes> {
        match &self.kind {
            RecordKind::ListItem(attrs) => Some(attrs),
            RecordKind::Other { .. } => None,
        }
    }

    pub(crate) fn list_attributes_mut(&mut self) -> Option<&mut ListAttributes> {
        match &mut self.kind {
            RecordKind::ListItem(attrs) => Some(attrs),
            RecordKind::Other { .. } => None,
        }
    }

    pub fn indent(&self) -> Option<usize> {
        self.list_attributes().map(|attrs| attrs.indent)
    }

    pub fn list_type(&self) -> Option<ListType> {
        self.list_attributes().map(|attrs| attrs.list_type)
    }

    /// Content length in characters; the unit of flat and nested text offsets.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parse_roundtrips_every_style() {
        for list_type in [ListType::Bulleted, ListType::Numbered] {
            for style in list_type.styles() {
                assert_eq!(ListStyle::parse(style.as_str()), Some(*style));
                assert!(style.fits(list_type));
            }
        }
        assert_eq!(ListStyle::parse("upper-greek"), None);
    }

    #[test]
    fn numbered_styles_do_not_fit_bulleted_lists() {
        assert!(!ListStyle::LowerRoman.fits(ListType::Bulleted));
        assert!(!ListStyle::Square.fits(ListType::Numbered));
    }

    #[test]
    fn text_len_counts_characters() {
        let record = Record::bulleted(0, "héllo");
        assert_eq!(record.text_len(), 5);
    }

    #[test]
    fn tags_map_both_ways() {
        assert_eq!(ListType::from_tag(ListType::Numbered.tag()), Some(ListType::Numbered));
        assert_eq!(ListType::from_tag("li"), None);
    }
}
