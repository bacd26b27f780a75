use crate::model::{ListAttributes, ListStyle, ListType, Record, RecordKind};

use super::{MarkupNode, parse_style_attribute};

/// Flattens a tag tree into records.
///
/// - whitespace-only text is dropped; other text collapses whitespace runs
/// - only `li` children of a container are kept
/// - an `li` outside a container is dropped
/// - an item's content is the text before its first nested container; the
///   nested containers become records one level deeper
/// - a block holding containers is split around them
/// - loose text at the root becomes a paragraph
///
/// The records are not post-fixed; load them through
/// [`ListDocument`](crate::ListDocument) to normalize them.
pub fn from_markup(nodes: &[MarkupNode]) -> Vec<Record> {
    let mut reader = MarkupReader::default();
    for node in nodes {
        reader.root_node(node);
    }
    reader.records
}

#[derive(Default)]
struct MarkupReader {
    records: Vec<Record>,
}

impl MarkupReader {
    fn root_node(&mut self, node: &MarkupNode) {
        match node {
            MarkupNode::Text(text) => {
                let text = normalize_text(text);
                if !text.is_empty() {
                    self.records.push(Record::paragraph(text));
                }
            }
            MarkupNode::Element {
                name,
                attributes,
                children,
            } => match ListType::from_tag(name) {
                Some(list_type) => {
                    let style = container_style(attributes, list_type);
                    self.list(list_type, style, children, 0);
                }
                None if name == "li" => {}
                None => self.block(name, children),
            },
        }
    }

    fn block(&mut self, name: &str, children: &[MarkupNode]) {
        let mut text = String::new();
        let mut split = false;
        self.block_children(name, children, &mut text, &mut split);
        let text = normalize_text(&text);
        if !text.is_empty() || !split {
            self.records.push(Record::block(name, text));
        }
    }

    fn block_children(
        &mut self,
        name: &str,
        children: &[MarkupNode],
        text: &mut String,
        split: &mut bool,
    ) {
        for child in children {
            match child {
                MarkupNode::Text(content) => text.push_str(content),
                MarkupNode::Element {
                    name: child_name,
                    attributes,
                    children,
                } => match ListType::from_tag(child_name) {
                    Some(list_type) => {
                        let before = normalize_text(text);
                        text.clear();
                        if !before.is_empty() {
                            self.records.push(Record::block(name, before));
                        }
                        *split = true;
                        let style = container_style(attributes, list_type);
                        self.list(list_type, style, children, 0);
                    }
                    None if child_name == "li" => {}
                    None => self.block_children(name, children, text, split),
                },
            }
        }
    }

    fn list(
        &mut self,
        list_type: ListType,
        style: Option<ListStyle>,
        children: &[MarkupNode],
        indent: usize,
    ) {
        for child in children {
            if let MarkupNode::Element { name, children, .. } = child
                && name == "li"
            {
                let attrs = ListAttributes {
                    list_type,
                    indent,
                    style,
                };
                self.item(attrs, children);
            }
        }
    }

    fn item(&mut self, attrs: ListAttributes, children: &[MarkupNode]) {
        let index = self.records.len();
        self.records.push(Record {
            kind: RecordKind::ListItem(attrs),
            text: String::new(),
        });
        let mut text = String::new();
        let mut nested = false;
        self.item_children(attrs.indent, children, &mut text, &mut nested);
        self.records[index].text = normalize_text(&text);
    }

    fn item_children(
        &mut self,
        indent: usize,
        children: &[MarkupNode],
        text: &mut String,
        nested: &mut bool,
    ) {
        for child in children {
            match child {
                MarkupNode::Text(content) if !*nested => text.push_str(content),
                MarkupNode::Text(_) => {}
                MarkupNode::Element {
                    name,
                    attributes,
                    children,
                } => match ListType::from_tag(name) {
                    Some(list_type) => {
                        *nested = true;
                        let style = container_style(attributes, list_type);
                        self.list(list_type, style, children, indent + 1);
                    }
                    None if name == "li" => {}
                    None => self.item_children(indent, children, text, nested),
                },
            }
        }
    }
}

fn container_style(attributes: &[(String, String)], list_type: ListType) -> Option<ListStyle> {
    attributes
        .iter()
        .find(|(key, _)| key == "style")
        .and_then(|(_, value)| parse_style_attribute(value, list_type))
}

fn normalize_text(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}
