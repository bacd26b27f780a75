use crate::projection::{ItemNode, ListNode, ListTree, RootNode};

use super::{MarkupNode, style_attribute};

/// Renders the projection as a tag tree.
pub fn to_markup(tree: &ListTree) -> Vec<MarkupNode> {
    tree.roots
        .iter()
        .map(|root| match root {
            RootNode::Block(block) => MarkupNode::element(&block.name, text_child(&block.text)),
            RootNode::List(list) => list_element(list),
        })
        .collect()
}

fn list_element(list: &ListNode) -> MarkupNode {
    let element = MarkupNode::element(
        list.list_type.tag(),
        list.items.iter().map(item_element).collect(),
    );
    match list.style {
        Some(style) => element.with_attribute("style", style_attribute(style)),
        None => element,
    }
}

fn item_element(item: &ItemNode) -> MarkupNode {
    let mut children = text_child(&item.text);
    children.extend(item.lists.iter().map(list_element));
    MarkupNode::element("li", children)
}

fn text_child(text: &str) -> Vec<MarkupNode> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![MarkupNode::text(text)]
    }
}

/// Serializes a tag tree as HTML, escaping text and attribute values.
pub fn to_html(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &MarkupNode) {
    match node {
        MarkupNode::Text(text) => out.push_str(&html_escape::encode_text(text)),
        MarkupNode::Element {
            name,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ListAttributes, ListStyle, ListType, Record, RecordKind};
    use crate::projection::build;

    #[test]
    fn nested_lists_render_inside_the_last_item() {
        let tree = build(&[
            Record::paragraph("foo"),
            Record::bulleted(0, "1"),
            Record::bulleted(1, "1.1"),
            Record::numbered(0, "2"),
        ]);
        assert_eq!(
            to_html(&to_markup(&tree)),
            "<p>foo</p><ul><li>1<ul><li>1.1</li></ul></li></ul><ol><li>2</li></ol>"
        );
    }

    #[test]
    fn empty_content_has_no_text_child() {
        let tree = build(&[Record::paragraph(""), Record::bulleted(0, "")]);
        assert_eq!(
            to_markup(&tree),
            vec![
                MarkupNode::element("p", vec![]),
                MarkupNode::element("ul", vec![MarkupNode::element("li", vec![])]),
            ]
        );
    }

    #[test]
    fn container_carries_its_style() {
        let styled = Record {
            kind: RecordKind::ListItem(
                ListAttributes::new(ListType::Numbered, 0).with_style(ListStyle::LowerRoman),
            ),
            text: "a".into(),
        };
        assert_eq!(
            to_html(&to_markup(&build(&[styled]))),
            r#"<ol style="list-style-type:lower-roman"><li>a</li></ol>"#
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let nodes = vec![
            MarkupNode::element("p", vec![MarkupNode::text("a < b & \"c\"")])
                .with_attribute("title", "x\"y"),
        ];
        assert_eq!(
            to_html(&nodes),
            r#"<p title="x&quot;y">a &lt; b &amp; "c"</p>"#
        );
    }
}
