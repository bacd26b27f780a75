use super::{ItemNode, ListNode, ListTree, RootNode};

/// Formats a projection as an indented outline for snapshot testing.
///
/// ```text
/// ul
///   li #0 "a"
///     ol [lower-roman]
///       li #1 "b"
/// p #2 "text"
/// ```
pub fn format_outline(tree: &ListTree) -> String {
    let mut out = String::new();
    for root in &tree.roots {
        match root {
            RootNode::Block(block) => {
                out.push_str(&format!("{} #{} {:?}\n", block.name, block.record, block.text));
            }
            RootNode::List(list) => format_list(&mut out, list, 0),
        }
    }
    out
}

fn format_list(out: &mut String, list: &ListNode, depth: usize) {
    let prefix = "  ".repeat(depth);
    out.push_str(&prefix);
    out.push_str(list.list_type.tag());
    if let Some(style) = list.style {
        out.push_str(&format!(" [{style}]"));
    }
    out.push('\n');
    for item in &list.items {
        format_item(out, item, depth + 1);
    }
}

fn format_item(out: &mut String, item: &ItemNode, depth: usize) {
    let prefix = "  ".repeat(depth);
    out.push_str(&format!("{prefix}li #{} {:?}\n", item.record, item.text));
    for list in &item.lists {
        format_list(out, list, depth + 1);
    }
}
