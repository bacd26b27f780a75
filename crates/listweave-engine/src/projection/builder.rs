use std::ops::Range;

use crate::model::{ListAttributes, Record, RecordKind};

use super::{BlockNode, ItemNode, ListNode, ListTree, RootNode};

/// An open container at one nesting level.
#[derive(Debug)]
struct Frame {
    indent: usize,
    list: ListNode,
}

/// Turns records into root nodes in one left-to-right pass.
///
/// The builder keeps a stack of open containers. An item deeper than the open
/// container nests inside that container's last item; a shallower item closes
/// containers until one at its indent (and of its type) is on top; a non-list
/// record closes everything, so lists never resume across another block.
///
/// Input does not have to be post-fixed: indent jumps nest one level, and a
/// list whose head is indented simply starts at the head's indent.
pub struct ProjectionBuilder {
    stack: Vec<Frame>,
    out: Vec<RootNode>,
}

impl ProjectionBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![],
            out: vec![],
        }
    }

    pub fn push(&mut self, index: usize, record: &Record) {
        match &record.kind {
            RecordKind::Other { name } => {
                self.close_all();
                self.out.push(RootNode::Block(BlockNode {
                    record: index,
                    name: name.clone(),
                    text: record.text.clone(),
                }));
            }
            RecordKind::ListItem(attrs) => self.push_item(index, attrs, &record.text),
        }
    }

    pub fn finish(mut self) -> Vec<RootNode> {
        self.close_all();
        self.out
    }

    fn push_item(&mut self, index: usize, attrs: &ListAttributes, text: &str) {
        loop {
            match self.stack.last() {
                None => break self.open(attrs),
                Some(top) if attrs.indent > top.indent => break self.open(attrs),
                Some(top)
                    if attrs.indent == top.indent && attrs.list_type == top.list.list_type =>
                {
                    break;
                }
                Some(_) => self.close_top(),
            }
        }

        if let Some(top) = self.stack.last_mut() {
            top.list.items.push(ItemNode {
                record: index,
                text: text.to_string(),
                lists: vec![],
            });
        }
    }

    fn open(&mut self, attrs: &ListAttributes) {
        self.stack.push(Frame {
            indent: attrs.indent,
            list: ListNode {
                list_type: attrs.list_type,
                style: attrs.style,
                items: vec![],
            },
        });
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        // Nesting always attaches to the last item of the enclosing run.
        match self
            .stack
            .last_mut()
            .and_then(|parent| parent.list.items.last_mut())
        {
            Some(item) => item.lists.push(frame.list),
            None => self.out.push(RootNode::List(frame.list)),
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_top();
        }
    }
}

impl Default for ProjectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Projects the whole record sequence.
pub fn build(records: &[Record]) -> ListTree {
    let roots = build_roots(records, 0..records.len());
    log::trace!(
        "projected {} records into {} root nodes",
        records.len(),
        roots.len()
    );
    ListTree { roots }
}

/// Projects `range` on its own. The range must start and end on a root node
/// boundary for the result to match the same nodes of a full build.
pub(crate) fn build_roots(records: &[Record], range: Range<usize>) -> Vec<RootNode> {
    let mut builder = ProjectionBuilder::new();
    for index in range {
        builder.push(index, &records[index]);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ListType;
    use crate::projection::format_outline;

    #[test]
    fn deeper_run_nests_in_last_item() {
        let records = vec![
            Record::bulleted(0, "a"),
            Record::bulleted(1, "x"),
            Record::bulleted(0, "b"),
        ];
        let tree = build(&records);
        insta::assert_snapshot!(format_outline(&tree), @r#"
        ul
          li #0 "a"
            ul
              li #1 "x"
          li #2 "b"
        "#);
    }

    #[test]
    fn other_block_separates_same_type_lists() {
        let records = vec![
            Record::bulleted(0, "a"),
            Record::paragraph("p"),
            Record::bulleted(0, "b"),
        ];
        let tree = build(&records);
        assert_eq!(tree.roots.len(), 3);
        assert!(matches!(tree.roots[1], RootNode::Block(_)));
    }

    #[test]
    fn top_level_type_change_splits_containers() {
        let records = vec![
            Record::bulleted(0, "a"),
            Record::numbered(0, "b"),
            Record::bulleted(0, "c"),
        ];
        let tree = build(&records);
        let types: Vec<ListType> = tree
            .roots
            .iter()
            .filter_map(|node| match node {
                RootNode::List(list) => Some(list.list_type),
                RootNode::Block(_) => None,
            })
            .collect();
        assert_eq!(
            types,
            vec![ListType::Bulleted, ListType::Numbered, ListType::Bulleted]
        );
    }

    #[test]
    fn unfixed_jumps_nest_one_level() {
        let records = vec![
            Record::bulleted(0, "a"),
            Record::bulleted(3, "b"),
            Record::bulleted(0, "c"),
        ];
        let tree = build(&records);
        insta::assert_snapshot!(format_outline(&tree), @r#"
        ul
          li #0 "a"
            ul
              li #1 "b"
          li #2 "c"
        "#);
    }

    #[test]
    fn return_to_shallower_level_with_new_type_opens_sibling_container() {
        let records = vec![
            Record::bulleted(0, "a"),
            Record::bulleted(1, "b"),
            Record::bulleted(2, "c"),
            Record::numbered(1, "d"),
        ];
        let tree = build(&records);
        insta::assert_snapshot!(format_outline(&tree), @r#"
        ul
          li #0 "a"
            ul
              li #1 "b"
                ul
                  li #2 "c"
            ol
              li #3 "d"
        "#);
    }

    #[test]
    fn partial_build_matches_full_build_on_root_boundaries() {
        let records = vec![
            Record::paragraph("x"),
            Record::bulleted(0, "a"),
            Record::bulleted(1, "b"),
            Record::paragraph("y"),
            Record::numbered(0, "c"),
        ];
        let full = build(&records);
        let mut pieces = build_roots(&records, 0..3);
        pieces.extend(build_roots(&records, 3..5));
        assert_eq!(pieces, full.roots);
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        assert!(build(&[]).is_empty());
    }
}
