//! # Position Mapping
//!
//! Translates positions between the flat record sequence and the nested
//! projection.
//!
//! A [`FlatPosition`] is either the gap before a record or a character offset
//! inside a record's content. A [`NestedPosition`] is a parent path (child
//! indices from the root) plus an offset among that parent's children, or a
//! character offset when the parent is a text node.
//!
//! Children of an item node are its text node (only when the content is not
//! empty) followed by its nested containers. Children of a block node are its
//! text node (again only when non-empty).
//!
//! `to_nested` produces one canonical nested position for each flat position and
//! `to_flat` accepts every nested position, so `to_flat(to_nested(p)) == p`.


use crate::error::PositionError;
use crate::projection::{BlockNode, ItemNode, ListNode, ListTree, RootNode};

/// A location in the flat record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlatPosition {
    /// The gap before record `n`; `Before(len)` is the end of the document.
    Before(usize),
    /// A character offset inside a record's content.
    Within { record: usize, offset: usize },
}

/// A location in the nested projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestedPosition {
    pub parent: Vec<usize>,
    pub offset: usize,
}

impl NestedPosition {
    pub fn new(parent: Vec<usize>, offset: usize) -> Self {
        Self { parent, offset }
    }

    /// Builds a position from a full path whose last step is the offset.
    pub fn from_path(path: &[usize]) -> Option<Self> {
        let (offset, parent) = path.split_last()?;
        Some(Self::new(parent.to_vec(), *offset))
    }

    /// The full path: parent steps followed by the offset.
    pub fn path(&self) -> Vec<usize> {
        let mut path = self.parent.clone();
        path.push(self.offset);
        path
    }
}

/// Where a record ended up in the projection.
enum Located<'a> {
    Block {
        root: usize,
        node: &'a BlockNode,
    },
    Item {
        /// Path of the container holding the item.
        container: Vec<usize>,
        index: usize,
        node: &'a ItemNode,
    },
}

impl Located<'_> {
    fn node_path(&self) -> Vec<usize> {
        match self {
            Located::Block { root, .. } => vec![*root],
            Located::Item {
                container, index, ..
            } => {
                let mut path = container.clone();
                path.push(*index);
                path
            }
        }
    }

    fn text(&self) -> &str {
        match self {
            Located::Block { node, .. } => &node.text,
            Located::Item { node, .. } => &node.text,
        }
    }
}

/// A node addressed by a nested parent path.
enum Resolved<'a> {
    Root,
    Block(&'a BlockNode),
    List(&'a ListNode),
    Item(&'a ItemNode),
    Text { record: usize, len: usize },
}

impl ListTree {
    /// Number of records the projection was built from.
    pub fn record_count(&self) -> usize {
        self.roots.last().map_or(0, |root| root.last_record() + 1)
    }
}

/// Maps a flat position to its canonical nested position.
pub fn to_nested(tree: &ListTree, position: FlatPosition) -> Result<NestedPosition, PositionError> {
    let len = tree.record_count();
    match position {
        FlatPosition::Before(record) if record == len => {
            Ok(NestedPosition::new(vec![], tree.roots.len()))
        }
        FlatPosition::Before(record) => {
            let located =
                locate(tree, record).ok_or(PositionError::RecordOutOfBounds { record, len })?;
            Ok(match located {
                Located::Block { root, .. } => NestedPosition::new(vec![], root),
                // The first item of a top-level list sits right before its container.
                Located::Item {
                    container,
                    index: 0,
                    ..
                } if container.len() == 1 => NestedPosition::new(vec![], container[0]),
                Located::Item {
                    container, index, ..
                } => NestedPosition::new(container, index),
            })
        }
        FlatPosition::Within { record, offset } => {
            let located =
                locate(tree, record).ok_or(PositionError::RecordOutOfBounds { record, len })?;
            let text_len = located.text().chars().count();
            if offset > text_len {
                return Err(PositionError::OffsetOutOfBounds {
                    record,
                    offset,
                    len: text_len,
                });
            }
            let mut parent = located.node_path();
            if text_len == 0 {
                Ok(NestedPosition::new(parent, 0))
            } else {
                parent.push(0);
                Ok(NestedPosition::new(parent, offset))
            }
        }
    }
}

/// Maps any nested position back to the flat sequence.
pub fn to_flat(tree: &ListTree, position: &NestedPosition) -> Result<FlatPosition, PositionError> {
    let invalid = || PositionError::InvalidPath {
        path: position.parent.clone(),
    };
    let node = resolve(tree, &position.parent).ok_or_else(invalid)?;
    let offset = position.offset;
    let out_of_bounds = |len: usize| PositionError::NestedOffsetOutOfBounds {
        path: position.parent.clone(),
        offset,
        len,
    };

    match node {
        Resolved::Root => match tree.roots.get(offset) {
            Some(root) => Ok(FlatPosition::Before(root.first_record())),
            None if offset == tree.roots.len() => Ok(FlatPosition::Before(tree.record_count())),
            None => Err(out_of_bounds(tree.roots.len())),
        },
        Resolved::Block(block) => match offset {
            0 => Ok(FlatPosition::Within {
                record: block.record,
                offset: 0,
            }),
            1 if block.child_count() == 1 => Ok(FlatPosition::Within {
                record: block.record,
                offset: block.text.chars().count(),
            }),
            _ => Err(out_of_bounds(block.child_count())),
        },
        Resolved::List(list) => match list.items.get(offset) {
            Some(item) => Ok(FlatPosition::Before(item.record)),
            None if offset == list.items.len() => Ok(FlatPosition::Before(list.last_record() + 1)),
            None => Err(out_of_bounds(list.items.len())),
        },
        Resolved::Item(item) => {
            if offset > item.child_count() {
                return Err(out_of_bounds(item.child_count()));
            }
            let text_children = usize::from(item.has_text());
            if offset == 0 {
                Ok(FlatPosition::Within {
                    record: item.record,
                    offset: 0,
                })
            } else if offset == text_children {
                Ok(FlatPosition::Within {
                    record: item.record,
                    offset: item.text.chars().count(),
                })
            } else {
                // After a nested container: the gap after its last record.
                let list = &item.lists[offset - text_children - 1];
                Ok(FlatPosition::Before(list.last_record() + 1))
            }
        }
        Resolved::Text { record, len } => {
            if offset > len {
                return Err(out_of_bounds(len));
            }
            Ok(FlatPosition::Within { record, offset })
        }
    }
}

fn locate(tree: &ListTree, record: usize) -> Option<Located<'_>> {
    let root = tree
        .roots
        .partition_point(|node| node.first_record() <= record)
        .checked_sub(1)?;
    match &tree.roots[root] {
        RootNode::Block(node) => (node.record == record).then_some(Located::Block { root, node }),
        RootNode::List(list) => locate_in_list(list, record, vec![root]),
    }
}

fn locate_in_list(list: &ListNode, record: usize, path: Vec<usize>) -> Option<Located<'_>> {
    let index = list
        .items
        .partition_point(|item| item.record <= record)
        .checked_sub(1)?;
    let item = &list.items[index];
    if item.record == record {
        return Some(Located::Item {
            container: path,
            index,
            node: item,
        });
    }
    let nested = item
        .lists
        .partition_point(|nested| nested.first_record() <= record)
        .checked_sub(1)?;
    let mut nested_path = path;
    nested_path.push(index);
    nested_path.push(usize::from(item.has_text()) + nested);
    locate_in_list(&item.lists[nested], record, nested_path)
}

fn resolve<'a>(tree: &'a ListTree, path: &[usize]) -> Option<Resolved<'a>> {
    let mut node = Resolved::Root;
    for &step in path {
        node = match node {
            Resolved::Root => match tree.roots.get(step)? {
                RootNode::Block(block) => Resolved::Block(block),
                RootNode::List(list) => Resolved::List(list),
            },
            Resolved::List(list) => Resolved::Item(list.items.get(step)?),
            Resolved::Item(item) if item.has_text() && step == 0 => Resolved::Text {
                record: item.record,
                len: item.text.chars().count(),
            },
            Resolved::Item(item) => {
                Resolved::List(item.lists.get(step - usize::from(item.has_text()))?)
            }
            Resolved::Block(block) if step < block.child_count() => Resolved::Text {
                record: block.record,
                len: block.text.chars().count(),
            },
            Resolved::Block(_) | Resolved::Text { .. } => return None,
        };
    }
    Some(node)
}
