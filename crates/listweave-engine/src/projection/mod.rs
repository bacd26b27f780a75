//! # Nested Projection
//!
//! The nested tree derived from the flat record sequence: list containers
//! (`ul`/`ol`) holding items (`li`), with deeper runs embedded in the last item
//! of the run above them. The tree has no identity of its own; it can always be
//! rebuilt from the records, and every node remembers the record it came from.
//!
//! ## Modules
//!
//! - **`builder`**: single-pass stack builder turning records into root nodes
//! - **`outline`**: indented text rendering used by tests and debugging

pub mod builder;
pub mod outline;

use serde::Serialize;

use crate::model::{ListStyle, ListType};

pub use builder::{ProjectionBuilder, build};
pub use outline::format_outline;

/// The projection of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListTree {
    pub roots: Vec<RootNode>,
}

/// A child of the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RootNode {
    Block(BlockNode),
    List(ListNode),
}

/// A non-list record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    pub record: usize,
    pub name: String,
    pub text: String,
}

/// A list container grouping one run of same-indent, same-type items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListNode {
    pub list_type: ListType,
    pub style: Option<ListStyle>,
    pub items: Vec<ItemNode>,
}

/// A list item: its own content followed by the containers nested in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemNode {
    pub record: usize,
    pub text: String,
    pub lists: Vec<ListNode>,
}

impl ListTree {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl RootNode {
    pub fn first_record(&self) -> usize {
        match self {
            RootNode::Block(block) => block.record,
            RootNode::List(list) => list.first_record(),
        }
    }

    pub fn last_record(&self) -> usize {
        match self {
            RootNode::Block(block) => block.record,
            RootNode::List(list) => list.last_record(),
        }
    }

    pub(crate) fn shift(&mut self, delta: isize) {
        match self {
            RootNode::Block(block) => block.record = block.record.saturating_add_signed(delta),
            RootNode::List(list) => list.shift(delta),
        }
    }
}

impl BlockNode {
    /// Number of children: the text node, when there is content.
    pub fn child_count(&self) -> usize {
        usize::from(!self.text.is_empty())
    }
}

impl ListNode {
    pub fn first_record(&self) -> usize {
        self.items.first().map_or(0, |item| item.record)
    }

    /// The last record anywhere inside this container.
    pub fn last_record(&self) -> usize {
        self.items
            .last()
            .map_or_else(|| self.first_record(), ItemNode::last_record)
    }

    fn shift(&mut self, delta: isize) {
        for item in &mut self.items {
            item.record = item.record.saturating_add_signed(delta);
            for list in &mut item.lists {
                list.shift(delta);
            }
        }
    }
}

impl ItemNode {
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Number of children: the text node (if any) followed by nested containers.
    pub fn child_count(&self) -> usize {
        usize::from(self.has_text()) + self.lists.len()
    }

    /// The last record of this item's subtree.
    pub fn last_record(&self) -> usize {
        self.lists
            .last()
            .map_or(self.record, ListNode::last_record)
    }
}
