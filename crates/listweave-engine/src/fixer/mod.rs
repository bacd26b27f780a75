//! # Post-Fixer
//!
//! Repairs the record sequence after a batch of edits so that every list
//! (maximal contiguous run of list items) describes a well-formed forest:
//!
//! - **Indent continuity**: no item is indented more than one level deeper
//!   than the item before it, and a list head sits at indent 0. Over-indented
//!   blocks are shifted as a whole so their relative shape survives
//!   (`4, 5, 4` after an item at indent 1 becomes `2, 3, 2`).
//! - **Type consistency**: below the top level, the first item of a level
//!   establishes the type for every following sibling at that level until a
//!   shallower item closes the level. Top-level items keep their own type;
//!   a type change there starts a new top-level container.
//! - **Container style**: siblings that share a container take the style of
//!   its first item, so a corrected type never keeps a style it cannot show
//!   and the projection loses no per-item style.
//!
//! Every change is reported as a [`Correction`] that can be inverted into an
//! ordinary [`Edit`], so hosts can record the repairs in their undo history.
//! Running the fixer on its own output changes nothing.

use std::ops::Range;

use crate::model::{AttributeChanges, Edit, ListAttributes, ListStyle, ListType, Record};


/// One record whose list attributes the fixer rewrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    pub record: usize,
    pub before: ListAttributes,
    pub after: ListAttributes,
}

impl Correction {
    /// The edit that reapplies this correction.
    pub fn edit(&self) -> Edit {
        Edit::SetAttributes {
            record: self.record,
            changes: AttributeChanges::restoring(&self.after),
        }
    }

    /// The edit that undoes this correction.
    pub fn inverse(&self) -> Edit {
        Edit::SetAttributes {
            record: self.record,
            changes: AttributeChanges::restoring(&self.before),
        }
    }
}

/// Bounds of the list that contains record `index`, if it is a list item.
pub fn list_bounds(records: &[Record], index: usize) -> Option<Range<usize>> {
    if !records.get(index)?.is_list_item() {
        return None;
    }
    let mut start = index;
    while start > 0 && records[start - 1].is_list_item() {
        start -= 1;
    }
    let mut end = index + 1;
    while end < records.len() && records[end].is_list_item() {
        end += 1;
    }
    Some(start..end)
}

/// Fixes every list of the document.
pub fn fix_document(records: &mut [Record]) -> Vec<Correction> {
    let len = records.len();
    fix_lists_in(records, 0..len)
}

/// Fixes every list that has at least one item inside `range`.
pub fn fix_lists_in(records: &mut [Record], range: Range<usize>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    let end = range.end.min(records.len());
    let mut index = range.start;
    while index < end {
        match list_bounds(records, index) {
            Some(list) => {
                index = list.end;
                fix_list(records, list, &mut corrections);
            }
            None => index += 1,
        }
    }
    corrections
}

fn fix_list(records: &mut [Record], list: Range<usize>, out: &mut Vec<Correction>) {
    let offset = list.start;
    let items = &mut records[list];
    let before: Vec<ListAttributes> = items
        .iter()
        .filter_map(|record| record.list_attributes().copied())
        .collect();

    let mut attrs: Vec<&mut ListAttributes> = items
        .iter_mut()
        .filter_map(Record::list_attributes_mut)
        .collect();
    fix_indents(&mut attrs);
    fix_types(&mut attrs);

    for (i, (old, new)) in before.iter().zip(attrs.iter()).enumerate() {
        if old != &**new {
            let correction = Correction {
                record: offset + i,
                before: *old,
                after: **new,
            };
            log::debug!(
                "post-fix record {}: {:?} -> {:?}",
                correction.record,
                correction.before,
                correction.after
            );
            out.push(correction);
        }
    }
}

fn fix_indents(items: &mut [&mut ListAttributes]) {
    // `max_indent` is only raised by items that are not over-indented, so
    // during a shifting streak it still describes the last anchor.
    let mut max_indent = 0;
    let mut shift: Option<usize> = None;
    let mut prev: Option<usize> = None;

    for attrs in items.iter_mut() {
        let indent = attrs.indent;
        let limit = prev.map_or(0, |p| p + 1);

        if indent <= max_indent && indent <= limit {
            shift = None;
            max_indent = indent + 1;
            prev = Some(indent);
            continue;
        }
        if indent <= max_indent {
            // Not over-indented itself, only deeper than a shifted predecessor
            // allows: the streak ends and the item is clamped.
            shift = None;
            max_indent = limit + 1;
            attrs.indent = limit;
            prev = Some(limit);
            continue;
        }

        let shifted = match shift {
            None => {
                shift = Some(indent.saturating_sub(max_indent));
                indent.min(max_indent)
            }
            Some(by) => {
                let by = by.min(indent);
                shift = Some(by);
                indent - by
            }
        };
        let fixed = shifted.min(limit);
        attrs.indent = fixed;
        prev = Some(fixed);
    }
}

fn fix_types(items: &mut [&mut ListAttributes]) {
    // Per level, the type and style of the container's first item.
    let mut established: Vec<Option<(ListType, Option<ListStyle>)>> = Vec::new();
    let mut prev_indent: Option<usize> = None;

    for attrs in items.iter_mut() {
        let indent = attrs.indent;
        if prev_indent.is_some_and(|prev| prev > indent) {
            established.truncate(indent + 1);
        }
        prev_indent = Some(indent);

        if established.len() <= indent {
            established.resize(indent + 1, None);
        }
        match established[indent] {
            // A top-level type change opens a new container.
            Some((list_type, _)) if indent == 0 && list_type != attrs.list_type => {
                established[0] = Some((attrs.list_type, attrs.style));
            }
            Some((list_type, style)) => {
                attrs.list_type = list_type;
                attrs.style = style;
            }
            None => established[indent] = Some((attrs.list_type, attrs.style)),
        }
    }
}
