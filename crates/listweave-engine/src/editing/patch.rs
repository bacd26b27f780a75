use std::ops::Range;

use crate::fixer::Correction;
use crate::model::Edit;
use crate::projection::RootNode;

/// Result of applying a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Repairs the post-fixer made after the edits, in application order.
    pub corrections: Vec<Correction>,
    /// Root-level change of the projection, if any node differs.
    pub change: Option<TreeChange>,
    pub version: u64,
    /// The batch that restores the previous record sequence.
    pub undo: Vec<Edit>,
}

/// Which children of the projection root were replaced by a batch.
///
/// `removed` indexes the old root children, `inserted` the new ones. Nodes
/// outside these ranges are equal before and after the batch, except that
/// nodes after the change may refer to shifted record indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    pub version: u64,
    pub removed: Range<usize>,
    pub inserted: Range<usize>,
}

/// Trims the common prefix and suffix of two root slices.
///
/// `delta` is how far record indices moved between the old and new suffix.
pub(crate) fn diff_roots(
    old: &[RootNode],
    new: &[RootNode],
    delta: isize,
) -> Option<(Range<usize>, Range<usize>)> {
    let mut start = 0;
    while start < old.len() && start < new.len() && old[start] == new[start] {
        start += 1;
    }

    let mut old_end = old.len();
    let mut new_end = new.len();
    while old_end > start
        && new_end > start
        && same_after_shift(&old[old_end - 1], &new[new_end - 1], delta)
    {
        old_end -= 1;
        new_end -= 1;
    }

    if old_end == start && new_end == start {
        return None;
    }
    Some((start..old_end, start..new_end))
}

fn same_after_shift(old: &RootNode, new: &RootNode, delta: isize) -> bool {
    if delta == 0 {
        return old == new;
    }
    let mut shifted = old.clone();
    shifted.shift(delta);
    &shifted == new
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Record;
    use crate::projection::build;

    #[test]
    fn identical_roots_have_no_change() {
        let roots = build(&[Record::paragraph("a"), Record::bulleted(0, "b")]).roots;
        assert_eq!(diff_roots(&roots, &roots, 0), None);
    }

    #[test]
    fn shifted_suffix_is_trimmed() {
        let old = build(&[Record::paragraph("a"), Record::paragraph("b")]).roots;
        let new = build(&[
            Record::paragraph("a"),
            Record::bulleted(0, "x"),
            Record::paragraph("b"),
        ])
        .roots;
        assert_eq!(diff_roots(&old, &new, 1), Some((1..1, 1..2)));
    }

    #[test]
    fn changed_middle_is_reported() {
        let old = build(&[
            Record::paragraph("a"),
            Record::bulleted(0, "x"),
            Record::paragraph("b"),
        ])
        .roots;
        let new = build(&[
            Record::paragraph("a"),
            Record::numbered(0, "x"),
            Record::paragraph("b"),
        ])
        .roots;
        assert_eq!(diff_roots(&old, &new, 0), Some((1..2, 1..2)));
    }
}
