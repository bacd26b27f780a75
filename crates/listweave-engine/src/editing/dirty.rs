use std::ops::Range;

use crate::model::Record;
use crate::model::edit::Footprint;

/// Hull of the records a batch touched, kept in current indices while the
/// batch's edits shift records around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DirtyRange {
    hull: Option<(usize, usize)>,
}

impl DirtyRange {
    pub fn record(&mut self, footprint: Footprint) {
        match footprint {
            Footprint::Inserted { at, len } => {
                if let Some((lo, hi)) = &mut self.hull {
                    if *lo >= at {
                        *lo += len;
                    }
                    if *hi > at {
                        *hi += len;
                    }
                }
                self.touch(at, at + len);
            }
            Footprint::Removed { at, len } => {
                let end = at + len;
                let map = |p: usize| match p {
                    p if p <= at => p,
                    p if p >= end => p - len,
                    _ => at,
                };
                if let Some((lo, hi)) = &mut self.hull {
                    *lo = map(*lo);
                    *hi = map(*hi);
                }
                self.touch(at, at);
            }
            Footprint::Touched { record } => self.touch(record, record + 1),
        }
    }

    fn touch(&mut self, start: usize, end: usize) {
        self.hull = Some(match self.hull {
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
            None => (start, end),
        });
    }

    pub fn bounds(&self) -> Option<Range<usize>> {
        self.hull.map(|(lo, hi)| lo..hi)
    }
}

/// Grows a dirty hull to the region that has to be re-fixed and re-projected.
///
/// The region reaches one record past the hull on both sides and then covers
/// whole lists, so both of its ends are root boundaries in the old projection
/// as well as in the new one.
pub(crate) fn dirty_region(records: &[Record], hull: Range<usize>) -> Range<usize> {
    let len = records.len();
    let mut start = hull.start.saturating_sub(1).min(len);
    let mut end = (hull.end + 1).min(len).max(start);

    while start > 0
        && start < len
        && records[start - 1].is_list_item()
        && records[start].is_list_item()
    {
        start -= 1;
    }
    while end > 0 && end < len && records[end - 1].is_list_item() && records[end].is_list_item() {
        end += 1;
    }
    start..end
}
