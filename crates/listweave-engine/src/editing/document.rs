use std::fmt;
use std::ops::Range;

use crate::error::{EditError, PositionError};
use crate::fixer::{self, Correction};
use crate::markup::{self, MarkupNode};
use crate::model::{Edit, Record};
use crate::position::{self, FlatPosition, NestedPosition};
use crate::projection::{self, ListTree, builder::build_roots};

use super::dirty::{DirtyRange, dirty_region};
use super::options::{EngineOptions, PatchStrategy};
use super::patch::{Patch, TreeChange, diff_roots};

type Listener = Box<dyn FnMut(&TreeChange)>;

/// A record sequence kept normalized, together with its nested projection.
///
/// All mutation goes through batches of [`Edit`]s. After the edits of a batch
/// are applied, the post-fixer repairs the lists they touched and the
/// projection is brought up to date, so between batches the records are always
/// well-formed and the tree always equals a full rebuild of them.
///
/// ```rust
/// use listweave_engine::{Edit, ListDocument, Record};
///
/// let mut doc = ListDocument::from_records(vec![
///     Record::bulleted(0, "a"),
///     Record::bulleted(0, "b"),
/// ]);
/// let patch = doc
///     .apply(Edit::Insert { at: 1, records: vec![Record::bulleted(1, "x")] })
///     .unwrap();
///
/// assert_eq!(patch.version, doc.version());
/// assert_eq!(doc.tree().roots.len(), 1);
/// ```
pub struct ListDocument {
    records: Vec<Record>,
    tree: ListTree,
    version: u64,
    options: EngineOptions,
    listeners: Vec<Listener>,
}

impl ListDocument {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Normalizes `records` and projects them.
    ///
    /// Corrections made here are not reported; the document simply starts out
    /// well-formed.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        let corrections = fixer::fix_document(&mut records);
        if !corrections.is_empty() {
            log::debug!("normalized {} records on load", corrections.len());
        }
        let tree = projection::build(&records);
        Self {
            records,
            tree,
            version: 0,
            options: EngineOptions::default(),
            listeners: Vec::new(),
        }
    }

    /// Parses a generic tag tree into records and loads them.
    pub fn from_markup(nodes: &[MarkupNode]) -> Self {
        Self::from_records(markup::from_markup(nodes))
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn tree(&self) -> &ListTree {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Registers a listener called after every batch that changes the projection.
    pub fn subscribe(&mut self, listener: impl FnMut(&TreeChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies a single edit as its own batch.
    pub fn apply(&mut self, edit: Edit) -> Result<Patch, EditError> {
        self.apply_batch([edit])
    }

    /// Applies a batch of edits, all or nothing.
    ///
    /// ## Pipeline
    ///
    /// 1. Apply each edit in order, collecting inverses and the dirty hull
    /// 2. On the first invalid edit, revert the applied ones and return the error
    /// 3. Grow the hull to whole lists and run the post-fixer over them
    /// 4. Re-project the region (or everything, with [`PatchStrategy::Rebuild`])
    /// 5. Bump the version and notify listeners
    pub fn apply_batch(
        &mut self,
        edits: impl IntoIterator<Item = Edit>,
    ) -> Result<Patch, EditError> {
        let old_len = self.records.len();
        let mut dirty = DirtyRange::default();
        let mut inverses = Vec::new();

        for edit in edits {
            match edit.apply(&mut self.records) {
                Ok(applied) => {
                    for footprint in applied.footprints {
                        dirty.record(footprint);
                    }
                    inverses.push(applied.inverse);
                }
                Err(err) => {
                    log::debug!("batch rejected: {err}");
                    self.roll_back(inverses);
                    return Err(err);
                }
            }
        }

        let delta = self.records.len() as isize - old_len as isize;
        let (corrections, change) = match dirty.bounds() {
            Some(hull) => {
                let region = dirty_region(&self.records, hull);
                let corrections = fixer::fix_lists_in(&mut self.records, region.clone());
                let change = self.reproject(region, delta);
                (corrections, change)
            }
            None => (Vec::new(), None),
        };

        self.version += 1;
        let change = change.map(|(removed, inserted)| TreeChange {
            version: self.version,
            removed,
            inserted,
        });
        if let Some(change) = &change {
            for listener in &mut self.listeners {
                listener(change);
            }
        }

        let undo = corrections
            .iter()
            .rev()
            .map(Correction::inverse)
            .chain(inverses.into_iter().rev())
            .collect();

        Ok(Patch {
            corrections,
            change,
            version: self.version,
            undo,
        })
    }

    /// Inserts a pasted fragment before record `at`.
    ///
    /// When the record before `at` is a nested list item, the fragment's
    /// leading list items are indented by that item's indent so the pasted
    /// list keeps its shape at the insertion depth.
    pub fn insert_fragment(
        &mut self,
        at: usize,
        mut records: Vec<Record>,
    ) -> Result<Patch, EditError> {
        let base = at
            .checked_sub(1)
            .and_then(|previous| self.records.get(previous))
            .and_then(Record::indent)
            .unwrap_or(0);
        if base > 0 {
            for attrs in records.iter_mut().map_while(Record::list_attributes_mut) {
                attrs.indent += base;
            }
        }
        self.apply(Edit::Insert { at, records })
    }

    pub fn to_nested(&self, position: FlatPosition) -> Result<NestedPosition, PositionError> {
        position::to_nested(&self.tree, position)
    }

    pub fn to_flat(&self, position: &NestedPosition) -> Result<FlatPosition, PositionError> {
        position::to_flat(&self.tree, position)
    }

    /// The projection as a generic `ul`/`ol`/`li` tag tree.
    pub fn to_markup(&self) -> Vec<MarkupNode> {
        markup::to_markup(&self.tree)
    }

    fn roll_back(&mut self, inverses: Vec<Edit>) {
        for inverse in inverses.into_iter().rev() {
            if let Err(err) = inverse.apply(&mut self.records) {
                log::error!("failed to revert a rejected batch: {err}");
            }
        }
    }

    fn reproject(
        &mut self,
        region: Range<usize>,
        delta: isize,
    ) -> Option<(Range<usize>, Range<usize>)> {
        match self.options.strategy {
            PatchStrategy::Rebuild => self.rebuild(delta),
            PatchStrategy::Incremental if self.options.verify_patches => {
                let previous = self.tree.roots.clone();
                let change = self.patch_region(region, delta);
                let rebuilt = projection::build(&self.records);
                if rebuilt == self.tree {
                    return change;
                }
                log::warn!(
                    "incremental patch diverged from a full rebuild at version {}, using the rebuild",
                    self.version + 1
                );
                self.tree = rebuilt;
                diff_roots(&previous, &self.tree.roots, delta)
            }
            PatchStrategy::Incremental => self.patch_region(region, delta),
        }
    }

    fn rebuild(&mut self, delta: isize) -> Option<(Range<usize>, Range<usize>)> {
        let rebuilt = projection::build(&self.records);
        let change = diff_roots(&self.tree.roots, &rebuilt.roots, delta);
        self.tree = rebuilt;
        change
    }

    /// Replaces the root nodes of the records that were `region` before the
    /// batch with a fresh projection of `region`, shifting the nodes after it.
    fn patch_region(
        &mut self,
        region: Range<usize>,
        delta: isize,
    ) -> Option<(Range<usize>, Range<usize>)> {
        let old_end = region.end.saturating_add_signed(-delta);
        let roots = &mut self.tree.roots;
        let first = roots.partition_point(|node| node.first_record() < region.start);
        let last = roots.partition_point(|node| node.first_record() < old_end);

        for node in &mut roots[last..] {
            node.shift(delta);
        }
        let fresh = build_roots(&self.records, region.clone());
        let count = fresh.len();
        let old: Vec<_> = roots.splice(first..last, fresh).collect();
        log::debug!(
            "re-projected records {region:?}: {} root nodes replaced by {count}",
            old.len()
        );

        let (removed, inserted) = diff_roots(&old, &roots[first..first + count], delta)?;
        Some((
            first + removed.start..first + removed.end,
            first + inserted.start..first + inserted.end,
        ))
    }
}

impl Default for ListDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDocument")
            .field("records", &self.records)
            .field("tree", &self.tree)
            .field("version", &self.version)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
