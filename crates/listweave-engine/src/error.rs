use crate::model::{ListStyle, ListType};

/// An edit that cannot be represented in the record sequence.
///
/// Batches containing such an edit are rejected as a whole; the document is
/// left exactly as it was before the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("record {record} is out of bounds (document has {len} records)")]
    RecordOutOfBounds { record: usize, len: usize },

    #[error("range {start}..{end} is out of bounds (document has {len} records)")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("cannot move records {start}..{end} to {to}, which lies inside the moved range")]
    MoveIntoItself { start: usize, end: usize, to: usize },

    #[error("record {record} is not a list item")]
    NotAListItem { record: usize },

    #[error("style {style} does not apply to {list_type} lists (record {record})")]
    StyleMismatch {
        record: usize,
        style: ListStyle,
        list_type: ListType,
    },
}

/// A flat or nested position that does not exist in the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("record {record} is out of bounds (document has {len} records)")]
    RecordOutOfBounds { record: usize, len: usize },

    #[error("offset {offset} is past the end of record {record} (length {len})")]
    OffsetOutOfBounds {
        record: usize,
        offset: usize,
        len: usize,
    },

    #[error("path {path:?} does not address a node in the projection")]
    InvalidPath { path: Vec<usize> },

    #[error("offset {offset} is past the end of node {path:?} ({len} children)")]
    NestedOffsetOutOfBounds {
        path: Vec<usize>,
        offset: usize,
        len: usize,
    },
}
