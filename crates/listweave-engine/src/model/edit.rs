use std::ops::Range;

use crate::error::EditError;

use super::record::{ListAttributes, ListStyle, ListType, Record, RecordKind};

/// A primitive structural edit of the record sequence.
///
/// Indices are interpreted against the sequence as it is when the edit is
/// applied, i.e. after every earlier edit of the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert `records` so that the first of them ends up at index `at`.
    Insert { at: usize, records: Vec<Record> },
    /// Remove a contiguous range of records.
    Remove { range: Range<usize> },
    /// Relocate `range` to the gap before record `to` (pre-move indices).
    Move { range: Range<usize>, to: usize },
    /// Change what a record is, keeping its content.
    Rename { record: usize, kind: RecordKind },
    /// Change attributes of an existing list item.
    SetAttributes {
        record: usize,
        changes: AttributeChanges,
    },
}

/// Attribute updates for [`Edit::SetAttributes`]; `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeChanges {
    pub list_type: Option<ListType>,
    pub indent: Option<usize>,
    /// `Some(None)` removes the style.
    pub style: Option<Option<ListStyle>>,
}

impl AttributeChanges {
    pub fn list_type(list_type: ListType) -> Self {
        Self {
            list_type: Some(list_type),
            ..Self::default()
        }
    }

    pub fn indent(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }

    pub fn style(style: Option<ListStyle>) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    /// Changes that restore `attrs` completely.
    pub fn restoring(attrs: &ListAttributes) -> Self {
        Self {
            list_type: Some(attrs.list_type),
            indent: Some(attrs.indent),
            style: Some(attrs.style),
        }
    }
}

/// How an applied edit moved record indices around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Footprint {
    Inserted { at: usize, len: usize },
    Removed { at: usize, len: usize },
    Touched { record: usize },
}

/// Result of applying one edit: its inverse and its index footprint.
#[derive(Debug)]
pub(crate) struct Applied {
    pub inverse: Edit,
    pub footprints: Vec<Footprint>,
}

impl Edit {
    pub(crate) fn apply(self, records: &mut Vec<Record>) -> Result<Applied, EditError> {
        let len = records.len();
        match self {
            Edit::Insert { at, records: inserted } => {
                if at > len {
                    return Err(EditError::RecordOutOfBounds { record: at, len });
                }
                for (i, record) in inserted.iter().enumerate() {
                    check_style(at + i, &record.kind)?;
                }
                let count = inserted.len();
                records.splice(at..at, inserted);
                Ok(Applied {
                    inverse: Edit::Remove {
                        range: at..at + count,
                    },
                    footprints: vec![Footprint::Inserted { at, len: count }],
                })
            }
            Edit::Remove { range } => {
                check_range(&range, len)?;
                let removed: Vec<Record> = records.drain(range.clone()).collect();
                Ok(Applied {
                    inverse: Edit::Insert {
                        at: range.start,
                        records: removed,
                    },
                    footprints: vec![Footprint::Removed {
                        at: range.start,
                        len: range.len(),
                    }],
                })
            }
            Edit::Move { range, to } => {
                check_range(&range, len)?;
                if to > len {
                    return Err(EditError::RecordOutOfBounds { record: to, len });
                }
                if to > range.start && to < range.end {
                    return Err(EditError::MoveIntoItself {
                        start: range.start,
                        end: range.end,
                        to,
                    });
                }
                let count = range.len();
                let moved: Vec<Record> = records.drain(range.clone()).collect();
                let at = if to >= range.end { to - count } else { to };
                records.splice(at..at, moved);
                // Moving back: forward moves return to the old start, backward
                // moves have to jump over the records they passed.
                let inverse = if at >= range.start {
                    Edit::Move {
                        range: at..at + count,
                        to: range.start,
                    }
                } else {
                    Edit::Move {
                        range: at..at + count,
                        to: range.end,
                    }
                };
                Ok(Applied {
                    inverse,
                    footprints: vec![
                        Footprint::Removed {
                            at: range.start,
                            len: count,
                        },
                        Footprint::Inserted { at, len: count },
                    ],
                })
            }
            Edit::Rename { record, kind } => {
                let target = records
                    .get_mut(record)
                    .ok_or(EditError::RecordOutOfBounds { record, len })?;
                check_style(record, &kind)?;
                let previous = std::mem::replace(&mut target.kind, kind);
                Ok(Applied {
                    inverse: Edit::Rename {
                        record,
                        kind: previous,
                    },
                    footprints: vec![Footprint::Touched { record }],
                })
            }
            Edit::SetAttributes { record, changes } => {
                let target = records
                    .get_mut(record)
                    .ok_or(EditError::RecordOutOfBounds { record, len })?;
                let attrs = target
                    .list_attributes_mut()
                    .ok_or(EditError::NotAListItem { record })?;
                let previous = *attrs;
                let list_type = changes.list_type.unwrap_or(attrs.list_type);
                let style = match changes.style {
                    Some(Some(style)) if !style.fits(list_type) => {
                        return Err(EditError::StyleMismatch {
                            record,
                            style,
                            list_type,
                        });
                    }
                    Some(style) => style,
                    // A type change drops a style the new type cannot show.
                    None => attrs.style.filter(|style| style.fits(list_type)),
                };
                attrs.list_type = list_type;
                attrs.indent = changes.indent.unwrap_or(attrs.indent);
                attrs.style = style;
                Ok(Applied {
                    inverse: Edit::SetAttributes {
                        record,
                        changes: AttributeChanges::restoring(&previous),
                    },
                    footprints: vec![Footprint::Touched { record }],
                })
            }
        }
    }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<(), EditError> {
    if range.start > range.end || range.end > len {
        return Err(EditError::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

fn check_style(record: usize, kind: &RecordKind) -> Result<(), EditError> {
    if let RecordKind::ListItem(attrs) = kind
        && let Some(style) = attrs.style
        && !style.fits(attrs.list_type)
    {
        return Err(EditError::StyleMismatch {
            record,
            style,
            list_type: attrs.list_type,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn letters(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::paragraph(((b'a' + i as u8) as char).to_string()))
            .collect()
    }

    fn texts(records: &[Record]) -> String {
        records.iter().map(|r| r.text.as_str()).collect()
    }

    fn roundtrip(edit: Edit) -> Vec<Record> {
        let original = letters(6);
        let mut records = original.clone();
        let applied = edit.apply(&mut records).unwrap();
        applied.inverse.apply(&mut records).unwrap();
        assert_eq!(records, original);
        records
    }

    #[test]
    fn move_forward_uses_pre_move_target() {
        let mut records = letters(6);
        Edit::Move { range: 1..3, to: 6 }
            .apply(&mut records)
            .unwrap();
        assert_eq!(texts(&records), "adefbc");
    }

    #[test]
    fn move_backward() {
        let mut records = letters(6);
        Edit::Move { range: 3..5, to: 1 }
            .apply(&mut records)
            .unwrap();
        assert_eq!(texts(&records), "adebcf");
    }

    #[test]
    fn every_edit_kind_is_inverted_exactly() {
        roundtrip(Edit::Insert {
            at: 2,
            records: vec![Record::bulleted(0, "x")],
        });
        roundtrip(Edit::Remove { range: 1..4 });
        roundtrip(Edit::Move { range: 1..3, to: 6 });
        roundtrip(Edit::Move { range: 3..5, to: 0 });
        roundtrip(Edit::Rename {
            record: 2,
            kind: RecordKind::ListItem(ListAttributes::new(ListType::Numbered, 1)),
        });
    }

    #[test]
    fn move_into_itself_is_rejected() {
        let mut records = letters(6);
        let err = Edit::Move { range: 1..4, to: 2 }
            .apply(&mut records)
            .unwrap_err();
        assert_eq!(
            err,
            EditError::MoveIntoItself {
                start: 1,
                end: 4,
                to: 2
            }
        );
        assert_eq!(texts(&records), "abcdef");
    }

    #[test]
    fn set_attributes_requires_a_list_item() {
        let mut records = letters(2);
        let err = Edit::SetAttributes {
            record: 1,
            changes: AttributeChanges::indent(1),
        }
        .apply(&mut records)
        .unwrap_err();
        assert_eq!(err, EditError::NotAListItem { record: 1 });
    }

    #[test]
    fn explicit_style_must_fit_the_type() {
        let mut records = vec![Record::bulleted(0, "a")];
        let err = Edit::SetAttributes {
            record: 0,
            changes: AttributeChanges::style(Some(ListStyle::LowerRoman)),
        }
        .apply(&mut records)
        .unwrap_err();
        assert!(matches!(err, EditError::StyleMismatch { record: 0, .. }));
    }

    #[test]
    fn type_change_drops_unfitting_style_and_undo_restores_it() {
        let styled = Record {
            kind: RecordKind::ListItem(
                ListAttributes::new(ListType::Bulleted, 0).with_style(ListStyle::Square),
            ),
            text: "a".into(),
        };
        let mut records = vec![styled.clone()];
        let applied = Edit::SetAttributes {
            record: 0,
            changes: AttributeChanges::list_type(ListType::Numbered),
        }
        .apply(&mut records)
        .unwrap();
        assert_eq!(records[0].list_attributes().unwrap().style, None);

        applied.inverse.apply(&mut records).unwrap();
        assert_eq!(records, vec![styled]);
    }
}
