//! Plain-text outline notation for records.
//!
//! One record per non-blank line. Leading spaces divided by the indent width
//! give a list item's indent (a tab counts as one full level).
//!
//! | line            | record            |
//! |-----------------|-------------------|
//! | `- text`        | bulleted item     |
//! | `* text`        | bulleted item     |
//! | `1. text`       | numbered item     |
//! | `## text`       | `h2` block        |
//! | anything else   | `p` block         |

use serde::{Deserialize, Serialize};

use crate::model::{ListType, Record, RecordKind};

/// Layout of the outline notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineFormat {
    /// Spaces per indent level.
    pub indent_width: usize,
}

impl Default for OutlineFormat {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl OutlineFormat {
    pub fn parse(&self, text: &str) -> Vec<Record> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect()
    }

    pub fn render(&self, records: &[Record]) -> String {
        let mut out = String::new();
        for record in records {
            let line = match &record.kind {
                RecordKind::ListItem(attrs) => {
                    let marker = match attrs.list_type {
                        ListType::Bulleted => "-",
                        ListType::Numbered => "1.",
                    };
                    let prefix = " ".repeat(attrs.indent * self.width());
                    format!("{prefix}{marker} {}", record.text)
                }
                RecordKind::Other { name } => match heading_level(name) {
                    Some(level) => format!("{} {}", "#".repeat(level), record.text),
                    None => record.text.clone(),
                },
            };
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    fn width(&self) -> usize {
        self.indent_width.max(1)
    }

    fn parse_line(&self, line: &str) -> Record {
        let body = line.trim_start_matches([' ', '\t']);
        let lead = &line[..line.len() - body.len()];
        let columns: usize = lead
            .chars()
            .map(|c| if c == '\t' { self.width() } else { 1 })
            .sum();
        let indent = columns / self.width();
        let body = body.trim_end();

        if let Some(text) = list_marker(body, |marker| matches!(marker, "-" | "*")) {
            return Record::bulleted(indent, text);
        }
        if let Some(text) = list_marker(body, is_number_marker) {
            return Record::numbered(indent, text);
        }
        if let Some((level, text)) = heading(body) {
            return Record::block(format!("h{level}"), text);
        }
        Record::paragraph(body)
    }
}

/// Splits `marker text` (or a bare marker) when the marker passes `is_marker`.
fn list_marker(body: &str, is_marker: impl Fn(&str) -> bool) -> Option<&str> {
    let (marker, text) = body.split_once(' ').unwrap_or((body, ""));
    is_marker(marker).then(|| text.trim_start())
}

fn is_number_marker(marker: &str) -> bool {
    marker
        .strip_suffix('.')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn heading(body: &str) -> Option<(usize, &str)> {
    let level = body.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &body[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|text| (level, text.trim_start()))
}

fn heading_level(name: &str) -> Option<usize> {
    let level: usize = name.strip_prefix('h')?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}
