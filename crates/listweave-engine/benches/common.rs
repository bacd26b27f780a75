// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use listweave_engine::Record;

/// `sections` headings, each followed by a three-level mixed list.
#[allow(dead_code)]
pub fn generate_records(sections: usize) -> Vec<Record> {
    let mut records = Vec::with_capacity(sections * 8);
    for section in 0..sections {
        records.push(Record::block("h2", format!("Section {section}")));
        records.push(Record::bulleted(0, "First point"));
        records.push(Record::bulleted(1, "Detail"));
        records.push(Record::numbered(2, "Step one"));
        records.push(Record::numbered(2, "Step two"));
        records.push(Record::bulleted(1, "Another detail"));
        records.push(Record::bulleted(0, "Second point"));
        records.push(Record::paragraph("Closing paragraph."));
    }
    records
}

/// Same shape as [`generate_records`] with indents and types scrambled so the
/// post-fixer has work to do.
#[allow(dead_code)]
pub fn generate_broken_records(sections: usize) -> Vec<Record> {
    generate_records(sections)
        .into_iter()
        .enumerate()
        .map(|(i, record)| match record.indent() {
            Some(indent) if i % 3 == 0 => Record::numbered(indent + 3, record.text),
            Some(indent) if i % 3 == 1 => Record::bulleted(indent * 2, record.text),
            _ => record,
        })
        .collect()
}
