use listweave_engine::{ListDocument, OutlineFormat, Record, format_outline};
use pretty_assertions::assert_eq;

#[test]
fn fixture_meeting_notes() {
    assert_fixture("outline/meeting_notes");
}

#[test]
fn fixture_broken_indents() {
    assert_fixture("outline/broken_indents");
}

fn assert_fixture(name: &str) {
    let text = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.txt",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let format = OutlineFormat::default();

    let doc = ListDocument::from_records(format.parse(&text));

    // Normalized outlines read back unchanged.
    let rendered = format.render(doc.records());
    assert_eq!(format.parse(&rendered), doc.records());

    let outline = format_outline(doc.tree());
    insta::assert_snapshot!(name, outline);
}

/// Fixing a loaded outline only ever touches list attributes, never content.
#[test]
fn normalization_keeps_every_line() {
    let text = "- a\n      - b\n1. c\n  text\n";
    let format = OutlineFormat::default();
    let parsed = format.parse(text);
    let doc = ListDocument::from_records(parsed.clone());

    let texts = |records: &[Record]| records.iter().map(|r| r.text.clone()).collect::<Vec<_>>();
    assert_eq!(texts(doc.records()), texts(&parsed));
    assert_eq!(format.render(doc.records()), "- a\n  - b\n1. c\ntext\n");
}
