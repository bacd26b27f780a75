//! Minimal HTML fragment reader.
//!
//! Enough HTML to feed [`from_markup`](super::from_markup) from text: start and
//! end tags with quoted or bare attributes, self-closing and void elements,
//! comments (skipped) and entity-decoded text. Tag and attribute names are
//! ASCII `[A-Za-z0-9:_-]` and are lowercased. An end tag closes the nearest
//! open element of that name and everything opened after it; an end tag with no
//! open match is ignored. An `li` start tag first closes the `li` still open in
//! the same list. Anything that does not parse as a tag is text.

use super::MarkupNode;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Parses an HTML fragment into a tag tree.
pub fn parse_html(input: &str) -> Vec<MarkupNode> {
    let mut builder = TreeBuilder::default();
    let bytes = input.as_bytes();
    let mut i = 0;

    // Slices are only cut at ASCII bytes, which are always char boundaries.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'<' {
                i += 1;
            }
            builder.text(&input[start..i]);
            continue;
        }

        let rest = &input[i..];
        if let Some(body) = rest.strip_prefix(COMMENT_START) {
            i += body
                .find(COMMENT_END)
                .map_or(rest.len(), |end| COMMENT_START.len() + end + COMMENT_END.len());
            continue;
        }
        match read_tag(rest) {
            Some((tag, len)) => {
                builder.tag(tag);
                i += len;
            }
            None => {
                builder.text("<");
                i += 1;
            }
        }
    }
    builder.finish()
}

#[derive(Debug, PartialEq, Eq)]
enum Tag {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    End(String),
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b':' | b'_' | b'-')
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "wbr"
    )
}

/// Reads a tag at the start of `input` (which starts with `<`), returning it
/// with its length in bytes.
fn read_tag(input: &str) -> Option<(Tag, usize)> {
    let bytes = input.as_bytes();
    let closing = bytes.get(1) == Some(&b'/');
    let name_start = if closing { 2 } else { 1 };
    let mut i = name_start;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    if closing {
        let end = i + input[i..].find('>')?;
        return Some((Tag::End(name), end + 1));
    }

    let mut attributes = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => {
                let tag = Tag::Start {
                    name,
                    attributes,
                    self_closing: false,
                };
                return Some((tag, i + 1));
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                let tag = Tag::Start {
                    name,
                    attributes,
                    self_closing: true,
                };
                return Some((tag, i + 2));
            }
            _ => {}
        }

        let key_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i == key_start {
            // Stray `=` or `/`.
            i += 1;
            continue;
        }
        let key = input[key_start..i].to_ascii_lowercase();

        let mut value = String::new();
        if bytes.get(i) == Some(&b'=') {
            i += 1;
            match bytes.get(i)? {
                &quote @ (b'"' | b'\'') => {
                    let end = i + 1 + input[i + 1..].find(char::from(quote))?;
                    value = decode(&input[i + 1..end]);
                    i = end + 1;
                }
                _ => {
                    let start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    value = decode(&input[start..i]);
                }
            }
        }
        attributes.push((key, value));
    }
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

impl OpenElement {
    fn into_node(self) -> MarkupNode {
        MarkupNode::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<OpenElement>,
    roots: Vec<MarkupNode>,
}

impl TreeBuilder {
    fn append(&mut self, node: MarkupNode) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let text = decode(raw);
        // Merge with a preceding text node (a literal `<` splits text runs).
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        match siblings.last_mut() {
            Some(MarkupNode::Text(previous)) => previous.push_str(&text),
            _ => siblings.push(MarkupNode::Text(text)),
        }
    }

    fn tag(&mut self, tag: Tag) {
        match tag {
            Tag::Start {
                name,
                attributes,
                self_closing,
            } => {
                if self_closing || is_void_element(&name) {
                    self.append(MarkupNode::Element {
                        name,
                        attributes,
                        children: Vec::new(),
                    });
                } else {
                    if name == "li" {
                        self.close_open_item();
                    }
                    self.open.push(OpenElement {
                        name,
                        attributes,
                        children: Vec::new(),
                    });
                }
            }
            Tag::End(name) => {
                if let Some(depth) = self.open.iter().rposition(|open| open.name == name) {
                    while self.open.len() > depth {
                        self.close_top();
                    }
                }
            }
        }
    }

    /// Closes the `li` open in the innermost list, with anything opened inside it.
    fn close_open_item(&mut self) {
        let innermost = self
            .open
            .iter()
            .rposition(|open| matches!(open.name.as_str(), "li" | "ul" | "ol"));
        let Some(depth) = innermost else {
            return;
        };
        if self.open[depth].name == "li" {
            while self.open.len() > depth {
                self.close_top();
            }
        }
    }

    fn close_top(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(element.into_node());
        }
    }

    fn finish(mut self) -> Vec<MarkupNode> {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.roots
    }
}
