use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;

/// Subtrees whose text never shows up as readable prose next to a control.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "select", "textarea", "option", "datalist",
];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "legend", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot",
    "th", "thead", "tr", "ul",
];

/// Approximates `innerText`: whitespace runs collapse to one space, block
/// elements and `<br>` break lines, lines are trimmed and blank lines dropped.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut collector = TextCollector::default();
    for child in element.children() {
        collector.visit(child);
    }
    collector.finish()
}

/// Collapses every whitespace run (newlines included) into a single space.
pub fn compact_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keeps at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[derive(Default)]
struct TextCollector {
    builder: String,
    last_char: Option<char>,
}

impl TextCollector {
    fn visit(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.append_text(text),
            Node::Element(element) => {
                let tag = element.name();
                if tag == "br" {
                    self.ensure_newline();
                    return;
                }
                if SKIPPED_TAGS.contains(&tag) {
                    return;
                }
                let block = BLOCK_TAGS.contains(&tag);
                if block {
                    self.ensure_newline();
                }
                for child in node.children() {
                    self.visit(child);
                }
                if block {
                    self.ensure_newline();
                }
            }
            _ => {
                for child in node.children() {
                    self.visit(child);
                }
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last_char == Some(' ') || self.last_char == Some('\n') {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn ensure_newline(&mut self) {
        if self.last_char == Some('\n') || self.builder.is_empty() {
            return;
        }
        self.push_char('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.builder.push(ch);
        self.last_char = Some(ch);
    }

    fn finish(self) -> String {
        self.builder
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
