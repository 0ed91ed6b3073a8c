//! Visible text of an HTML document.

use scraper::{Html, Node};

/// Elements whose content never renders as text.
const SKIPPED: &[&str] = &["script", "style", "noscript", "head", "template", "svg"];

/// Elements that start a new line of text.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Text a reader would see, with whitespace collapsed and block elements
/// separated by newlines.
pub fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    // `None` marks the end of a block element.
    let mut stack = vec![Some(document.tree.root())];

    while let Some(step) = stack.pop() {
        let Some(node) = step else {
            push_break(&mut out);
            continue;
        };
        match node.value() {
            Node::Text(text) => push_text(&mut out, text),
            Node::Element(element) => {
                let name = element.name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                if BLOCKS.contains(&name) {
                    push_break(&mut out);
                    stack.push(None);
                }
                stack.extend(node.children().rev().map(Some));
            }
            _ => stack.extend(node.children().rev().map(Some)),
        }
    }

    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out
}

/// Parse a document and return its visible text.
pub fn html_to_text(html: &str) -> String {
    visible_text(&Html::parse_document(html))
}

fn push_text(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    let needs_gap = !out.is_empty() && !out.ends_with(char::is_whitespace);
    if text.starts_with(char::is_whitespace) && needs_gap {
        out.push(' ');
    }
    let mut words = text.split_whitespace();
    if let Some(first) = words.next() {
        out.push_str(first);
        for word in words {
            out.push(' ');
            out.push_str(word);
        }
        if text.ends_with(char::is_whitespace) {
            out.push(' ');
        }
    }
}

fn push_break(out: &mut String) {
    let trimmed_len = out.trim_end_matches(' ').len();
    out.truncate(trimmed_len);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
