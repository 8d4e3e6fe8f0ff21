//! Conversion of the located content subtree into line oriented, markdown
//! like text.
//!
//! While walking the tree every container wraps its output in the private
//! use characters `BLOCK_OPEN` / `BLOCK_CLOSE`. These markers only exist in
//! the intermediate string: [`finish`] turns block boundaries into line
//! breaks and strips whatever is left before anything leaves this module.

use std::collections::HashSet;

use libxml::tree::Node;

use crate::constants::{
    BLOCK_BOUNDARY, BLOCK_CLOSE, BLOCK_OPEN, BLOCK_RUN, HEADING_TAGS, LIST_TAGS, MAX_DEPTH,
    NO_CONTENT, TABLE_CELL_TAGS,
};
use crate::util::Util;

/// Structured text of `element`, or the "no content" sentinel if nothing
/// readable is left.
pub fn extract(element: &Node) -> String {
    let mut text = StructuredText::default();
    let raw = text.element(element, 0);
    finish(&raw)
}

/// Final normalization of the intermediate representation.
pub fn finish(raw: &str) -> String {
    let text = BLOCK_RUN.replace_all(raw, "\n");
    let text = BLOCK_BOUNDARY.replace_all(&text, "\n");
    let text = text.replace(|c: char| c == BLOCK_OPEN || c == BLOCK_CLOSE, "");
    let text = Util::normalize_whitespace(&text);

    if text.is_empty() {
        NO_CONTENT.into()
    } else {
        text
    }
}

/// State of one extraction call. `seen` holds every heading, paragraph,
/// list item and table already emitted, so repeated layout variants of the
/// same text show up only once.
#[derive(Default)]
struct StructuredText {
    seen: HashSet<String>,
}

impl StructuredText {
    fn element(&mut self, element: &Node, depth: usize) -> String {
        let children = element.get_child_nodes();
        if children.is_empty() {
            return Util::get_inner_text(element);
        }

        let mut parts = Vec::new();
        for child in &children {
            self.child(child, depth, &mut parts);
        }

        let block = format!("{BLOCK_OPEN}{}{BLOCK_CLOSE} ", parts.join(" ").trim());
        if Util::has_tag_name(element, "article") {
            format!("\n{block}\n")
        } else {
            block
        }
    }

    fn child(&mut self, child: &Node, depth: usize, parts: &mut Vec<String>) {
        if Util::is_text_node(child) {
            let text = child.get_content();
            let text = text.trim();
            if !text.is_empty() {
                parts.push(format!("{text} "));
            }
            return;
        }

        // comments, processing instructions and the like carry no text
        if !Util::is_element_node(child) {
            return;
        }

        let tag = child.get_name().to_lowercase();
        let tag = tag.as_str();

        if HEADING_TAGS.contains(&tag) {
            self.heading(child, tag, parts);
        } else if tag == "p" {
            self.paragraph(child, parts);
        } else if LIST_TAGS.contains(&tag) {
            self.list(child, tag == "ol", parts);
        } else if tag == "table" {
            self.table(child, parts);
        } else if child.get_child_elements().is_empty() || depth >= MAX_DEPTH {
            let text = Util::get_inner_text(child);
            if !text.is_empty() {
                parts.push(format!("{text} "));
            }
        } else {
            let block = self.element(child, depth + 1);
            let block = block.trim_matches(' ');
            if !block.is_empty() {
                parts.push(block.to_owned());
            }
        }
    }

    fn heading(&mut self, node: &Node, tag: &str, parts: &mut Vec<String>) {
        // generic <header> is level 0
        let level = tag
            .strip_prefix('h')
            .and_then(|level| level.parse::<usize>().ok())
            .unwrap_or(0);
        let text = Util::get_inner_text(node);

        if self.first_time(&text) {
            parts.push(format!("\n{} {text}\n", "#".repeat(level)));
        }
    }

    fn paragraph(&mut self, node: &Node, parts: &mut Vec<String>) {
        let text = Util::get_inner_text(node);
        if self.first_time(&text) {
            parts.push(format!("\n{text}\n"));
        }
    }

    fn list(&mut self, node: &Node, ordered: bool, parts: &mut Vec<String>) {
        let items = Util::get_elements_by_tag_name(node, "li");
        if items.is_empty() {
            return;
        }

        // the numeral is a fixed marker, items are not counted
        let marker = if ordered { "1. " } else { "- " };

        parts.push("\n".into());
        for item in items {
            let text = Util::get_inner_text(&item);
            if self.first_time(&text) {
                parts.push(format!("{marker}{text}\n"));
            }
        }
    }

    fn table(&mut self, node: &Node, parts: &mut Vec<String>) {
        let rows = Util::get_elements_by_tag_name(node, "tr")
            .iter()
            .filter_map(|row| {
                let cells = Util::get_elements_by_tag_names(row, TABLE_CELL_TAGS);
                if cells.is_empty() {
                    return None;
                }

                Some(
                    cells
                        .iter()
                        .map(Util::get_inner_text)
                        .collect::<Vec<_>>()
                        .join(" | "),
                )
            })
            .collect::<Vec<_>>();

        let text = rows.join("\n");
        if self.first_time(&text) {
            parts.push(format!("\nT|{text}|\n"));
        }
    }

    fn first_time(&mut self, text: &str) -> bool {
        !text.is_empty() && self.seen.insert(text.to_owned())
    }
}
