use std::collections::HashSet;

use libxml::tree::{Document, Node, SaveOptions};
use libxml::xpath::Context;
use scraper::{ElementRef, Html, Selector};

use super::error::ExtractorError;
use crate::hints::MainContentHints;
use crate::util::Util;

/// Attribute tagging every libxml element with its position while the
/// document is matched against CSS selectors.
const NODE_MARKER: &str = "data-weat-node";

/// Find the element holding the main content.
///
/// Selectors are tried in order and the first one matching anything wins,
/// even if a later selector would match a larger element. Among the matches
/// of the winning selector the one with the longest text is picked, the
/// earliest in document order on ties. Without a match this falls back to
/// `<body>`, then to the root element. Returns `None` only for documents
/// without any element.
pub fn locate(document: &Document, main: Option<&MainContentHints>) -> Option<Node> {
    let root = document.get_root_element()?;

    if let Some(main) = main.filter(|main| !main.selectors.is_empty()) {
        if let Some(node) = find_by_selectors(document, &root, &main.selectors) {
            return Some(node);
        }
    }

    if Util::has_tag_name(&root, "body") {
        return Some(root);
    }

    match Util::get_first_element_by_tag_name(&root, "body") {
        Some(body) => {
            log::info!("Using full body content");
            Some(body)
        }
        None => {
            log::info!("Document has no body, using the whole document");
            Some(root)
        }
    }
}

fn find_by_selectors(document: &Document, root: &Node, selectors: &[String]) -> Option<Node> {
    let mut matcher: Option<MarkedDocument> = None;
    let mut found = None;

    for hint_selector in selectors {
        let nodes = if is_xpath(hint_selector) {
            select_xpath(document, hint_selector)
        } else {
            let matcher = matcher.get_or_insert_with(|| MarkedDocument::new(document, root));
            matcher.select(hint_selector)
        };

        let nodes = match nodes {
            Ok(nodes) => nodes,
            Err(error) => {
                log::debug!("Skipping main content selector '{hint_selector}': {error}");
                continue;
            }
        };

        if let Some(node) = longest_text(nodes) {
            log::debug!("Found main content with hint selector: '{hint_selector}'");
            found = Some(node);
            break;
        }
    }

    if let Some(matcher) = matcher {
        matcher.unmark();
    }
    found
}

/// Hint selectors starting like a location path are XPath expressions.
fn is_xpath(selector: &str) -> bool {
    let selector = selector.trim_start();
    selector.starts_with('/') || selector.starts_with('(')
}

fn select_xpath(document: &Document, xpath: &str) -> Result<Vec<Node>, ExtractorError> {
    let xpath_ctx = Context::new(document).map_err(|()| {
        log::error!("Creating xpath context failed for main content lookup");
        ExtractorError::Xml
    })?;
    let nodes = Util::evaluate_xpath(&xpath_ctx, xpath.trim(), false)?;
    Ok(nodes
        .into_iter()
        .filter(|node| Util::is_element_node(node))
        .collect())
}

/// The libxml tree re-parsed by `scraper`, so hint selectors get a complete
/// CSS implementation. Every element carries its index into `nodes` as
/// [`NODE_MARKER`], which leads each match back to the libxml node.
struct MarkedDocument {
    nodes: Vec<Node>,
    html: Html,
}

impl MarkedDocument {
    fn new(document: &Document, root: &Node) -> Self {
        let mut nodes = vec![root.clone()];
        nodes.extend(Util::get_elements_by_tag_name(root, "*"));

        for (index, node) in nodes.iter_mut().enumerate() {
            if let Err(error) = node.set_attribute(NODE_MARKER, &index.to_string()) {
                log::warn!("Marking <{}> for selector matching failed: {error}", node.get_name());
            }
        }

        let markup = document.to_string_with_options(SaveOptions {
            as_html: true,
            ..Default::default()
        });

        Self {
            nodes,
            html: Html::parse_document(&markup),
        }
    }

    fn select(&self, selector: &str) -> Result<Vec<Node>, ExtractorError> {
        let selector = Selector::parse(selector.trim())
            .map_err(|error| ExtractorError::Selector(format!("{error:?}")))?;

        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for element in self.html.select(&selector) {
            let Some(index) = self.marker_of(element) else {
                continue;
            };
            if seen.insert(index) {
                nodes.push(self.nodes[index].clone());
            }
        }

        Ok(nodes)
    }

    /// Index of the libxml node behind `element`. Elements the HTML5 parser
    /// made up on its own (an implied `<tbody>` for instance) resolve to
    /// their closest marked ancestor.
    fn marker_of(&self, element: ElementRef) -> Option<usize> {
        std::iter::once(*element)
            .chain(element.ancestors())
            .filter_map(|node| node.value().as_element()?.attr(NODE_MARKER))
            .filter_map(|marker| marker.parse::<usize>().ok())
            .find(|index| *index < self.nodes.len())
    }

    fn unmark(self) {
        for mut node in self.nodes {
            if let Err(error) = node.remove_attribute(NODE_MARKER) {
                log::warn!("Removing selector marker from <{}> failed: {error}", node.get_name());
            }
        }
    }
}

fn longest_text(nodes: Vec<Node>) -> Option<Node> {
    let mut best: Option<(usize, Node)> = None;

    for node in nodes {
        let length = Util::text_length(&node);
        let is_longer = best
            .as_ref()
            .map(|(best_length, _)| length > *best_length)
            .unwrap_or(true);

        if is_longer {
            best = Some((length, node));
        }
    }

    best.map(|(_, node)| node)
}
