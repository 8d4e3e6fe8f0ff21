use std::collections::HashSet;

use libxml::{
    tree::{Node, NodeType},
    xpath::Context,
};

use crate::{constants, extractor::error::ExtractorError};

pub struct Util;

impl Util {
    /// Remove duplicate entries, keeping the first occurrence of each.
    pub fn dedup(values: &mut Vec<String>) {
        let mut seen = HashSet::with_capacity(values.len());
        values.retain(|value| seen.insert(value.clone()));
    }

    /// Collapse runs of blank lines (and the spaces around line breaks) and
    /// runs of spaces until none remain, then trim. Applying it to its own
    /// output changes nothing.
    pub fn normalize_whitespace(text: &str) -> String {
        let mut text = text.trim().to_owned();

        loop {
            let collapsed = constants::MULTI_NEWLINE.replace_all(&text, "\n");
            let collapsed = constants::MULTI_SPACE.replace_all(&collapsed, " ");
            let collapsed = collapsed.trim();

            if collapsed == text {
                return text;
            }
            text = collapsed.to_owned();
        }
    }

    pub fn evaluate_xpath(
        xpath_ctx: &Context,
        xpath: &str,
        thorw_if_empty: bool,
    ) -> Result<Vec<Node>, ExtractorError> {
        let res = xpath_ctx.evaluate(xpath).map_err(|()| {
            log::debug!("Evaluation of xpath '{xpath}' failed");
            ExtractorError::Xpath(xpath.to_owned())
        })?;

        let node_vec = res.get_nodes_as_vec();

        if node_vec.is_empty() {
            log::debug!("Evaluation of xpath '{xpath}' yielded no results");
            if thorw_if_empty {
                return Err(ExtractorError::Xpath(xpath.to_owned()));
            }
        }

        Ok(node_vec)
    }

    pub fn is_text_node(node: &Node) -> bool {
        matches!(
            node.get_type(),
            Some(NodeType::TextNode) | Some(NodeType::CDataSectionNode)
        )
    }

    pub fn is_element_node(node: &Node) -> bool {
        node.get_type()
            .map(|t| t == NodeType::ElementNode)
            .unwrap_or(false)
    }

    pub fn has_tag_name(node: &Node, tag_name: &str) -> bool {
        Self::is_element_node(node) && node.get_name().eq_ignore_ascii_case(tag_name)
    }

    /// Flattened text of a node and all its descendants, trimmed.
    pub fn get_inner_text(node: &Node) -> String {
        node.get_content().trim().to_owned()
    }

    /// Length of the rendered text in characters.
    pub fn text_length(node: &Node) -> usize {
        node.get_content().chars().count()
    }

    pub fn get_elements_by_tag_name(node: &Node, tag: &str) -> Vec<Node> {
        let all_tags = tag == "*";
        Self::get_elements_by(node, |child| all_tags || Self::has_tag_name(child, tag))
    }

    pub fn get_elements_by_tag_names(node: &Node, tags: &[&str]) -> Vec<Node> {
        Self::get_elements_by(node, |child| {
            tags.iter().any(|tag| Self::has_tag_name(child, tag))
        })
    }

    /// All descendant elements of `node` matching `filter`, in document order.
    pub fn get_elements_by<F>(node: &Node, filter: F) -> Vec<Node>
    where
        F: Fn(&Node) -> bool,
    {
        fn get_elems<F: Fn(&Node) -> bool>(node: &Node, filter: &F, vec: &mut Vec<Node>) {
            for child in node.get_child_elements() {
                if filter(&child) {
                    vec.push(child.clone());
                }
                get_elems(&child, filter, vec);
            }
        }

        let mut vec = Vec::new();
        get_elems(node, &filter, &mut vec);
        vec
    }

    pub fn get_first_element_by_tag_name(node: &Node, tag: &str) -> Option<Node> {
        for child in node.get_child_elements() {
            if Self::has_tag_name(&child, tag) {
                return Some(child);
            }

            if let Some(node) = Self::get_first_element_by_tag_name(&child, tag) {
                return Some(node);
            }
        }

        None
    }

    /// Detach all `nodes` from the tree. Nodes that sit inside another node of
    /// the list go away with their ancestor. Returns the number of subtrees
    /// unlinked.
    pub fn strip_nodes(nodes: Vec<Node>) -> usize {
        let mut stripped = 0;
        let node_vec_clone = nodes.clone();

        for mut node in nodes {
            if Self::parent_part_of_result(&node, &node_vec_clone) {
                continue;
            }

            node.unlink();
            stripped += 1;
        }

        stripped
    }

    fn parent_part_of_result(node: &Node, xpath_result: &[Node]) -> bool {
        if let Some(parent) = node.get_parent() {
            for n in xpath_result {
                if n == &parent {
                    return true;
                }
            }

            return Self::parent_part_of_result(&parent, xpath_result);
        }

        false
    }
}
