use libxml::tree::Node;

use crate::hints::RemoveHints;
use crate::util::Util;

/// Detach every element named by `remove` from the tree below `root`.
///
/// Tags go first, then classes, then ids. Each pass only sees what the
/// previous ones left behind.
pub fn apply(root: &Node, remove: Option<&RemoveHints>) {
    let remove = match remove {
        Some(remove) => remove,
        None => return,
    };

    for tag in &remove.tags {
        let nodes = Util::get_elements_by_tag_name(root, tag);
        log_stripped("tag", tag, Util::strip_nodes(nodes));
    }

    // exact token match on the class list, "ad" does not match "header"
    for class_name in &remove.classes {
        let nodes = Util::get_elements_by(root, |node| node.get_class_names().contains(class_name));
        log_stripped("class", class_name, Util::strip_nodes(nodes));
    }

    for id in &remove.ids {
        let nodes = Util::get_elements_by(root, |node| {
            node.get_attribute("id").as_deref() == Some(id.as_str())
        });
        log_stripped("id", id, Util::strip_nodes(nodes));
    }
}

fn log_stripped(kind: &str, value: &str, count: usize) {
    if count > 0 {
        log::debug!("Removed {count} element(s) with {kind}: '{value}'");
    }
}
