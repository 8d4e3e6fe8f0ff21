use libxml::tree::Node;
use url::Url;

use crate::constants::{ABSOLUTE_PREFIXES, DEFAULT_IMAGE_ALT, SKIPPED_LINK_PREFIXES};
use crate::util::Util;

/// Markdown image references for every `<img>` with a source below `node`.
pub fn extract_images(node: &Node, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();

    Util::get_elements_by_tag_name(node, "img")
        .iter()
        .filter_map(|img| {
            let src = img.get_attribute("src")?;
            let src = src.trim();
            if src.is_empty() {
                return None;
            }

            let alt = img
                .get_attribute("alt")
                .map(|alt| alt.trim().to_owned())
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_ALT.into());

            Some(format!("![{alt}]({})", resolve(base.as_ref(), base_url, src)))
        })
        .collect()
}

/// Markdown links for every `<a>` below `node` that points somewhere else.
/// Script, fragment and mail links are skipped.
pub fn extract_links(node: &Node, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();

    Util::get_elements_by_tag_name(node, "a")
        .iter()
        .filter_map(|link| {
            let href = link.get_attribute("href")?;
            let href = href.trim();
            if href.is_empty()
                || SKIPPED_LINK_PREFIXES
                    .iter()
                    .any(|prefix| href.starts_with(prefix))
            {
                return None;
            }

            let mut text = Util::get_inner_text(link);
            if text.is_empty() {
                text = href.to_owned();
            }

            Some(format!("[{text}]({})", resolve(base.as_ref(), base_url, href)))
        })
        .collect()
}

/// Make `reference` absolute with respect to the page at `base_url`.
///
/// * `//host/x` gets an `https:` scheme
/// * `/x` is appended to the scheme and host of the page
/// * `http(s)://` and `data:` references are returned unchanged
/// * anything else is appended to the page url minus its last path segment,
///   query and fragment
pub fn resolve_url(base_url: &str, reference: &str) -> String {
    resolve(Url::parse(base_url).ok().as_ref(), base_url, reference)
}

fn resolve(base: Option<&Url>, base_url: &str, reference: &str) -> String {
    if reference.starts_with("//") {
        return format!("https:{reference}");
    }

    if reference.starts_with('/') {
        return match base.and_then(origin) {
            Some(origin) => format!("{origin}{reference}"),
            None => {
                log::debug!("Can't resolve '{reference}' against '{base_url}'");
                reference.to_owned()
            }
        };
    }

    if ABSOLUTE_PREFIXES
        .iter()
        .any(|prefix| starts_with_ignore_case(reference, prefix))
    {
        return reference.to_owned();
    }

    let page = match base {
        Some(base) => {
            let mut page = base.clone();
            page.set_query(None);
            page.set_fragment(None);
            page.to_string()
        }
        None => base_url.to_owned(),
    };
    let directory = page.rsplit_once('/').map(|(path, _)| path).unwrap_or(&page);
    format!("{directory}/{reference}")
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|start| start.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

fn origin(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut origin = format!("{}://{host}", url.scheme());
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{port}"));
    }
    Some(origin)
}
