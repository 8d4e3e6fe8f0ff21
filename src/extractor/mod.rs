pub mod error;
mod assets;
mod filter;
mod locator;
mod output;
mod structured;


pub use self::assets::resolve_url;
pub use self::output::{ExtractionResult, Output, Record};

use self::error::ExtractorError;
use crate::constants::{EXTRACTION_FAILED, NO_CONTENT};
use crate::hints::HintsConfig;
use crate::util::Util;
use libxml::parser::Parser;
use libxml::tree::Document;
use libxml::xpath::Context;

/// What to produce for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractionFlags {
    pub include_images: bool,
    pub include_links: bool,
    /// Leave out the title line of the flat text form.
    pub content_only: bool,
    /// Return a discrete [`Record`] instead of flat text.
    pub structured: bool,
}

impl ExtractionFlags {
    /// Assets are collected unless only the content was asked for.
    pub fn new(structured: bool, content_only: bool) -> Self {
        Self {
            include_images: !content_only,
            include_links: !content_only,
            content_only,
            structured,
        }
    }
}

impl Default for ExtractionFlags {
    fn default() -> Self {
        Self::new(false, false)
    }
}

pub struct ExtractionRequest<'a> {
    /// Address of the page, base for relative asset urls.
    pub url: &'a str,
    pub html: &'a str,
    pub hints: &'a HintsConfig,
    pub flags: ExtractionFlags,
}

/// A strategy turning rendered HTML into an [`ExtractionResult`].
///
/// Implementations never fail: problems end up as a description in the
/// `content` of the result, so a caller processing many pages can carry on.
pub trait ContentExtractor {
    fn extract(&self, request: &ExtractionRequest) -> ExtractionResult;
}

/// Hint driven extraction on a libxml document.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlExtractor;

impl ContentExtractor for HtmlExtractor {
    fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        if request.html.trim().is_empty() {
            log::warn!("Empty HTML for '{}'", request.url);
            return ExtractionResult {
                content: NO_CONTENT.into(),
                ..Default::default()
            };
        }

        Self::or_failure(request.url, Self::extract_document(request))
    }
}

impl HtmlExtractor {
    /// Turn a pipeline error into a result describing it.
    fn or_failure(
        url: &str,
        result: Result<ExtractionResult, ExtractorError>,
    ) -> ExtractionResult {
        result.unwrap_or_else(|error| {
            log::error!("Extracting content of '{url}' failed: {error}");
            ExtractionResult {
                content: format!("{EXTRACTION_FAILED}: {error}"),
                ..Default::default()
            }
        })
    }

    fn extract_document(request: &ExtractionRequest) -> Result<ExtractionResult, ExtractorError> {
        libxml::tree::node::set_node_rc_guard(10);

        let document = Self::parse_html(request.html)?;
        let Some(root) = document.get_root_element() else {
            log::warn!("No elements in HTML of '{}'", request.url);
            return Ok(ExtractionResult {
                content: NO_CONTENT.into(),
                ..Default::default()
            });
        };

        filter::apply(&root, request.hints.remove.as_ref());

        let xpath_ctx = Self::get_xpath_ctx(&document)?;
        let title = Self::extract_title(&xpath_ctx);
        let main = locator::locate(&document, request.hints.main.as_ref()).unwrap_or(root);

        let content = structured::extract(&main);
        let images = if request.flags.include_images {
            assets::extract_images(&main, request.url)
        } else {
            Vec::new()
        };
        let links = if request.flags.include_links {
            assets::extract_links(&main, request.url)
        } else {
            Vec::new()
        };

        log::debug!(
            "Extracted {} characters, {} images and {} links from '{}'",
            content.chars().count(),
            images.len(),
            links.len(),
            request.url
        );

        Ok(ExtractionResult {
            title,
            content,
            images,
            links,
        })
    }

    fn parse_html(html: &str) -> Result<Document, ExtractorError> {
        let parser = Parser::default_html();
        parser.parse_string(html).map_err(|err| {
            log::error!("Parsing HTML failed {err:?}");
            ExtractorError::Parse(format!("{err:?}"))
        })
    }

    fn get_xpath_ctx(doc: &Document) -> Result<Context, ExtractorError> {
        Context::new(doc).map_err(|()| {
            log::error!("Creating xpath context failed for downloaded HTML");
            ExtractorError::Xml
        })
    }

    fn extract_title(xpath_ctx: &Context) -> Option<String> {
        Util::evaluate_xpath(xpath_ctx, "//title", false)
            .ok()?
            .first()
            .map(Util::get_inner_text)
            .filter(|title| !title.is_empty())
    }
}

/// Extract the readable content of a rendered page.
///
/// # Arguments
///
/// * `url` - address of the page, used to complete relative asset urls
/// * `html` - rendered markup
/// * `hints` - merged hints deciding what gets removed and where the content is
/// * `flags` - which parts to collect and how to render them
///
pub fn extract(url: &str, html: &str, hints: &HintsConfig, flags: ExtractionFlags) -> Output {
    let request = ExtractionRequest {
        url,
        html,
        hints,
        flags,
    };
    HtmlExtractor.extract(&request).render(&flags)
}
