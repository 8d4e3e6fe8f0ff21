pub mod config;
mod constants;
mod error;
pub mod extractor;
pub mod hints;
pub mod render;
mod util;

#[cfg(test)]
mod tests;

pub use config::EaterConfig;
pub use error::EaterError;
pub use extractor::{
    extract, ContentExtractor, ExtractionFlags, ExtractionRequest, ExtractionResult,
    HtmlExtractor, Output, Record,
};
pub use hints::{HintLoader, HintsConfig, MainContentHints, RemoveHints};
pub use render::{HtmlRenderer, HttpRenderer, RenderOptions};

use chrono::Utc;
use url::Url;

/// Renders pages and extracts their content.
///
/// Hints are loaded and merged once on creation and then shared by every
/// request. The extraction strategy is picked by the type parameter `E`.
pub struct Webeater<R: HtmlRenderer, E: ContentExtractor = HtmlExtractor> {
    config: EaterConfig,
    hints: HintsConfig,
    renderer: R,
    extractor: E,
}

impl<R: HtmlRenderer> Webeater<R, HtmlExtractor> {
    pub async fn create(
        config: EaterConfig,
        loader: &HintLoader,
        renderer: R,
    ) -> Result<Self, EaterError> {
        Self::with_extractor(config, loader, renderer, HtmlExtractor).await
    }
}

impl<R: HtmlRenderer, E: ContentExtractor> Webeater<R, E> {
    pub async fn with_extractor(
        config: EaterConfig,
        loader: &HintLoader,
        mut renderer: R,
        extractor: E,
    ) -> Result<Self, EaterError> {
        log::info!("Webeater initialized with config: {config}");

        let hints = config.combined_hints(loader);

        log::debug!("Loading renderer...");
        renderer.load(&RenderOptions::from(&config)).await?;
        log::debug!("Renderer loaded successfully.");

        Ok(Self {
            config,
            hints,
            renderer,
            extractor,
        })
    }

    pub fn config(&self) -> &EaterConfig {
        &self.config
    }

    /// The merged hints used when a request brings none of its own.
    pub fn hints(&self) -> &HintsConfig {
        &self.hints
    }

    /// Render `url` and extract its content.
    ///
    /// Returns `None` if the page could not be rendered. In that case the
    /// renderer is reloaded so the next request starts from a clean state.
    pub async fn get(
        &mut self,
        url: &Url,
        hints: Option<&HintsConfig>,
        structured: bool,
        content_only: bool,
    ) -> Option<Output> {
        log::info!(
            "Fetching content {}{}from {url}",
            if content_only { "only " } else { "" },
            if structured { "as JSON " } else { "" },
        );
        let start = Utc::now();

        let html = match self.renderer.render(url).await {
            Ok(html) => html,
            Err(error) => {
                log::error!("Rendering failed: {error}");
                if let Err(error) = self.renderer.reload().await {
                    log::error!("Reloading renderer failed: {error}");
                }
                log::error!("Failed to fetch content from {url}.");
                return None;
            }
        };

        let rendered = Utc::now();
        log::info!(
            "Rendered HTML content of {} characters in {}ms",
            html.chars().count(),
            (rendered - start).num_milliseconds()
        );

        let output = self.extract_html(url.as_str(), &html, hints, structured, content_only);

        let now = Utc::now();
        log::info!(
            "Content extracted from {url} in {}ms. Total eating time: {}ms",
            (now - rendered).num_milliseconds(),
            (now - start).num_milliseconds()
        );

        Some(output)
    }

    /// Extract content from markup that is already at hand. `url` only
    /// serves as base for relative asset urls.
    pub fn extract_html(
        &self,
        url: &str,
        html: &str,
        hints: Option<&HintsConfig>,
        structured: bool,
        content_only: bool,
    ) -> Output {
        let flags = ExtractionFlags::new(structured, content_only);
        let request = ExtractionRequest {
            url,
            html,
            hints: hints.unwrap_or(&self.hints),
            flags,
        };

        self.extractor.extract(&request).render(&flags)
    }

    pub async fn shutdown(mut self) -> Result<(), EaterError> {
        self.renderer.shutdown().await?;
        Ok(())
    }
}
