pub mod error;

#[cfg(test)]
mod tests;

use self::error::RenderError;
use crate::config::EaterConfig;
use crate::constants;
use async_trait::async_trait;
use encoding_rs::Encoding;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("webeater/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub window_size_w: u32,
    pub window_size_h: u32,
    /// Upper bound for loading a single page.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            window_size_w: 1280,
            window_size_h: 800,
            timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl From<&EaterConfig> for RenderOptions {
    fn from(config: &EaterConfig) -> Self {
        Self {
            window_size_w: config.window_size_w,
            window_size_h: config.window_size_h,
            ..Default::default()
        }
    }
}

/// Something that turns a url into the markup of the finished page.
#[async_trait]
pub trait HtmlRenderer: Send + Sync {
    async fn load(&mut self, options: &RenderOptions) -> Result<(), RenderError>;

    async fn render(&self, url: &Url) -> Result<String, RenderError>;

    /// Start over after a failed render.
    async fn reload(&mut self) -> Result<(), RenderError>;

    async fn shutdown(&mut self) -> Result<(), RenderError>;
}

/// Fetches pages over plain HTTP. Scripts are not executed, so the markup is
/// what the server sent.
#[derive(Default)]
pub struct HttpRenderer {
    client: Option<Client>,
    options: RenderOptions,
}

impl HttpRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_client(options: &RenderOptions) -> Result<Client, RenderError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("viewport-width"),
            HeaderValue::from(options.window_size_w),
        );

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .default_headers(headers)
            .build()?;
        Ok(client)
    }

    fn check_content_type(headers: &HeaderMap) -> bool {
        headers
            .get(CONTENT_TYPE)
            .and_then(|content_type| content_type.to_str().ok())
            .map(|content_type| content_type.contains("text/html"))
            .unwrap_or(false)
    }

    fn get_encoding_from_http_header(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(CONTENT_TYPE)
            .and_then(|header| header.to_str().ok())
            .and_then(|content_type| constants::CHARSET_HEADER.captures(content_type))
            .and_then(|captures| captures.get(1))
            .map(|regex_match| regex_match.as_str())
    }

    fn get_encoding_from_html(html: &str) -> Option<&str> {
        constants::CHARSET_META
            .captures(html)
            .and_then(|captures| captures.get(1))
            .map(|regex_match| regex_match.as_str())
    }

    fn decode_html(bytes: &[u8], encoding: Option<&str>) -> Option<String> {
        if let Some(encoding) = encoding {
            if let Some(encoding) = Encoding::for_label(encoding.as_bytes()) {
                let (decoded_html, _, invalid_chars) = encoding.decode(bytes);

                if !invalid_chars {
                    return Some(decoded_html.into_owned());
                }
            }
            log::warn!("Could not decode HTML. Encoding: '{encoding}'");
        }
        None
    }

    pub(crate) fn decode(bytes: &[u8], headers: &HeaderMap) -> String {
        if let Some(html) = Self::decode_html(bytes, Self::get_encoding_from_http_header(headers)) {
            return html;
        }

        let sniffed = String::from_utf8_lossy(bytes);
        if let Some(html) = Self::decode_html(bytes, Self::get_encoding_from_html(&sniffed)) {
            return html;
        }

        log::debug!("No encoding of HTML detected - assuming utf-8");
        sniffed.into_owned()
    }
}

#[async_trait]
impl HtmlRenderer for HttpRenderer {
    async fn load(&mut self, options: &RenderOptions) -> Result<(), RenderError> {
        self.client = Some(Self::build_client(options)?);
        self.options = options.clone();
        log::debug!(
            "HTTP renderer ready ({}x{}, timeout {:?})",
            options.window_size_w,
            options.window_size_h,
            options.timeout
        );
        Ok(())
    }

    async fn render(&self, url: &Url) -> Result<String, RenderError> {
        let client = self.client.as_ref().ok_or(RenderError::NotLoaded)?;

        let response = client.get(url.as_str()).send().await.map_err(|err| {
            log::error!("Downloading HTML failed: GET '{}' - '{}'", url.as_str(), err);
            err
        })?;

        if !response.status().is_success() {
            log::error!("GET '{}' returned {}", url.as_str(), response.status());
            return Err(RenderError::Status(response.status().as_u16()));
        }

        let headers = response.headers().clone();
        if !Self::check_content_type(&headers) {
            log::error!("Content type of '{}' is not text/html", url.as_str());
            return Err(RenderError::ContentType);
        }

        let bytes = response.bytes().await?;
        Ok(Self::decode(&bytes, &headers))
    }

    async fn reload(&mut self) -> Result<(), RenderError> {
        let options = self.options.clone();
        self.load(&options).await
    }

    async fn shutdown(&mut self) -> Result<(), RenderError> {
        self.client = None;
        Ok(())
    }
}
