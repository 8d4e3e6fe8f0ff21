use crate::extractor::{ContentExtractor, ExtractionRequest, ExtractionResult, Output};
use crate::hints::{HintLoader, HintsConfig, RemoveHints};
use crate::render::error::RenderError;
use crate::render::{HtmlRenderer, RenderOptions};
use crate::{EaterConfig, EaterError, Webeater};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use url::Url;

const PAGE: &str = r#"<html><head><title>News</title></head><body>
    <nav>Home | About</nav>
    <article><h1>Story</h1><p>Body text</p><img src="/a.png" alt="A"></article>
</body></html>"#;

#[derive(Default)]
struct StaticRenderer {
    pages: HashMap<String, String>,
    options: Option<RenderOptions>,
    fail_load: bool,
    reloads: usize,
}

impl StaticRenderer {
    fn with_page(url: &str, html: &str) -> Self {
        let mut renderer = Self::default();
        renderer.pages.insert(url.into(), html.into());
        renderer
    }
}

#[async_trait]
impl HtmlRenderer for StaticRenderer {
    async fn load(&mut self, options: &RenderOptions) -> Result<(), RenderError> {
        if self.fail_load {
            return Err(RenderError::NotLoaded);
        }
        self.options = Some(options.clone());
        Ok(())
    }

    async fn render(&self, url: &Url) -> Result<String, RenderError> {
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or(RenderError::Status(404))
    }

    async fn reload(&mut self) -> Result<(), RenderError> {
        self.reloads += 1;
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), RenderError> {
        self.options = None;
        Ok(())
    }
}

/// Hands back the raw markup, for checking that the strategy is pluggable.
struct RawExtractor;

impl ContentExtractor for RawExtractor {
    fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        ExtractionResult {
            content: request.html.to_owned(),
            ..Default::default()
        }
    }
}

fn site_loader() -> (tempfile::TempDir, HintLoader) {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("site.json"),
        r#"{"remove": {"tags": ["nav"]}, "main": ["article"]}"#,
    )
    .unwrap();

    let loader = HintLoader::new(Some(dir.path()));
    (dir, loader)
}

fn site_config() -> EaterConfig {
    let mut config = EaterConfig::default();
    config.hint_files = vec!["site".into()];
    config
}

#[tokio::test]
async fn get_flat_text() {
    let (_dir, loader) = site_loader();
    let url = Url::parse("https://news.example/story").unwrap();
    let renderer = StaticRenderer::with_page(url.as_str(), PAGE);

    let mut eater = Webeater::create(site_config(), &loader, renderer).await.unwrap();
    assert_eq!(
        eater.renderer.options.as_ref().map(|options| options.window_size_w),
        Some(1280)
    );

    let output = eater.get(&url, None, false, false).await.unwrap();
    assert_eq!(
        output.to_string(),
        "# News\n# Story\nBody text\n## Images\n![A](https://news.example/a.png)"
    );
}

#[tokio::test]
async fn get_record_content_only() {
    let (_dir, loader) = site_loader();
    let url = Url::parse("https://news.example/story").unwrap();
    let renderer = StaticRenderer::with_page(url.as_str(), PAGE);

    let mut eater = Webeater::create(site_config(), &loader, renderer).await.unwrap();

    match eater.get(&url, None, true, true).await.unwrap() {
        Output::Record(record) => {
            assert_eq!(record.title.as_deref(), Some("News"));
            assert_eq!(record.content, "# Story\nBody text");
            assert!(record.images.is_none());
            assert!(record.links.is_none());
        }
        Output::Text(text) => panic!("expected a record, got '{text}'"),
    }
}

#[tokio::test]
async fn request_hints_replace_engine_hints() {
    let (_dir, loader) = site_loader();
    let url = Url::parse("https://news.example/story").unwrap();
    let renderer = StaticRenderer::with_page(url.as_str(), PAGE);

    let mut eater = Webeater::create(site_config(), &loader, renderer).await.unwrap();
    assert!(eater.hints().main.is_some());

    let hints = HintsConfig::new(
        Some(RemoveHints {
            tags: vec!["article".into()],
            ..Default::default()
        }),
        None,
    );
    let output = eater.get(&url, Some(&hints), false, true).await.unwrap();
    assert_eq!(output.content(), "Home | About");
}

#[tokio::test]
async fn failed_render_yields_nothing() {
    let (_dir, loader) = site_loader();
    let renderer = StaticRenderer::default();

    let mut eater = Webeater::create(site_config(), &loader, renderer).await.unwrap();
    let url = Url::parse("https://news.example/missing").unwrap();

    assert!(eater.get(&url, None, false, false).await.is_none());
    assert_eq!(eater.renderer.reloads, 1);
}

#[tokio::test]
async fn failed_renderer_load() {
    let (_dir, loader) = site_loader();
    let renderer = StaticRenderer {
        fail_load: true,
        ..Default::default()
    };

    let result = Webeater::create(site_config(), &loader, renderer).await;
    assert!(matches!(result, Err(EaterError::Render(_))));
}

#[tokio::test]
async fn custom_extractor() {
    let (_dir, loader) = site_loader();
    let url = Url::parse("https://news.example/story").unwrap();
    let renderer = StaticRenderer::with_page(url.as_str(), "<p>raw</p>");

    let mut eater = Webeater::with_extractor(site_config(), &loader, renderer, RawExtractor)
        .await
        .unwrap();

    let output = eater.get(&url, None, false, true).await.unwrap();
    assert_eq!(output.to_string(), "<p>raw</p>");

    eater.shutdown().await.unwrap();
}
