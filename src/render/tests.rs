use super::error::RenderError;
use super::{HtmlRenderer, HttpRenderer, RenderOptions};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Answer a single request with the given status, content type and body.
async fn serve(status: &str, content_type: &str, body: Vec<u8>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend(body);

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buffer = [0u8; 4096];
            let _ = socket.read(&mut buffer).await;
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        }
    });

    Url::parse(&format!("http://{addr}/page")).unwrap()
}

async fn loaded_renderer() -> HttpRenderer {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut renderer = HttpRenderer::new();
    renderer.load(&RenderOptions::default()).await.unwrap();
    renderer
}

#[tokio::test]
async fn render_html_page() {
    let url = serve(
        "200 OK",
        "text/html; charset=utf-8",
        b"<html><body><p>Hi</p></body></html>".to_vec(),
    )
    .await;

    let html = loaded_renderer().await.render(&url).await.unwrap();
    assert!(html.contains("<p>Hi</p>"));
}

#[tokio::test]
async fn reject_other_content_types() {
    let url = serve("200 OK", "application/json", b"{}".to_vec()).await;

    let result = loaded_renderer().await.render(&url).await;
    assert!(matches!(result, Err(RenderError::ContentType)));
}

#[tokio::test]
async fn reject_error_status() {
    let url = serve("404 Not Found", "text/html", b"gone".to_vec()).await;

    let result = loaded_renderer().await.render(&url).await;
    assert!(matches!(result, Err(RenderError::Status(404))));
}

#[tokio::test]
async fn render_needs_load() {
    let url = Url::parse("http://127.0.0.1:9/").unwrap();

    let mut renderer = HttpRenderer::new();
    assert!(matches!(
        renderer.render(&url).await,
        Err(RenderError::NotLoaded)
    ));

    renderer.load(&RenderOptions::default()).await.unwrap();
    renderer.shutdown().await.unwrap();
    assert!(matches!(
        renderer.render(&url).await,
        Err(RenderError::NotLoaded)
    ));
}

#[test]
fn decode_with_header_charset() {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=ISO-8859-1"),
    );

    assert_eq!(HttpRenderer::decode(b"caf\xe9", &headers), "café");
}

#[test]
fn decode_with_meta_charset() {
    let html = b"<html><head><meta charset=\"windows-1252\"></head><body>caf\xe9</body></html>";

    let decoded = HttpRenderer::decode(html, &HeaderMap::new());
    assert!(decoded.contains("café"));
}

#[test]
fn decode_defaults_to_utf8() {
    let decoded = HttpRenderer::decode("<p>Grüße</p>".as_bytes(), &HeaderMap::new());
    assert_eq!(decoded, "<p>Grüße</p>");
}
