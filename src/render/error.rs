use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Renderer is not loaded")]
    NotLoaded,
    #[error("Http request failed")]
    Http(#[from] reqwest::Error),
    #[error("Http status {0}")]
    Status(u16),
    #[error("Content-type suggest no html")]
    ContentType,
}
