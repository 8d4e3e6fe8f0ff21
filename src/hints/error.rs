use thiserror::Error;

#[derive(Error, Debug)]
pub enum HintError {
    #[error("Hint source '{0}' not found")]
    NotFound(String),
    #[error("IO error")]
    IO(#[from] std::io::Error),
    #[error("Malformed hint document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Hint source is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}
