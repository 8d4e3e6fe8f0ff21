use crate::config::error::ConfigError;
use crate::render::error::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EaterError {
    #[error("Config Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render Error: {0}")]
    Render(#[from] RenderError),
    #[error("Url Error: {0}")]
    Url(#[from] url::ParseError),
    #[error("IO Error: {0}")]
    IO(#[from] std::io::Error),
}
