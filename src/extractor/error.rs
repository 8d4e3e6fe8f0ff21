use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("libXml Error")]
    Xml,
    #[error("Parsing HTML failed: {0}")]
    Parse(String),
    #[error("Evaluation of xpath '{0}' failed")]
    Xpath(String),
    #[error("Invalid selector: {0}")]
    Selector(String),
}
