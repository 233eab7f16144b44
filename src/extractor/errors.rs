use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("readability failed: {0}")]
    Readability(String),

    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}
