use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown image alignment `{0}`")]
    UnknownAlignment(String),
    // Froms
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
