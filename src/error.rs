#[derive(Debug, thiserror::Error)]
pub enum DeckBuilderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Scryfall error {status} ({code}): {details}")]
    Api {
        status: u16,
        code: String,
        details: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DeckBuilderError {
    /// True when the API answered that the query matched nothing.
    ///
    /// Scryfall reports an empty search as a 404 with code `not_found`
    /// rather than an empty list.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, DeckBuilderError::Api { code, .. } if code == "not_found")
    }
}

pub type Result<T> = std::result::Result<T, DeckBuilderError>;
