use shared::error::{ApiError, ApiException, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid backend url '{0}'")]
    InvalidUrl(String),
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("catalog backend returned status {status}: {source}")]
    Backend {
        status: u16,
        #[source]
        source: ApiException,
    },
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        match self {
            CatalogError::NotFound(_) => true,
            CatalogError::Backend { source, .. } => source.code == ErrorCode::NotFound,
            _ => false,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        let code = match self {
            CatalogError::NotFound(_) => ErrorCode::NotFound,
            CatalogError::Backend { source, .. } => source.code,
            CatalogError::InvalidUrl(_) | CatalogError::Decode(_) => ErrorCode::BadRequest,
            CatalogError::Transport(_) => ErrorCode::Unavailable,
            CatalogError::Io { .. } => ErrorCode::Internal,
        };
        ApiError::new(code, self.to_string())
    }
}
