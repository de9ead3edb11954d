// Library error taxonomy and its translation into JSON error envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Missing or empty input.
    #[error("{0}")]
    Validation(String),

    /// Title collides with one already in the library.
    #[error("{0}")]
    Duplicate(String),

    /// Title is not in the library.
    #[error("{0}")]
    NotFound(String),

    /// Writing a book artifact failed.
    #[error("failed to write book {title:?}: {source}")]
    Io {
        title: String,
        #[source]
        source: std::io::Error,
    },

    /// Anything else, e.g. a background task that panicked.
    #[error("{0}")]
    Unexpected(String),
}

impl LibraryError {
    pub fn title_required() -> Self {
        Self::Validation("Book title is required.".to_string())
    }

    pub fn already_exists() -> Self {
        Self::Duplicate("Book already exists in the library.".to_string())
    }

    pub fn new_name_exists() -> Self {
        Self::Duplicate("New book name already exists in the library.".to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound("Book not found in the library.".to_string())
    }

    /// Status used when a handler does not override it.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Duplicate(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io { .. } | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A library error paired with the HTTP status it is answered with.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: LibraryError,
}

impl ApiError {
    pub fn with_status(status: StatusCode, error: LibraryError) -> Self {
        Self { status, error }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> &LibraryError {
        &self.error
    }
}

impl From<LibraryError> for ApiError {
    fn from(error: LibraryError) -> Self {
        Self {
            status: error.status(),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.error.to_string() }))).into_response()
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
