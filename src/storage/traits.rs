use async_trait::async_trait;

use crate::error::LibraryError;

/// Body written for a persisted book.
pub fn artifact_body(title: &str) -> String {
    format!("Book: {}", title)
}

#[async_trait]
pub trait BookWriter: Send + Sync {
    /// Durably write the artifact for `title`.
    async fn write_book(&self, title: &str) -> Result<(), LibraryError>;
}
