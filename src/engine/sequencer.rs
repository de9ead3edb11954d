// Async sequencer — drives the delayed listing and the persistence fan-out
// over a snapshot of the library.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::listing::list_ordered;
use super::persist::{persist_all, PersistResults};
use crate::config::LibraryConfig;
use crate::error::LibraryError;
use crate::storage::traits::BookWriter;
use crate::store::library::Library;

pub struct Sequencer {
    writer: Arc<dyn BookWriter>,
    item_delay: Duration,
    start_jitter: Duration,
}

impl Sequencer {
    pub fn new(writer: Arc<dyn BookWriter>, item_delay: Duration, start_jitter: Duration) -> Self {
        Self {
            writer,
            item_delay,
            start_jitter,
        }
    }

    pub fn from_config(writer: Arc<dyn BookWriter>, config: &LibraryConfig) -> Self {
        Self::new(writer, config.list_item_delay(), config.persist_start_jitter())
    }

    /// Ordered listing of the titles present when the call is made.
    ///
    /// Runs on its own task so a failure inside the walk surfaces as an error
    /// instead of tearing down the connection.
    pub async fn list(&self, library: &Library) -> Result<String, LibraryError> {
        let titles = library.snapshot();
        info!("listing {} books", titles.len());
        let item_delay = self.item_delay;
        tokio::spawn(async move { list_ordered(&titles, item_delay).await })
            .await
            .map_err(|e| LibraryError::Unexpected(format!("listing task failed: {}", e)))
    }

    /// Persist the titles present when the call is made.
    pub async fn persist(&self, library: &Library) -> Result<PersistResults, LibraryError> {
        let titles = library.snapshot();
        info!("persisting {} books", titles.len());
        persist_all(titles, Arc::clone(&self.writer), self.start_jitter).await
    }
}
