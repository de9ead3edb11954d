// Persistence fan-out — one write task per title, joined into a single result map.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::error::LibraryError;
use crate::storage::traits::BookWriter;

/// Value recorded for a title whose write failed.
pub const PERSIST_FAILURE: f64 = -1.0;

/// Title -> simulated write latency, or [`PERSIST_FAILURE`].
pub type PersistResults = BTreeMap<String, f64>;

/// Persist every title concurrently and wait for all of them.
///
/// Each title gets its own task that sleeps a random startup delay in
/// `[0, start_jitter)`, then writes through `writer`. Write failures are
/// logged and recorded as [`PERSIST_FAILURE`] without affecting the other
/// tasks. An empty `titles` completes immediately with an empty map.
pub async fn persist_all(
    titles: Vec<String>,
    writer: Arc<dyn BookWriter>,
    start_jitter: Duration,
) -> Result<PersistResults, LibraryError> {
    let mut results = PersistResults::new();
    if titles.is_empty() {
        return Ok(results);
    }

    let t0 = Instant::now();
    let expected = titles.len();
    let mut tasks = JoinSet::new();
    for title in titles {
        let writer = Arc::clone(&writer);
        tasks.spawn(async move {
            let outcome = persist_one(&title, writer.as_ref(), start_jitter).await;
            (title, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (title, outcome) = joined
            .map_err(|e| LibraryError::Unexpected(format!("persistence task failed: {}", e)))?;
        results.insert(title, outcome);
    }

    let failed = results.values().filter(|v| **v < 0.0).count();
    info!(
        "persisted {} books ({} failed) elapsed_ms={}",
        expected,
        failed,
        t0.elapsed().as_millis()
    );
    Ok(results)
}

/// Whole-millisecond delay drawn from `[0, start_jitter)`. Jitter beyond
/// `u64::MAX` milliseconds saturates.
fn startup_delay<R: Rng>(rng: &mut R, start_jitter: Duration) -> Duration {
    let jitter_ms = u64::try_from(start_jitter.as_millis()).unwrap_or(u64::MAX);
    if jitter_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rng.gen_range(0..jitter_ms))
}

async fn persist_one(title: &str, writer: &dyn BookWriter, start_jitter: Duration) -> f64 {
    // ThreadRng is not Send; draw everything before the first await.
    let (startup, latency) = {
        let mut rng = rand::thread_rng();
        let startup = startup_delay(&mut rng, start_jitter);
        let latency = rng.gen::<f64>() * title.chars().count() as f64;
        (startup, latency)
    };

    tokio::time::sleep(startup).await;
    debug!("persisting {:?} after {}ms", title, startup.as_millis());

    match writer.write_book(title).await {
        Ok(()) => {
            info!("book {:?} saved", title);
            latency
        }
        Err(e) => {
            error!("error persisting book {:?}: {}", title, e);
            PERSIST_FAILURE
        }
    }
}
