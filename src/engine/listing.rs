use std::time::{Duration, Instant};

use tracing::debug;

/// Separator placed between titles in a listing. No trailing separator.
pub const LIST_DELIMITER: &str = ", ";

/// Visit `titles` one at a time, waiting `item_delay` before each, and join
/// them in their original order.
///
/// Each step only starts after the previous one resumed, so the total latency
/// is `titles.len() * item_delay`. An empty slice returns immediately.
pub async fn list_ordered(titles: &[String], item_delay: Duration) -> String {
    let t0 = Instant::now();
    let mut listing = String::new();

    for (index, title) in titles.iter().enumerate() {
        tokio::time::sleep(item_delay).await;
        if index > 0 {
            listing.push_str(LIST_DELIMITER);
        }
        listing.push_str(title);
        debug!("listing step {} {:?}", index, title);
    }

    debug!(
        "listing done items={} elapsed_ms={}",
        titles.len(),
        t0.elapsed().as_millis()
    );
    listing
}
