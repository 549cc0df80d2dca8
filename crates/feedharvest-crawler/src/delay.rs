//! Randomized pauses between page interactions.

use feedharvest_core::DelayRange;
use rand::Rng;
use std::time::Duration;

/// Draw a pause length uniformly from `range`.
pub fn pick_delay(range: DelayRange) -> Duration {
    if range.max_ms <= range.min_ms {
        return Duration::from_millis(range.min_ms);
    }
    Duration::from_millis(rand::thread_rng().gen_range(range.min_ms..=range.max_ms))
}

/// Sleep for a random duration within `range`.
pub async fn pause(range: DelayRange) {
    let delay = pick_delay(range);
    if delay.is_zero() {
        return;
    }
    tracing::trace!(?delay, "pausing");
    tokio::time::sleep(delay).await;
}
