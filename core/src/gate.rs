//! Minimum-duration gate for the loading phase.

use std::future::Future;
use std::time::Duration;

/// Default minimum time the loading phase stays visible.
pub const DEFAULT_MIN_LOADING: Duration = Duration::from_secs(1);

/// Awaits `future` and a `min` timer together and resolves with the future's
/// output once both have completed, i.e. after `max(elapsed, min)`.
pub async fn at_least<F>(min: Duration, future: F) -> F::Output
where
    F: Future,
{
    let (output, ()) = tokio::join!(future, tokio::time::sleep(min));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fast_future_waits_for_minimum() {
        let start = Instant::now();
        let value = at_least(Duration::from_millis(1000), async { 7 }).await;
        assert_eq!(value, 7);
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_future_is_not_extended() {
        let start = Instant::now();
        let value = at_least(Duration::from_millis(1000), async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            "done"
        })
        .await;
        assert_eq!(value, "done");
        assert_eq!(start.elapsed(), Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_minimum_adds_no_delay() {
        let start = Instant::now();
        at_least(Duration::ZERO, async {}).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
