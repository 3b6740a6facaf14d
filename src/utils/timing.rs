//! Deadlines for upstream calls.
//!
//! Every upstream call in the fan-out goes through [`call_with_deadline`]:
//! one deadline per call, and on expiry or failure the call's own degraded
//! value is substituted. Nothing here cancels sibling calls.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error_handling::{Degradation, DegradationStats, FailureKind, UpstreamSource};

/// Runs `call` under `deadline`, returning `degraded` if it times out or fails.
///
/// Timeouts and failures are logged at `warn!` (a missing credential only at
/// `debug!`, since that is a configured state rather than a fault) and counted
/// in `stats`.
///
/// # Arguments
///
/// * `source` - Which upstream the call talks to (for logs and counters)
/// * `label` - Short description of the call, e.g. `"MX example.com"`
/// * `deadline` - Maximum time the call may take
/// * `degraded` - Value substituted when the call does not succeed
/// * `stats` - Degradation counters
/// * `call` - The upstream call
pub async fn call_with_deadline<T, F>(
    source: UpstreamSource,
    label: &str,
    deadline: Duration,
    degraded: T,
    stats: &DegradationStats,
    call: F,
) -> T
where
    F: Future<Output = Result<T, Degradation>>,
{
    let start = Instant::now();
    let outcome = match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(Degradation::timeout(source, deadline)),
    };

    match outcome {
        Ok(value) => {
            log::debug!(
                "{} {} completed in {}ms",
                source.as_ref(),
                label,
                duration_to_ms(start.elapsed())
            );
            value
        }
        Err(degradation) => {
            if degradation.kind == FailureKind::NoCredential {
                log::debug!("{} skipped for {}: {}", source.as_ref(), label, degradation.detail);
            } else {
                log::warn!("{} lookup degraded for {}: {}", source.as_ref(), label, degradation);
            }
            stats.record(&degradation);
            degraded
        }
    }
}

/// Converts a Duration to whole milliseconds.
pub fn duration_to_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}
