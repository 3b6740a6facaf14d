//! Upstream degradation statistics.
//!
//! Thread-safe counters for every (source, failure kind) pair, so operators
//! can tell a missing abuse credential apart from a failing abuse endpoint
//! without changing the response contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{Degradation, FailureKind, UpstreamSource};

/// Thread-safe degradation tracker.
///
/// All (source, kind) pairs are initialized to zero on creation, so recording
/// never allocates and can be shared across tasks behind an `Arc`.
#[derive(Debug)]
pub struct DegradationStats {
    counts: HashMap<(UpstreamSource, FailureKind), AtomicUsize>,
}

impl DegradationStats {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for source in UpstreamSource::iter() {
            for kind in FailureKind::iter() {
                counts.insert((source, kind), AtomicUsize::new(0));
            }
        }
        DegradationStats { counts }
    }

    /// Counts one degradation.
    pub fn record(&self, degradation: &Degradation) {
        if let Some(counter) = self.counts.get(&(degradation.upstream, degradation.kind)) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "No degradation counter for {:?}/{:?}; DegradationStats was not fully initialized",
                degradation.upstream,
                degradation.kind
            );
        }
    }

    /// Count for a single (source, kind) pair.
    pub fn get_count(&self, source: UpstreamSource, kind: FailureKind) -> usize {
        self.counts
            .get(&(source, kind))
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total degradations recorded for a source.
    pub fn total_for(&self, source: UpstreamSource) -> usize {
        FailureKind::iter()
            .map(|kind| self.get_count(source, kind))
            .sum()
    }

    /// Total degradations across all sources.
    pub fn total(&self) -> usize {
        UpstreamSource::iter().map(|s| self.total_for(s)).sum()
    }

    /// Logs a one-line summary per source that saw any degradation.
    pub fn log_summary(&self) {
        for source in UpstreamSource::iter() {
            let total = self.total_for(source);
            if total == 0 {
                continue;
            }
            let breakdown: Vec<String> = FailureKind::iter()
                .filter_map(|kind| {
                    let n = self.get_count(source, kind);
                    (n > 0).then(|| format!("{}={}", kind.as_ref(), n))
                })
                .collect();
            log::info!(
                "{} degradations: {} ({})",
                source.as_ref(),
                total,
                breakdown.join(", ")
            );
        }
    }
}

impl Default for DegradationStats {
    fn default() -> Self {
        Self::new()
    }
}
