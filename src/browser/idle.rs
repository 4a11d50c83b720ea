//! Network-idle detection.
//!
//! WebDriver gives no view of in-flight requests, so idleness is inferred
//! from the page itself: the document must be complete and the number of
//! Resource Timing entries must stay (nearly) flat for a settle window.

use serde::Deserialize;
use std::time::{Duration, Instant};

/// How long the resource count must stay flat
pub const SETTLE_WINDOW: Duration = Duration::from_millis(500);

/// Interval between probes
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reports readiness and the number of finished resource loads
pub const PROBE_SCRIPT: &str = r#"
    let resources = 0;
    try { resources = performance.getEntriesByType('resource').length; } catch (_) {}
    return { readyState: document.readyState, resources: resources };
"#;

/// One observation of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Sample {
    /// `document.readyState == "complete"`
    #[serde(rename = "readyState", deserialize_with = "deserialize_complete")]
    pub complete: bool,
    pub resources: usize,
}

fn deserialize_complete<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let state = String::deserialize(deserializer)?;
    Ok(state == "complete")
}

/// Decides when a series of samples counts as network idle
#[derive(Debug)]
pub struct IdleTracker {
    max_inflight: usize,
    settle: Duration,
    baseline: Option<(usize, Instant)>,
}

impl IdleTracker {
    pub fn new(max_inflight: usize, settle: Duration) -> Self {
        Self {
            max_inflight,
            settle,
            baseline: None,
        }
    }

    /// Record a sample taken at `now`; returns true once the page is idle
    pub fn observe(&mut self, sample: Sample, now: Instant) -> bool {
        if !sample.complete {
            self.baseline = None;
            return false;
        }

        match self.baseline {
            Some((count, since)) if sample.resources.saturating_sub(count) <= self.max_inflight => {
                now.duration_since(since) >= self.settle
            }
            _ => {
                // First complete sample, or too much activity: restart the window
                self.baseline = Some((sample.resources, now));
                false
            }
        }
    }
}
