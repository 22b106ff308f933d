//! Progress reporting for long-running service calls.
//!
//! MGN launch and replication operations can block for a long time on the
//! network. [`ProgressRunner`] drives such a call while periodically
//! surfacing progress on the invoking side: the worker overwrites a single
//! "latest snapshot" slot through [`ProgressTracker::report`], and the runner
//! polls that slot on a fixed 250 ms interval, pushing whatever it finds to a
//! [`ProgressSink`]. Intermediate reports that are overwritten between polls
//! are dropped; only the last write in each interval is visible.
//!
//! Guarantees, regardless of how fast the call completes:
//! - at least one `Processing` record is pushed,
//! - the very last record pushed is always `Completed`,
//! - a worker error is surfaced to the caller only after the `Completed`
//!   record, unchanged except for recognized name-resolution failures, which
//!   are rewrapped with the attempted endpoint and region.
//!
//! The runner does not support cancellation; callers that need to honor a
//! stop signal race the whole `run` future externally.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::{Error, Result};

/// Fixed polling interval between progress pushes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A progress snapshot reported by the worker side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Percent complete, clamped to 0..=100
    pub percent: u8,
    /// Short status line
    pub status: String,
}

/// Kind of record pushed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The operation is still running
    Processing,
    /// The operation has finished (successfully or not)
    Completed,
}

/// A single record pushed to a [`ProgressSink`].
#[derive(Debug, Clone)]
pub struct ProgressRecord {
    /// Record kind
    pub kind: RecordKind,
    /// Activity description, stable across one operation
    pub activity: String,
    /// Percent complete
    pub percent: u8,
    /// Status line
    pub status: String,
}

/// Receives progress records on the invoking side.
///
/// The terminal sink lives in the CLI; [`NullSink`] discards everything and
/// is useful for JSON output modes and tests.
pub trait ProgressSink: Send + Sync {
    /// Pushes one record to the host.
    fn write_progress(&self, record: &ProgressRecord);
}

/// A sink that discards all records.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn write_progress(&self, _record: &ProgressRecord) {}
}

/// Accumulates the most recent progress snapshot for one operation.
///
/// Clones share the same slot, so the worker side can carry a clone into the
/// running future while the runner reads the original.
#[derive(Clone)]
pub struct ProgressTracker {
    activity: Arc<str>,
    latest: Arc<Mutex<Option<ProgressSnapshot>>>,
}

impl ProgressTracker {
    /// Creates a tracker for the given activity description.
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: Arc::from(activity.into()),
            latest: Arc::new(Mutex::new(None)),
        }
    }

    /// The activity description this tracker was created with.
    pub fn activity(&self) -> &str {
        &self.activity
    }

    /// Records a snapshot, overwriting any previous one. Last write wins.
    pub fn report(&self, percent: u8, status: impl Into<String>) {
        let snapshot = ProgressSnapshot {
            percent: percent.min(100),
            status: status.into(),
        };
        *self.latest.lock() = Some(snapshot);
    }

    /// Returns a copy of the most recent snapshot, if any was reported.
    pub fn latest(&self) -> Option<ProgressSnapshot> {
        self.latest.lock().clone()
    }
}

/// Runs a service call future while polling a tracker and pushing records to
/// a sink.
pub struct ProgressRunner {
    sink: Arc<dyn ProgressSink>,
    interval: Duration,
    endpoint: String,
    region: String,
}

impl ProgressRunner {
    /// Creates a runner. Endpoint and region are only used to annotate
    /// name-resolution failures.
    pub fn new(
        sink: Arc<dyn ProgressSink>,
        endpoint: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            interval: POLL_INTERVAL,
            endpoint: endpoint.into(),
            region: region.into(),
        }
    }

    /// Overrides the polling interval. Intended for tests.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Drives `work` to completion, pushing a `Processing` record each poll
    /// interval and one final `Completed` record, then returns the result.
    pub async fn run<T, F>(&self, tracker: &ProgressTracker, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let mut work = std::pin::pin!(work);
        // First tick fires one interval in, not immediately: the original
        // loop slept before each push.
        let mut ticks = interval_at(Instant::now() + self.interval, self.interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pushed = 0usize;
        let result = loop {
            tokio::select! {
                result = &mut work => break result,
                _ = ticks.tick() => {
                    self.push_processing(tracker);
                    pushed += 1;
                }
            }
        };

        // The contract promises at least one Processing record even when the
        // call finishes inside the first interval.
        if pushed == 0 {
            self.push_processing(tracker);
        }

        let status = match &result {
            Ok(_) => "completed".to_string(),
            Err(err) => format!("failed: {err}"),
        };
        self.sink.write_progress(&ProgressRecord {
            kind: RecordKind::Completed,
            activity: tracker.activity().to_string(),
            percent: 100,
            status,
        });

        result.map_err(|err| self.rewrap(err))
    }

    fn push_processing(&self, tracker: &ProgressTracker) {
        let (percent, status) = match tracker.latest() {
            Some(snapshot) => (snapshot.percent, snapshot.status),
            None => (0, "waiting for service response".to_string()),
        };
        self.sink.write_progress(&ProgressRecord {
            kind: RecordKind::Processing,
            activity: tracker.activity().to_string(),
            percent,
            status,
        });
    }

    fn rewrap(&self, err: Error) -> Error {
        if err.is_name_resolution() {
            Error::EndpointUnreachable {
                endpoint: self.endpoint.clone(),
                region: self.region.clone(),
                source: Box::new(err),
            }
        } else {
            err
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_last_write_wins() {
        let tracker = ProgressTracker::new("replicating");
        assert_eq!(tracker.latest(), None);

        tracker.report(10, "first");
        tracker.report(60, "second");
        let snapshot = tracker.latest().unwrap();
        assert_eq!(snapshot.percent, 60);
        assert_eq!(snapshot.status, "second");
    }

    #[test]
    fn tracker_clamps_percent() {
        let tracker = ProgressTracker::new("replicating");
        tracker.report(250, "overflow");
        assert_eq!(tracker.latest().unwrap().percent, 100);
    }

    #[test]
    fn tracker_clones_share_slot() {
        let tracker = ProgressTracker::new("replicating");
        let worker_side = tracker.clone();
        worker_side.report(42, "from worker");
        assert_eq!(tracker.latest().unwrap().percent, 42);
    }
}
