//! Integration tests for the progress runner contract.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use mgnctl::error::{Error, Result};
use mgnctl::progress::{
    ProgressRecord, ProgressRunner, ProgressSink, ProgressTracker, RecordKind, POLL_INTERVAL,
};

/// Sink that keeps every record for later assertions.
#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<ProgressRecord>>,
}

impl RecordingSink {
    fn records(&self) -> Vec<ProgressRecord> {
        self.records.lock().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn write_progress(&self, record: &ProgressRecord) {
        self.records.lock().push(record.clone());
    }
}

fn runner_with(sink: Arc<RecordingSink>, interval: Duration) -> ProgressRunner {
    ProgressRunner::new(
        sink,
        "https://mgn.eu-west-1.amazonaws.com",
        "eu-west-1",
    )
    .with_interval(interval)
}

#[tokio::test]
async fn slow_work_gets_periodic_processing_records() {
    let sink = Arc::new(RecordingSink::default());
    let runner = runner_with(Arc::clone(&sink), Duration::from_millis(10));
    let tracker = ProgressTracker::new("Listing source servers");

    let value = runner
        .run(&tracker, async {
            tokio::time::sleep(Duration::from_millis(80)).await;
            Ok(42)
        })
        .await
        .unwrap();
    assert_eq!(value, 42);

    let records = sink.records();
    assert!(records.len() >= 2);

    let (completed, processing): (Vec<_>, Vec<_>) = records
        .iter()
        .partition(|r| r.kind == RecordKind::Completed);
    assert!(!processing.is_empty());
    assert_eq!(completed.len(), 1);

    // The Completed record is last and terminal.
    let last = records.last().unwrap();
    assert_eq!(last.kind, RecordKind::Completed);
    assert_eq!(last.percent, 100);
    assert_eq!(last.status, "completed");
    assert_eq!(last.activity, "Listing source servers");
}

#[tokio::test]
async fn fast_work_still_gets_one_processing_record() {
    let sink = Arc::new(RecordingSink::default());
    // Interval far beyond the work duration: no tick ever fires.
    let runner = runner_with(Arc::clone(&sink), Duration::from_secs(60));
    let tracker = ProgressTracker::new("Deleting job");

    runner.run(&tracker, async { Ok(()) }).await.unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, RecordKind::Processing);
    assert_eq!(records[1].kind, RecordKind::Completed);
}

#[tokio::test]
async fn processing_records_carry_the_latest_snapshot() {
    let sink = Arc::new(RecordingSink::default());
    let runner = runner_with(Arc::clone(&sink), Duration::from_millis(10));
    let tracker = ProgressTracker::new("Updating replication configuration");

    let worker = tracker.clone();
    runner
        .run(&tracker, async move {
            worker.report(30, "validating");
            // Stale intermediate values are overwritten before the poller
            // wakes up again; only the last write can be observed afterwards.
            worker.report(70, "applying");
            tokio::time::sleep(Duration::from_millis(40)).await;
            Ok(())
        })
        .await
        .unwrap();

    let records = sink.records();
    let last_processing = records
        .iter()
        .rev()
        .find(|r| r.kind == RecordKind::Processing)
        .unwrap();
    assert_eq!(last_processing.percent, 70);
    assert_eq!(last_processing.status, "applying");
}

#[tokio::test]
async fn failures_are_reported_then_returned() {
    let sink = Arc::new(RecordingSink::default());
    let runner = runner_with(Arc::clone(&sink), Duration::from_millis(10));
    let tracker = ProgressTracker::new("Starting cutover");

    let result: Result<()> = runner
        .run(&tracker, async {
            Err(Error::InvalidParameter("bad state".into()))
        })
        .await;

    assert!(matches!(result, Err(Error::InvalidParameter(_))));

    let records = sink.records();
    let completed = records.last().unwrap();
    assert_eq!(completed.kind, RecordKind::Completed);
    assert!(completed.status.starts_with("failed:"));
    assert!(completed.status.contains("bad state"));
}

#[tokio::test]
async fn name_resolution_failures_gain_endpoint_context() {
    let sink = Arc::new(RecordingSink::default());
    let runner = runner_with(Arc::clone(&sink), Duration::from_millis(10));
    let tracker = ProgressTracker::new("Listing jobs");

    let inner = Error::Api {
        operation: "DescribeJobs",
        message: "dispatch failure: dns error: failed to lookup address information".into(),
    };
    let result: Result<()> = runner.run(&tracker, async { Err(inner) }).await;

    match result {
        Err(Error::EndpointUnreachable {
            endpoint,
            region,
            source,
        }) => {
            assert_eq!(endpoint, "https://mgn.eu-west-1.amazonaws.com");
            assert_eq!(region, "eu-west-1");
            assert!(matches!(*source, Error::Api { .. }));
        }
        other => panic!("expected EndpointUnreachable, got {other:?}"),
    }
}

#[tokio::test]
async fn other_errors_pass_through_unwrapped() {
    let sink = Arc::new(RecordingSink::default());
    let runner = runner_with(Arc::clone(&sink), Duration::from_millis(10));
    let tracker = ProgressTracker::new("Listing jobs");

    let inner = Error::Api {
        operation: "DescribeJobs",
        message: "UninitializedAccountException: account not initialized".into(),
    };
    let result: Result<()> = runner.run(&tracker, async { Err(inner) }).await;
    assert!(matches!(result, Err(Error::Api { .. })));
}

#[tokio::test(start_paused = true)]
async fn default_interval_paces_records_for_a_600ms_call() {
    let sink = Arc::new(RecordingSink::default());
    let runner = ProgressRunner::new(
        Arc::clone(&sink) as Arc<dyn ProgressSink>,
        "https://mgn.us-east-1.amazonaws.com",
        "us-east-1",
    );
    let tracker = ProgressTracker::new("Initializing the service in us-east-1");

    runner
        .run(&tracker, async {
            tokio::time::sleep(Duration::from_millis(600)).await;
            Ok(())
        })
        .await
        .unwrap();

    let records = sink.records();
    let processing: Vec<_> = records
        .iter()
        .filter(|r| r.kind == RecordKind::Processing)
        .collect();

    // 600ms of work with a 250ms poll: two ticks land inside the call.
    assert_eq!(POLL_INTERVAL, Duration::from_millis(250));
    assert_eq!(processing.len(), 2);
    // Nothing reported a snapshot, so every poll shows the waiting state.
    for record in &processing {
        assert_eq!(record.percent, 0);
        assert_eq!(record.status, "waiting for service response");
    }
    assert_eq!(records.last().unwrap().kind, RecordKind::Completed);
}
