#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use drizzle_querylog::{LogLevel, LogRecord, Policy, QueryLogger, Sink, StatementFetch};
use tracing::Span;

/// Sink that keeps every record it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn single(&self) -> LogRecord {
        let records = self.records();
        assert_eq!(records.len(), 1, "expected exactly one record: {records:?}");
        records.into_iter().next().unwrap()
    }
}

impl Sink for RecordingSink {
    fn write(&self, _ctx: &Span, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Counts how often a statement fetch was invoked.
#[derive(Debug, Clone, Default)]
pub struct FetchProbe {
    calls: Arc<AtomicUsize>,
}

impl FetchProbe {
    pub fn fetch(&self, sql: &str, rows: i64) -> StatementFetch<'static> {
        let calls = Arc::clone(&self.calls);
        let sql = sql.to_string();
        Box::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            (sql, rows)
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn recording_logger(policy: Policy) -> (QueryLogger<RecordingSink>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let logger = QueryLogger::with_shared_sink(policy, Arc::clone(&sink));
    (logger, sink)
}

pub fn policy(level: LogLevel) -> Policy {
    Policy::default()
        .with_level(level)
        .with_slow_threshold(Duration::from_millis(200))
}

/// An instant `ms` milliseconds in the past.
pub fn started_ago(ms: u64) -> Instant {
    Instant::now()
        .checked_sub(Duration::from_millis(ms))
        .expect("monotonic clock too close to its origin")
}
