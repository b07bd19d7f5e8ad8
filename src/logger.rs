use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use drizzle_querylog_core::{Attr, LogLevel, Logger, StatementFetch, set_default_logger};
use tracing::Span;

use crate::config::Policy;
use crate::dispatch;
use crate::sink::{LogRecord, Severity, Sink, TracingSink};

/// A [`Logger`] that applies a [`Policy`] and forwards to a [`Sink`].
///
/// The policy is fixed for the lifetime of the value. Cloning shares the sink.
#[derive(Debug)]
pub struct QueryLogger<S = TracingSink> {
    policy: Policy,
    sink: Arc<S>,
}

impl<S> Clone for QueryLogger<S> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl Default for QueryLogger {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl QueryLogger {
    /// Logger emitting `tracing` events.
    pub fn new(policy: Policy) -> Self {
        Self::with_sink(policy, TracingSink)
    }
}

impl<S: Sink> QueryLogger<S> {
    pub fn with_sink(policy: Policy, sink: S) -> Self {
        Self::with_shared_sink(policy, Arc::new(sink))
    }

    pub fn with_shared_sink(policy: Policy, sink: Arc<S>) -> Self {
        Self { policy, sink }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Same logger at a different level; `self` is unchanged.
    pub fn with_level(&self, level: LogLevel) -> Self {
        Self {
            policy: self.policy.clone().with_level(level),
            sink: Arc::clone(&self.sink),
        }
    }

    fn forward(
        &self,
        ctx: &Span,
        level: LogLevel,
        severity: Severity,
        message: &str,
        attrs: &[Attr<'_>],
    ) {
        if !self.policy.log_level.allows(level) {
            return;
        }

        let record = attrs
            .iter()
            .fold(LogRecord::new(severity, message), |record, (key, value)| {
                record.with(key.to_string(), value.to_string())
            });
        self.sink.write(ctx, &record);
    }
}

impl<S: Sink + 'static> QueryLogger<S> {
    /// Installs this logger as the process-wide default.
    pub fn set_as_default(&self) {
        set_default_logger(Arc::new(self.clone()));
    }
}

impl<S: Sink + 'static> Logger for QueryLogger<S> {
    fn log_mode(&self, level: LogLevel) -> Box<dyn Logger> {
        Box::new(self.with_level(level))
    }

    fn info(&self, ctx: &Span, message: &str, attrs: &[Attr<'_>]) {
        self.forward(ctx, LogLevel::Info, Severity::Info, message, attrs);
    }

    fn warn(&self, ctx: &Span, message: &str, attrs: &[Attr<'_>]) {
        self.forward(ctx, LogLevel::Warn, Severity::Warn, message, attrs);
    }

    fn error(&self, ctx: &Span, message: &str, attrs: &[Attr<'_>]) {
        self.forward(ctx, LogLevel::Error, Severity::Error, message, attrs);
    }

    fn trace(
        &self,
        ctx: &Span,
        begin: Instant,
        fetch: StatementFetch<'_>,
        err: Option<&(dyn Error + 'static)>,
    ) {
        if self.policy.log_level.is_silent() {
            return;
        }

        let elapsed = begin.elapsed();
        let Some(outcome) = dispatch::classify(&self.policy, elapsed, err) else {
            return;
        };

        let (sql, rows) = fetch();
        let record = dispatch::render(&self.policy, outcome, elapsed, sql, rows, err);
        self.sink.write(ctx, &record);
    }
}
