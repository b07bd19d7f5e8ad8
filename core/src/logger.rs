//! The logger contract drizzle drives while executing statements.
//!
//! A [`Logger`] receives plain messages through [`Logger::info`],
//! [`Logger::warn`] and [`Logger::error`], and one [`Logger::trace`] call per
//! executed statement. Implementations decide what, if anything, reaches their
//! backend.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use tracing::Span;

use crate::LogLevel;

/// Deferred access to the executed statement.
///
/// Returns the rendered SQL and the number of affected rows. Building the SQL
/// string can be expensive for large statements, so loggers only call this on
/// a path that will actually log. `FnOnce` means it runs at most once.
pub type StatementFetch<'a> = Box<dyn FnOnce() -> (String, i64) + 'a>;

/// A key/value attribute attached to a plain log message.
pub type Attr<'a> = (&'a str, &'a dyn fmt::Display);

/// Row count reported when a statement failed before producing one.
pub const ROWS_UNKNOWN: i64 = -1;

/// Logging hooks invoked by drizzle at each point of a statement's lifecycle.
///
/// `ctx` is the request-scoped span the record belongs to. Pass
/// [`Span::current()`] to log under whatever span is active.
///
/// None of these methods return errors: a disabled level is a silent skip and
/// backend failures stay inside the backend.
pub trait Logger: Send + Sync {
    /// Returns a logger identical to this one except for its level.
    ///
    /// The receiver is left untouched.
    fn log_mode(&self, level: LogLevel) -> Box<dyn Logger>;

    fn info(&self, ctx: &Span, message: &str, attrs: &[Attr<'_>]);

    fn warn(&self, ctx: &Span, message: &str, attrs: &[Attr<'_>]);

    fn error(&self, ctx: &Span, message: &str, attrs: &[Attr<'_>]);

    /// Reports one executed statement.
    ///
    /// `begin` is when execution started; `err` is the failure, if any.
    fn trace(
        &self,
        ctx: &Span,
        begin: Instant,
        fetch: StatementFetch<'_>,
        err: Option<&(dyn Error + 'static)>,
    );
}

/// A logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log_mode(&self, _level: LogLevel) -> Box<dyn Logger> {
        Box::new(NoopLogger)
    }

    fn info(&self, _ctx: &Span, _message: &str, _attrs: &[Attr<'_>]) {}

    fn warn(&self, _ctx: &Span, _message: &str, _attrs: &[Attr<'_>]) {}

    fn error(&self, _ctx: &Span, _message: &str, _attrs: &[Attr<'_>]) {}

    fn trace(
        &self,
        _ctx: &Span,
        _begin: Instant,
        _fetch: StatementFetch<'_>,
        _err: Option<&(dyn Error + 'static)>,
    ) {
    }
}
