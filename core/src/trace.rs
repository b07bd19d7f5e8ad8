//! Helpers for drivers reporting executed statements to a [`Logger`].

use std::error::Error;
use std::time::Instant;

use tracing::Span;

use crate::{Logger, ROWS_UNKNOWN};

/// Anything a statement can return that knows how many rows it covers.
pub trait RowCount {
    fn row_count(&self) -> i64;
}

impl RowCount for u64 {
    fn row_count(&self) -> i64 {
        i64::try_from(*self).unwrap_or(i64::MAX)
    }
}

impl RowCount for usize {
    fn row_count(&self) -> i64 {
        i64::try_from(*self).unwrap_or(i64::MAX)
    }
}

impl<T> RowCount for Vec<T> {
    fn row_count(&self) -> i64 {
        self.len().row_count()
    }
}

impl<T> RowCount for Option<T> {
    fn row_count(&self) -> i64 {
        i64::from(self.is_some())
    }
}

/// Runs `op` as the statement `sql` and reports it through `logger`.
///
/// The result is handed back unchanged. Failed statements report
/// [`ROWS_UNKNOWN`] as their row count.
///
/// ```
/// use drizzle_querylog_core::{NoopLogger, trace_query};
/// use tracing::Span;
///
/// let rows: drizzle_querylog_core::Result<u64> =
///     trace_query(&NoopLogger, &Span::current(), "DELETE FROM users", || Ok(3));
/// assert_eq!(rows.unwrap(), 3);
/// ```
pub fn trace_query<T, E, F>(logger: &dyn Logger, ctx: &Span, sql: &str, op: F) -> Result<T, E>
where
    T: RowCount,
    E: Error + 'static,
    F: FnOnce() -> Result<T, E>,
{
    let begin = Instant::now();
    let result = op();

    let rows = match &result {
        Ok(value) => value.row_count(),
        Err(_) => ROWS_UNKNOWN,
    };
    let err = result.as_ref().err().map(|e| e as &(dyn Error + 'static));
    logger.trace(ctx, begin, Box::new(move || (sql.to_string(), rows)), err);

    result
}
