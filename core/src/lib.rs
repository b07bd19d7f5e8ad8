//! Logger contract for drizzle query execution
//!
//! This crate holds the pieces shared between drizzle drivers and logger
//! implementations:
//!
//! - [`Logger`] - hooks invoked for messages and executed statements
//! - [`LogLevel`] - ordered verbosity (`Silent < Error < Warn < Info`)
//! - [`QueryError`] - error taxonomy, including the distinguished
//!   [`QueryError::NotFound`]
//! - [`trace_query`] - runs and reports a statement in one call
//! - [`set_default_logger`] / [`default_logger`] - process-wide fallback
//!
//! # Features
//!
//! - `serde` - serialize/deserialize [`LogLevel`]

pub mod error;
mod level;
mod logger;
mod registry;
mod trace;

pub use error::{QueryError, Result, is_record_not_found};
pub use level::{LevelParseError, LogLevel};
pub use logger::{Attr, Logger, NoopLogger, ROWS_UNKNOWN, StatementFetch};
pub use registry::{default_logger, set_default_logger, take_default_logger};
pub use trace::{RowCount, trace_query};
