//! # drizzle-querylog
//!
//! Routes drizzle's query diagnostics through `tracing` instead of a
//! drizzle-specific formatter.
//!
//! Every executed statement is reported to a [`Logger`] once. [`QueryLogger`]
//! decides whether that report becomes a record, and at which severity:
//!
//! | Outcome | When                                                           | Severity |
//! |---------|----------------------------------------------------------------|----------|
//! | error   | the statement failed and the level is at least `Error`         | `ERROR`  |
//! | slow    | it took longer than the slow threshold and the level is `Warn`+ | `WARN`   |
//! | normal  | neither, and the normal gate is open (level `Info` by default) | `DEBUG`  |
//!
//! A [`QueryError::NotFound`] can be kept off the error path with
//! [`Policy::ignore_record_not_found`]; it is then only reported if the
//! statement was also slow or normal logging is on.
//!
//! ## Quick Start
//!
//! ```rust
//! use drizzle_querylog::prelude::*;
//! use std::time::{Duration, Instant};
//! use tracing::Span;
//!
//! let logger = QueryLogger::new(
//!     Policy::default()
//!         .with_slow_threshold(Duration::from_millis(200))
//!         .with_ignore_record_not_found(true),
//! );
//!
//! let begin = Instant::now();
//! // ... run the statement ...
//! logger.trace(
//!     &Span::current(),
//!     begin,
//!     Box::new(|| ("SELECT * FROM users".to_string(), 3)),
//!     None,
//! );
//! ```
//!
//! ## Fields
//!
//! | Field       | Description                                      |
//! |-------------|--------------------------------------------------|
//! | `elapsed`   | Wall time since the statement started            |
//! | `rows`      | Rows affected or returned, `-1` if unknown       |
//! | `sql`       | Rendered statement                               |
//! | `error`     | Error text, whenever the statement failed        |
//! | `threshold` | Configured slow threshold, on slow records only  |
//!
//! ## Features
//!
//! - `serde` - serialize/deserialize [`Policy`] and [`LogLevel`]

mod config;
mod dispatch;
mod logger;
mod sink;

pub use config::{DEFAULT_SLOW_THRESHOLD, MessageStyle, NormalGate, Policy};
pub use dispatch::{Outcome, classify, render};
pub use logger::QueryLogger;
pub use sink::{AttrValue, LogRecord, Severity, Sink, TARGET, TracingSink};

pub use drizzle_querylog_core::{
    Attr, LevelParseError, LogLevel, Logger, NoopLogger, QueryError, ROWS_UNKNOWN,
    StatementFetch, default_logger, is_record_not_found, set_default_logger, take_default_logger,
    trace_query,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, Logger, Policy, QueryError, QueryLogger, Sink, TracingSink};
}
