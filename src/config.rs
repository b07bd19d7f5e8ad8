//! Logging policy for a [`QueryLogger`](crate::QueryLogger).

use std::time::Duration;

use drizzle_querylog_core::LogLevel;

/// Slow threshold applied by [`Policy::default`].
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(100);

/// Decides whether a successful, fast statement is logged at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NormalGate {
    /// Logged when the policy's level is [`LogLevel::Info`].
    #[default]
    Level,

    /// Logged when the flag is set, whatever the (non-silent) level.
    Debug(bool),
}

impl NormalGate {
    #[inline]
    pub(crate) fn allows(self, level: LogLevel) -> bool {
        match self {
            NormalGate::Level => level.allows(LogLevel::Info),
            NormalGate::Debug(enabled) => enabled && !level.is_silent(),
        }
    }
}

/// Shape of the message text on traced statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MessageStyle {
    /// The error text, or `"query"`/`"slow query"` for statements without one.
    #[default]
    Error,

    /// `"<sql> [<elapsed>]"`, with the error carried only as an attribute.
    Statement,
}

/// Configuration of a query logger.
///
/// A policy is a plain value: loggers hold their own copy, and changing the
/// level through [`Logger::log_mode`](drizzle_querylog_core::Logger::log_mode)
/// produces a new logger rather than touching an existing one.
///
/// # Example
///
/// ```rust
/// use drizzle_querylog::{LogLevel, Policy};
/// use std::time::Duration;
///
/// let policy = Policy::default()
///     .with_level(LogLevel::Info)
///     .with_slow_threshold(Duration::from_millis(250))
///     .with_ignore_record_not_found(true);
///
/// assert_eq!(policy.log_level, LogLevel::Info);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Policy {
    /// Most verbose level forwarded to the sink.
    /// Default: [`LogLevel::Warn`]
    pub log_level: LogLevel,

    /// Successful statements slower than this are logged as warnings.
    /// `Duration::ZERO` disables slow detection.
    /// Default: 100ms
    pub slow_threshold: Duration,

    /// Keep [`QueryError::NotFound`](drizzle_querylog_core::QueryError::NotFound)
    /// off the error path.
    /// Default: `false`
    pub ignore_record_not_found: bool,

    /// Default: [`NormalGate::Level`]
    pub normal_gate: NormalGate,

    /// Default: [`MessageStyle::Error`]
    pub message_style: MessageStyle,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
            ignore_record_not_found: false,
            normal_gate: NormalGate::Level,
            message_style: MessageStyle::Error,
        }
    }
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the slow-statement threshold. `Duration::ZERO` disables it.
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    pub fn with_ignore_record_not_found(mut self, ignore: bool) -> Self {
        self.ignore_record_not_found = ignore;
        self
    }

    pub fn with_normal_gate(mut self, gate: NormalGate) -> Self {
        self.normal_gate = gate;
        self
    }

    pub fn with_message_style(mut self, style: MessageStyle) -> Self {
        self.message_style = style;
        self
    }

    /// Everything logged, every statement text included.
    ///
    /// **Warning**: statement text may carry sensitive data.
    pub fn development() -> Self {
        Self::default()
            .with_level(LogLevel::Info)
            .with_message_style(MessageStyle::Statement)
    }

    /// Errors and statements slower than a second, missing records ignored.
    pub fn production() -> Self {
        Self::default()
            .with_slow_threshold(Duration::from_secs(1))
            .with_ignore_record_not_found(true)
    }

    #[inline]
    pub(crate) fn slow_detection_enabled(&self) -> bool {
        !self.slow_threshold.is_zero()
    }
}
