//! Ordered log level shared by drizzle loggers
//!
//! A logger forwards a message only when its configured level is at least as
//! verbose as the message's level. `Silent` disables everything.

/// Verbosity of a query logger
///
/// Levels are ordered from least to most verbose, so gating is a plain
/// comparison against the configured level.
///
/// # Examples
///
/// ```
/// use drizzle_querylog_core::LogLevel;
///
/// let configured = LogLevel::Warn;
/// assert!(configured.allows(LogLevel::Error));
/// assert!(configured.allows(LogLevel::Warn));
/// assert!(!configured.allows(LogLevel::Info));
/// assert!(!LogLevel::Silent.allows(LogLevel::Error));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Nothing is logged and statement text is never materialized
    Silent = 1,

    /// Failed statements only
    Error,

    /// Failed and slow statements
    #[default]
    Warn,

    /// Every statement, successful ones at debug severity
    Info,
}

impl LogLevel {
    /// Returns `true` if a message at `level` passes this configured level.
    ///
    /// `Silent` never passes, even against a `Silent` configuration.
    #[inline]
    #[must_use]
    pub fn allows(self, level: LogLevel) -> bool {
        level != LogLevel::Silent && self >= level
    }

    #[inline]
    #[must_use]
    pub const fn is_silent(self) -> bool {
        matches!(self, LogLevel::Silent)
    }

    /// Parse a level from a string (case-insensitive)
    ///
    /// Accepts the usual aliases:
    /// - Silent: `"silent"`, `"off"`, `"none"`
    /// - Error: `"error"`, `"err"`
    /// - Warn: `"warn"`, `"warning"`
    /// - Info: `"info"`, `"debug"`
    ///
    /// ```
    /// use drizzle_querylog_core::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
    /// assert_eq!(LogLevel::parse("off"), Some(LogLevel::Silent));
    /// assert_eq!(LogLevel::parse("verbose"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("silent")
            || s.eq_ignore_ascii_case("off")
            || s.eq_ignore_ascii_case("none")
        {
            Some(LogLevel::Silent)
        } else if s.eq_ignore_ascii_case("error") || s.eq_ignore_ascii_case("err") {
            Some(LogLevel::Error)
        } else if s.eq_ignore_ascii_case("warn") || s.eq_ignore_ascii_case("warning") {
            Some(LogLevel::Warn)
        } else if s.eq_ignore_ascii_case("info") || s.eq_ignore_ascii_case("debug") {
            Some(LogLevel::Info)
        } else {
            None
        }
    }

    /// Get the level name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silent => "silent",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
        }
    }
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s).ok_or_else(|| LevelParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown level string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`, expected one of: silent, error, warn, info")]
pub struct LevelParseError(pub String);
