//! Classification of traced statements.
//!
//! Each traced statement lands in at most one [`Outcome`], checked in order of
//! severity: error, then slow, then normal. Nothing here touches the sink or
//! the statement text, so the caller only materializes the SQL once an outcome
//! is known.

use std::error::Error;
use std::time::Duration;

use drizzle_querylog_core::{LogLevel, is_record_not_found};

use crate::config::{MessageStyle, Policy};
use crate::sink::{LogRecord, Severity};

/// Category a traced statement falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Error,
    Slow,
    Normal,
}

impl Outcome {
    pub const fn severity(self) -> Severity {
        match self {
            Outcome::Error => Severity::Error,
            Outcome::Slow => Severity::Warn,
            Outcome::Normal => Severity::Debug,
        }
    }
}

/// Picks the outcome for a statement that took `elapsed`, or `None` if the
/// policy logs nothing for it.
///
/// A missing record ignored by the policy does not count as an error here, but
/// the statement is still eligible for the slow and normal outcomes.
pub fn classify(
    policy: &Policy,
    elapsed: Duration,
    err: Option<&(dyn Error + 'static)>,
) -> Option<Outcome> {
    let level = policy.log_level;
    if level.is_silent() {
        return None;
    }

    if let Some(err) = err
        && level.allows(LogLevel::Error)
        && !(policy.ignore_record_not_found && is_record_not_found(err))
    {
        return Some(Outcome::Error);
    }

    if policy.slow_detection_enabled()
        && elapsed > policy.slow_threshold
        && level.allows(LogLevel::Warn)
    {
        return Some(Outcome::Slow);
    }

    policy.normal_gate.allows(level).then_some(Outcome::Normal)
}

/// Builds the record for a classified statement.
///
/// Attributes are always `elapsed`, `rows`, `sql`, then `error` whenever an
/// error is present and `threshold` on slow statements.
pub fn render(
    policy: &Policy,
    outcome: Outcome,
    elapsed: Duration,
    sql: String,
    rows: i64,
    err: Option<&(dyn Error + 'static)>,
) -> LogRecord {
    let message = match policy.message_style {
        MessageStyle::Statement => format!("{sql} [{elapsed:?}]"),
        MessageStyle::Error => match (err, outcome) {
            (Some(err), _) => err.to_string(),
            (None, Outcome::Slow) => "slow query".to_string(),
            (None, _) => "query".to_string(),
        },
    };

    let mut record = LogRecord::new(outcome.severity(), message)
        .with("elapsed", elapsed)
        .with("rows", rows)
        .with("sql", sql);

    if let Some(err) = err {
        record = record.with("error", err.to_string());
    }
    if outcome == Outcome::Slow {
        record = record.with("threshold", policy.slow_threshold);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalGate;
    use crate::sink::AttrValue;
    use drizzle_querylog_core::QueryError;

    const FAST: Duration = Duration::from_millis(5);
    const SLOW: Duration = Duration::from_millis(250);

    fn policy(level: LogLevel) -> Policy {
        Policy::default()
            .with_level(level)
            .with_slow_threshold(Duration::from_millis(200))
    }

    #[test]
    fn test_silent_classifies_nothing() {
        let failure = QueryError::Other("boom".into());
        let p = policy(LogLevel::Silent).with_normal_gate(NormalGate::Debug(true));
        assert_eq!(classify(&p, SLOW, Some(&failure)), None);
        assert_eq!(classify(&p, FAST, None), None);
    }

    #[test]
    fn test_error_wins_over_slow() {
        let failure = QueryError::ExecutionError("constraint violation".into());
        assert_eq!(
            classify(&policy(LogLevel::Error), SLOW, Some(&failure)),
            Some(Outcome::Error)
        );
        assert_eq!(
            classify(&policy(LogLevel::Info), SLOW, Some(&failure)),
            Some(Outcome::Error)
        );
    }

    #[test]
    fn test_error_level_skips_slow() {
        assert_eq!(classify(&policy(LogLevel::Error), SLOW, None), None);
        assert_eq!(
            classify(&policy(LogLevel::Warn), SLOW, None),
            Some(Outcome::Slow)
        );
    }

    #[test]
    fn test_slow_needs_strictly_greater() {
        let p = policy(LogLevel::Warn);
        assert_eq!(classify(&p, Duration::from_millis(200), None), None);
        assert_eq!(
            classify(&p, Duration::from_millis(201), None),
            Some(Outcome::Slow)
        );
    }

    #[test]
    fn test_zero_threshold_disables_slow() {
        let p = policy(LogLevel::Warn).with_slow_threshold(Duration::ZERO);
        assert_eq!(classify(&p, Duration::from_secs(60), None), None);

        let p = p.with_level(LogLevel::Info);
        assert_eq!(
            classify(&p, Duration::from_secs(60), None),
            Some(Outcome::Normal)
        );
    }

    #[test]
    fn test_ignored_not_found_falls_through() {
        let p = policy(LogLevel::Warn).with_ignore_record_not_found(true);
        let missing = QueryError::NotFound;

        assert_eq!(classify(&p, FAST, Some(&missing)), None);
        assert_eq!(classify(&p, SLOW, Some(&missing)), Some(Outcome::Slow));
        assert_eq!(
            classify(&p.clone().with_level(LogLevel::Info), FAST, Some(&missing)),
            Some(Outcome::Normal)
        );

        let p = p.with_ignore_record_not_found(false);
        assert_eq!(classify(&p, FAST, Some(&missing)), Some(Outcome::Error));
    }

    #[test]
    fn test_normal_gate_debug_flag() {
        let p = policy(LogLevel::Error).with_normal_gate(NormalGate::Debug(true));
        assert_eq!(classify(&p, FAST, None), Some(Outcome::Normal));

        let p = policy(LogLevel::Info).with_normal_gate(NormalGate::Debug(false));
        assert_eq!(classify(&p, FAST, None), None);
    }

    #[test]
    fn test_render_error_style() {
        let failure = QueryError::Other("boom".into());
        let record = render(
            &policy(LogLevel::Warn),
            Outcome::Error,
            FAST,
            "DELETE FROM users".to_string(),
            0,
            Some(&failure),
        );

        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.message, "Database error: boom");
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            ["elapsed", "rows", "sql", "error"]
        );
        assert_eq!(
            record.get("sql").and_then(AttrValue::as_text),
            Some("DELETE FROM users")
        );
    }

    #[test]
    fn test_render_slow_without_error() {
        let record = render(
            &policy(LogLevel::Warn),
            Outcome::Slow,
            SLOW,
            "SELECT * FROM posts".to_string(),
            12,
            None,
        );

        assert_eq!(record.severity, Severity::Warn);
        assert_eq!(record.message, "slow query");
        assert_eq!(record.get("rows"), Some(&AttrValue::Int(12)));
        assert_eq!(
            record.get("threshold").and_then(AttrValue::as_duration),
            Some(Duration::from_millis(200))
        );
        assert_eq!(record.get("error"), None);
    }

    #[test]
    fn test_render_statement_style() {
        let p = policy(LogLevel::Info).with_message_style(MessageStyle::Statement);
        let missing = QueryError::NotFound;
        let record = render(
            &p,
            Outcome::Normal,
            Duration::from_millis(50),
            "SELECT id FROM users WHERE id = 9".to_string(),
            0,
            Some(&missing),
        );

        assert_eq!(record.severity, Severity::Debug);
        assert_eq!(record.message, "SELECT id FROM users WHERE id = 9 [50ms]");
        assert_eq!(
            record.get("error").and_then(AttrValue::as_text),
            Some("record not found")
        );
    }
}
