//! Records and the backends that receive them.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use tracing::Span;
use tracing::field::display;

/// Target of every event emitted by [`TracingSink`].
pub const TARGET: &str = "drizzle_querylog";

/// Attribute keys [`TracingSink`] records as first-class fields.
const FIELD_KEYS: [&str; 5] = ["elapsed", "rows", "sql", "error", "threshold"];

/// Severity a record is written at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a record attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Duration(Duration),
    Int(i64),
    Text(String),
}

impl AttrValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            AttrValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Duration(d) => write!(f, "{d:?}"),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<Duration> for AttrValue {
    fn from(value: Duration) -> Self {
        AttrValue::Duration(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

/// One log line: a severity, a message and ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub attributes: Vec<(Cow<'static, str>, AttrValue)>,
}

impl LogRecord {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping insertion order.
    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// First attribute named `key`.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(k, _)| k.as_ref())
    }
}

/// A structured logging backend.
///
/// Implementations must tolerate concurrent writes; the logger neither batches
/// nor serializes calls. A write cannot fail from the caller's point of view.
pub trait Sink: Send + Sync {
    fn write(&self, ctx: &Span, record: &LogRecord);
}

/// Emits records as `tracing` events under the request span.
///
/// `elapsed`, `rows`, `sql`, `error` and `threshold` become event fields; any
/// other attributes are rendered together into an `attrs` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn write(&self, ctx: &Span, record: &LogRecord) {
        let elapsed = record.get("elapsed").map(display);
        let rows = record.get("rows").and_then(AttrValue::as_int);
        let sql = record.get("sql").map(display);
        let error = record.get("error").map(display);
        let threshold = record.get("threshold").map(display);
        let extra = ExtraAttrs(record);
        let attrs = (!extra.is_empty()).then(|| display(&extra));

        macro_rules! emit {
            ($level:ident) => {
                tracing::$level!(
                    target: TARGET,
                    parent: ctx,
                    elapsed,
                    rows,
                    sql,
                    error,
                    threshold,
                    attrs,
                    "{}",
                    record.message
                )
            };
        }

        match record.severity {
            Severity::Debug => emit!(debug),
            Severity::Info => emit!(info),
            Severity::Warn => emit!(warn),
            Severity::Error => emit!(error),
        }
    }
}

/// Attributes that have no dedicated field, as `key=value` pairs.
struct ExtraAttrs<'a>(&'a LogRecord);

impl ExtraAttrs<'_> {
    fn iter(&self) -> impl Iterator<Item = &(Cow<'static, str>, AttrValue)> {
        self.0
            .attributes
            .iter()
            .filter(|(k, _)| !FIELD_KEYS.contains(&k.as_ref()))
    }

    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Display for ExtraAttrs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
