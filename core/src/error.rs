use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Error executing a query
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// No rows returned when at least one was expected
    #[error("record not found")]
    NotFound,

    /// Error with transaction
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Generic error
    #[error("Database error: {0}")]
    Other(String),

    /// Driver error carried with its source intact
    #[error("Driver error: {0}")]
    Driver(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

impl QueryError {
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound)
    }
}

/// Returns `true` if `err`, or anything in its `source()` chain, is
/// [`QueryError::NotFound`].
pub fn is_record_not_found(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |&e| e.source())
        .any(|e| e.downcast_ref::<QueryError>().is_some_and(QueryError::is_not_found))
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("loading user 7")]
    struct Lookup(#[source] QueryError);

    #[test]
    fn test_not_found_direct() {
        assert!(is_record_not_found(&QueryError::NotFound));
        assert!(!is_record_not_found(&QueryError::Other("boom".into())));
    }

    #[test]
    fn test_not_found_in_source_chain() {
        let wrapped = Lookup(QueryError::NotFound);
        assert!(is_record_not_found(&wrapped));

        let wrapped = Lookup(QueryError::ExecutionError("constraint violation".into()));
        assert!(!is_record_not_found(&wrapped));
    }

    #[test]
    fn test_driver_error_chain() {
        let err = QueryError::Driver(Box::new(QueryError::NotFound));
        assert!(!err.is_not_found());
        assert!(is_record_not_found(&err));
        assert_eq!(err.to_string(), "Driver error: record not found");
    }

    #[test]
    fn test_not_found_two_levels_deep() {
        let err = Lookup(QueryError::Driver(Box::new(QueryError::NotFound)));
        assert!(is_record_not_found(&err));

        let err = Lookup(QueryError::Driver(Box::new(QueryError::TransactionError(
            "commit failed".into(),
        ))));
        assert!(!is_record_not_found(&err));
    }
}
