//! Error handling for the kahoot store
//!
//! Two layers live here. [`StoreError`] is the closed taxonomy every
//! repository operation returns: uniqueness, reference, not-found and a
//! catch-all storage fault. Raw driver failures are classified into it by
//! the `From<sqlx::Error>` impl, so repositories simply use `?`.
//! [`KahootStoreError`] wraps it together with the process-level failures
//! (configuration, logging, I/O) that only the binary and setup code see.

use std::borrow::Cow;

use serde::Serialize;
use sqlx::error::DatabaseError;
use thiserror::Error;

/// Postgres SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classified failure of a single repository operation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("uniqueness violation ({constraint}): {message}")]
    UniquenessViolation { constraint: String, message: String },

    #[error("reference violation ({constraint}): {message}")]
    ReferenceViolation { constraint: String, message: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("storage fault: {0}")]
    StorageFault(#[source] sqlx::Error),
}

/// Discriminant of [`StoreError`], the vocabulary exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UniquenessViolation,
    ReferenceViolation,
    NotFound,
    StorageFault,
}

impl ErrorKind {
    /// HTTP status class a boundary layer should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::UniquenessViolation => 409,
            ErrorKind::ReferenceViolation => 404,
            ErrorKind::NotFound => 404,
            ErrorKind::StorageFault => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UniquenessViolation => "uniqueness_violation",
            ErrorKind::ReferenceViolation => "reference_violation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::StorageFault => "storage_fault",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoreError {
    /// Build a `NotFound` for a lookup keyed by `key`.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::UniquenessViolation { .. } => ErrorKind::UniquenessViolation,
            StoreError::ReferenceViolation { .. } => ErrorKind::ReferenceViolation,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::StorageFault(_) => ErrorKind::StorageFault,
        }
    }

    /// Name of the violated constraint, when the engine reported one
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StoreError::UniquenessViolation { constraint, .. }
            | StoreError::ReferenceViolation { constraint, .. } => Some(constraint),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::NotFound { .. } => ErrorSeverity::Info,
            StoreError::UniquenessViolation { .. } => ErrorSeverity::Warning,
            StoreError::ReferenceViolation { .. } => ErrorSeverity::Warning,
            StoreError::StorageFault(sqlx::Error::PoolTimedOut) => ErrorSeverity::Critical,
            StoreError::StorageFault(sqlx::Error::PoolClosed) => ErrorSeverity::Critical,
            StoreError::StorageFault(_) => ErrorSeverity::Error,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        classify(error)
    }
}

/// Translate a driver failure into the store taxonomy.
///
/// The SQLSTATE code wins when present; the driver's own error kind is the
/// fallback for errors that carry no code.
pub fn classify(error: sqlx::Error) -> StoreError {
    let kind = match &error {
        sqlx::Error::Database(db) => classify_database_error(&**db),
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        _ => ErrorKind::StorageFault,
    };

    match kind {
        ErrorKind::UniquenessViolation | ErrorKind::ReferenceViolation => {
            let (constraint, message) = match &error {
                sqlx::Error::Database(db) => (
                    db.constraint().unwrap_or("unknown").to_string(),
                    db.message().to_string(),
                ),
                other => ("unknown".to_string(), other.to_string()),
            };
            if kind == ErrorKind::UniquenessViolation {
                StoreError::UniquenessViolation { constraint, message }
            } else {
                StoreError::ReferenceViolation { constraint, message }
            }
        }
        ErrorKind::NotFound => StoreError::not_found("row", "query returned no rows"),
        ErrorKind::StorageFault => StoreError::StorageFault(error),
    }
}

fn classify_database_error(error: &dyn DatabaseError) -> ErrorKind {
    let code: Option<Cow<'_, str>> = error.code();
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => ErrorKind::UniquenessViolation,
        Some(FOREIGN_KEY_VIOLATION) => ErrorKind::ReferenceViolation,
        Some(_) => ErrorKind::StorageFault,
        None => match error.kind() {
            sqlx::error::ErrorKind::UniqueViolation => ErrorKind::UniquenessViolation,
            sqlx::error::ErrorKind::ForeignKeyViolation => ErrorKind::ReferenceViolation,
            _ => ErrorKind::StorageFault,
        },
    }
}

/// Main error type for the kahoot store process
#[derive(Error, Debug)]
pub enum KahootStoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Invalid seed data: {0}")]
    Seed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for KahootStoreError {
    fn from(error: sqlx::Error) -> Self {
        KahootStoreError::Store(classify(error))
    }
}

/// Result type alias for kahoot store operations
pub type Result<T> = std::result::Result<T, KahootStoreError>;

/// Result type alias for repository operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use std::error::Error as StdError;

    /// Engine error with a controllable SQLSTATE and constraint name
    #[derive(Debug)]
    struct FakeDbError {
        code: Option<String>,
        constraint: Option<String>,
        kind: sqlx::error::ErrorKind,
    }

    impl FakeDbError {
        fn with_code(code: &str, constraint: Option<&str>) -> Self {
            Self {
                code: Some(code.to_string()),
                constraint: constraint.map(str::to_string),
                kind: sqlx::error::ErrorKind::Other,
            }
        }
    }

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "fake engine failure")
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake engine failure"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.as_deref().map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint.as_deref()
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.kind {
                sqlx::error::ErrorKind::UniqueViolation => sqlx::error::ErrorKind::UniqueViolation,
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    sqlx::error::ErrorKind::ForeignKeyViolation
                }
                _ => sqlx::error::ErrorKind::Other,
            }
        }
    }

    fn engine_error(fake: FakeDbError) -> sqlx::Error {
        sqlx::Error::Database(Box::new(fake))
    }

    #[test]
    fn unique_violation_code_is_uniqueness() {
        let error = classify(engine_error(FakeDbError::with_code(
            UNIQUE_VIOLATION,
            Some("users_username_key"),
        )));

        assert_matches!(
            &error,
            StoreError::UniquenessViolation { constraint, .. } if constraint == "users_username_key"
        );
        assert_eq!(error.kind().status_code(), 409);
    }

    #[test]
    fn foreign_key_code_is_reference() {
        let error = classify(engine_error(FakeDbError::with_code(
            FOREIGN_KEY_VIOLATION,
            Some("your_kahoot_language_id_fkey"),
        )));

        assert_eq!(error.kind(), ErrorKind::ReferenceViolation);
        assert_eq!(error.constraint(), Some("your_kahoot_language_id_fkey"));
        assert_eq!(error.kind().status_code(), 404);
    }

    #[test]
    fn missing_constraint_name_is_reported_as_unknown() {
        let error = classify(engine_error(FakeDbError::with_code(UNIQUE_VIOLATION, None)));
        assert_eq!(error.constraint(), Some("unknown"));
    }

    #[test]
    fn driver_kind_is_used_when_code_is_absent() {
        let error = classify(engine_error(FakeDbError {
            code: None,
            constraint: None,
            kind: sqlx::error::ErrorKind::ForeignKeyViolation,
        }));
        assert_eq!(error.kind(), ErrorKind::ReferenceViolation);

        let error = classify(engine_error(FakeDbError {
            code: None,
            constraint: None,
            kind: sqlx::error::ErrorKind::UniqueViolation,
        }));
        assert_eq!(error.kind(), ErrorKind::UniquenessViolation);
    }

    #[test]
    fn other_constraint_codes_are_storage_faults() {
        // not_null_violation, check_violation, string_data_right_truncation
        for code in ["23502", "23514", "22001"] {
            let error = classify(engine_error(FakeDbError::with_code(code, None)));
            assert_matches!(error, StoreError::StorageFault(sqlx::Error::Database(_)));
        }
    }

    #[test]
    fn row_not_found_is_not_found() {
        let error = StoreError::from(sqlx::Error::RowNotFound);
        assert!(error.is_not_found());
        assert_eq!(error.kind().status_code(), 404);
    }

    #[test]
    fn pool_timeout_is_critical_storage_fault() {
        let error = StoreError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(error.kind(), ErrorKind::StorageFault);
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert_eq!(error.kind().status_code(), 500);
    }

    #[test]
    fn not_found_message_names_entity_and_key() {
        let error = StoreError::not_found("your_kahoot", 1);
        assert_eq!(error.to_string(), "your_kahoot not found: 1");
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn error_kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ReferenceViolation).unwrap();
        assert_eq!(json, "\"reference_violation\"");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }

    #[test]
    fn sqlx_errors_convert_into_application_errors() {
        let error = KahootStoreError::from(sqlx::Error::PoolClosed);
        assert_matches!(error, KahootStoreError::Store(StoreError::StorageFault(_)));
    }

    proptest! {
        #[test]
        fn non_integrity_codes_never_become_violations(code in "[0-9A-Z]{5}") {
            prop_assume!(code != UNIQUE_VIOLATION && code != FOREIGN_KEY_VIOLATION);
            let error = classify(engine_error(FakeDbError::with_code(&code, Some("c"))));
            prop_assert_eq!(error.kind(), ErrorKind::StorageFault);
        }
    }
}
