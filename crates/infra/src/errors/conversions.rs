//! Conversions from external infrastructure errors into domain errors.

use dbsweep_domain::DbSweepError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DbSweepError);

impl From<InfraError> for DbSweepError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DbSweepError> for InfraError {
    fn from(value: DbSweepError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDbSweepError {
    fn into_dbsweep(self) -> DbSweepError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → DbSweepError */
/* -------------------------------------------------------------------------- */

impl IntoDbSweepError for SqlError {
    fn into_dbsweep(self) -> DbSweepError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => DbSweepError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        DbSweepError::Database("database is locked".into())
                    }
                    ErrorCode::ReadOnly => {
                        DbSweepError::Database("attempt to write a readonly database".into())
                    }
                    ErrorCode::NotADatabase => {
                        DbSweepError::Database("file is not a database".into())
                    }
                    _ => DbSweepError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => DbSweepError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                DbSweepError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                DbSweepError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(..) => DbSweepError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidParameterName(parameter_name) => {
                DbSweepError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => DbSweepError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => DbSweepError::Database("invalid SQL query".into()),
            other => DbSweepError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_dbsweep())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → DbSweepError */
/* -------------------------------------------------------------------------- */

impl IntoDbSweepError for r2d2::Error {
    fn into_dbsweep(self) -> DbSweepError {
        DbSweepError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_dbsweep())
    }
}
