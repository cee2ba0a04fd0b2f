//! Translation of storage-level uniqueness violations into domain errors.
//!
//! Each supported engine reports a violated constraint differently: Postgres
//! attaches the constraint name as a structured field on the server error,
//! SQLite only embeds it in the error message. One extractor per engine,
//! selected from the connection's backend, keeps the difference out of the
//! services.

use sea_orm::sqlx::Error as SqlxError;
use sea_orm::{DatabaseBackend, DbErr, RuntimeErr};

use crate::error::AppError;

/// SQLite prefixes every uniqueness failure message with this.
const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// Extracts the violated constraint's identifying name from a storage
/// failure. Returns None when the failure is not a uniqueness violation.
pub trait ConstraintExtractor: Send + Sync {
    fn unique_constraint(&self, err: &DbErr) -> Option<String>;
}

/// Postgres reports the constraint name as a structured error field.
pub struct PostgresConstraintExtractor;

impl ConstraintExtractor for PostgresConstraintExtractor {
    fn unique_constraint(&self, err: &DbErr) -> Option<String> {
        let db_err = database_error(err)?;
        if !db_err.is_unique_violation() {
            return None;
        }
        db_err.constraint().map(str::to_owned)
    }
}

/// SQLite reports `UNIQUE constraint failed: <table>.<column>[, ...]`; the
/// constraint name is whatever follows the fixed prefix.
pub struct SqliteConstraintExtractor;

impl ConstraintExtractor for SqliteConstraintExtractor {
    fn unique_constraint(&self, err: &DbErr) -> Option<String> {
        let db_err = database_error(err)?;
        db_err
            .message()
            .strip_prefix(SQLITE_UNIQUE_PREFIX)
            .map(str::to_owned)
    }
}

static POSTGRES: PostgresConstraintExtractor = PostgresConstraintExtractor;
static SQLITE: SqliteConstraintExtractor = SqliteConstraintExtractor;

/// Select the extractor for a backend. Postgres is the production engine;
/// SQLite backs local development and the test suites.
pub fn for_backend(backend: DatabaseBackend) -> &'static dyn ConstraintExtractor {
    match backend {
        DatabaseBackend::Sqlite => &SQLITE,
        _ => &POSTGRES,
    }
}

/// Map a mutation failure to a domain `UniqueViolation` by matching the
/// violated constraint name against `(needle, field)` pairs.
///
/// Failures that are not uniqueness violations, and constraint names that
/// match no needle, come back as a plain database error so callers surface a
/// generic server error instead of a misleading conflict.
pub fn translate_unique(
    backend: DatabaseBackend,
    err: DbErr,
    fields: &[(&str, &'static str)],
) -> AppError {
    if let Some(constraint) = for_backend(backend).unique_constraint(&err) {
        let constraint = constraint.to_lowercase();
        for (needle, field) in fields {
            if constraint.contains(needle) {
                return AppError::UniqueViolation { field };
            }
        }
    }
    AppError::Database(err.to_string())
}

/// Pull the underlying sqlx database error out of a SeaORM failure, if any.
fn database_error(err: &DbErr) -> Option<&(dyn sea_orm::sqlx::error::DatabaseError + 'static)> {
    let runtime_err = match err {
        DbErr::Conn(e) | DbErr::Exec(e) | DbErr::Query(e) => e,
        _ => return None,
    };

    match runtime_err {
        RuntimeErr::SqlxError(sqlx_err) => match sqlx_err.as_ref() {
            SqlxError::Database(db_err) => Some(db_err.as_ref()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_unique_err(message: &str) -> DbErr {
        // sqlx's sqlite driver surfaces uniqueness failures through the
        // database-error variant; a protocol-level error stands in for the
        // "not a constraint failure" cases below.
        DbErr::Query(RuntimeErr::SqlxError(std::sync::Arc::new(
            SqlxError::Protocol(message.to_string()),
        )))
    }

    #[test]
    fn test_non_database_errors_are_not_constraints() {
        let err = DbErr::RecordNotFound("badge".to_string());
        assert!(SqliteConstraintExtractor.unique_constraint(&err).is_none());
        assert!(PostgresConstraintExtractor.unique_constraint(&err).is_none());

        let err = sqlite_unique_err("UNIQUE constraint failed: badges.name");
        // Protocol errors carry no database error payload either.
        assert!(SqliteConstraintExtractor.unique_constraint(&err).is_none());
    }

    #[test]
    fn test_unrecognized_failures_stay_generic() {
        let err = DbErr::RecordNotFound("station".to_string());
        let mapped = translate_unique(DatabaseBackend::Sqlite, err, &[("name", "name")]);
        assert!(matches!(mapped, AppError::Database(_)));
    }
}
