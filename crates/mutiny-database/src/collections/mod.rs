//! PostgreSQL implementations of the session and credential collections.

pub mod credential;
pub mod session;

pub use credential::PgCredentialCollection;
pub use session::PgSessionCollection;

use mutiny_core::error::{AppError, ErrorKind};

/// Map a driver error into the application error taxonomy.
///
/// Unique-constraint violations become [`ErrorKind::Conflict`]; everything
/// else is a [`ErrorKind::Database`] fault.
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    let unique_violation = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate key"), err)
    } else {
        AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err)
    }
}
