//! Convenience result type alias for Mutiny.

use crate::error::AppError;

/// A specialized `Result` type for Mutiny operations.
pub type AppResult<T> = Result<T, AppError>;
