//! Error type for `museum-store-sqlite`.

use museum_core::CatalogError;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  /// A UNIQUE or FOREIGN KEY constraint rejected a write. No recovery path
  /// exists; the enclosing transaction has been rolled back.
  #[error("integrity violation: {0}")]
  IntegrityViolation(String),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("museum not found: {0}")]
  MuseumNotFound(i64),

  #[error("person not found: {0}")]
  PersonNotFound(i64),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        ref failure,
        ref msg,
      )) if failure.code == ErrorCode::ConstraintViolation => {
        Error::IntegrityViolation(
          msg.clone().unwrap_or_else(|| failure.to_string()),
        )
      }
      other => Error::Database(other),
    }
  }
}

impl CatalogError for Error {
  fn is_not_found(&self) -> bool {
    matches!(self, Error::MuseumNotFound(_) | Error::PersonNotFound(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
