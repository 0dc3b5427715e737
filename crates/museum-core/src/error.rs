//! Error types for `museum-core`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  #[error("date {0} is in the future")]
  FutureDate(NaiveDate),

  #[error("birth date {birth} must precede death date {death}")]
  DeathBeforeBirth { birth: NaiveDate, death: NaiveDate },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Classification the web layer needs from a backend error. Validation
/// failures use [`Error`] directly and never reach a backend.
pub trait CatalogError: std::error::Error + Send + Sync + 'static {
  /// The requested root entity does not exist.
  fn is_not_found(&self) -> bool;
}
