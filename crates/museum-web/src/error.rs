//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use museum_core::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Classify a backend error: missing root entities become 404, anything
  /// else (integrity violations included) is a server error.
  pub fn store<E: CatalogError>(e: E) -> Self {
    if e.is_not_found() {
      Error::NotFound
    } else {
      Error::Store(Box::new(e))
    }
  }
}

/// Validation failures from the core crate are the client's fault.
impl From<museum_core::Error> for Error {
  fn from(e: museum_core::Error) -> Self { Error::BadRequest(e.to_string()) }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, title, message) = match self {
      Error::NotFound => {
        (StatusCode::NOT_FOUND, "Not Found", "No such record.".to_string())
      }
      Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Server Error",
          "The request could not be completed.".to_string(),
        )
      }
    };
    (status, Html(museum_pages::error_page(title, &message))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  enum FakeStoreError {
    #[error("gone")]
    Gone,
    #[error("integrity violation: FOREIGN KEY constraint failed")]
    Broken,
  }

  impl CatalogError for FakeStoreError {
    fn is_not_found(&self) -> bool { matches!(self, Self::Gone) }
  }

  #[test]
  fn store_errors_are_classified() {
    assert!(matches!(Error::store(FakeStoreError::Gone), Error::NotFound));
    assert!(matches!(Error::store(FakeStoreError::Broken), Error::Store(_)));
  }

  #[test]
  fn validation_errors_are_bad_requests() {
    let e: Error = museum_core::Error::InvalidDate("soon".into()).into();
    assert_eq!(e.into_response().status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn server_error_body_is_generic() {
    let resp = Error::store(FakeStoreError::Broken).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("could not be completed"), "{html}");
    assert!(!html.contains("FOREIGN KEY"), "{html}");
  }
}
