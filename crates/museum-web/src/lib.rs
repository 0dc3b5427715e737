//! HTTP layer for the museum catalog.
//!
//! Exposes an axum [`Router`] serving server-rendered pages backed by any
//! [`Catalog`].

pub mod error;
pub mod form;
pub mod handlers;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, routing::get};
use museum_core::catalog::Catalog;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{exhibits, museums, persons};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the TOML file at `path` (if it exists) and `MUSEUM_*`
  /// environment variables, later sources winning.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5024_i64)?
      .set_default("database_path", "main.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("MUSEUM"))
      .build()?
      .try_deserialize()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: Catalog> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`]. Every page also answers with a
/// trailing slash.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Catalog + Clone + 'static,
{
  Router::new()
    .route("/ping",             get(handlers::ping))
    .route("/",                 get(exhibits::index::<S>))
    .route("/exhibits/create",  get(exhibits::create_form::<S>).post(exhibits::create::<S>))
    .route("/exhibits/create/", get(exhibits::create_form::<S>).post(exhibits::create::<S>))
    .route("/museums",          get(museums::list::<S>))
    .route("/museums/",         get(museums::list::<S>))
    .route("/museums/create",   get(museums::create_form::<S>).post(museums::create::<S>))
    .route("/museums/create/",  get(museums::create_form::<S>).post(museums::create::<S>))
    .route("/museums/{id}",     get(museums::get_one::<S>))
    .route("/museums/{id}/",    get(museums::get_one::<S>))
    .route("/persons",          get(persons::list::<S>))
    .route("/persons/",         get(persons::list::<S>))
    .route("/persons/create",   get(persons::create_form::<S>).post(persons::create::<S>))
    .route("/persons/create/",  get(persons::create_form::<S>).post(persons::create::<S>))
    .route("/persons/{id}",     get(persons::get_one::<S>))
    .route("/persons/{id}/",    get(persons::get_one::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
