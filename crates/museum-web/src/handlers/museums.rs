//! Handlers for `/museums` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/museums` | |
//! | `GET`  | `/museums/{id}` | 404 if not found |
//! | `GET`  | `/museums/create` | Empty form |
//! | `POST` | `/museums/create` | Redirects to `/museums` |

use axum::{
  extract::{Path, State},
  response::{Html, Redirect},
};
use museum_core::catalog::Catalog;

use crate::{
  AppState,
  error::Error,
  form::{self, FormFields},
  handlers::today,
};

/// `GET /museums`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let museums = state.store.list_museums().await.map_err(Error::store)?;
  Ok(Html(museum_pages::museums_list(&museums)))
}

/// `GET /museums/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let detail = state.store.get_museum(id).await.map_err(Error::store)?;
  Ok(Html(museum_pages::museum_detail(&detail)))
}

/// `GET /museums/create`
pub async fn create_form<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let cities = state.store.list_cities().await.map_err(Error::store)?;
  Ok(Html(museum_pages::museum_form(&cities)))
}

/// `POST /museums/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  fields: FormFields,
) -> Result<Redirect, Error>
where
  S: Catalog + Clone + 'static,
{
  let input = form::museum(&fields, today())?;
  state.store.create_museum(input).await.map_err(Error::store)?;
  Ok(Redirect::to("/museums"))
}
