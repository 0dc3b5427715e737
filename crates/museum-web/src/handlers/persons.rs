//! Handlers for `/persons` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/persons` | |
//! | `GET`  | `/persons/{id}` | 404 if not found |
//! | `GET`  | `/persons/create` | Empty form |
//! | `POST` | `/persons/create` | Redirects to `/persons` |

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

/// `GET /persons`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let persons = state.store.list_persons().await.map_err(Error::store)?;
  Ok(Html(museum_pages::persons_list(&persons)))
}

/// `GET /persons/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let detail = state.store.get_person(id).await.map_err(Error::store)?;
  Ok(Html(museum_pages::person_detail(&detail)))
}

/// `GET /persons/create`
pub async fn create_form<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let countries = state.store.list_countries().await.map_err(Error::store)?;
  let exhibits = state.store.list_exhibits().await.map_err(Error::store)?;
  Ok(Html(museum_pages::person_form(&countries, &exhibits)))
}

/// `POST /persons/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  fields: FormFields,
) -> Result<Redirect, Error>
where
  S: Catalog + Clone + 'static,
{
  let input = form::person(&fields, today())?;
  state.store.create_person(input).await.map_err(Error::store)?;
  Ok(Redirect::to("/persons"))
}
