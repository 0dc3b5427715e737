//! Handlers for the exhibit index and `/exhibits/create`.

use axum::{
  extract::State,
  response::{Html, Redirect},
};
use museum_core::catalog::Catalog;

use crate::{
  AppState,
  error::Error,
  form::{self, FormFields},
  handlers::today,
};

/// `GET /`: every exhibit with its type, museum and persons.
pub async fn index<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let overview = state.store.exhibits_overview().await.map_err(Error::store)?;
  Ok(Html(museum_pages::exhibits_index(&overview)))
}

/// `GET /exhibits/create`
pub async fn create_form<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: Catalog + Clone + 'static,
{
  let museums = state.store.list_museums().await.map_err(Error::store)?;
  let persons = state.store.list_persons().await.map_err(Error::store)?;
  let types = state.store.list_types().await.map_err(Error::store)?;
  Ok(Html(museum_pages::exhibit_form(&museums, &persons, &types)))
}

/// `POST /exhibits/create`, redirecting to `/`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  fields: FormFields,
) -> Result<Redirect, Error>
where
  S: Catalog + Clone + 'static,
{
  let input = form::exhibit(&fields, today())?;
  state.store.create_exhibit(input).await.map_err(Error::store)?;
  Ok(Redirect::to("/"))
}
