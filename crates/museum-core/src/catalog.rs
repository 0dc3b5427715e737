//! The `Catalog` trait.
//!
//! Implemented by storage backends (e.g. `museum-store-sqlite`). The web
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  error::CatalogError,
  graph::{ExhibitOverview, MuseumDetail, PersonDetail},
  model::{
    City, Country, Exhibit, ExhibitType, Museum, NewExhibit, NewMuseum,
    NewPerson, Person, Table,
  },
};

/// Abstraction over a museum catalog backend.
///
/// Rows are only ever inserted. Every write method is atomic: either the root
/// row and all of its association rows are persisted, or none are.
pub trait Catalog: Send + Sync {
  type Error: CatalogError;

  // ── Flat lists ────────────────────────────────────────────────────────

  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  fn list_cities(
    &self,
  ) -> impl Future<Output = Result<Vec<City>, Self::Error>> + Send + '_;

  fn list_types(
    &self,
  ) -> impl Future<Output = Result<Vec<ExhibitType>, Self::Error>> + Send + '_;

  fn list_museums(
    &self,
  ) -> impl Future<Output = Result<Vec<Museum>, Self::Error>> + Send + '_;

  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn list_exhibits(
    &self,
  ) -> impl Future<Output = Result<Vec<Exhibit>, Self::Error>> + Send + '_;

  // ── Graphs ────────────────────────────────────────────────────────────

  /// Museum with city, country and typed exhibits.
  ///
  /// Fails with a not-found error when `id` does not exist; never returns an
  /// empty structure.
  fn get_museum(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<MuseumDetail, Self::Error>> + Send + '_;

  /// Person with death record, countries and typed exhibits.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<PersonDetail, Self::Error>> + Send + '_;

  /// Every exhibit with its type, museum and distinct persons, ordered by
  /// exhibit id descending.
  fn exhibits_overview(
    &self,
  ) -> impl Future<Output = Result<Vec<ExhibitOverview>, Self::Error>> + Send + '_;

  // ── Ids ───────────────────────────────────────────────────────────────

  /// The id the next insert into `table` would receive: one past the
  /// current maximum, or `1` for an empty table.
  fn next_id(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  fn insert_country(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  fn insert_city(
    &self,
    name: String,
    country_id: i64,
  ) -> impl Future<Output = Result<City, Self::Error>> + Send + '_;

  fn insert_type(
    &self,
    name: String,
  ) -> impl Future<Output = Result<ExhibitType, Self::Error>> + Send + '_;

  fn create_museum(
    &self,
    input: NewMuseum,
  ) -> impl Future<Output = Result<Museum, Self::Error>> + Send + '_;

  /// Insert the person, its optional death row and both association sets.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Insert the exhibit and its person associations.
  fn create_exhibit(
    &self,
    input: NewExhibit,
  ) -> impl Future<Output = Result<Exhibit, Self::Error>> + Send + '_;
}
