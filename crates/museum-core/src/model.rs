//! Catalog records, one struct per table row.
//!
//! Records are plain values: once read from the store they are never mutated,
//! and the store exposes no update or delete operations. Equality is
//! field-wise, which is what regrouping uses to deduplicate repeated children.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Geography ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub id:   i64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
  pub id:         i64,
  pub name:       String,
  pub country_id: i64,
}

// ─── Museums and exhibits ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Museum {
  pub id:              i64,
  pub name:            String,
  pub foundation_date: NaiveDate,
  pub city_id:         i64,
}

/// Exhibit category, e.g. "painting" or "sculpture".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitType {
  pub id:   i64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
  pub id:           i64,
  pub release_date: NaiveDate,
  pub title:        String,
  pub type_id:      i64,
  pub museum_id:    i64,
}

// ─── People ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub name:       String,
  pub birth_date: NaiveDate,
}

/// Optional 1:1 extension of [`Person`]; `id` is the person's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
  pub id:    i64,
  pub death: NaiveDate,
}

// ─── Create inputs ───────────────────────────────────────────────────────────

/// Input for [`Catalog::create_museum`](crate::catalog::Catalog::create_museum).
/// The id is allocated by the store.
#[derive(Debug, Clone)]
pub struct NewMuseum {
  pub name:            String,
  pub foundation_date: NaiveDate,
  pub city_id:         i64,
}

/// Input for [`Catalog::create_person`](crate::catalog::Catalog::create_person).
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub name:       String,
  pub birth_date: NaiveDate,
  /// Written to the `death` table under the new person's id when present.
  pub death:      Option<NaiveDate>,
  pub countries:  Vec<i64>,
  pub exhibits:   Vec<i64>,
}

/// Input for [`Catalog::create_exhibit`](crate::catalog::Catalog::create_exhibit).
#[derive(Debug, Clone)]
pub struct NewExhibit {
  pub title:        String,
  pub release_date: NaiveDate,
  pub type_id:      i64,
  pub museum_id:    i64,
  pub persons:      Vec<i64>,
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Tables that carry an integer `id` column and take part in id allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Country,
  City,
  Museum,
  Type,
  Exhibit,
  Person,
  Death,
}

impl Table {
  pub fn name(self) -> &'static str {
    match self {
      Table::Country => "country",
      Table::City    => "city",
      Table::Museum  => "museum",
      Table::Type    => "type",
      Table::Exhibit => "exhibit",
      Table::Person  => "person",
      Table::Death   => "death",
    }
  }
}
