//! Nested read models assembled from flattened join rows.
//!
//! These are never stored. The store builds them by regrouping the rows of a
//! single join query around one root entity.

use serde::{Deserialize, Serialize};

use crate::model::{City, Country, Death, Exhibit, ExhibitType, Museum, Person};

/// An exhibit paired with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitEntry {
  pub exhibit:      Exhibit,
  pub exhibit_type: ExhibitType,
}

/// A museum with its location and every exhibit it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuseumDetail {
  pub museum:   Museum,
  pub city:     City,
  pub country:  Country,
  /// Distinct exhibits in first-seen order; empty when the museum holds none.
  pub exhibits: Vec<ExhibitEntry>,
}

/// A person with their optional death record and associations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDetail {
  pub person:    Person,
  pub death:     Option<Death>,
  pub countries: Vec<Country>,
  pub exhibits:  Vec<ExhibitEntry>,
}

/// One entry of the exhibit index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitOverview {
  pub exhibit:      Exhibit,
  pub exhibit_type: ExhibitType,
  pub museum:       Museum,
  /// Distinct associated persons in first-seen order.
  pub persons:      Vec<Person>,
}

/// Append `item` unless an equal value is already present.
///
/// Join fan-out repeats child rows (a person with two countries and three
/// exhibits yields six rows); this keeps the first occurrence only.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
  if !items.contains(&item) {
    items.push(item);
  }
}
