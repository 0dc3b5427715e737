//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` text. Row readers take a column offset so
//! the same reader serves every join that embeds that entity.

use chrono::NaiveDate;
use museum_core::{
  graph::ExhibitEntry,
  model::{City, Country, Death, Exhibit, ExhibitType, Museum, Person},
};
use rusqlite::Row;

use crate::{
  regroup::{MuseumRow, OverviewRow, PersonRow},
  Error, Result,
};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Plain column readers ────────────────────────────────────────────────────

pub fn read_country(row: &Row<'_>, at: usize) -> rusqlite::Result<Country> {
  Ok(Country { id: row.get(at)?, name: row.get(at + 1)? })
}

pub fn read_city(row: &Row<'_>, at: usize) -> rusqlite::Result<City> {
  Ok(City {
    id:         row.get(at)?,
    name:       row.get(at + 1)?,
    country_id: row.get(at + 2)?,
  })
}

pub fn read_type(row: &Row<'_>, at: usize) -> rusqlite::Result<ExhibitType> {
  Ok(ExhibitType { id: row.get(at)?, name: row.get(at + 1)? })
}

/// Read a left-joined country; `None` when its id column is NULL.
pub fn read_opt_country(
  row: &Row<'_>,
  at: usize,
) -> rusqlite::Result<Option<Country>> {
  match row.get::<_, Option<i64>>(at)? {
    Some(_) => read_country(row, at).map(Some),
    None => Ok(None),
  }
}

// ─── Raw rows (dates still text) ─────────────────────────────────────────────

/// Raw columns of a `museum` row.
pub struct RawMuseum {
  pub id:              i64,
  pub name:            String,
  pub foundation_date: String,
  pub city_id:         i64,
}

impl RawMuseum {
  pub fn read(row: &Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(at)?,
      name:            row.get(at + 1)?,
      foundation_date: row.get(at + 2)?,
      city_id:         row.get(at + 3)?,
    })
  }

  pub fn into_museum(self) -> Result<Museum> {
    Ok(Museum {
      id:              self.id,
      name:            self.name,
      foundation_date: decode_date(&self.foundation_date)?,
      city_id:         self.city_id,
    })
  }
}

/// Raw columns of an `exhibit` row.
pub struct RawExhibit {
  pub id:           i64,
  pub release_date: String,
  pub title:        String,
  pub type_id:      i64,
  pub museum_id:    i64,
}

impl RawExhibit {
  pub fn read(row: &Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(at)?,
      release_date: row.get(at + 1)?,
      title:        row.get(at + 2)?,
      type_id:      row.get(at + 3)?,
      museum_id:    row.get(at + 4)?,
    })
  }

  pub fn into_exhibit(self) -> Result<Exhibit> {
    Ok(Exhibit {
      id:           self.id,
      release_date: decode_date(&self.release_date)?,
      title:        self.title,
      type_id:      self.type_id,
      museum_id:    self.museum_id,
    })
  }
}

/// Raw columns of a `person` row.
pub struct RawPerson {
  pub id:         i64,
  pub name:       String,
  pub birth_date: String,
}

impl RawPerson {
  pub fn read(row: &Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(at)?,
      name:       row.get(at + 1)?,
      birth_date: row.get(at + 2)?,
    })
  }

  /// Read a left-joined person; `None` when its id column is NULL.
  pub fn read_opt(row: &Row<'_>, at: usize) -> rusqlite::Result<Option<Self>> {
    match row.get::<_, Option<i64>>(at)? {
      Some(_) => Self::read(row, at).map(Some),
      None => Ok(None),
    }
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         self.id,
      name:       self.name,
      birth_date: decode_date(&self.birth_date)?,
    })
  }
}

/// A left-joined exhibit together with its type (7 columns: 5 exhibit + 2 type).
pub struct RawExhibitEntry {
  pub exhibit:      RawExhibit,
  pub exhibit_type: ExhibitType,
}

impl RawExhibitEntry {
  /// `None` when the exhibit id column is NULL, i.e. the join found no child.
  pub fn read_opt(row: &Row<'_>, at: usize) -> rusqlite::Result<Option<Self>> {
    match row.get::<_, Option<i64>>(at)? {
      Some(_) => Ok(Some(Self {
        exhibit:      RawExhibit::read(row, at)?,
        exhibit_type: read_type(row, at + 5)?,
      })),
      None => Ok(None),
    }
  }

  pub fn into_entry(self) -> Result<ExhibitEntry> {
    Ok(ExhibitEntry {
      exhibit:      self.exhibit.into_exhibit()?,
      exhibit_type: self.exhibit_type,
    })
  }
}

// ─── Joined rows ─────────────────────────────────────────────────────────────

/// One row of the museum graph join.
pub struct RawMuseumRow {
  pub museum:  RawMuseum,
  pub city:    City,
  pub country: Country,
  pub exhibit: Option<RawExhibitEntry>,
}

impl RawMuseumRow {
  pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      museum:  RawMuseum::read(row, 0)?,
      city:    read_city(row, 4)?,
      country: read_country(row, 7)?,
      exhibit: RawExhibitEntry::read_opt(row, 9)?,
    })
  }

  pub fn into_row(self) -> Result<MuseumRow> {
    Ok(MuseumRow {
      museum:  self.museum.into_museum()?,
      city:    self.city,
      country: self.country,
      exhibit: self.exhibit.map(RawExhibitEntry::into_entry).transpose()?,
    })
  }
}

/// One row of the person graph join.
pub struct RawPersonRow {
  pub person:  RawPerson,
  pub death:   Option<(i64, String)>,
  pub country: Option<Country>,
  pub exhibit: Option<RawExhibitEntry>,
}

impl RawPersonRow {
  pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
    let death = match row.get::<_, Option<i64>>(3)? {
      Some(id) => Some((id, row.get(4)?)),
      None => None,
    };
    Ok(Self {
      person: RawPerson::read(row, 0)?,
      death,
      country: read_opt_country(row, 5)?,
      exhibit: RawExhibitEntry::read_opt(row, 7)?,
    })
  }

  pub fn into_row(self) -> Result<PersonRow> {
    let death = self
      .death
      .map(|(id, d)| decode_date(&d).map(|death| Death { id, death }))
      .transpose()?;
    Ok(PersonRow {
      person: self.person.into_person()?,
      death,
      country: self.country,
      exhibit: self.exhibit.map(RawExhibitEntry::into_entry).transpose()?,
    })
  }
}

/// One row of the exhibit overview join.
pub struct RawOverviewRow {
  pub exhibit:      RawExhibit,
  pub exhibit_type: ExhibitType,
  pub museum:       RawMuseum,
  pub person:       Option<RawPerson>,
}

impl RawOverviewRow {
  pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      exhibit:      RawExhibit::read(row, 0)?,
      exhibit_type: read_type(row, 5)?,
      museum:       RawMuseum::read(row, 7)?,
      person:       RawPerson::read_opt(row, 11)?,
    })
  }

  pub fn into_row(self) -> Result<OverviewRow> {
    Ok(OverviewRow {
      exhibit:      self.exhibit.into_exhibit()?,
      exhibit_type: self.exhibit_type,
      museum:       self.museum.into_museum()?,
      person:       self.person.map(RawPerson::into_person).transpose()?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn date_text_form_is_iso() {
    let d = NaiveDate::from_ymd_opt(1764, 12, 7).unwrap();
    assert_eq!(encode_date(d), "1764-12-07");
    assert_eq!(decode_date("1764-12-07").unwrap(), d);
  }

  #[test]
  fn malformed_stored_date_is_an_error() {
    assert!(matches!(decode_date("07.12.1764"), Err(Error::DateParse(_))));
  }
}
