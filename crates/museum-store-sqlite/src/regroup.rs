//! Rebuilding nested graphs from flattened join rows.
//!
//! A one-to-many join repeats the parent columns on every row and yields one
//! row per child (or a single row of NULL child columns when there is none).
//! The functions here take decoded rows and fold them back into one parent
//! with deduplicated, first-seen-ordered children.

use std::cmp::Reverse;

use museum_core::{
  graph::{ExhibitEntry, ExhibitOverview, MuseumDetail, PersonDetail, push_unique},
  model::{City, Country, Death, Exhibit, ExhibitType, Museum, Person},
};

// ─── Decoded join rows ───────────────────────────────────────────────────────

pub struct MuseumRow {
  pub museum:  Museum,
  pub city:    City,
  pub country: Country,
  pub exhibit: Option<ExhibitEntry>,
}

pub struct PersonRow {
  pub person:  Person,
  pub death:   Option<Death>,
  pub country: Option<Country>,
  pub exhibit: Option<ExhibitEntry>,
}

pub struct OverviewRow {
  pub exhibit:      Exhibit,
  pub exhibit_type: ExhibitType,
  pub museum:       Museum,
  pub person:       Option<Person>,
}

// ─── Grouping ────────────────────────────────────────────────────────────────

/// Partition `rows` into runs sharing the same key, in ascending key order.
///
/// Rows are stably sorted by key first, so the result never depends on the
/// order the database happened to return them in; rows within a group keep
/// their relative order.
pub fn group_by_key<R, K, F>(mut rows: Vec<R>, key: F) -> Vec<(K, Vec<R>)>
where
  K: Ord + Copy,
  F: Fn(&R) -> K,
{
  rows.sort_by_key(|r| key(r));

  let mut groups: Vec<(K, Vec<R>)> = Vec::new();
  for row in rows {
    let k = key(&row);
    match groups.last_mut() {
      Some((last, members)) if *last == k => members.push(row),
      _ => groups.push((k, vec![row])),
    }
  }
  groups
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Fold the rows of one museum's join. `None` when there are no rows at all.
pub fn assemble_museum(rows: Vec<MuseumRow>) -> Option<MuseumDetail> {
  let mut rows = rows.into_iter();
  let first = rows.next()?;

  let mut exhibits = Vec::new();
  if let Some(entry) = first.exhibit {
    exhibits.push(entry);
  }
  for row in rows {
    if let Some(entry) = row.exhibit {
      push_unique(&mut exhibits, entry);
    }
  }

  Some(MuseumDetail {
    museum: first.museum,
    city: first.city,
    country: first.country,
    exhibits,
  })
}

/// Fold the rows of one person's join. `None` when there are no rows at all.
pub fn assemble_person(rows: Vec<PersonRow>) -> Option<PersonDetail> {
  let mut rows = rows.into_iter();
  let first = rows.next()?;

  let mut countries = Vec::new();
  let mut exhibits = Vec::new();
  let PersonRow { person, death, country, exhibit } = first;
  if let Some(c) = country {
    countries.push(c);
  }
  if let Some(e) = exhibit {
    exhibits.push(e);
  }
  for row in rows {
    if let Some(c) = row.country {
      push_unique(&mut countries, c);
    }
    if let Some(e) = row.exhibit {
      push_unique(&mut exhibits, e);
    }
  }

  Some(PersonDetail { person, death, countries, exhibits })
}

/// Group overview rows per exhibit, newest (highest id) first.
pub fn assemble_overview(rows: Vec<OverviewRow>) -> Vec<ExhibitOverview> {
  group_by_key(rows, |r| Reverse(r.exhibit.id))
    .into_iter()
    .filter_map(|(_, group)| {
      let mut group = group.into_iter();
      let first = group.next()?;

      let mut persons = Vec::new();
      if let Some(p) = first.person {
        persons.push(p);
      }
      for row in group {
        if let Some(p) = row.person {
          push_unique(&mut persons, p);
        }
      }

      Some(ExhibitOverview {
        exhibit:      first.exhibit,
        exhibit_type: first.exhibit_type,
        museum:       first.museum,
        persons,
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn date(y: i32) -> NaiveDate { NaiveDate::from_ymd_opt(y, 1, 1).unwrap() }

  fn museum() -> Museum {
    Museum { id: 1, name: "Louvre".into(), foundation_date: date(1793), city_id: 1 }
  }

  fn painting() -> ExhibitType { ExhibitType { id: 1, name: "painting".into() } }

  fn entry(id: i64) -> ExhibitEntry {
    ExhibitEntry {
      exhibit: Exhibit {
        id,
        release_date: date(1500),
        title: format!("exhibit {id}"),
        type_id: 1,
        museum_id: 1,
      },
      exhibit_type: painting(),
    }
  }

  fn person(id: i64) -> Person {
    Person { id, name: format!("person {id}"), birth_date: date(1452) }
  }

  fn museum_row(exhibit: Option<ExhibitEntry>) -> MuseumRow {
    MuseumRow {
      museum: museum(),
      city: City { id: 1, name: "Paris".into(), country_id: 1 },
      country: Country { id: 1, name: "France".into() },
      exhibit,
    }
  }

  fn overview_row(exhibit_id: i64, person_id: Option<i64>) -> OverviewRow {
    OverviewRow {
      exhibit: entry(exhibit_id).exhibit,
      exhibit_type: painting(),
      museum: museum(),
      person: person_id.map(person),
    }
  }

  #[test]
  fn group_by_key_sorts_before_grouping() {
    let groups = group_by_key(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')], |r| r.0);
    let shape: Vec<(i32, Vec<char>)> = groups
      .into_iter()
      .map(|(k, rs)| (k, rs.into_iter().map(|r| r.1).collect()))
      .collect();
    assert_eq!(shape, vec![(1, vec!['b', 'd']), (2, vec!['a', 'c'])]);
  }

  #[test]
  fn group_by_key_empty() {
    let groups = group_by_key(Vec::<i32>::new(), |r| *r);
    assert!(groups.is_empty());
  }

  #[test]
  fn museum_without_rows_is_none() {
    assert!(assemble_museum(vec![]).is_none());
  }

  #[test]
  fn museum_with_null_exhibit_has_empty_list() {
    let detail = assemble_museum(vec![museum_row(None)]).unwrap();
    assert!(detail.exhibits.is_empty());
    assert_eq!(detail.city.id, detail.museum.city_id);
    assert_eq!(detail.city.country_id, detail.country.id);
  }

  #[test]
  fn museum_exhibits_are_deduplicated() {
    let rows = vec![
      museum_row(Some(entry(1))),
      museum_row(Some(entry(2))),
      museum_row(Some(entry(1))),
    ];
    let detail = assemble_museum(rows).unwrap();
    let ids: Vec<i64> = detail.exhibits.iter().map(|e| e.exhibit.id).collect();
    assert_eq!(ids, vec![1, 2]);
  }

  #[test]
  fn person_cross_product_collapses() {
    let p = person(7);
    let fr = Country { id: 1, name: "France".into() };
    let it = Country { id: 2, name: "Italy".into() };
    let mut rows = Vec::new();
    for c in [&fr, &it] {
      for e in [1, 2, 3] {
        rows.push(PersonRow {
          person:  p.clone(),
          death:   None,
          country: Some(c.clone()),
          exhibit: Some(entry(e)),
        });
      }
    }
    let detail = assemble_person(rows).unwrap();
    assert_eq!(detail.countries, vec![fr, it]);
    assert_eq!(detail.exhibits.len(), 3);
    assert!(detail.death.is_none());
  }

  #[test]
  fn person_without_associations() {
    let rows = vec![PersonRow {
      person:  person(1),
      death:   Some(Death { id: 1, death: date(1519) }),
      country: None,
      exhibit: None,
    }];
    let detail = assemble_person(rows).unwrap();
    assert!(detail.countries.is_empty());
    assert!(detail.exhibits.is_empty());
    assert_eq!(detail.death.map(|d| d.id), Some(1));
  }

  #[test]
  fn overview_orders_desc_and_dedups_persons() {
    // Deliberately interleaved: grouping must not rely on input order.
    let rows = vec![
      overview_row(1, Some(10)),
      overview_row(3, None),
      overview_row(2, Some(10)),
      overview_row(1, Some(11)),
      overview_row(2, Some(10)),
      overview_row(1, Some(10)),
    ];
    let overview = assemble_overview(rows);

    let ids: Vec<i64> = overview.iter().map(|o| o.exhibit.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    assert!(overview[0].persons.is_empty());
    assert_eq!(overview[1].persons.len(), 1);
    let p1: Vec<i64> = overview[2].persons.iter().map(|p| p.id).collect();
    assert_eq!(p1, vec![10, 11]);
  }
}
