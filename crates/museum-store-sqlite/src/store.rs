//! [`SqliteStore`], the SQLite implementation of [`Catalog`].

use std::path::Path;

use museum_core::{
  catalog::Catalog,
  graph::{ExhibitOverview, MuseumDetail, PersonDetail},
  model::{
    City, Country, Exhibit, ExhibitType, Museum, NewExhibit, NewMuseum,
    NewPerson, Person, Table,
  },
};
use rusqlite::{Connection, TransactionBehavior};

use crate::{
  encode::{
    RawExhibit, RawMuseum, RawMuseumRow, RawOverviewRow, RawPerson,
    RawPersonRow, encode_date, read_city, read_country, read_type,
  },
  regroup::{assemble_museum, assemble_overview, assemble_person},
  schema::SCHEMA,
  Error, Result,
};

// ─── Queries ─────────────────────────────────────────────────────────────────

const MUSEUM_GRAPH_SQL: &str = "
  SELECT
    m.id, m.name, m.foundation_date, m.city_id,
    ci.id, ci.name, ci.country_id,
    co.id, co.name,
    e.id, e.release_date, e.title, e.type_id, e.museum_id,
    t.id, t.name
  FROM museum m
  INNER JOIN city ci    ON ci.id = m.city_id
  INNER JOIN country co ON co.id = ci.country_id
  LEFT JOIN exhibit e   ON e.museum_id = m.id
  LEFT JOIN type t      ON t.id = e.type_id
  WHERE m.id = ?1
  ORDER BY e.id";

const PERSON_GRAPH_SQL: &str = "
  SELECT
    p.id, p.name, p.birth_date,
    d.id, d.death,
    c.id, c.name,
    e.id, e.release_date, e.title, e.type_id, e.museum_id,
    t.id, t.name
  FROM person p
  LEFT JOIN death d               ON d.id = p.id
  LEFT JOIN country_to_person ctp ON ctp.person_id = p.id
  LEFT JOIN country c             ON c.id = ctp.country_id
  LEFT JOIN person_to_exhibit pte ON pte.person_id = p.id
  LEFT JOIN exhibit e             ON e.id = pte.exhibit_id
  LEFT JOIN type t                ON t.id = e.type_id
  WHERE p.id = ?1
  ORDER BY c.id, e.id";

const EXHIBITS_OVERVIEW_SQL: &str = "
  SELECT
    e.id, e.release_date, e.title, e.type_id, e.museum_id,
    t.id, t.name,
    m.id, m.name, m.foundation_date, m.city_id,
    p.id, p.name, p.birth_date
  FROM exhibit e
  INNER JOIN type t               ON t.id = e.type_id
  INNER JOIN museum m             ON m.id = e.museum_id
  LEFT JOIN person_to_exhibit pte ON pte.exhibit_id = e.id
  LEFT JOIN person p              ON p.id = pte.person_id
  ORDER BY e.id DESC, p.id";

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// One past the current maximum id of `table`; `1` when the table is empty.
///
/// Called inside an IMMEDIATE transaction by every writer, so the read and
/// the following insert cannot interleave with another writer.
fn allocate_id(conn: &Connection, table: Table) -> rusqlite::Result<i64> {
  let sql = format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {}", table.name());
  conn.query_row(&sql, [], |r| r.get(0))
}

/// Sort and drop duplicate ids from a multi-select form field.
fn distinct(mut ids: Vec<i64>) -> Vec<i64> {
  ids.sort_unstable();
  ids.dedup();
  ids
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A museum catalog backed by a single SQLite file.
///
/// Clones share the inner connection. Each
/// operation runs inside one `call` closure, which holds the connection for
/// exactly that operation.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a parameterless query and map every row with `map`.
  async fn select_all<T, F>(&self, sql: &'static str, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Insert a single `(id, name)` reference row and return its id.
  async fn insert_named(&self, table: Table, name: String) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = allocate_id(&tx, table)?;
        tx.execute(
          &format!("INSERT INTO {} (id, name) VALUES (?1, ?2)", table.name()),
          rusqlite::params![id, name],
        )?;
        tx.commit()?;
        Ok(id)
      })
      .await?;
    Ok(id)
  }
}

// ─── Catalog impl ────────────────────────────────────────────────────────────

impl Catalog for SqliteStore {
  type Error = Error;

  // ── Flat lists ────────────────────────────────────────────────────────────

  async fn list_countries(&self) -> Result<Vec<Country>> {
    self
      .select_all("SELECT id, name FROM country ORDER BY id", |row| {
        read_country(row, 0)
      })
      .await
  }

  async fn list_cities(&self) -> Result<Vec<City>> {
    self
      .select_all("SELECT id, name, country_id FROM city ORDER BY id", |row| {
        read_city(row, 0)
      })
      .await
  }

  async fn list_types(&self) -> Result<Vec<ExhibitType>> {
    self
      .select_all("SELECT id, name FROM type ORDER BY id", |row| read_type(row, 0))
      .await
  }

  async fn list_museums(&self) -> Result<Vec<Museum>> {
    self
      .select_all(
        "SELECT id, name, foundation_date, city_id FROM museum ORDER BY id",
        |row| RawMuseum::read(row, 0),
      )
      .await?
      .into_iter()
      .map(RawMuseum::into_museum)
      .collect()
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    self
      .select_all("SELECT id, name, birth_date FROM person ORDER BY id", |row| {
        RawPerson::read(row, 0)
      })
      .await?
      .into_iter()
      .map(RawPerson::into_person)
      .collect()
  }

  async fn list_exhibits(&self) -> Result<Vec<Exhibit>> {
    self
      .select_all(
        "SELECT id, release_date, title, type_id, museum_id FROM exhibit ORDER BY id",
        |row| RawExhibit::read(row, 0),
      )
      .await?
      .into_iter()
      .map(RawExhibit::into_exhibit)
      .collect()
  }

  // ── Graphs ────────────────────────────────────────────────────────────────

  async fn get_museum(&self, id: i64) -> Result<MuseumDetail> {
    tracing::debug!(id, "loading museum graph");

    let raws: Vec<RawMuseumRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(MUSEUM_GRAPH_SQL)?;
        let rows = stmt
          .query_map(rusqlite::params![id], RawMuseumRow::read)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let rows = raws
      .into_iter()
      .map(RawMuseumRow::into_row)
      .collect::<Result<Vec<_>>>()?;

    assemble_museum(rows).ok_or(Error::MuseumNotFound(id))
  }

  async fn get_person(&self, id: i64) -> Result<PersonDetail> {
    tracing::debug!(id, "loading person graph");

    let raws: Vec<RawPersonRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(PERSON_GRAPH_SQL)?;
        let rows = stmt
          .query_map(rusqlite::params![id], RawPersonRow::read)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let rows = raws
      .into_iter()
      .map(RawPersonRow::into_row)
      .collect::<Result<Vec<_>>>()?;

    assemble_person(rows).ok_or(Error::PersonNotFound(id))
  }

  async fn exhibits_overview(&self) -> Result<Vec<ExhibitOverview>> {
    let raws = self.select_all(EXHIBITS_OVERVIEW_SQL, RawOverviewRow::read).await?;

    let rows = raws
      .into_iter()
      .map(RawOverviewRow::into_row)
      .collect::<Result<Vec<_>>>()?;

    Ok(assemble_overview(rows))
  }

  // ── Ids ───────────────────────────────────────────────────────────────────

  async fn next_id(&self, table: Table) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| Ok(allocate_id(conn, table)?))
      .await?;
    Ok(id)
  }

  // ── Reference data ────────────────────────────────────────────────────────

  async fn insert_country(&self, name: String) -> Result<Country> {
    let id = self.insert_named(Table::Country, name.clone()).await?;
    Ok(Country { id, name })
  }

  async fn insert_city(&self, name: String, country_id: i64) -> Result<City> {
    let city_name = name.clone();
    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = allocate_id(&tx, Table::City)?;
        tx.execute(
          "INSERT INTO city (id, name, country_id) VALUES (?1, ?2, ?3)",
          rusqlite::params![id, city_name, country_id],
        )?;
        tx.commit()?;
        Ok(id)
      })
      .await?;
    Ok(City { id, name, country_id })
  }

  async fn insert_type(&self, name: String) -> Result<ExhibitType> {
    let id = self.insert_named(Table::Type, name.clone()).await?;
    Ok(ExhibitType { id, name })
  }

  // ── Create flows ──────────────────────────────────────────────────────────

  async fn create_museum(&self, input: NewMuseum) -> Result<Museum> {
    let name = input.name.clone();
    let date_str = encode_date(input.foundation_date);
    let city_id = input.city_id;

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = allocate_id(&tx, Table::Museum)?;
        tx.execute(
          "INSERT INTO museum (id, name, foundation_date, city_id)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id, name, date_str, city_id],
        )?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::info!(id, name = %input.name, "museum created");
    Ok(Museum {
      id,
      name: input.name,
      foundation_date: input.foundation_date,
      city_id,
    })
  }

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let name       = input.name.clone();
    let birth_str  = encode_date(input.birth_date);
    let death_str  = input.death.map(encode_date);
    let countries  = distinct(input.countries);
    let exhibits   = distinct(input.exhibits);

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = allocate_id(&tx, Table::Person)?;
        tx.execute(
          "INSERT INTO person (id, name, birth_date) VALUES (?1, ?2, ?3)",
          rusqlite::params![id, name, birth_str],
        )?;
        if let Some(death) = death_str {
          tx.execute(
            "INSERT INTO death (id, death) VALUES (?1, ?2)",
            rusqlite::params![id, death],
          )?;
        }
        {
          let mut stmt = tx.prepare(
            "INSERT INTO country_to_person (country_id, person_id) VALUES (?1, ?2)",
          )?;
          for country_id in &countries {
            stmt.execute(rusqlite::params![country_id, id])?;
          }
          let mut stmt = tx.prepare(
            "INSERT INTO person_to_exhibit (person_id, exhibit_id) VALUES (?1, ?2)",
          )?;
          for exhibit_id in &exhibits {
            stmt.execute(rusqlite::params![id, exhibit_id])?;
          }
        }
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::info!(id, name = %input.name, "person created");
    Ok(Person { id, name: input.name, birth_date: input.birth_date })
  }

  async fn create_exhibit(&self, input: NewExhibit) -> Result<Exhibit> {
    let title     = input.title.clone();
    let date_str  = encode_date(input.release_date);
    let type_id   = input.type_id;
    let museum_id = input.museum_id;
    let persons   = distinct(input.persons);

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = allocate_id(&tx, Table::Exhibit)?;
        tx.execute(
          "INSERT INTO exhibit (id, release_date, title, type_id, museum_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, date_str, title, type_id, museum_id],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO person_to_exhibit (person_id, exhibit_id) VALUES (?1, ?2)",
          )?;
          for person_id in &persons {
            stmt.execute(rusqlite::params![person_id, id])?;
          }
        }
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::info!(id, title = %input.title, "exhibit created");
    Ok(Exhibit {
      id,
      release_date: input.release_date,
      title: input.title,
      type_id,
      museum_id,
    })
  }
}
