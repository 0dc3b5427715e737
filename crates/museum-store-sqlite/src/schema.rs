//! SQL schema for the museum catalog store.
//!
//! Executed on every connection open. Idempotent thanks to
//! `CREATE ... IF NOT EXISTS`, so restarting against an existing file is safe.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS country (
    id    INTEGER NOT NULL PRIMARY KEY,
    name  TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS city (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        TEXT    NOT NULL,
    country_id  INTEGER NOT NULL REFERENCES country(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS museum (
    id               INTEGER NOT NULL PRIMARY KEY,
    name             TEXT    NOT NULL,
    foundation_date  TEXT    NOT NULL,   -- YYYY-MM-DD
    city_id          INTEGER NOT NULL REFERENCES city(id) ON DELETE CASCADE
);

-- Exhibit category lookup.
CREATE TABLE IF NOT EXISTS type (
    id    INTEGER NOT NULL PRIMARY KEY,
    name  TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS exhibit (
    id            INTEGER NOT NULL PRIMARY KEY,
    release_date  TEXT    NOT NULL,      -- YYYY-MM-DD
    title         TEXT    NOT NULL,
    type_id       INTEGER NOT NULL REFERENCES type(id) ON DELETE CASCADE,
    museum_id     INTEGER NOT NULL REFERENCES museum(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS person (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        TEXT    NOT NULL,
    birth_date  TEXT    NOT NULL         -- YYYY-MM-DD
);

-- Optional 1:1 extension of person; shares the person's id.
CREATE TABLE IF NOT EXISTS death (
    id     INTEGER NOT NULL PRIMARY KEY REFERENCES person(id) ON DELETE CASCADE,
    death  TEXT    NOT NULL              -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS person_to_exhibit (
    person_id   INTEGER NOT NULL REFERENCES person(id)  ON DELETE CASCADE,
    exhibit_id  INTEGER NOT NULL REFERENCES exhibit(id) ON DELETE CASCADE,
    UNIQUE (person_id, exhibit_id)
);

CREATE TABLE IF NOT EXISTS country_to_person (
    country_id  INTEGER NOT NULL REFERENCES country(id) ON DELETE CASCADE,
    person_id   INTEGER NOT NULL REFERENCES person(id)  ON DELETE CASCADE,
    UNIQUE (country_id, person_id)
);

CREATE INDEX IF NOT EXISTS country_to_person_country_id_idx ON country_to_person(country_id);
CREATE INDEX IF NOT EXISTS country_to_person_person_id_idx  ON country_to_person(person_id);
CREATE INDEX IF NOT EXISTS person_to_exhibit_person_id_idx  ON person_to_exhibit(person_id);
CREATE INDEX IF NOT EXISTS person_to_exhibit_exhibit_id_idx ON person_to_exhibit(exhibit_id);
CREATE INDEX IF NOT EXISTS museum_city_id_idx               ON museum(city_id);
CREATE INDEX IF NOT EXISTS city_country_id_idx              ON city(country_id);
CREATE INDEX IF NOT EXISTS exhibit_museum_id_idx            ON exhibit(museum_id);
CREATE INDEX IF NOT EXISTS exhibit_type_id_idx              ON exhibit(type_id);

PRAGMA user_version = 1;
";
