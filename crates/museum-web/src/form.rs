//! Create-form decoding and validation.
//!
//! Bodies arrive as `application/x-www-form-urlencoded` pairs. Multi-select
//! fields repeat their key (`countries=1&countries=3`), so the raw pairs are
//! kept instead of deserialising straight into a struct. A missing or foreign
//! content type, and values that are not UTF-8, are bad requests.

use axum::{
  body::Bytes,
  extract::{FromRequest, Request},
  http::header,
};
use chrono::NaiveDate;
use museum_core::{
  model::{NewExhibit, NewMuseum, NewPerson},
  validate::{birth_precedes_death, not_in_future, parse_date},
};

use crate::error::Error;

/// Decoded form pairs in submission order.
#[derive(Debug)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
  pub fn new(pairs: Vec<(String, String)>) -> Self { Self(pairs) }

  /// Decode an `application/x-www-form-urlencoded` body.
  pub fn decode(body: &[u8]) -> Result<Self, Error> {
    body
      .split(|&b| b == b'&')
      .filter(|pair| !pair.is_empty())
      .map(|pair| {
        let (key, value) = match pair.iter().position(|&b| b == b'=') {
          Some(at) => (&pair[..at], &pair[at + 1..]),
          None => (pair, &[][..]),
        };
        Ok((decode_component(key)?, decode_component(value)?))
      })
      .collect::<Result<Vec<_>, Error>>()
      .map(Self)
  }

  /// First non-blank value for `key`.
  fn optional(&self, key: &str) -> Option<&str> {
    self
      .0
      .iter()
      .filter(|(k, _)| k == key)
      .map(|(_, v)| v.trim())
      .find(|v| !v.is_empty())
  }

  fn required(&self, key: &str) -> Result<&str, Error> {
    self
      .optional(key)
      .ok_or_else(|| Error::BadRequest(format!("missing field {key:?}")))
  }

  fn required_id(&self, key: &str) -> Result<i64, Error> {
    parse_id(key, self.required(key)?)
  }

  fn required_date(&self, key: &str) -> Result<NaiveDate, Error> {
    Ok(parse_date(self.required(key)?)?)
  }

  fn optional_date(&self, key: &str) -> Result<Option<NaiveDate>, Error> {
    Ok(self.optional(key).map(parse_date).transpose()?)
  }

  /// Every non-blank value for a repeated `key`, parsed as ids.
  fn ids(&self, key: &str) -> Result<Vec<i64>, Error> {
    self
      .0
      .iter()
      .filter(|(k, v)| k == key && !v.trim().is_empty())
      .map(|(_, v)| parse_id(key, v.trim()))
      .collect()
  }
}

impl<S> FromRequest<S> for FormFields
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_form = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
      return Err(Error::BadRequest(
        "expected an application/x-www-form-urlencoded body".to_string(),
      ));
    }

    let body = Bytes::from_request(req, state)
      .await
      .map_err(|_| Error::BadRequest("unreadable request body".to_string()))?;
    Self::decode(&body)
  }
}

/// `+` is a space; every other byte is percent-decoded.
fn decode_component(raw: &[u8]) -> Result<String, Error> {
  let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
  percent_encoding::percent_decode(&spaced)
    .decode_utf8()
    .map(|s| s.into_owned())
    .map_err(|_| Error::BadRequest("form field is not valid UTF-8".to_string()))
}

fn parse_id(key: &str, s: &str) -> Result<i64, Error> {
  s.parse()
    .map_err(|_| Error::BadRequest(format!("field {key:?} is not an id: {s:?}")))
}

// ─── Per-entity forms ────────────────────────────────────────────────────────

/// `name`, `foundation_date`, `city_id`. The foundation date may not be after
/// `today`.
pub fn museum(fields: &FormFields, today: NaiveDate) -> Result<NewMuseum, Error> {
  let foundation_date = fields.required_date("foundation_date")?;
  not_in_future(foundation_date, today)?;
  Ok(NewMuseum {
    name: fields.required("name")?.to_owned(),
    foundation_date,
    city_id: fields.required_id("city_id")?,
  })
}

/// `name`, `birth_date`, optional `death`, repeated `countries` and
/// `exhibits`. Birth may not be after `today` and must precede death.
pub fn person(fields: &FormFields, today: NaiveDate) -> Result<NewPerson, Error> {
  let birth_date = fields.required_date("birth_date")?;
  not_in_future(birth_date, today)?;
  let death = fields.optional_date("death")?;
  if let Some(death) = death {
    birth_precedes_death(birth_date, death)?;
  }
  Ok(NewPerson {
    name: fields.required("name")?.to_owned(),
    birth_date,
    death,
    countries: fields.ids("countries")?,
    exhibits: fields.ids("exhibits")?,
  })
}

/// `title`, `release_date`, `type_id`, `museum_id`, repeated `persons`.
pub fn exhibit(fields: &FormFields, today: NaiveDate) -> Result<NewExhibit, Error> {
  let release_date = fields.required_date("release_date")?;
  not_in_future(release_date, today)?;
  Ok(NewExhibit {
    title: fields.required("title")?.to_owned(),
    release_date,
    type_id: fields.required_id("type_id")?,
    museum_id: fields.required_id("museum_id")?,
    persons: fields.ids("persons")?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields(pairs: &[(&str, &str)]) -> FormFields {
    FormFields::new(
      pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    )
  }

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

  #[test]
  fn museum_parses() {
    let m = museum(
      &fields(&[("name", "M"), ("foundation_date", "2000-01-01"), ("city_id", "3")]),
      today(),
    )
    .unwrap();
    assert_eq!(m.name, "M");
    assert_eq!(m.city_id, 3);
  }

  #[test]
  fn museum_from_the_future_is_rejected() {
    let err = museum(
      &fields(&[("name", "M"), ("foundation_date", "2024-06-02"), ("city_id", "1")]),
      today(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));
  }

  #[test]
  fn missing_and_malformed_fields_are_bad_requests() {
    let err = museum(&fields(&[("foundation_date", "2000-01-01")]), today()).unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m.contains("name")));

    let err = museum(
      &fields(&[("name", "M"), ("foundation_date", "2000-01-01"), ("city_id", "x")]),
      today(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m.contains("city_id")));

    let err = museum(&fields(&[("name", "M"), ("foundation_date", "soon")]), today())
      .unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));
  }

  #[test]
  fn person_from_the_future_is_rejected() {
    let err = person(
      &fields(&[("name", "Ann"), ("birth_date", "2030-01-01")]),
      today(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m.contains("future")));
  }

  #[test]
  fn exhibit_from_the_future_is_rejected() {
    let err = exhibit(
      &fields(&[
        ("title", "Vase"),
        ("release_date", "2024-06-02"),
        ("type_id", "1"),
        ("museum_id", "1"),
      ]),
      today(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m.contains("future")));
  }

  #[test]
  fn person_collects_repeated_keys_and_blank_death() {
    let p = person(
      &fields(&[
        ("name", "Ann"),
        ("birth_date", "1900-01-01"),
        ("death", ""),
        ("countries", "1"),
        ("countries", "2"),
        ("exhibits", "5"),
      ]),
      today(),
    )
    .unwrap();
    assert_eq!(p.death, None);
    assert_eq!(p.countries, vec![1, 2]);
    assert_eq!(p.exhibits, vec![5]);
  }

  #[test]
  fn person_death_before_birth_is_rejected() {
    let err = person(
      &fields(&[("name", "Ann"), ("birth_date", "1900-01-01"), ("death", "1899-12-31")]),
      today(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));
  }

  #[test]
  fn exhibit_without_persons() {
    let e = exhibit(
      &fields(&[
        ("title", "Vase"),
        ("release_date", "1700-01-01"),
        ("type_id", "1"),
        ("museum_id", "2"),
      ]),
      today(),
    )
    .unwrap();
    assert!(e.persons.is_empty());
    assert_eq!(e.museum_id, 2);
  }

  // ── Body decoding ───────────────────────────────────────────────────────────

  #[test]
  fn decode_handles_escapes_and_repeated_keys() {
    let f = FormFields::decode(b"name=Mona+Lisa%21&persons=1&persons=2&flag").unwrap();
    assert_eq!(f.optional("name"), Some("Mona Lisa!"));
    assert_eq!(f.ids("persons").unwrap(), vec![1, 2]);
    assert_eq!(f.optional("flag"), None);
  }

  #[test]
  fn decode_keeps_multibyte_text() {
    let f = FormFields::decode(b"name=%C3%89rmitazh").unwrap();
    assert_eq!(f.optional("name"), Some("\u{c9}rmitazh"));
  }

  #[test]
  fn decode_rejects_invalid_utf8() {
    let err = FormFields::decode(b"name=%FF").unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m.contains("UTF-8")));
  }
}
