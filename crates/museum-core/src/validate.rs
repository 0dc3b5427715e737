//! Date parsing and the two form-level checks applied before any insert.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Error, Result};

/// Parse an ISO-8601 calendar date (`2001-02-03`).
///
/// A full `2001-02-03T04:05[:06]` timestamp is also accepted and truncated to
/// its date, as submitted by HTML `datetime-local` inputs.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(d);
  }
  ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .map(|dt| dt.date())
    .ok_or_else(|| Error::InvalidDate(s.to_owned()))
}

/// Reject dates strictly after `today`.
pub fn not_in_future(date: NaiveDate, today: NaiveDate) -> Result<()> {
  if date > today {
    return Err(Error::FutureDate(date));
  }
  Ok(())
}

/// A death date must fall strictly after the birth date.
pub fn birth_precedes_death(birth: NaiveDate, death: NaiveDate) -> Result<()> {
  if birth >= death {
    return Err(Error::DeathBeforeBirth { birth, death });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn parses_plain_date() {
    assert_eq!(parse_date("2000-01-01").unwrap(), d(2000, 1, 1));
    assert_eq!(parse_date(" 1999-12-31 ").unwrap(), d(1999, 12, 31));
  }

  #[test]
  fn parses_timestamp_as_its_date() {
    assert_eq!(parse_date("2000-01-01T10:30").unwrap(), d(2000, 1, 1));
    assert_eq!(parse_date("2000-01-01T10:30:15").unwrap(), d(2000, 1, 1));
  }

  #[test]
  fn rejects_garbage() {
    assert!(matches!(parse_date("yesterday"), Err(Error::InvalidDate(_))));
    assert!(matches!(parse_date("2000-13-01"), Err(Error::InvalidDate(_))));
    assert!(matches!(parse_date(""), Err(Error::InvalidDate(_))));
  }

  #[test]
  fn today_is_not_future() {
    let today = d(2024, 5, 1);
    assert!(not_in_future(today, today).is_ok());
    assert!(not_in_future(d(2024, 4, 30), today).is_ok());
    assert!(matches!(
      not_in_future(d(2024, 5, 2), today),
      Err(Error::FutureDate(_))
    ));
  }

  #[test]
  fn death_must_follow_birth() {
    assert!(birth_precedes_death(d(1900, 1, 1), d(1950, 1, 1)).is_ok());
    assert!(birth_precedes_death(d(1900, 1, 1), d(1900, 1, 1)).is_err());
    assert!(birth_precedes_death(d(1950, 1, 1), d(1900, 1, 1)).is_err());
  }
}
