pub mod exhibits;
pub mod museums;
pub mod persons;

use chrono::{Local, NaiveDate};

/// The server's local calendar date, the reference point for "not in the
/// future".
pub(crate) fn today() -> NaiveDate { Local::now().date_naive() }

/// `GET /ping`
pub async fn ping() -> &'static str { "pong" }
