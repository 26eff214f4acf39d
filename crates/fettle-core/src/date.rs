//! Calendar types with a fixed, lexically sortable text form.
//!
//! Dates are stored as `YYYY-MM-DD` and datetimes as `YYYY-MM-DD HH:MM:SS`,
//! always zero-padded, so plain string comparison in the database agrees
//! with calendar order. The newtypes guarantee the format on the way in and
//! out; malformed text is rejected at the edge and never reaches a query.

use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound as _};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Accepted on input only. Older exports wrote ISO `T` separators and
// sometimes minute precision or fractional seconds.
const DATETIME_READ_FORMATS: [&str; 4] = [
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
  "%Y-%m-%dT%H:%M",
];

// ─── LogDate ─────────────────────────────────────────────────────────────────

/// A calendar date as it appears in the log: `YYYY-MM-DD`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct LogDate(NaiveDate);

impl LogDate {
  pub fn new(date: NaiveDate) -> Self { Self(date) }

  /// Today in the local timezone.
  pub fn today() -> Self { Self(Local::now().date_naive()) }

  pub fn date(&self) -> NaiveDate { self.0 }

  /// The moment `hour:min:sec` on this date, if the time of day is valid.
  pub fn at(&self, hour: u32, min: u32, sec: u32) -> Option<LogDateTime> {
    self.0.and_hms_opt(hour, min, sec).map(LogDateTime)
  }
}

impl fmt::Display for LogDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(DATE_FORMAT))
  }
}

impl FromStr for LogDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
      .map(Self)
      .map_err(|_| Error::InvalidDate(s.to_owned()))
  }
}

impl From<NaiveDate> for LogDate {
  fn from(date: NaiveDate) -> Self { Self(date) }
}

// ─── LogDateTime ─────────────────────────────────────────────────────────────

/// A date with a time of day: `YYYY-MM-DD HH:MM:SS`.
///
/// Always whole-second. Parsing tolerates the `T` separator, fractional
/// seconds and minute precision; display is canonical.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct LogDateTime(NaiveDateTime);

impl LogDateTime {
  pub fn new(dt: NaiveDateTime) -> Self { Self(dt.trunc_subsecs(0)) }

  /// The current moment in the local timezone.
  pub fn now() -> Self { Self(Local::now().naive_local().trunc_subsecs(0)) }

  /// The date portion, which decides which day bucket a record lands in.
  pub fn date(&self) -> LogDate { LogDate(self.0.date()) }

  pub fn datetime(&self) -> NaiveDateTime { self.0 }
}

impl fmt::Display for LogDateTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(DATETIME_FORMAT))
  }
}

impl FromStr for LogDateTime {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    for format in DATETIME_READ_FORMATS {
      if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
        return Ok(Self(dt.trunc_subsecs(0)));
      }
    }
    Err(Error::InvalidDateTime(s.to_owned()))
  }
}

impl From<NaiveDateTime> for LogDateTime {
  fn from(dt: NaiveDateTime) -> Self { Self::new(dt) }
}
