//! Monday-anchored week navigation.
//!
//! Weeks start on Monday: a Sunday belongs to the week of the *preceding*
//! Monday. Membership uses the half-open range `[monday, monday + 7 days)`
//! evaluated on whole dates, so there is no time-of-day boundary to get
//! wrong.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::LogDate;

/// A calendar week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
  monday: NaiveDate,
}

impl Week {
  /// The week containing `date` — i.e. the Monday at or before it.
  pub fn containing(date: LogDate) -> Self {
    let date = date.date();
    let back = u64::from(date.weekday().num_days_from_monday());
    Self { monday: date - Days::new(back) }
  }

  /// The week containing today.
  pub fn current() -> Self { Self::containing(LogDate::today()) }

  /// The anchor Monday.
  pub fn start(&self) -> LogDate { LogDate::new(self.monday) }

  /// The Sunday that closes the week.
  pub fn end(&self) -> LogDate { LogDate::new(self.monday + Days::new(6)) }

  /// The following week. The anchor is already Monday-aligned, so this is a
  /// plain 7-day shift with no re-derivation.
  pub fn next(&self) -> Self {
    Self { monday: self.monday + Days::new(7) }
  }

  /// The preceding week.
  pub fn prev(&self) -> Self {
    Self { monday: self.monday - Days::new(7) }
  }

  /// All seven dates, Monday first.
  pub fn days(&self) -> [LogDate; 7] {
    std::array::from_fn(|i| LogDate::new(self.monday + Days::new(i as u64)))
  }

  /// Whether `date` falls inside this week.
  pub fn contains(&self, date: LogDate) -> bool {
    let d = date.date();
    d >= self.monday && d < self.monday + Days::new(7)
  }

  /// Position of `date` within the week (0 = Monday .. 6 = Sunday), used to
  /// pre-select today in a week strip. `None` when outside the week.
  pub fn day_index(&self, date: LogDate) -> Option<usize> {
    self
      .contains(date)
      .then(|| (date.date() - self.monday).num_days() as usize)
  }
}
