//! Error types for `fettle-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  #[error("invalid datetime: {0:?}")]
  InvalidDateTime(String),

  #[error("cannot {event} a workout that is {status}")]
  InvalidTransition {
    status: &'static str,
    event:  &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
