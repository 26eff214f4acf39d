//! Error type for `fettle-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] fettle_core::Error),

  /// A delete blocked by a RESTRICT constraint, or an insert whose foreign
  /// key points at no row. Surfaced separately from [`Error::Database`] so
  /// callers can report it as such instead of a generic failure.
  #[error("referential integrity violation: {0}")]
  ReferentialIntegrity(String),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    // SQLITE_CONSTRAINT_FOREIGNKEY covers both failure directions: a
    // RESTRICT parent delete and a dangling child insert.
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      code,
      ref message,
    )) = err
      && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    {
      return Self::ReferentialIntegrity(
        message
          .clone()
          .unwrap_or_else(|| "foreign key constraint failed".to_owned()),
      );
    }
    Self::Database(err)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
