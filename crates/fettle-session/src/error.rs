//! Error type for `fettle-session`, generic over the backing store's error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error<E> {
  #[error("workout {0} not found")]
  NotFound(i64),

  /// An event fired against a state that does not accept it.
  #[error(transparent)]
  Transition(#[from] fettle_core::Error),

  #[error("store error: {0}")]
  Store(E),
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;
