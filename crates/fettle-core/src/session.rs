//! The workout session state machine.
//!
//! Pure transitions only. The driver crate applies them and persists the
//! result; keeping the legal moves here makes them testable without a store.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, workout::WorkoutStatus};

/// A user action on a live workout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionEvent {
  Start,
  Pause,
  Resume,
  Finish,
  Skip,
}

impl SessionEvent {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Start => "start",
      Self::Pause => "pause",
      Self::Resume => "resume",
      Self::Finish => "finish",
      Self::Skip => "skip",
    }
  }
}

/// The status a workout moves to when `event` fires while it is `status`.
///
/// Finishing is legal from any live state and is one-way. Skipping is only
/// legal before the session has started. Completed and skipped are terminal:
/// every event on them is an invalid transition.
pub fn apply(status: WorkoutStatus, event: SessionEvent) -> Result<WorkoutStatus> {
  use SessionEvent::*;
  use WorkoutStatus::*;

  match (status, event) {
    (InProgress, Start) => Ok(InGym),
    (InGym, Pause) => Ok(Paused),
    (Paused, Resume) => Ok(InGym),
    (InProgress | InGym | Paused, Finish) => Ok(Completed),
    (InProgress, Skip) => Ok(Skipped),
    _ => Err(Error::InvalidTransition {
      status: status.as_str(),
      event:  event.as_str(),
    }),
  }
}
