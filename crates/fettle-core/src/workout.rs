//! Workouts, their exercise schedule, and per-set records.

use serde::{Deserialize, Serialize};

use crate::date::{LogDate, LogDateTime};

/// Fallback session length when the planned times are unusable: 90 minutes.
pub const DEFAULT_SESSION_SECONDS: u64 = 5400;

// ─── Status vocabularies ─────────────────────────────────────────────────────

/// Lifecycle state of a workout.
///
/// Stored as plain text. Decoding is lenient: anything outside the
/// vocabulary reads as [`WorkoutStatus::InProgress`] (the upcoming state),
/// so one bad row never poisons a listing.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
  /// Scheduled but not yet started.
  #[default]
  InProgress,
  /// The user is at the gym with the clock running.
  InGym,
  Paused,
  Completed,
  Skipped,
}

impl WorkoutStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::InProgress => "in_progress",
      Self::InGym => "in_gym",
      Self::Paused => "paused",
      Self::Completed => "completed",
      Self::Skipped => "skipped",
    }
  }

  /// Strict decode; `None` for anything outside the vocabulary.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "in_progress" => Some(Self::InProgress),
      "in_gym" => Some(Self::InGym),
      "paused" => Some(Self::Paused),
      "completed" => Some(Self::Completed),
      "skipped" => Some(Self::Skipped),
      _ => None,
    }
  }

  /// Completed and skipped workouts accept no further session events.
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Skipped)
  }
}

/// Progress state of one schedule entry within a workout.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
  #[default]
  NotCompleted,
  InProgress,
  Completed,
}

impl ScheduleStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NotCompleted => "not_completed",
      Self::InProgress => "in_progress",
      Self::Completed => "completed",
    }
  }

  /// Strict decode; `None` for anything outside the vocabulary.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "not_completed" => Some(Self::NotCompleted),
      "in_progress" => Some(Self::InProgress),
      "completed" => Some(Self::Completed),
      _ => None,
    }
  }
}

// ─── Workout ─────────────────────────────────────────────────────────────────

/// A workout occupying one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
  pub id:              i64,
  pub date:            LogDate,
  pub status:          WorkoutStatus,
  /// Planned start of the session, `HH:MM`.
  pub planned_start:   Option<String>,
  /// Planned end of the session, `HH:MM`.
  pub planned_end:     Option<String>,
  pub started_at:      Option<LogDateTime>,
  pub ended_at:        Option<LogDateTime>,
  /// Post-workout self-rating, 1 to 10.
  pub rating:          Option<i64>,
  pub notes:           Option<String>,
  /// Seconds the session clock has accumulated so far. Persisted on every
  /// tick so a relaunch picks up where the last write left off.
  pub elapsed_seconds: i64,
  pub created_at:      Option<LogDateTime>,
}

impl Workout {
  /// Planned length of the session in seconds, from the planned start and
  /// end times. Negative spans clamp to zero; a missing or malformed time
  /// falls back to [`DEFAULT_SESSION_SECONDS`].
  pub fn planned_duration_seconds(&self) -> u64 {
    match (
      parse_hhmm(self.planned_start.as_deref()),
      parse_hhmm(self.planned_end.as_deref()),
    ) {
      (Some(start), Some(end)) => end.saturating_sub(start),
      _ => DEFAULT_SESSION_SECONDS,
    }
  }
}

fn parse_hhmm(s: Option<&str>) -> Option<u64> {
  let (h, m) = s?.split_once(':')?;
  let h: u64 = h.parse().ok()?;
  let m: u64 = m.parse().ok()?;
  Some(h * 3600 + m * 60)
}

/// Rough burn estimate shown while the clock runs: 5 kcal per full minute.
pub fn estimated_calories(elapsed_seconds: u64) -> u64 {
  elapsed_seconds / 60 * 5
}

/// A workout not yet persisted; the store assigns the id and starts the
/// elapsed clock at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
  pub date:          LogDate,
  pub status:        WorkoutStatus,
  pub planned_start: Option<String>,
  pub planned_end:   Option<String>,
  pub started_at:    Option<LogDateTime>,
  pub ended_at:      Option<LogDateTime>,
  pub rating:        Option<i64>,
  pub notes:         Option<String>,
  pub created_at:    Option<LogDateTime>,
}

impl NewWorkout {
  pub fn new(date: LogDate) -> Self {
    Self {
      date,
      status:        WorkoutStatus::default(),
      planned_start: None,
      planned_end:   None,
      started_at:    None,
      ended_at:      None,
      rating:        None,
      notes:         None,
      created_at:    None,
    }
  }
}

// ─── Schedule ────────────────────────────────────────────────────────────────

/// One exercise slot within a workout, ordered by `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSchedule {
  pub id:               i64,
  pub workout_id:       i64,
  pub exercise_id:      i64,
  pub planned_sets:     Option<i64>,
  /// Working time per set, seconds.
  pub exercise_seconds: Option<i64>,
  /// Rest between sets, seconds.
  pub rest_seconds:     Option<i64>,
  pub status:           ScheduleStatus,
  pub position:         Option<i64>,
}

/// A schedule entry not yet persisted; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutSchedule {
  pub workout_id:       i64,
  pub exercise_id:      i64,
  pub planned_sets:     Option<i64>,
  pub exercise_seconds: Option<i64>,
  pub rest_seconds:     Option<i64>,
  pub status:           ScheduleStatus,
  pub position:         Option<i64>,
}

impl NewWorkoutSchedule {
  pub fn new(workout_id: i64, exercise_id: i64) -> Self {
    Self {
      workout_id,
      exercise_id,
      planned_sets:     None,
      exercise_seconds: None,
      rest_seconds:     None,
      status:           ScheduleStatus::default(),
      position:         None,
    }
  }
}

// ─── Sets ────────────────────────────────────────────────────────────────────

/// One set performed (or planned) under a schedule entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
  pub id:                 i64,
  pub schedule_id:        i64,
  pub set_number:         i64,
  pub planned_reps:       Option<i64>,
  pub planned_weight_kg:  Option<f64>,
  pub actual_reps:        Option<i64>,
  pub actual_weight_kg:   Option<f64>,
  pub completed:          bool,
  /// Rest taken after this set, seconds.
  pub rest_after_seconds: Option<i64>,
  pub completed_at:       Option<LogDateTime>,
}

/// A set record not yet persisted; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutSet {
  pub schedule_id:        i64,
  pub set_number:         i64,
  pub planned_reps:       Option<i64>,
  pub planned_weight_kg:  Option<f64>,
  pub actual_reps:        Option<i64>,
  pub actual_weight_kg:   Option<f64>,
  pub completed:          bool,
  pub rest_after_seconds: Option<i64>,
  pub completed_at:       Option<LogDateTime>,
}

impl NewWorkoutSet {
  pub fn new(schedule_id: i64, set_number: i64) -> Self {
    Self {
      schedule_id,
      set_number,
      planned_reps:       None,
      planned_weight_kg:  None,
      actual_reps:        None,
      actual_weight_kg:   None,
      completed:          false,
      rest_after_seconds: None,
      completed_at:       None,
    }
  }
}
