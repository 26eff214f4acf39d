//! One-shot rest countdown between sets.

use std::time::Duration;

use fettle_core::{store::LogStore, workout::ScheduleStatus};

/// Count down `seconds` of rest, reporting each remaining second through
/// `on_tick`, then mark the schedule entry completed.
///
/// Cancellation is the caller's concern: dropping the future before it
/// resolves leaves the entry untouched.
pub async fn run<S, F>(
  store: &S,
  schedule_id: i64,
  seconds: u64,
  mut on_tick: F,
) -> Result<(), S::Error>
where
  S: LogStore,
  F: FnMut(u64),
{
  for remaining in (1..=seconds).rev() {
    on_tick(remaining);
    tokio::time::sleep(Duration::from_secs(1)).await;
  }
  store
    .update_schedule_status(schedule_id, ScheduleStatus::Completed)
    .await
}
