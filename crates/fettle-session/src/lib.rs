//! The in-progress workout session driver.
//!
//! [`Session`] attaches to a workout row, applies the pure transitions from
//! [`fettle_core::session`], persists every move through the store, and runs
//! the one-second ticker that keeps `elapsed_seconds` durable while the
//! clock is running. Because each tick is written through, killing the
//! process and re-attaching resumes the clock from the last persisted value.

use std::{
  sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
  },
  time::Duration,
};

use tokio::{sync::mpsc, task::JoinHandle};

use fettle_core::{
  date::LogDateTime,
  session::{self, SessionEvent},
  store::LogStore,
  workout::WorkoutStatus,
};

pub mod error;
pub mod rest;

pub use error::{Error, Result};


// ─── Session ─────────────────────────────────────────────────────────────────

/// A live workout session bound to one workout row.
///
/// At most one ticker task runs per session; it is stopped cooperatively on
/// pause and finish, and aborted outright when the session is dropped, so a
/// leaked timer can never keep writing after the session has moved on.
#[derive(Debug)]
pub struct Session<S> {
  store:      S,
  workout_id: i64,
  status:     WorkoutStatus,
  /// Planned length of the session, seconds. The ticker stops by itself
  /// when the clock reaches it.
  planned:    u64,
  /// Shared with the ticker task; reads here always see the latest tick.
  elapsed:    Arc<AtomicI64>,
  ticker:     Option<Ticker>,
}

impl<S> Session<S>
where
  S: LogStore + Clone + 'static,
{
  /// Attach to a workout, re-hydrating status and elapsed seconds, so a
  /// relaunch resumes where the last persisted tick left off.
  pub async fn attach(store: S, workout_id: i64) -> Result<Self, S::Error> {
    let workout = store
      .get_workout(workout_id)
      .await
      .map_err(Error::Store)?
      .ok_or(Error::NotFound(workout_id))?;

    Ok(Self {
      workout_id,
      status: workout.status,
      planned: workout.planned_duration_seconds(),
      elapsed: Arc::new(AtomicI64::new(workout.elapsed_seconds)),
      store,
      ticker: None,
    })
  }

  pub fn workout_id(&self) -> i64 { self.workout_id }

  pub fn status(&self) -> WorkoutStatus { self.status }

  pub fn planned_seconds(&self) -> u64 { self.planned }

  /// Seconds the clock has accumulated, as of the latest tick.
  pub fn elapsed_seconds(&self) -> i64 {
    self.elapsed.load(Ordering::SeqCst)
  }

  pub fn remaining_seconds(&self) -> u64 {
    self
      .planned
      .saturating_sub(self.elapsed_seconds().max(0) as u64)
  }

  /// Apply one session event: validate the transition, persist the result,
  /// and start or stop the ticker as the new state demands.
  ///
  /// Starting stamps the actual start time (first start only); finishing
  /// stamps the actual end time. Both finish and skip are one-way — once
  /// the workout is terminal every further event is an invalid transition.
  pub async fn apply(
    &mut self,
    event: SessionEvent,
  ) -> Result<WorkoutStatus, S::Error> {
    let next = session::apply(self.status, event)?;

    match event {
      SessionEvent::Start => self.stamp_started().await?,
      SessionEvent::Pause | SessionEvent::Skip => {
        self.stop_ticker().await;
        self.persist_elapsed().await?;
      }
      SessionEvent::Finish => {
        self.stop_ticker().await;
        self.persist_elapsed().await?;
        self.stamp_ended().await?;
      }
      SessionEvent::Resume => {}
    }

    self
      .store
      .update_workout_status(self.workout_id, next)
      .await
      .map_err(Error::Store)?;
    self.status = next;
    tracing::debug!(workout_id = self.workout_id, status = next.as_str(),
      "session transition");

    if next == WorkoutStatus::InGym {
      self.start_ticker();
    }
    Ok(next)
  }

  fn start_ticker(&mut self) {
    if self.ticker.is_some() {
      return;
    }
    self.ticker = Some(Ticker::spawn(
      self.store.clone(),
      self.workout_id,
      Arc::clone(&self.elapsed),
      self.planned,
    ));
  }

  async fn stop_ticker(&mut self) {
    if let Some(ticker) = self.ticker.take() {
      ticker.stop().await;
    }
  }

  async fn persist_elapsed(&self) -> Result<(), S::Error> {
    self
      .store
      .update_workout_elapsed(self.workout_id, self.elapsed_seconds())
      .await
      .map_err(Error::Store)
  }

  async fn stamp_started(&self) -> Result<(), S::Error> {
    let mut workout = self
      .store
      .get_workout(self.workout_id)
      .await
      .map_err(Error::Store)?
      .ok_or(Error::NotFound(self.workout_id))?;

    // Only the first start counts; a restart after relaunch keeps it.
    if workout.started_at.is_none() {
      workout.started_at = Some(LogDateTime::now());
      self
        .store
        .update_workout(workout)
        .await
        .map_err(Error::Store)?;
    }
    Ok(())
  }

  async fn stamp_ended(&self) -> Result<(), S::Error> {
    let mut workout = self
      .store
      .get_workout(self.workout_id)
      .await
      .map_err(Error::Store)?
      .ok_or(Error::NotFound(self.workout_id))?;

    workout.ended_at = Some(LogDateTime::now());
    workout.elapsed_seconds = self.elapsed_seconds();
    self
      .store
      .update_workout(workout)
      .await
      .map_err(Error::Store)
  }
}

// ─── Ticker ──────────────────────────────────────────────────────────────────

/// Handle to the background task that advances and persists the session
/// clock once per second.
#[derive(Debug)]
struct Ticker {
  handle:   JoinHandle<()>,
  shutdown: mpsc::Sender<()>,
}

impl Ticker {
  fn spawn<S>(
    store: S,
    workout_id: i64,
    elapsed: Arc<AtomicI64>,
    planned: u64,
  ) -> Self
  where
    S: LogStore + 'static,
  {
    let (shutdown, mut shutdown_rx) = mpsc::channel::<()>(1);
    let handle = tokio::spawn(async move {
      let mut interval = tokio::time::interval(Duration::from_secs(1));
      // The first tick of an interval fires immediately; consume it so the
      // clock only advances on whole elapsed seconds.
      interval.tick().await;
      loop {
        tokio::select! {
          _ = shutdown_rx.recv() => break,
          _ = interval.tick() => {
            let seconds = elapsed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Err(err) =
              store.update_workout_elapsed(workout_id, seconds).await
            {
              tracing::warn!(workout_id, error = %err,
                "failed to persist session clock");
            }
            if planned > 0 && seconds as u64 >= planned {
              tracing::info!(workout_id, "planned session time reached");
              break;
            }
          }
        }
      }
    });
    Self { handle, shutdown }
  }

  /// Cooperative stop: the current tick (and its write) completes first.
  async fn stop(mut self) {
    let _ = self.shutdown.send(()).await;
    let _ = (&mut self.handle).await;
  }
}

impl Drop for Ticker {
  fn drop(&mut self) {
    self.handle.abort();
  }
}
