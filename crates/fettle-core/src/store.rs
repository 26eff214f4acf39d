//! The `LogStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `fettle-store-sqlite`). Higher layers (`fettle-session`, `fettle-cli`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  client::Client,
  date::LogDate,
  exercise::{Exercise, NewExercise},
  nutrition::{Dish, FoodPhoto, NewDish, NewFoodPhoto},
  workout::{
    NewWorkout, NewWorkoutSchedule, NewWorkoutSet, ScheduleStatus, Workout,
    WorkoutSchedule, WorkoutSet, WorkoutStatus,
  },
};

/// Abstraction over the nutrition and fitness log backend.
///
/// Every operation is a complete unit: no streaming, no partial results.
/// Implementations run the work off the caller's thread; all methods return
/// `Send` futures so the trait is usable from a multi-threaded runtime.
///
/// Point lookups return `Ok(None)` when nothing matches; deletes of absent
/// rows are no-ops. A delete blocked by a referential constraint (or an
/// insert with a dangling foreign key) must surface as the backend's
/// distinct referential-integrity error, never as a generic failure.
pub trait LogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Client ────────────────────────────────────────────────────────────

  /// Fetch the singleton profile. `None` until one is stored; callers fall
  /// back to [`Client::default_profile`].
  fn get_client(
    &self,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// Insert or replace the singleton profile. The stored id is always
  /// [`Client::ID`] regardless of what the value carries; repeating the
  /// call with the same profile is a no-op.
  fn upsert_client(
    &self,
    client: Client,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Update the existing profile in place.
  fn update_client(
    &self,
    client: Client,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_client(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Exercises ─────────────────────────────────────────────────────────

  /// All catalog exercises, ordered by name.
  fn list_exercises(
    &self,
  ) -> impl Future<Output = Result<Vec<Exercise>, Self::Error>> + Send + '_;

  fn get_exercise(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Exercise>, Self::Error>> + Send + '_;

  /// Insert one exercise and return its id.
  fn insert_exercise(
    &self,
    exercise: NewExercise,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Insert a batch of exercises and return their ids, in input order.
  fn insert_exercises(
    &self,
    exercises: Vec<NewExercise>,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + '_;

  fn update_exercise(
    &self,
    exercise: Exercise,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete an exercise. Fails with the referential-integrity error while
  /// any schedule entry still references it.
  fn delete_exercise(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Dishes ────────────────────────────────────────────────────────────

  /// All catalog dishes, ordered by name.
  fn list_dishes(
    &self,
  ) -> impl Future<Output = Result<Vec<Dish>, Self::Error>> + Send + '_;

  /// Case-insensitive substring search on dish name, in the same order as
  /// [`LogStore::list_dishes`]. An empty query behaves exactly like
  /// listing all dishes; a query matching nothing returns an empty Vec.
  /// SQL wildcards in the query match themselves, not anything.
  fn search_dishes<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Dish>, Self::Error>> + Send + 'a;

  /// Insert one dish and return its id.
  fn insert_dish(
    &self,
    dish: NewDish,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Insert a batch of dishes, silently skipping any whose name is already
  /// taken.
  fn insert_dishes(
    &self,
    dishes: Vec<NewDish>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn update_dish(
    &self,
    dish: Dish,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_dish(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Food photos ───────────────────────────────────────────────────────

  /// Meal records whose taken-at timestamp falls on `day`, newest first.
  fn food_photos_for_day(
    &self,
    day: LogDate,
  ) -> impl Future<Output = Result<Vec<FoodPhoto>, Self::Error>> + Send + '_;

  /// Every meal record, newest first.
  fn list_food_photos(
    &self,
  ) -> impl Future<Output = Result<Vec<FoodPhoto>, Self::Error>> + Send + '_;

  /// Insert one meal record and return its id.
  fn insert_food_photo(
    &self,
    photo: NewFoodPhoto,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_food_photo(
    &self,
    photo: FoodPhoto,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_food_photo(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Workouts ──────────────────────────────────────────────────────────

  /// All workouts, most recent date first.
  fn list_workouts(
    &self,
  ) -> impl Future<Output = Result<Vec<Workout>, Self::Error>> + Send + '_;

  /// The workout on exactly `date`, if one exists.
  fn workout_by_date(
    &self,
    date: LogDate,
  ) -> impl Future<Output = Result<Option<Workout>, Self::Error>> + Send + '_;

  fn get_workout(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Workout>, Self::Error>> + Send + '_;

  /// Insert one workout and return its id. The elapsed clock starts at
  /// zero.
  fn insert_workout(
    &self,
    workout: NewWorkout,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_workout(
    &self,
    workout: Workout,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Move a workout to `status` without touching anything else.
  fn update_workout_status(
    &self,
    id: i64,
    status: WorkoutStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist the session clock. Called on every tick, so it must stay a
  /// single cheap write.
  fn update_workout_elapsed(
    &self,
    id: i64,
    elapsed_seconds: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a workout. Its schedule entries, and their sets, go with it.
  fn delete_workout(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Schedule ──────────────────────────────────────────────────────────

  /// The exercise slots of one workout, in position order.
  fn schedule_for_workout(
    &self,
    workout_id: i64,
  ) -> impl Future<Output = Result<Vec<WorkoutSchedule>, Self::Error>> + Send + '_;

  /// Insert one schedule entry and return its id. Fails with the
  /// referential-integrity error if the workout or exercise id dangles.
  fn insert_schedule(
    &self,
    entry: NewWorkoutSchedule,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_schedule(
    &self,
    entry: WorkoutSchedule,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Move a schedule entry to `status` without touching anything else.
  fn update_schedule_status(
    &self,
    id: i64,
    status: ScheduleStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a schedule entry. Its sets go with it.
  fn delete_schedule(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Sets ──────────────────────────────────────────────────────────────

  /// The sets recorded under one schedule entry, in set-number order.
  fn sets_for_schedule(
    &self,
    schedule_id: i64,
  ) -> impl Future<Output = Result<Vec<WorkoutSet>, Self::Error>> + Send + '_;

  /// Insert one set record and return its id.
  fn insert_set(
    &self,
    set: NewWorkoutSet,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_set(
    &self,
    set: WorkoutSet,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_set(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
