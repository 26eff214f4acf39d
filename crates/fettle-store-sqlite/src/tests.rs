//! Integration tests for `SqliteStore` against an in-memory database.

use fettle_core::{
  client::Client,
  date::LogDate,
  exercise::NewExercise,
  nutrition::{NewDish, NewFoodPhoto},
  store::LogStore,
  workout::{
    NewWorkout, NewWorkoutSchedule, NewWorkoutSet, ScheduleStatus,
    WorkoutStatus,
  },
};

use crate::{SqliteStore, seed};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn d(s: &str) -> LogDate {
  s.parse().expect("test date")
}

fn new_exercise(name: &str) -> NewExercise {
  NewExercise::new(name, "test movement")
}

fn photo_at(s: &str) -> NewFoodPhoto {
  NewFoodPhoto::new("meals/p.jpg", s.parse().expect("test datetime"))
}

fn schedule(
  workout_id: i64,
  exercise_id: i64,
  position: i64,
) -> NewWorkoutSchedule {
  let mut entry = NewWorkoutSchedule::new(workout_id, exercise_id);
  entry.position = Some(position);
  entry
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_client_missing_returns_none() {
  let s = store().await;
  assert!(s.get_client().await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_and_get_client() {
  let s = store().await;

  let mut profile = Client::default_profile();
  profile.age = Some(41);
  s.upsert_client(profile).await.unwrap();

  let fetched = s.get_client().await.unwrap().unwrap();
  assert_eq!(fetched.id, Client::ID);
  assert_eq!(fetched.age, Some(41));
}

#[tokio::test]
async fn upsert_client_replaces_the_singleton_row() {
  let s = store().await;

  let mut profile = Client::default_profile();
  // The stored id is pinned to 1 no matter what the value carries.
  profile.id = 99;
  profile.age = Some(25);
  s.upsert_client(profile.clone()).await.unwrap();

  profile.age = Some(26);
  s.upsert_client(profile).await.unwrap();

  let fetched = s.get_client().await.unwrap().unwrap();
  assert_eq!(fetched.id, Client::ID);
  assert_eq!(fetched.age, Some(26));
}

#[tokio::test]
async fn update_and_delete_client() {
  let s = store().await;
  s.upsert_client(Client::default_profile()).await.unwrap();

  let mut profile = s.get_client().await.unwrap().unwrap();
  profile.target_calories = Some(1900);
  s.update_client(profile).await.unwrap();
  assert_eq!(
    s.get_client().await.unwrap().unwrap().target_calories,
    Some(1900)
  );

  s.delete_client().await.unwrap();
  assert!(s.get_client().await.unwrap().is_none());
}

// ─── Exercises ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn exercises_are_ordered_by_name() {
  let s = store().await;
  s.insert_exercise(new_exercise("Squat")).await.unwrap();
  s.insert_exercise(new_exercise("Bench press")).await.unwrap();
  s.insert_exercise(new_exercise("Deadlift")).await.unwrap();

  let names: Vec<_> = s
    .list_exercises()
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.name)
    .collect();
  assert_eq!(names, ["Bench press", "Deadlift", "Squat"]);
}

#[tokio::test]
async fn get_exercise_by_id() {
  let s = store().await;
  let id = s.insert_exercise(new_exercise("Squat")).await.unwrap();

  let fetched = s.get_exercise(id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Squat");
  assert!(s.get_exercise(id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn insert_exercises_returns_ids_in_input_order() {
  let s = store().await;
  let ids = s
    .insert_exercises(vec![
      new_exercise("One"),
      new_exercise("Two"),
      new_exercise("Three"),
    ])
    .await
    .unwrap();

  assert_eq!(ids.len(), 3);
  assert_eq!(s.get_exercise(ids[0]).await.unwrap().unwrap().name, "One");
  assert_eq!(s.get_exercise(ids[2]).await.unwrap().unwrap().name, "Three");
}

#[tokio::test]
async fn deleting_a_referenced_exercise_is_rejected() {
  let s = store().await;
  let exercise_id = s.insert_exercise(new_exercise("Squat")).await.unwrap();
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();
  let schedule_id = s
    .insert_schedule(schedule(workout_id, exercise_id, 1))
    .await
    .unwrap();

  let err = s.delete_exercise(exercise_id).await.unwrap_err();
  assert!(matches!(err, crate::Error::ReferentialIntegrity(_)));

  // Removing the referencing entry first unblocks the delete.
  s.delete_schedule(schedule_id).await.unwrap();
  s.delete_exercise(exercise_id).await.unwrap();
  assert!(s.get_exercise(exercise_id).await.unwrap().is_none());
}

#[tokio::test]
async fn inserting_a_schedule_with_a_dangling_exercise_is_rejected() {
  let s = store().await;
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();

  let err = s
    .insert_schedule(schedule(workout_id, 999, 1))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ReferentialIntegrity(_)));
}

// ─── Dishes ──────────────────────────────────────────────────────────────────

async fn dish_fixture(s: &SqliteStore) {
  for name in ["Caesar salad", "Vegetable omelette", "Chicken soup"] {
    s.insert_dish(NewDish::new(name)).await.unwrap();
  }
}

#[tokio::test]
async fn dishes_are_ordered_by_name() {
  let s = store().await;
  dish_fixture(&s).await;

  let names: Vec<_> = s
    .list_dishes()
    .await
    .unwrap()
    .into_iter()
    .map(|dish| dish.name)
    .collect();
  assert_eq!(names, ["Caesar salad", "Chicken soup", "Vegetable omelette"]);
}

#[tokio::test]
async fn empty_search_equals_the_full_listing() {
  let s = store().await;
  dish_fixture(&s).await;

  let all: Vec<_> = s
    .list_dishes()
    .await
    .unwrap()
    .into_iter()
    .map(|dish| dish.name)
    .collect();
  let searched: Vec<_> = s
    .search_dishes("")
    .await
    .unwrap()
    .into_iter()
    .map(|dish| dish.name)
    .collect();
  assert_eq!(all, searched);
}

#[tokio::test]
async fn search_matches_case_insensitive_substrings() {
  let s = store().await;
  dish_fixture(&s).await;

  let names: Vec<_> = s
    .search_dishes("cHicK")
    .await
    .unwrap()
    .into_iter()
    .map(|dish| dish.name)
    .collect();
  assert_eq!(names, ["Chicken soup"]);
}

#[tokio::test]
async fn search_with_no_match_returns_empty() {
  let s = store().await;
  dish_fixture(&s).await;
  assert!(s.search_dishes("quinoa").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_treats_sql_wildcards_literally() {
  let s = store().await;
  s.insert_dish(NewDish::new("100% juice")).await.unwrap();
  s.insert_dish(NewDish::new("100x juice")).await.unwrap();

  let names: Vec<_> = s
    .search_dishes("100%")
    .await
    .unwrap()
    .into_iter()
    .map(|dish| dish.name)
    .collect();
  assert_eq!(names, ["100% juice"]);
}

#[tokio::test]
async fn batch_dish_insert_skips_taken_names() {
  let s = store().await;
  s.insert_dish(NewDish::new("Caesar salad")).await.unwrap();

  s.insert_dishes(vec![
    NewDish::new("Caesar salad"),
    NewDish::new("Chicken soup"),
  ])
  .await
  .unwrap();

  assert_eq!(s.list_dishes().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_and_delete_dish() {
  let s = store().await;
  let id = s.insert_dish(NewDish::new("Caesar salad")).await.unwrap();

  let mut dish = s.list_dishes().await.unwrap().remove(0);
  dish.calories = Some(320);
  s.update_dish(dish).await.unwrap();
  assert_eq!(s.list_dishes().await.unwrap()[0].calories, Some(320));

  s.delete_dish(id).await.unwrap();
  assert!(s.list_dishes().await.unwrap().is_empty());
}

// ─── Food photos ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn food_photos_bucket_by_calendar_day() {
  let s = store().await;
  let id = s
    .insert_food_photo(photo_at("2024-03-05 08:00:00"))
    .await
    .unwrap();

  let day = s.food_photos_for_day(d("2024-03-05")).await.unwrap();
  assert_eq!(day.len(), 1);
  assert_eq!(day[0].id, id);

  assert!(
    s.food_photos_for_day(d("2024-03-06"))
      .await
      .unwrap()
      .is_empty()
  );
}

#[tokio::test]
async fn food_photos_come_newest_first() {
  let s = store().await;
  s.insert_food_photo(photo_at("2024-03-05 08:00:00"))
    .await
    .unwrap();
  s.insert_food_photo(photo_at("2024-03-05 19:30:00"))
    .await
    .unwrap();
  s.insert_food_photo(photo_at("2024-03-04 12:00:00"))
    .await
    .unwrap();

  let day = s.food_photos_for_day(d("2024-03-05")).await.unwrap();
  assert_eq!(day.len(), 2);
  assert!(day[0].taken_at > day[1].taken_at);

  let all = s.list_food_photos().await.unwrap();
  assert_eq!(all.len(), 3);
  assert!(all.windows(2).all(|w| w[0].taken_at >= w[1].taken_at));
}

#[tokio::test]
async fn update_and_delete_food_photo() {
  let s = store().await;
  let id = s
    .insert_food_photo(photo_at("2024-03-05 08:00:00"))
    .await
    .unwrap();

  let mut photo = s.list_food_photos().await.unwrap().remove(0);
  photo.calories = Some(410);
  s.update_food_photo(photo).await.unwrap();
  assert_eq!(s.list_food_photos().await.unwrap()[0].calories, Some(410));

  s.delete_food_photo(id).await.unwrap();
  assert!(s.list_food_photos().await.unwrap().is_empty());
}

// ─── Workouts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn workouts_are_listed_most_recent_first() {
  let s = store().await;
  for date in ["2024-03-05", "2024-03-09", "2024-03-01"] {
    s.insert_workout(NewWorkout::new(d(date))).await.unwrap();
  }

  let dates: Vec<_> = s
    .list_workouts()
    .await
    .unwrap()
    .into_iter()
    .map(|w| w.date.to_string())
    .collect();
  assert_eq!(dates, ["2024-03-09", "2024-03-05", "2024-03-01"]);
}

#[tokio::test]
async fn workout_lookup_by_date_and_id() {
  let s = store().await;
  let id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();

  let by_date = s.workout_by_date(d("2024-03-05")).await.unwrap().unwrap();
  assert_eq!(by_date.id, id);
  assert!(s.workout_by_date(d("2024-03-06")).await.unwrap().is_none());

  let by_id = s.get_workout(id).await.unwrap().unwrap();
  assert_eq!(by_id.date, d("2024-03-05"));
  assert_eq!(by_id.elapsed_seconds, 0);
  assert!(s.get_workout(id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn status_and_elapsed_updates_touch_only_their_column() {
  let s = store().await;
  let mut new = NewWorkout::new(d("2024-03-05"));
  new.notes = Some("leg day".into());
  let id = s.insert_workout(new).await.unwrap();

  s.update_workout_status(id, WorkoutStatus::InGym)
    .await
    .unwrap();
  s.update_workout_elapsed(id, 125).await.unwrap();

  let workout = s.get_workout(id).await.unwrap().unwrap();
  assert_eq!(workout.status, WorkoutStatus::InGym);
  assert_eq!(workout.elapsed_seconds, 125);
  assert_eq!(workout.notes.as_deref(), Some("leg day"));
}

#[tokio::test]
async fn deleting_a_workout_cascades_to_schedule_and_sets() {
  let s = store().await;
  let exercise_id = s.insert_exercise(new_exercise("Squat")).await.unwrap();
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();
  let schedule_id = s
    .insert_schedule(schedule(workout_id, exercise_id, 1))
    .await
    .unwrap();
  s.insert_set(NewWorkoutSet::new(schedule_id, 1)).await.unwrap();
  s.insert_set(NewWorkoutSet::new(schedule_id, 2)).await.unwrap();

  s.delete_workout(workout_id).await.unwrap();

  assert!(s.get_workout(workout_id).await.unwrap().is_none());
  assert!(
    s.schedule_for_workout(workout_id).await.unwrap().is_empty()
  );
  assert!(s.sets_for_schedule(schedule_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_status_text_reads_as_upcoming() {
  // Needs a file-backed store so a second connection can corrupt the row.
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("fettle.db");

  let s = SqliteStore::open(&path).await.unwrap();
  let id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();

  let raw = rusqlite::Connection::open(&path).unwrap();
  raw
    .execute(
      "UPDATE workouts SET status = 'mystery' WHERE id = ?1",
      rusqlite::params![id],
    )
    .unwrap();

  let workout = s.get_workout(id).await.unwrap().unwrap();
  assert_eq!(workout.status, WorkoutStatus::InProgress);
}

// ─── Schedule and sets ───────────────────────────────────────────────────────

#[tokio::test]
async fn schedule_entries_come_in_position_order() {
  let s = store().await;
  let exercise_id = s.insert_exercise(new_exercise("Squat")).await.unwrap();
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();

  for position in [3, 1, 2] {
    s.insert_schedule(schedule(workout_id, exercise_id, position))
      .await
      .unwrap();
  }

  let positions: Vec<_> = s
    .schedule_for_workout(workout_id)
    .await
    .unwrap()
    .into_iter()
    .map(|entry| entry.position)
    .collect();
  assert_eq!(positions, [Some(1), Some(2), Some(3)]);
}

#[tokio::test]
async fn schedule_status_update_and_cascade_to_sets() {
  let s = store().await;
  let exercise_id = s.insert_exercise(new_exercise("Squat")).await.unwrap();
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();
  let schedule_id = s
    .insert_schedule(schedule(workout_id, exercise_id, 1))
    .await
    .unwrap();
  s.insert_set(NewWorkoutSet::new(schedule_id, 1)).await.unwrap();

  s.update_schedule_status(schedule_id, ScheduleStatus::Completed)
    .await
    .unwrap();
  let entries = s.schedule_for_workout(workout_id).await.unwrap();
  assert_eq!(entries[0].status, ScheduleStatus::Completed);

  s.delete_schedule(schedule_id).await.unwrap();
  assert!(s.sets_for_schedule(schedule_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn sets_come_in_set_number_order() {
  let s = store().await;
  let exercise_id = s.insert_exercise(new_exercise("Squat")).await.unwrap();
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();
  let schedule_id = s
    .insert_schedule(schedule(workout_id, exercise_id, 1))
    .await
    .unwrap();

  for number in [2, 3, 1] {
    s.insert_set(NewWorkoutSet::new(schedule_id, number))
      .await
      .unwrap();
  }

  let numbers: Vec<_> = s
    .sets_for_schedule(schedule_id)
    .await
    .unwrap()
    .into_iter()
    .map(|set| set.set_number)
    .collect();
  assert_eq!(numbers, [1, 2, 3]);
}

#[tokio::test]
async fn update_and_delete_set() {
  let s = store().await;
  let exercise_id = s.insert_exercise(new_exercise("Squat")).await.unwrap();
  let workout_id = s
    .insert_workout(NewWorkout::new(d("2024-03-05")))
    .await
    .unwrap();
  let schedule_id = s
    .insert_schedule(schedule(workout_id, exercise_id, 1))
    .await
    .unwrap();
  let id = s.insert_set(NewWorkoutSet::new(schedule_id, 1)).await.unwrap();

  let mut set = s.sets_for_schedule(schedule_id).await.unwrap().remove(0);
  set.actual_reps = Some(8);
  set.actual_weight_kg = Some(62.5);
  set.completed = true;
  s.update_set(set).await.unwrap();

  let set = s.sets_for_schedule(schedule_id).await.unwrap().remove(0);
  assert_eq!(set.actual_reps, Some(8));
  assert!(set.completed);

  s.delete_set(id).await.unwrap();
  assert!(s.sets_for_schedule(schedule_id).await.unwrap().is_empty());
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bootstrap_populates_a_fresh_store() {
  let s = store().await;
  let assets = tempfile::tempdir().unwrap();
  let data = tempfile::tempdir().unwrap();
  // Only one asset actually exists; the rest degrade to warnings.
  std::fs::write(assets.path().join("photo1.jpg"), b"jpeg").unwrap();

  let seeded = seed::bootstrap(&s, assets.path(), data.path())
    .await
    .unwrap();
  assert!(seeded);

  assert!(s.get_client().await.unwrap().is_some());
  assert_eq!(s.list_exercises().await.unwrap().len(), 3);
  assert_eq!(s.list_dishes().await.unwrap().len(), 5);
  assert_eq!(s.list_workouts().await.unwrap().len(), 2);
  assert!(data.path().join("photo1.jpg").exists());

  // Today's sample meal lands in today's bucket.
  let today = s.food_photos_for_day(LogDate::today()).await.unwrap();
  assert_eq!(today.len(), 1);
  assert_eq!(today[0].name.as_deref(), Some("Breakfast"));

  // The completed workout carries its schedule and sets.
  let done = s
    .workout_by_date(LogDate::today())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(done.status, WorkoutStatus::Completed);
  let entries = s.schedule_for_workout(done.id).await.unwrap();
  assert_eq!(entries.len(), 2);
  let sets = s.sets_for_schedule(entries[0].id).await.unwrap();
  assert_eq!(sets.len(), 2);
  assert!(sets.iter().all(|set| set.completed));
}

#[tokio::test]
async fn bootstrap_runs_only_once() {
  let s = store().await;
  let assets = tempfile::tempdir().unwrap();
  let data = tempfile::tempdir().unwrap();

  assert!(seed::bootstrap(&s, assets.path(), data.path()).await.unwrap());
  assert!(!seed::bootstrap(&s, assets.path(), data.path()).await.unwrap());
  assert_eq!(s.list_exercises().await.unwrap().len(), 3);
}
