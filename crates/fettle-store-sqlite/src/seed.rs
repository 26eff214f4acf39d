//! First-run reference data.
//!
//! A missing client row marks a fresh store. Bootstrap then copies the
//! bundled reference images into the data directory, creates the default
//! profile, and fills the catalog tables with sample content. Nothing here
//! is fatal: a failed copy or insert is logged and skipped.

use std::path::Path;

use chrono::{Days, Months};

use fettle_core::{
  client::{Client, Gender},
  date::{LogDate, LogDateTime},
  exercise::{Difficulty, NewExercise},
  nutrition::{NewDish, NewFoodPhoto},
  store::LogStore as _,
  workout::{
    NewWorkout, NewWorkoutSchedule, NewWorkoutSet, ScheduleStatus,
    WorkoutStatus,
  },
};

use crate::{Result, SqliteStore};

/// Bundled images referenced by the sample catalog. The first is the sample
/// meal photo; the rest illustrate the dish catalog.
pub const ASSET_FILES: [&str; 6] = [
  "photo1.jpg",
  "image1.webp",
  "image2.webp",
  "image3.jpg",
  "image4.jpg",
  "image5.jpg",
];

/// Populate a fresh store. Returns `false` without touching anything when a
/// client row already exists.
pub async fn bootstrap(
  store: &SqliteStore,
  assets_dir: &Path,
  data_dir: &Path,
) -> Result<bool> {
  if store.get_client().await?.is_some() {
    return Ok(false);
  }
  tracing::info!("first run, seeding reference data");

  if let Err(err) = std::fs::create_dir_all(data_dir) {
    tracing::warn!(dir = %data_dir.display(), error = %err,
      "could not create data directory");
  }
  let photos: Vec<String> = ASSET_FILES
    .iter()
    .map(|name| copy_asset(assets_dir, data_dir, name))
    .collect();

  // The profile row is the first-run marker; everything past it is sample
  // content the app can live without.
  store.upsert_client(default_client()).await?;

  if let Err(err) = seed_samples(store, &photos).await {
    tracing::warn!(error = %err, "sample data seeding incomplete");
  }

  Ok(true)
}

/// Copy one bundled image into the data directory, skipping files already
/// there. Always returns the target path; the store treats it as an opaque
/// reference either way.
fn copy_asset(assets_dir: &Path, data_dir: &Path, name: &str) -> String {
  let target = data_dir.join(name);
  if !target.exists()
    && let Err(err) = std::fs::copy(assets_dir.join(name), &target)
  {
    tracing::warn!(asset = name, error = %err,
      "could not copy bundled asset");
  }
  target.to_string_lossy().into_owned()
}

fn default_client() -> Client {
  let today = LogDate::today();
  Client {
    id:                Client::ID,
    gender:            Some(Gender::Male),
    age:               Some(30),
    height_cm:         Some(180.0),
    current_weight_kg: Some(85.0),
    target_weight_kg:  Some(78.0),
    target_date:       today
      .date()
      .checked_add_months(Months::new(5))
      .map(LogDate::new),
    target_calories:   Some(2200),
    target_proteins_g: Some(150.0),
    target_fats_g:     Some(70.0),
    target_carbs_g:    Some(250.0),
    target_water_ml:   Some(2500.0),
  }
}

fn exercise_catalog() -> Vec<NewExercise> {
  let mut squat = NewExercise::new(
    "Barbell squat",
    "Compound lift for the legs and glutes",
  );
  squat.tips = Some("Back straight, knees behind the toes".into());
  squat.muscle_group = Some("legs".into());
  squat.difficulty = Difficulty::Intermediate;

  let mut bench =
    NewExercise::new("Bench press", "Pressing movement for the chest");
  bench.tips = Some("Shoulder blades pinned, full range of motion".into());
  bench.muscle_group = Some("chest".into());
  bench.difficulty = Difficulty::Intermediate;

  let mut pulldown =
    NewExercise::new("Lat pulldown", "For the broad muscles of the back");
  pulldown.tips = Some("Pull to the chest, squeeze the shoulder blades".into());
  pulldown.muscle_group = Some("back".into());
  pulldown.difficulty = Difficulty::Beginner;

  vec![squat, bench, pulldown]
}

fn dish_catalog(photo_paths: &[String]) -> Vec<NewDish> {
  let entries: [(&str, &str, i64, f64, f64, f64, f64); 5] = [
    (
      "Vegetable omelette",
      "Omelette with bell pepper, tomato and fresh herbs",
      350, 28.0, 22.0, 12.0, 100.0,
    ),
    (
      "Chicken breast with buckwheat",
      "Baked chicken breast over buckwheat porridge",
      420, 45.0, 8.0, 50.0, 120.0,
    ),
    (
      "Cottage cheese with banana",
      "Low-fat cottage cheese with banana and honey",
      280, 35.0, 2.0, 30.0, 80.0,
    ),
    (
      "Caesar salad",
      "Classic Caesar salad with chicken",
      320, 25.0, 18.0, 20.0, 150.0,
    ),
    (
      "Steamed salmon with broccoli",
      "Steamed salmon fillet with boiled broccoli",
      380, 35.0, 22.0, 15.0, 110.0,
    ),
  ];

  entries
    .into_iter()
    .enumerate()
    .map(|(i, (name, description, kcal, protein, fat, carbs, water))| {
      let mut dish = NewDish::new(name);
      dish.description = Some(description.to_owned());
      dish.photo_path = photo_paths.get(i).cloned();
      dish.calories = Some(kcal);
      dish.proteins_g = Some(protein);
      dish.fats_g = Some(fat);
      dish.carbs_g = Some(carbs);
      dish.water_ml = Some(water);
      dish
    })
    .collect()
}

fn completed_set(
  schedule_id: i64,
  set_number: i64,
  weight_kg: f64,
  rest_seconds: i64,
  completed_at: Option<LogDateTime>,
) -> NewWorkoutSet {
  let mut set = NewWorkoutSet::new(schedule_id, set_number);
  set.planned_reps = Some(10);
  set.planned_weight_kg = Some(weight_kg);
  set.actual_reps = Some(10);
  set.actual_weight_kg = Some(weight_kg);
  set.completed = true;
  set.rest_after_seconds = Some(rest_seconds);
  set.completed_at = completed_at;
  set
}

async fn seed_samples(store: &SqliteStore, photos: &[String]) -> Result<()> {
  let today = LogDate::today();
  let tomorrow = LogDate::new(today.date() + Days::new(1));

  let exercise_ids = store.insert_exercises(exercise_catalog()).await?;
  store.insert_dishes(dish_catalog(&photos[1..])).await?;

  // A finished session for today.
  let mut done = NewWorkout::new(today);
  done.status = WorkoutStatus::Completed;
  done.planned_start = Some("10:00".into());
  done.planned_end = Some("11:30".into());
  done.started_at = today.at(10, 5, 0);
  done.ended_at = today.at(11, 25, 0);
  done.rating = Some(8);
  done.notes = Some("First session".into());
  let done_id = store.insert_workout(done).await?;

  let mut squats = NewWorkoutSchedule::new(done_id, exercise_ids[0]);
  squats.planned_sets = Some(4);
  squats.exercise_seconds = Some(60);
  squats.rest_seconds = Some(90);
  squats.status = ScheduleStatus::Completed;
  squats.position = Some(1);
  let squats_id = store.insert_schedule(squats).await?;

  let mut bench = NewWorkoutSchedule::new(done_id, exercise_ids[1]);
  bench.planned_sets = Some(4);
  bench.exercise_seconds = Some(45);
  bench.rest_seconds = Some(120);
  bench.status = ScheduleStatus::Completed;
  bench.position = Some(2);
  let bench_id = store.insert_schedule(bench).await?;

  store
    .insert_set(completed_set(squats_id, 1, 60.0, 90, today.at(10, 10, 0)))
    .await?;
  store
    .insert_set(completed_set(squats_id, 2, 60.0, 90, today.at(10, 13, 0)))
    .await?;
  store
    .insert_set(completed_set(bench_id, 1, 50.0, 120, today.at(10, 23, 0)))
    .await?;

  // And an upcoming one for tomorrow.
  let mut planned = NewWorkout::new(tomorrow);
  planned.planned_start = Some("18:00".into());
  planned.planned_end = Some("19:30".into());
  planned.notes = Some("Planned".into());
  let planned_id = store.insert_workout(planned).await?;

  let mut pulldown = NewWorkoutSchedule::new(planned_id, exercise_ids[2]);
  pulldown.planned_sets = Some(3);
  pulldown.exercise_seconds = Some(50);
  pulldown.rest_seconds = Some(60);
  pulldown.position = Some(1);
  store.insert_schedule(pulldown).await?;

  // One logged meal for today.
  let mut meal = NewFoodPhoto::new(photos[0].clone(), LogDateTime::now());
  meal.name = Some("Breakfast".into());
  meal.calories = Some(350);
  meal.proteins_g = Some(25.0);
  meal.fats_g = Some(12.0);
  meal.carbs_g = Some(40.0);
  meal.water_ml = Some(150.0);
  meal.weight_g = Some(300.0);
  store.insert_food_photo(meal).await?;

  Ok(())
}
