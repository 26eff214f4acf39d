//! [`SqliteStore`] — the SQLite implementation of [`LogStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, params};

use fettle_core::{
  client::Client,
  date::LogDate,
  exercise::{Exercise, NewExercise},
  nutrition::{Dish, FoodPhoto, NewDish, NewFoodPhoto},
  store::LogStore,
  workout::{
    NewWorkout, NewWorkoutSchedule, NewWorkoutSet, ScheduleStatus, Workout,
    WorkoutSchedule, WorkoutSet, WorkoutStatus,
  },
};

use crate::{
  Error, Result,
  encode::{
    RawClient, RawDish, RawExercise, RawFoodPhoto, RawSchedule, RawSet,
    RawWorkout,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Fettle log store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and every
/// query runs on its dedicated background thread.
#[derive(Clone, Debug)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row readers ─────────────────────────────────────────────────────────────

fn read_client(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawClient> {
  Ok(RawClient {
    id:                row.get(0)?,
    gender:            row.get(1)?,
    age:               row.get(2)?,
    height_cm:         row.get(3)?,
    current_weight_kg: row.get(4)?,
    target_weight_kg:  row.get(5)?,
    target_date:       row.get(6)?,
    target_calories:   row.get(7)?,
    target_proteins_g: row.get(8)?,
    target_fats_g:     row.get(9)?,
    target_carbs_g:    row.get(10)?,
    target_water_ml:   row.get(11)?,
  })
}

fn read_exercise(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawExercise> {
  Ok(RawExercise {
    id:           row.get(0)?,
    name:         row.get(1)?,
    description:  row.get(2)?,
    image_path:   row.get(3)?,
    video_path:   row.get(4)?,
    tips:         row.get(5)?,
    muscle_group: row.get(6)?,
    difficulty:   row.get(7)?,
    created_at:   row.get(8)?,
  })
}

fn read_dish(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDish> {
  Ok(RawDish {
    id:          row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    photo_path:  row.get(3)?,
    calories:    row.get(4)?,
    proteins_g:  row.get(5)?,
    fats_g:      row.get(6)?,
    carbs_g:     row.get(7)?,
    water_ml:    row.get(8)?,
    created_at:  row.get(9)?,
  })
}

fn read_photo(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFoodPhoto> {
  Ok(RawFoodPhoto {
    id:             row.get(0)?,
    photo_path:     row.get(1)?,
    name:           row.get(2)?,
    calories:       row.get(3)?,
    proteins_g:     row.get(4)?,
    fats_g:         row.get(5)?,
    carbs_g:        row.get(6)?,
    water_ml:       row.get(7)?,
    weight_g:       row.get(8)?,
    taken_datetime: row.get(9)?,
    created_at:     row.get(10)?,
  })
}

fn read_workout(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawWorkout> {
  Ok(RawWorkout {
    id:                    row.get(0)?,
    workout_date:          row.get(1)?,
    status:                row.get(2)?,
    planned_start_time:    row.get(3)?,
    planned_end_time:      row.get(4)?,
    actual_start_datetime: row.get(5)?,
    actual_end_datetime:   row.get(6)?,
    rating:                row.get(7)?,
    notes:                 row.get(8)?,
    elapsed_seconds:       row.get(9)?,
    created_at:            row.get(10)?,
  })
}

fn read_schedule(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSchedule> {
  Ok(RawSchedule {
    id:                  row.get(0)?,
    workout_id:          row.get(1)?,
    exercise_id:         row.get(2)?,
    planned_sets:        row.get(3)?,
    exercise_duration_s: row.get(4)?,
    rest_duration_s:     row.get(5)?,
    status:              row.get(6)?,
    order_number:        row.get(7)?,
  })
}

fn read_set(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSet> {
  Ok(RawSet {
    id:                  row.get(0)?,
    workout_schedule_id: row.get(1)?,
    set_number:          row.get(2)?,
    planned_reps:        row.get(3)?,
    planned_weight_kg:   row.get(4)?,
    actual_reps:         row.get(5)?,
    actual_weight_kg:    row.get(6)?,
    set_completed:       row.get(7)?,
    rest_after_s:        row.get(8)?,
    completed_at:        row.get(9)?,
  })
}

const EXERCISE_COLS: &str = "id, name, description, image_path, video_path, \
                             tips, muscle_group, difficulty, created_at";
const DISH_COLS: &str = "id, name, description, photo_path, calories, \
                         proteins_g, fats_g, carbs_g, water_ml, created_at";
const PHOTO_COLS: &str = "id, photo_path, name, calories, proteins_g, fats_g, \
                          carbs_g, water_ml, weight_g, taken_datetime, \
                          created_at";
const WORKOUT_COLS: &str = "id, workout_date, status, planned_start_time, \
                            planned_end_time, actual_start_datetime, \
                            actual_end_datetime, rating, notes, \
                            elapsed_seconds, created_at";
const SCHEDULE_COLS: &str = "id, workout_id, exercise_id, planned_sets, \
                             exercise_duration_s, rest_duration_s, status, \
                             order_number";
const SET_COLS: &str = "id, workout_schedule_id, set_number, planned_reps, \
                        planned_weight_kg, actual_reps, actual_weight_kg, \
                        set_completed, rest_after_s, completed_at";

/// Escape `%`, `_` and the escape character itself, so a user's search text
/// matches literally under `LIKE ... ESCAPE '\'`.
fn escape_like(query: &str) -> String {
  let mut escaped = String::with_capacity(query.len());
  for c in query.chars() {
    if matches!(c, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

// ─── LogStore impl ───────────────────────────────────────────────────────────

impl LogStore for SqliteStore {
  type Error = Error;

  // ── Client ────────────────────────────────────────────────────────────────

  async fn get_client(&self) -> Result<Option<Client>> {
    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, gender, age, height_cm, current_weight_kg,
                      target_weight_kg, target_date, target_calories,
                      target_proteins_g, target_fats_g, target_carbs_g,
                      target_water_ml
               FROM client WHERE id = ?1",
              params![Client::ID],
              read_client,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClient::into_client).transpose()
  }

  async fn upsert_client(&self, client: Client) -> Result<()> {
    let gender = client.gender.map(|g| g.as_str());
    let target_date = client.target_date.map(|d| d.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO client (
             id, gender, age, height_cm, current_weight_kg, target_weight_kg,
             target_date, target_calories, target_proteins_g, target_fats_g,
             target_carbs_g, target_water_ml
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          params![
            Client::ID,
            gender,
            client.age,
            client.height_cm,
            client.current_weight_kg,
            client.target_weight_kg,
            target_date,
            client.target_calories,
            client.target_proteins_g,
            client.target_fats_g,
            client.target_carbs_g,
            client.target_water_ml,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_client(&self, client: Client) -> Result<()> {
    let gender = client.gender.map(|g| g.as_str());
    let target_date = client.target_date.map(|d| d.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE client SET
             gender = ?2, age = ?3, height_cm = ?4, current_weight_kg = ?5,
             target_weight_kg = ?6, target_date = ?7, target_calories = ?8,
             target_proteins_g = ?9, target_fats_g = ?10,
             target_carbs_g = ?11, target_water_ml = ?12
           WHERE id = ?1",
          params![
            Client::ID,
            gender,
            client.age,
            client.height_cm,
            client.current_weight_kg,
            client.target_weight_kg,
            target_date,
            client.target_calories,
            client.target_proteins_g,
            client.target_fats_g,
            client.target_carbs_g,
            client.target_water_ml,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_client(&self) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM client WHERE id = ?1", params![Client::ID])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Exercises ─────────────────────────────────────────────────────────────

  async fn list_exercises(&self) -> Result<Vec<Exercise>> {
    let raws: Vec<RawExercise> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EXERCISE_COLS} FROM exercises ORDER BY name"
        ))?;
        let rows = stmt
          .query_map([], read_exercise)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExercise::into_exercise).collect()
  }

  async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>> {
    let raw: Option<RawExercise> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {EXERCISE_COLS} FROM exercises WHERE id = ?1"),
              params![id],
              read_exercise,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawExercise::into_exercise).transpose()
  }

  async fn insert_exercise(&self, exercise: NewExercise) -> Result<i64> {
    let difficulty = exercise.difficulty.as_str();
    let created_at = exercise.created_at.map(|dt| dt.to_string());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO exercises (
             name, description, image_path, video_path, tips, muscle_group,
             difficulty, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          params![
            exercise.name,
            exercise.description,
            exercise.image_path,
            exercise.video_path,
            exercise.tips,
            exercise.muscle_group,
            difficulty,
            created_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn insert_exercises(
    &self,
    exercises: Vec<NewExercise>,
  ) -> Result<Vec<i64>> {
    let ids = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(exercises.len());
        for exercise in exercises {
          tx.execute(
            "INSERT INTO exercises (
               name, description, image_path, video_path, tips, muscle_group,
               difficulty, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
              exercise.name,
              exercise.description,
              exercise.image_path,
              exercise.video_path,
              exercise.tips,
              exercise.muscle_group,
              exercise.difficulty.as_str(),
              exercise.created_at.map(|dt| dt.to_string()),
            ],
          )?;
          ids.push(tx.last_insert_rowid());
        }
        tx.commit()?;
        Ok(ids)
      })
      .await?;
    Ok(ids)
  }

  async fn update_exercise(&self, exercise: Exercise) -> Result<()> {
    let difficulty = exercise.difficulty.as_str();
    let created_at = exercise.created_at.map(|dt| dt.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE exercises SET
             name = ?2, description = ?3, image_path = ?4, video_path = ?5,
             tips = ?6, muscle_group = ?7, difficulty = ?8, created_at = ?9
           WHERE id = ?1",
          params![
            exercise.id,
            exercise.name,
            exercise.description,
            exercise.image_path,
            exercise.video_path,
            exercise.tips,
            exercise.muscle_group,
            difficulty,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_exercise(&self, id: i64) -> Result<()> {
    // The RESTRICT constraint on workout_schedule.exercise_id turns this
    // into the referential-integrity error while references remain.
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM exercises WHERE id = ?1", params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Dishes ────────────────────────────────────────────────────────────────

  async fn list_dishes(&self) -> Result<Vec<Dish>> {
    let raws: Vec<RawDish> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {DISH_COLS} FROM dishes ORDER BY name"))?;
        let rows = stmt
          .query_map([], read_dish)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDish::into_dish).collect()
  }

  async fn search_dishes(&self, query: &str) -> Result<Vec<Dish>> {
    // An empty query yields the pattern "%%", which matches every name, so
    // clearing a live-search box falls back to the full listing.
    let pattern = format!("%{}%", escape_like(query));

    let raws: Vec<RawDish> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DISH_COLS} FROM dishes
           WHERE name LIKE ?1 ESCAPE '\\'
           ORDER BY name"
        ))?;
        let rows = stmt
          .query_map(params![pattern], read_dish)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDish::into_dish).collect()
  }

  async fn insert_dish(&self, dish: NewDish) -> Result<i64> {
    let created_at = dish.created_at.map(|dt| dt.to_string());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO dishes (
             name, description, photo_path, calories, proteins_g, fats_g,
             carbs_g, water_ml, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          params![
            dish.name,
            dish.description,
            dish.photo_path,
            dish.calories,
            dish.proteins_g,
            dish.fats_g,
            dish.carbs_g,
            dish.water_ml,
            created_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn insert_dishes(&self, dishes: Vec<NewDish>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for dish in dishes {
          tx.execute(
            "INSERT OR IGNORE INTO dishes (
               name, description, photo_path, calories, proteins_g, fats_g,
               carbs_g, water_ml, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
              dish.name,
              dish.description,
              dish.photo_path,
              dish.calories,
              dish.proteins_g,
              dish.fats_g,
              dish.carbs_g,
              dish.water_ml,
              dish.created_at.map(|dt| dt.to_string()),
            ],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_dish(&self, dish: Dish) -> Result<()> {
    let created_at = dish.created_at.map(|dt| dt.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE dishes SET
             name = ?2, description = ?3, photo_path = ?4, calories = ?5,
             proteins_g = ?6, fats_g = ?7, carbs_g = ?8, water_ml = ?9,
             created_at = ?10
           WHERE id = ?1",
          params![
            dish.id,
            dish.name,
            dish.description,
            dish.photo_path,
            dish.calories,
            dish.proteins_g,
            dish.fats_g,
            dish.carbs_g,
            dish.water_ml,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_dish(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM dishes WHERE id = ?1", params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Food photos ───────────────────────────────────────────────────────────

  async fn food_photos_for_day(&self, day: LogDate) -> Result<Vec<FoodPhoto>> {
    let day = day.to_string();

    let raws: Vec<RawFoodPhoto> = self
      .conn
      .call(move |conn| {
        // The date portion is the first ten characters of the stored
        // datetime; zero-padding makes this exact.
        let mut stmt = conn.prepare(&format!(
          "SELECT {PHOTO_COLS} FROM food_photos
           WHERE substr(taken_datetime, 1, 10) = ?1
           ORDER BY taken_datetime DESC"
        ))?;
        let rows = stmt
          .query_map(params![day], read_photo)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFoodPhoto::into_photo).collect()
  }

  async fn list_food_photos(&self) -> Result<Vec<FoodPhoto>> {
    let raws: Vec<RawFoodPhoto> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PHOTO_COLS} FROM food_photos ORDER BY taken_datetime DESC"
        ))?;
        let rows = stmt
          .query_map([], read_photo)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFoodPhoto::into_photo).collect()
  }

  async fn insert_food_photo(&self, photo: NewFoodPhoto) -> Result<i64> {
    let taken_at = photo.taken_at.to_string();
    let created_at = photo.created_at.map(|dt| dt.to_string());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO food_photos (
             photo_path, name, calories, proteins_g, fats_g, carbs_g,
             water_ml, weight_g, taken_datetime, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          params![
            photo.photo_path,
            photo.name,
            photo.calories,
            photo.proteins_g,
            photo.fats_g,
            photo.carbs_g,
            photo.water_ml,
            photo.weight_g,
            taken_at,
            created_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn update_food_photo(&self, photo: FoodPhoto) -> Result<()> {
    let taken_at = photo.taken_at.to_string();
    let created_at = photo.created_at.map(|dt| dt.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE food_photos SET
             photo_path = ?2, name = ?3, calories = ?4, proteins_g = ?5,
             fats_g = ?6, carbs_g = ?7, water_ml = ?8, weight_g = ?9,
             taken_datetime = ?10, created_at = ?11
           WHERE id = ?1",
          params![
            photo.id,
            photo.photo_path,
            photo.name,
            photo.calories,
            photo.proteins_g,
            photo.fats_g,
            photo.carbs_g,
            photo.water_ml,
            photo.weight_g,
            taken_at,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_food_photo(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM food_photos WHERE id = ?1", params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Workouts ──────────────────────────────────────────────────────────────

  async fn list_workouts(&self) -> Result<Vec<Workout>> {
    let raws: Vec<RawWorkout> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {WORKOUT_COLS} FROM workouts ORDER BY workout_date DESC"
        ))?;
        let rows = stmt
          .query_map([], read_workout)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWorkout::into_workout).collect()
  }

  async fn workout_by_date(&self, date: LogDate) -> Result<Option<Workout>> {
    let date = date.to_string();

    let raw: Option<RawWorkout> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {WORKOUT_COLS} FROM workouts WHERE workout_date = ?1"
              ),
              params![date],
              read_workout,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawWorkout::into_workout).transpose()
  }

  async fn get_workout(&self, id: i64) -> Result<Option<Workout>> {
    let raw: Option<RawWorkout> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {WORKOUT_COLS} FROM workouts WHERE id = ?1"),
              params![id],
              read_workout,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawWorkout::into_workout).transpose()
  }

  async fn insert_workout(&self, workout: NewWorkout) -> Result<i64> {
    let date = workout.date.to_string();
    let status = workout.status.as_str();
    let started_at = workout.started_at.map(|dt| dt.to_string());
    let ended_at = workout.ended_at.map(|dt| dt.to_string());
    let created_at = workout.created_at.map(|dt| dt.to_string());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO workouts (
             workout_date, status, planned_start_time, planned_end_time,
             actual_start_datetime, actual_end_datetime, rating, notes,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          params![
            date,
            status,
            workout.planned_start,
            workout.planned_end,
            started_at,
            ended_at,
            workout.rating,
            workout.notes,
            created_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn update_workout(&self, workout: Workout) -> Result<()> {
    let date = workout.date.to_string();
    let status = workout.status.as_str();
    let started_at = workout.started_at.map(|dt| dt.to_string());
    let ended_at = workout.ended_at.map(|dt| dt.to_string());
    let created_at = workout.created_at.map(|dt| dt.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE workouts SET
             workout_date = ?2, status = ?3, planned_start_time = ?4,
             planned_end_time = ?5, actual_start_datetime = ?6,
             actual_end_datetime = ?7, rating = ?8, notes = ?9,
             elapsed_seconds = ?10, created_at = ?11
           WHERE id = ?1",
          params![
            workout.id,
            date,
            status,
            workout.planned_start,
            workout.planned_end,
            started_at,
            ended_at,
            workout.rating,
            workout.notes,
            workout.elapsed_seconds,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_workout_status(
    &self,
    id: i64,
    status: WorkoutStatus,
  ) -> Result<()> {
    let status = status.as_str();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE workouts SET status = ?2 WHERE id = ?1",
          params![id, status],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_workout_elapsed(
    &self,
    id: i64,
    elapsed_seconds: i64,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE workouts SET elapsed_seconds = ?2 WHERE id = ?1",
          params![id, elapsed_seconds],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_workout(&self, id: i64) -> Result<()> {
    // ON DELETE CASCADE removes the schedule entries and their sets.
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Schedule ──────────────────────────────────────────────────────────────

  async fn schedule_for_workout(
    &self,
    workout_id: i64,
  ) -> Result<Vec<WorkoutSchedule>> {
    let raws: Vec<RawSchedule> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SCHEDULE_COLS} FROM workout_schedule
           WHERE workout_id = ?1
           ORDER BY order_number"
        ))?;
        let rows = stmt
          .query_map(params![workout_id], read_schedule)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawSchedule::into_schedule).collect())
  }

  async fn insert_schedule(&self, entry: NewWorkoutSchedule) -> Result<i64> {
    let status = entry.status.as_str();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO workout_schedule (
             workout_id, exercise_id, planned_sets, exercise_duration_s,
             rest_duration_s, status, order_number
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          params![
            entry.workout_id,
            entry.exercise_id,
            entry.planned_sets,
            entry.exercise_seconds,
            entry.rest_seconds,
            status,
            entry.position,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn update_schedule(&self, entry: WorkoutSchedule) -> Result<()> {
    let status = entry.status.as_str();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE workout_schedule SET
             workout_id = ?2, exercise_id = ?3, planned_sets = ?4,
             exercise_duration_s = ?5, rest_duration_s = ?6, status = ?7,
             order_number = ?8
           WHERE id = ?1",
          params![
            entry.id,
            entry.workout_id,
            entry.exercise_id,
            entry.planned_sets,
            entry.exercise_seconds,
            entry.rest_seconds,
            status,
            entry.position,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_schedule_status(
    &self,
    id: i64,
    status: ScheduleStatus,
  ) -> Result<()> {
    let status = status.as_str();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE workout_schedule SET status = ?2 WHERE id = ?1",
          params![id, status],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_schedule(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM workout_schedule WHERE id = ?1",
          params![id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Sets ──────────────────────────────────────────────────────────────────

  async fn sets_for_schedule(
    &self,
    schedule_id: i64,
  ) -> Result<Vec<WorkoutSet>> {
    let raws: Vec<RawSet> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SET_COLS} FROM workout_sets
           WHERE workout_schedule_id = ?1
           ORDER BY set_number"
        ))?;
        let rows = stmt
          .query_map(params![schedule_id], read_set)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSet::into_set).collect()
  }

  async fn insert_set(&self, set: NewWorkoutSet) -> Result<i64> {
    let completed_at = set.completed_at.map(|dt| dt.to_string());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO workout_sets (
             workout_schedule_id, set_number, planned_reps,
             planned_weight_kg, actual_reps, actual_weight_kg,
             set_completed, rest_after_s, completed_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          params![
            set.schedule_id,
            set.set_number,
            set.planned_reps,
            set.planned_weight_kg,
            set.actual_reps,
            set.actual_weight_kg,
            set.completed,
            set.rest_after_seconds,
            completed_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn update_set(&self, set: WorkoutSet) -> Result<()> {
    let completed_at = set.completed_at.map(|dt| dt.to_string());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE workout_sets SET
             workout_schedule_id = ?2, set_number = ?3, planned_reps = ?4,
             planned_weight_kg = ?5, actual_reps = ?6, actual_weight_kg = ?7,
             set_completed = ?8, rest_after_s = ?9, completed_at = ?10
           WHERE id = ?1",
          params![
            set.id,
            set.schedule_id,
            set.set_number,
            set.planned_reps,
            set.planned_weight_kg,
            set.actual_reps,
            set.actual_weight_kg,
            set.completed,
            set.rest_after_seconds,
            completed_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_set(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM workout_sets WHERE id = ?1", params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
