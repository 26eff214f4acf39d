//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates and datetimes are stored in the zero-padded sortable text forms the
//! `fettle-core` newtypes guarantee. Status vocabularies are stored as their
//! snake_case strings and decoded *leniently*: an unrecognised value reads as
//! the upcoming/default variant with a warning, so one bad row never poisons
//! a listing.

use fettle_core::{
  client::{Client, Gender},
  date::{LogDate, LogDateTime},
  exercise::{Difficulty, Exercise},
  nutrition::{Dish, FoodPhoto},
  workout::{ScheduleStatus, Workout, WorkoutSchedule, WorkoutSet, WorkoutStatus},
};

use crate::Result;

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn decode_date(s: &str) -> Result<LogDate> { Ok(s.parse::<LogDate>()?) }

pub fn decode_dt(s: &str) -> Result<LogDateTime> {
  Ok(s.parse::<LogDateTime>()?)
}

pub fn decode_opt_date(s: Option<&str>) -> Result<Option<LogDate>> {
  s.map(decode_date).transpose()
}

pub fn decode_opt_dt(s: Option<&str>) -> Result<Option<LogDateTime>> {
  s.map(decode_dt).transpose()
}

// ─── Vocabularies (lenient) ──────────────────────────────────────────────────

pub fn decode_workout_status(s: &str) -> WorkoutStatus {
  WorkoutStatus::parse(s).unwrap_or_else(|| {
    tracing::warn!(value = s, "unknown workout status, reading as upcoming");
    WorkoutStatus::default()
  })
}

pub fn decode_schedule_status(s: &str) -> ScheduleStatus {
  ScheduleStatus::parse(s).unwrap_or_else(|| {
    tracing::warn!(value = s, "unknown schedule status, reading as pending");
    ScheduleStatus::default()
  })
}

pub fn decode_gender(s: &str) -> Option<Gender> {
  let gender = Gender::parse(s);
  if gender.is_none() {
    tracing::warn!(value = s, "unknown gender, reading as unspecified");
  }
  gender
}

pub fn decode_difficulty(s: &str) -> Difficulty {
  Difficulty::parse(s).unwrap_or_else(|| {
    tracing::warn!(value = s, "unknown difficulty, reading as beginner");
    Difficulty::default()
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `client` row.
pub struct RawClient {
  pub id:                i64,
  pub gender:            Option<String>,
  pub age:               Option<i64>,
  pub height_cm:         Option<f64>,
  pub current_weight_kg: Option<f64>,
  pub target_weight_kg:  Option<f64>,
  pub target_date:       Option<String>,
  pub target_calories:   Option<i64>,
  pub target_proteins_g: Option<f64>,
  pub target_fats_g:     Option<f64>,
  pub target_carbs_g:    Option<f64>,
  pub target_water_ml:   Option<f64>,
}

impl RawClient {
  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      id:                self.id,
      gender:            self.gender.as_deref().and_then(decode_gender),
      age:               self.age,
      height_cm:         self.height_cm,
      current_weight_kg: self.current_weight_kg,
      target_weight_kg:  self.target_weight_kg,
      target_date:       decode_opt_date(self.target_date.as_deref())?,
      target_calories:   self.target_calories,
      target_proteins_g: self.target_proteins_g,
      target_fats_g:     self.target_fats_g,
      target_carbs_g:    self.target_carbs_g,
      target_water_ml:   self.target_water_ml,
    })
  }
}

/// Raw values read directly from an `exercises` row.
pub struct RawExercise {
  pub id:           i64,
  pub name:         String,
  pub description:  String,
  pub image_path:   Option<String>,
  pub video_path:   Option<String>,
  pub tips:         Option<String>,
  pub muscle_group: Option<String>,
  pub difficulty:   String,
  pub created_at:   Option<String>,
}

impl RawExercise {
  pub fn into_exercise(self) -> Result<Exercise> {
    Ok(Exercise {
      id:           self.id,
      name:         self.name,
      description:  self.description,
      image_path:   self.image_path,
      video_path:   self.video_path,
      tips:         self.tips,
      muscle_group: self.muscle_group,
      difficulty:   decode_difficulty(&self.difficulty),
      created_at:   decode_opt_dt(self.created_at.as_deref())?,
    })
  }
}

/// Raw values read directly from a `dishes` row.
pub struct RawDish {
  pub id:          i64,
  pub name:        String,
  pub description: Option<String>,
  pub photo_path:  Option<String>,
  pub calories:    Option<i64>,
  pub proteins_g:  Option<f64>,
  pub fats_g:      Option<f64>,
  pub carbs_g:     Option<f64>,
  pub water_ml:    Option<f64>,
  pub created_at:  Option<String>,
}

impl RawDish {
  pub fn into_dish(self) -> Result<Dish> {
    Ok(Dish {
      id:          self.id,
      name:        self.name,
      description: self.description,
      photo_path:  self.photo_path,
      calories:    self.calories,
      proteins_g:  self.proteins_g,
      fats_g:      self.fats_g,
      carbs_g:     self.carbs_g,
      water_ml:    self.water_ml,
      created_at:  decode_opt_dt(self.created_at.as_deref())?,
    })
  }
}

/// Raw values read directly from a `food_photos` row.
pub struct RawFoodPhoto {
  pub id:             i64,
  pub photo_path:     String,
  pub name:           Option<String>,
  pub calories:       Option<i64>,
  pub proteins_g:     Option<f64>,
  pub fats_g:         Option<f64>,
  pub carbs_g:        Option<f64>,
  pub water_ml:       Option<f64>,
  pub weight_g:       Option<f64>,
  pub taken_datetime: String,
  pub created_at:     Option<String>,
}

impl RawFoodPhoto {
  pub fn into_photo(self) -> Result<FoodPhoto> {
    Ok(FoodPhoto {
      id:         self.id,
      photo_path: self.photo_path,
      name:       self.name,
      calories:   self.calories,
      proteins_g: self.proteins_g,
      fats_g:     self.fats_g,
      carbs_g:    self.carbs_g,
      water_ml:   self.water_ml,
      weight_g:   self.weight_g,
      taken_at:   decode_dt(&self.taken_datetime)?,
      created_at: decode_opt_dt(self.created_at.as_deref())?,
    })
  }
}

/// Raw values read directly from a `workouts` row.
pub struct RawWorkout {
  pub id:                    i64,
  pub workout_date:          String,
  pub status:                String,
  pub planned_start_time:    Option<String>,
  pub planned_end_time:      Option<String>,
  pub actual_start_datetime: Option<String>,
  pub actual_end_datetime:   Option<String>,
  pub rating:                Option<i64>,
  pub notes:                 Option<String>,
  pub elapsed_seconds:       i64,
  pub created_at:            Option<String>,
}

impl RawWorkout {
  pub fn into_workout(self) -> Result<Workout> {
    Ok(Workout {
      id:              self.id,
      date:            decode_date(&self.workout_date)?,
      status:          decode_workout_status(&self.status),
      planned_start:   self.planned_start_time,
      planned_end:     self.planned_end_time,
      started_at:      decode_opt_dt(self.actual_start_datetime.as_deref())?,
      ended_at:        decode_opt_dt(self.actual_end_datetime.as_deref())?,
      rating:          self.rating,
      notes:           self.notes,
      elapsed_seconds: self.elapsed_seconds,
      created_at:      decode_opt_dt(self.created_at.as_deref())?,
    })
  }
}

/// Raw values read directly from a `workout_schedule` row.
pub struct RawSchedule {
  pub id:                  i64,
  pub workout_id:          i64,
  pub exercise_id:         i64,
  pub planned_sets:        Option<i64>,
  pub exercise_duration_s: Option<i64>,
  pub rest_duration_s:     Option<i64>,
  pub status:              String,
  pub order_number:        Option<i64>,
}

impl RawSchedule {
  pub fn into_schedule(self) -> WorkoutSchedule {
    WorkoutSchedule {
      id:               self.id,
      workout_id:       self.workout_id,
      exercise_id:      self.exercise_id,
      planned_sets:     self.planned_sets,
      exercise_seconds: self.exercise_duration_s,
      rest_seconds:     self.rest_duration_s,
      status:           decode_schedule_status(&self.status),
      position:         self.order_number,
    }
  }
}

/// Raw values read directly from a `workout_sets` row.
pub struct RawSet {
  pub id:                  i64,
  pub workout_schedule_id: i64,
  pub set_number:          i64,
  pub planned_reps:        Option<i64>,
  pub planned_weight_kg:   Option<f64>,
  pub actual_reps:         Option<i64>,
  pub actual_weight_kg:    Option<f64>,
  pub set_completed:       bool,
  pub rest_after_s:        Option<i64>,
  pub completed_at:        Option<String>,
}

impl RawSet {
  pub fn into_set(self) -> Result<WorkoutSet> {
    Ok(WorkoutSet {
      id:                 self.id,
      schedule_id:        self.workout_schedule_id,
      set_number:         self.set_number,
      planned_reps:       self.planned_reps,
      planned_weight_kg:  self.planned_weight_kg,
      actual_reps:        self.actual_reps,
      actual_weight_kg:   self.actual_weight_kg,
      completed:          self.set_completed,
      rest_after_seconds: self.rest_after_s,
      completed_at:       decode_opt_dt(self.completed_at.as_deref())?,
    })
  }
}
