//! SQL schema for the Fettle SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Date and datetime columns hold zero-padded `YYYY-MM-DD` /
/// `YYYY-MM-DD HH:MM:SS` text, so plain lexical comparison in SQL agrees
/// with calendar order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Singleton profile; the one row always has id = 1.
CREATE TABLE IF NOT EXISTS client (
    id                INTEGER PRIMARY KEY,
    gender            TEXT,     -- 'male' | 'female'
    age               INTEGER,
    height_cm         REAL,
    current_weight_kg REAL,
    target_weight_kg  REAL,
    target_date       TEXT,
    target_calories   INTEGER,
    target_proteins_g REAL,
    target_fats_g     REAL,
    target_carbs_g    REAL,
    target_water_ml   REAL
);

CREATE TABLE IF NOT EXISTS exercises (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    description  TEXT NOT NULL,
    image_path   TEXT,
    video_path   TEXT,
    tips         TEXT,
    muscle_group TEXT,
    difficulty   TEXT NOT NULL DEFAULT 'beginner',
    created_at   TEXT
);

CREATE TABLE IF NOT EXISTS dishes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT,
    photo_path  TEXT,
    calories    INTEGER,
    proteins_g  REAL,
    fats_g      REAL,
    carbs_g     REAL,
    water_ml    REAL,
    created_at  TEXT
);

CREATE TABLE IF NOT EXISTS food_photos (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    photo_path     TEXT NOT NULL,
    name           TEXT,
    calories       INTEGER,
    proteins_g     REAL,
    fats_g         REAL,
    carbs_g        REAL,
    water_ml       REAL,
    weight_g       REAL,
    taken_datetime TEXT NOT NULL,
    created_at     TEXT
);

CREATE TABLE IF NOT EXISTS workouts (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_date          TEXT NOT NULL,
    status                TEXT NOT NULL DEFAULT 'in_progress',
    planned_start_time    TEXT,     -- HH:MM
    planned_end_time      TEXT,     -- HH:MM
    actual_start_datetime TEXT,
    actual_end_datetime   TEXT,
    rating                INTEGER,
    notes                 TEXT,
    elapsed_seconds       INTEGER NOT NULL DEFAULT 0,
    created_at            TEXT
);

-- Deleting a workout takes its schedule entries with it; an exercise
-- referenced here cannot be deleted.
CREATE TABLE IF NOT EXISTS workout_schedule (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_id          INTEGER NOT NULL REFERENCES workouts(id)  ON DELETE CASCADE,
    exercise_id         INTEGER NOT NULL REFERENCES exercises(id) ON DELETE RESTRICT,
    planned_sets        INTEGER,
    exercise_duration_s INTEGER,
    rest_duration_s     INTEGER,
    status              TEXT NOT NULL DEFAULT 'not_completed',
    order_number        INTEGER
);

CREATE TABLE IF NOT EXISTS workout_sets (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_schedule_id INTEGER NOT NULL REFERENCES workout_schedule(id) ON DELETE CASCADE,
    set_number          INTEGER NOT NULL,
    planned_reps        INTEGER,
    planned_weight_kg   REAL,
    actual_reps         INTEGER,
    actual_weight_kg    REAL,
    set_completed       INTEGER NOT NULL DEFAULT 0,
    rest_after_s        INTEGER,
    completed_at        TEXT
);

CREATE INDEX IF NOT EXISTS food_photos_taken_idx ON food_photos(taken_datetime);
CREATE INDEX IF NOT EXISTS workouts_date_idx     ON workouts(workout_date);
CREATE INDEX IF NOT EXISTS schedule_workout_idx  ON workout_schedule(workout_id);
CREATE INDEX IF NOT EXISTS schedule_exercise_idx ON workout_schedule(exercise_id);
CREATE INDEX IF NOT EXISTS sets_schedule_idx     ON workout_sets(workout_schedule_id);

PRAGMA user_version = 1;
";
