//! Subcommand surface and dispatch.

use std::str::FromStr;

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use fettle_core::{
  client::{Client, Gender},
  date::{LogDate, LogDateTime},
  nutrition::NewFoodPhoto,
  session::SessionEvent,
  store::LogStore,
  summary::DaySummary,
  week::Week,
  workout::{self, Workout, WorkoutSchedule, WorkoutSet, WorkoutStatus},
};
use fettle_session::Session;
use fettle_store_sqlite::SqliteStore;
use serde::Serialize;

// ─── Commands ─────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub enum Command {
  /// Show or edit the profile.
  #[command(subcommand)]
  Profile(ProfileCmd),

  /// List the dish catalog, optionally filtered by a name search.
  Dishes {
    /// Case-insensitive substring to match against dish names.
    query: Option<String>,
  },

  /// Log a meal.
  #[command(subcommand)]
  Meal(MealCmd),

  /// List the meals logged on one day.
  Meals {
    /// Day to list (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    date: Option<String>,
  },

  /// One day's nutrition totals against the profile goals.
  Day {
    /// Day to summarise (YYYY-MM-DD). Defaults to today.
    date: Option<String>,
  },

  /// A week strip of per-day calorie totals.
  Week {
    /// How many weeks back from the current one.
    #[arg(long, default_value_t = 0)]
    back: u32,
  },

  /// List the exercise catalog.
  Exercises,

  /// Inspect one catalog exercise.
  #[command(subcommand)]
  Exercise(ExerciseCmd),

  /// List all workouts, most recent first.
  Workouts,

  /// Inspect or drive one workout.
  #[command(subcommand)]
  Workout(WorkoutCmd),

  /// Run a rest countdown, then mark the schedule entry completed.
  Rest {
    schedule_id: i64,

    /// Length of the rest, in seconds.
    #[arg(long, default_value_t = 60)]
    seconds: u64,
  },
}

#[derive(Subcommand)]
pub enum ProfileCmd {
  /// Show the profile, creating the default one if none exists yet.
  Show,
  /// Update profile fields; anything not passed keeps its value.
  Set(ProfileSet),
}

#[derive(Args)]
pub struct ProfileSet {
  #[arg(long)]
  age:           Option<i64>,
  #[arg(long, value_name = "CM")]
  height:        Option<f64>,
  #[arg(long, value_name = "KG")]
  weight:        Option<f64>,
  #[arg(long, value_name = "KG")]
  target_weight: Option<f64>,
  /// Goal date (YYYY-MM-DD).
  #[arg(long, value_name = "DATE")]
  target_date:   Option<String>,
  #[arg(long, value_parser = ["male", "female"])]
  gender:        Option<String>,
  /// Daily calorie goal.
  #[arg(long)]
  calories:      Option<i64>,
  /// Daily protein goal, grams.
  #[arg(long, value_name = "G")]
  protein:       Option<f64>,
  /// Daily fat goal, grams.
  #[arg(long, value_name = "G")]
  fat:           Option<f64>,
  /// Daily carbohydrate goal, grams.
  #[arg(long, value_name = "G")]
  carbs:         Option<f64>,
  /// Daily water goal, millilitres.
  #[arg(long, value_name = "ML")]
  water:         Option<f64>,
}

#[derive(Subcommand)]
pub enum MealCmd {
  /// Log one meal from a photo plus whatever nutrition is known.
  Log(MealLog),
}

#[derive(Args)]
pub struct MealLog {
  /// Path of the meal photo.
  #[arg(long)]
  photo:    String,
  #[arg(long)]
  name:     Option<String>,
  #[arg(long)]
  calories: Option<i64>,
  #[arg(long, value_name = "G")]
  protein:  Option<f64>,
  #[arg(long, value_name = "G")]
  fat:      Option<f64>,
  #[arg(long, value_name = "G")]
  carbs:    Option<f64>,
  #[arg(long, value_name = "ML")]
  water:    Option<f64>,
  /// Portion weight, grams.
  #[arg(long, value_name = "G")]
  weight:   Option<f64>,
  /// When the meal was eaten (YYYY-MM-DD HH:MM:SS). Defaults to now.
  #[arg(long, value_name = "DATETIME")]
  at:       Option<String>,
}

#[derive(Subcommand)]
pub enum ExerciseCmd {
  /// Show one exercise in full.
  Show { id: i64 },
}

#[derive(Subcommand)]
pub enum WorkoutCmd {
  /// Show a workout with its schedule and sets.
  Show { id: i64 },
  /// Start the session clock on an upcoming workout.
  Start { id: i64 },
  /// Pause a running session.
  Pause { id: i64 },
  /// Resume a paused session.
  Resume { id: i64 },
  /// Skip a workout that never started.
  Skip { id: i64 },
  /// Finish a workout for good. Irreversible, so requires --yes.
  Finish {
    id:  i64,
    #[arg(long)]
    yes: bool,
  },
  /// Run the session clock in the foreground; Ctrl-C pauses it.
  Run { id: i64 },
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub async fn run(
  store: &SqliteStore,
  command: Command,
  json: bool,
) -> Result<()> {
  match command {
    Command::Profile(cmd) => profile(store, cmd, json).await,
    Command::Dishes { query } => dishes(store, query, json).await,
    Command::Meal(MealCmd::Log(log)) => meal_log(store, log, json).await,
    Command::Meals { date } => meals(store, date, json).await,
    Command::Day { date } => day(store, date, json).await,
    Command::Week { back } => week(store, back, json).await,
    Command::Exercises => exercises(store, json).await,
    Command::Exercise(ExerciseCmd::Show { id }) => {
      exercise_show(store, id, json).await
    }
    Command::Workouts => workouts(store, json).await,
    Command::Workout(cmd) => workout(store, cmd, json).await,
    Command::Rest {
      schedule_id,
      seconds,
    } => rest(store, schedule_id, seconds, json).await,
  }
}

// ─── Profile ──────────────────────────────────────────────────────────────────

async fn profile(
  store: &SqliteStore,
  cmd: ProfileCmd,
  json: bool,
) -> Result<()> {
  let client = match cmd {
    ProfileCmd::Show => match store.get_client().await? {
      Some(client) => client,
      // A missing profile is created on the spot, never an error.
      None => {
        let client = Client::default_profile();
        store.upsert_client(client.clone()).await?;
        client
      }
    },
    ProfileCmd::Set(set) => {
      let mut client = store
        .get_client()
        .await?
        .unwrap_or_else(Client::default_profile);
      set.apply(&mut client)?;
      store.upsert_client(client.clone()).await?;
      client
    }
  };

  if json {
    return print_json(&client);
  }
  println!("gender         {}", client.gender.map_or("-", |g| g.as_str()));
  println!("age            {}", opt(&client.age));
  println!("height         {} cm", opt(&client.height_cm));
  println!("weight         {} kg", opt(&client.current_weight_kg));
  println!("target weight  {} kg", opt(&client.target_weight_kg));
  println!("target date    {}", opt(&client.target_date));
  let targets = client.targets();
  println!(
    "daily goals    {} kcal, {} g protein, {} g fat, {} g carbs, {} ml water",
    targets.calories,
    targets.proteins_g,
    targets.fats_g,
    targets.carbs_g,
    targets.water_ml
  );
  Ok(())
}

impl ProfileSet {
  fn apply(self, client: &mut Client) -> Result<()> {
    if let Some(age) = self.age {
      client.age = Some(age);
    }
    if let Some(height) = self.height {
      client.height_cm = Some(height);
    }
    if let Some(weight) = self.weight {
      client.current_weight_kg = Some(weight);
    }
    if let Some(target_weight) = self.target_weight {
      client.target_weight_kg = Some(target_weight);
    }
    if let Some(date) = self.target_date {
      client.target_date = Some(parse_date(&date)?);
    }
    if let Some(gender) = self.gender {
      client.gender = Gender::parse(&gender);
    }
    if let Some(calories) = self.calories {
      client.target_calories = Some(calories);
    }
    if let Some(protein) = self.protein {
      client.target_proteins_g = Some(protein);
    }
    if let Some(fat) = self.fat {
      client.target_fats_g = Some(fat);
    }
    if let Some(carbs) = self.carbs {
      client.target_carbs_g = Some(carbs);
    }
    if let Some(water) = self.water {
      client.target_water_ml = Some(water);
    }
    Ok(())
  }
}

// ─── Nutrition ────────────────────────────────────────────────────────────────

async fn dishes(
  store: &SqliteStore,
  query: Option<String>,
  json: bool,
) -> Result<()> {
  let dishes = match query.as_deref() {
    Some(query) if !query.trim().is_empty() => {
      store.search_dishes(query).await?
    }
    _ => store.list_dishes().await?,
  };

  if json {
    return print_json(&dishes);
  }
  if dishes.is_empty() {
    println!("no dishes");
    return Ok(());
  }
  for dish in dishes {
    println!(
      "#{:<4} {:<36} {:>5} kcal  {} g protein",
      dish.id,
      dish.name,
      opt(&dish.calories),
      opt(&dish.proteins_g)
    );
  }
  Ok(())
}

async fn meal_log(store: &SqliteStore, log: MealLog, json: bool) -> Result<()> {
  let taken_at = match log.at.as_deref() {
    Some(s) => LogDateTime::from_str(s)
      .with_context(|| format!("invalid datetime {s:?}"))?,
    None => LogDateTime::now(),
  };

  let photo = NewFoodPhoto {
    photo_path: log.photo,
    name: log.name,
    calories: log.calories,
    proteins_g: log.protein,
    fats_g: log.fat,
    carbs_g: log.carbs,
    water_ml: log.water,
    weight_g: log.weight,
    taken_at,
    created_at: Some(LogDateTime::now()),
  };
  let id = store.insert_food_photo(photo).await?;

  if json {
    return print_json(&serde_json::json!({ "id": id, "taken_at": taken_at }));
  }
  println!("logged meal #{id} at {taken_at}");
  Ok(())
}

async fn meals(
  store: &SqliteStore,
  date: Option<String>,
  json: bool,
) -> Result<()> {
  let date = parse_date_or_today(date.as_deref())?;
  let photos = store.food_photos_for_day(date).await?;

  if json {
    return print_json(&photos);
  }
  if photos.is_empty() {
    println!("no meals on {date}");
    return Ok(());
  }
  for photo in photos {
    println!(
      "#{:<4} {}  {:<24} {:>5} kcal",
      photo.id,
      photo.taken_at,
      photo.name.as_deref().unwrap_or("-"),
      opt(&photo.calories)
    );
  }
  Ok(())
}

async fn day(
  store: &SqliteStore,
  date: Option<String>,
  json: bool,
) -> Result<()> {
  let date = parse_date_or_today(date.as_deref())?;
  let targets = store
    .get_client()
    .await?
    .map(|client| client.targets())
    .unwrap_or_default();
  let photos = store.food_photos_for_day(date).await?;
  let summary = DaySummary::for_day(&photos, targets);

  if json {
    return print_json(&serde_json::json!({ "date": date, "summary": summary }));
  }
  println!("{date}  ({} meals)", photos.len());
  println!(
    "calories  {:>7} / {} kcal  ({:.0}%)",
    summary.calories,
    summary.targets.calories,
    summary.calorie_progress() * 100.0
  );
  println!(
    "protein   {:>7.1} / {} g",
    summary.proteins_g, summary.targets.proteins_g
  );
  println!(
    "fat       {:>7.1} / {} g",
    summary.fats_g, summary.targets.fats_g
  );
  println!(
    "carbs     {:>7.1} / {} g",
    summary.carbs_g, summary.targets.carbs_g
  );
  println!(
    "water     {:>7.1} / {} ml",
    summary.water_ml, summary.targets.water_ml
  );
  Ok(())
}

async fn week(store: &SqliteStore, back: u32, json: bool) -> Result<()> {
  let mut week = Week::current();
  for _ in 0..back {
    week = week.prev();
  }

  #[derive(Serialize)]
  struct WeekDay {
    date:     LogDate,
    calories: i64,
  }

  let mut days = Vec::with_capacity(7);
  for date in week.days() {
    let photos = store.food_photos_for_day(date).await?;
    let calories = photos.iter().map(|p| p.calories.unwrap_or(0)).sum();
    days.push(WeekDay { date, calories });
  }

  if json {
    return print_json(&serde_json::json!({
      "start": week.start(),
      "end":   week.end(),
      "days":  days,
    }));
  }
  println!("week of {} to {}", week.start(), week.end());
  let today = LogDate::today();
  for day in days {
    let marker = if day.date == today { "*" } else { " " };
    println!("{marker} {}  {:>5} kcal", day.date, day.calories);
  }
  Ok(())
}

// ─── Exercises ────────────────────────────────────────────────────────────────

async fn exercises(store: &SqliteStore, json: bool) -> Result<()> {
  let exercises = store.list_exercises().await?;
  if json {
    return print_json(&exercises);
  }
  if exercises.is_empty() {
    println!("no exercises");
    return Ok(());
  }
  for exercise in exercises {
    println!(
      "#{:<4} {:<28} {:<16} {}",
      exercise.id,
      exercise.name,
      exercise.muscle_group.as_deref().unwrap_or("-"),
      exercise.difficulty.as_str()
    );
  }
  Ok(())
}

async fn exercise_show(store: &SqliteStore, id: i64, json: bool) -> Result<()> {
  let Some(exercise) = store.get_exercise(id).await? else {
    bail!("no exercise with id {id}");
  };

  if json {
    return print_json(&exercise);
  }
  println!("#{} {}", exercise.id, exercise.name);
  println!("muscle group  {}", exercise.muscle_group.as_deref().unwrap_or("-"));
  println!("difficulty    {}", exercise.difficulty.as_str());
  println!();
  println!("{}", exercise.description);
  if let Some(tips) = &exercise.tips {
    println!();
    println!("tips: {tips}");
  }
  Ok(())
}

// ─── Workouts ─────────────────────────────────────────────────────────────────

async fn workouts(store: &SqliteStore, json: bool) -> Result<()> {
  let workouts = store.list_workouts().await?;
  if json {
    return print_json(&workouts);
  }
  if workouts.is_empty() {
    println!("no workouts");
    return Ok(());
  }
  for workout in workouts {
    println!(
      "#{:<4} {}  {:<12} {:>5} s elapsed",
      workout.id,
      workout.date,
      workout.status.as_str(),
      workout.elapsed_seconds
    );
  }
  Ok(())
}

async fn workout(store: &SqliteStore, cmd: WorkoutCmd, json: bool) -> Result<()> {
  match cmd {
    WorkoutCmd::Show { id } => workout_show(store, id, json).await,
    WorkoutCmd::Start { id } => transition(store, id, SessionEvent::Start, json).await,
    WorkoutCmd::Pause { id } => transition(store, id, SessionEvent::Pause, json).await,
    WorkoutCmd::Resume { id } => transition(store, id, SessionEvent::Resume, json).await,
    WorkoutCmd::Skip { id } => transition(store, id, SessionEvent::Skip, json).await,
    WorkoutCmd::Finish { id, yes } => {
      if !yes {
        bail!("finishing workout #{id} is permanent; pass --yes to confirm");
      }
      transition(store, id, SessionEvent::Finish, json).await
    }
    WorkoutCmd::Run { id } => run_session(store, id).await,
  }
}

/// A workout joined with its schedule, each entry joined with its exercise
/// name and sets.
#[derive(Serialize)]
struct WorkoutView {
  #[serde(flatten)]
  workout:  Workout,
  schedule: Vec<ScheduleView>,
}

#[derive(Serialize)]
struct ScheduleView {
  #[serde(flatten)]
  entry:    WorkoutSchedule,
  exercise: String,
  sets:     Vec<WorkoutSet>,
}

async fn workout_show(store: &SqliteStore, id: i64, json: bool) -> Result<()> {
  let Some(workout) = store.get_workout(id).await? else {
    bail!("no workout with id {id}");
  };

  let mut schedule = Vec::new();
  for entry in store.schedule_for_workout(id).await? {
    let exercise = match store.get_exercise(entry.exercise_id).await? {
      Some(exercise) => exercise.name,
      None => format!("exercise #{}", entry.exercise_id),
    };
    let sets = store.sets_for_schedule(entry.id).await?;
    schedule.push(ScheduleView {
      entry,
      exercise,
      sets,
    });
  }
  let view = WorkoutView { workout, schedule };

  if json {
    return print_json(&view);
  }
  let workout = &view.workout;
  println!("workout #{} on {}  [{}]", workout.id, workout.date, workout.status.as_str());
  println!(
    "planned  {} to {}  ({} s)",
    workout.planned_start.as_deref().unwrap_or("-"),
    workout.planned_end.as_deref().unwrap_or("-"),
    workout.planned_duration_seconds()
  );
  println!(
    "actual   {} to {}  ({} s elapsed, ~{} kcal)",
    opt(&workout.started_at),
    opt(&workout.ended_at),
    workout.elapsed_seconds,
    workout::estimated_calories(workout.elapsed_seconds.max(0) as u64)
  );
  if let Some(rating) = workout.rating {
    println!("rating   {rating}/10");
  }
  if let Some(notes) = &workout.notes {
    println!("notes    {notes}");
  }
  for view in &view.schedule {
    println!(
      "  {}. {}  {} sets planned, {} s work / {} s rest  [{}]",
      opt(&view.entry.position),
      view.exercise,
      opt(&view.entry.planned_sets),
      opt(&view.entry.exercise_seconds),
      opt(&view.entry.rest_seconds),
      view.entry.status.as_str()
    );
    for set in &view.sets {
      let done = if set.completed { "done" } else { "pending" };
      println!(
        "     set {}: {} reps @ {} kg  {done}",
        set.set_number,
        set.actual_reps.or(set.planned_reps).map_or("-".into(), |v| v.to_string()),
        set
          .actual_weight_kg
          .or(set.planned_weight_kg)
          .map_or("-".into(), |v| v.to_string()),
      );
    }
  }
  Ok(())
}

async fn transition(
  store: &SqliteStore,
  id: i64,
  event: SessionEvent,
  json: bool,
) -> Result<()> {
  let mut session = Session::attach(store.clone(), id).await?;
  let status = session.apply(event).await?;

  if json {
    return print_json(&serde_json::json!({
      "id":      id,
      "status":  status.as_str(),
      "elapsed": session.elapsed_seconds(),
    }));
  }
  println!("workout #{id} is now {}", status.as_str());
  if status == WorkoutStatus::Completed {
    println!(
      "{} s elapsed, ~{} kcal burned",
      session.elapsed_seconds(),
      workout::estimated_calories(session.elapsed_seconds().max(0) as u64)
    );
  }
  Ok(())
}

/// Drive the session clock in the foreground until Ctrl-C pauses it.
async fn run_session(store: &SqliteStore, id: i64) -> Result<()> {
  let mut session = Session::attach(store.clone(), id).await?;

  match session.status() {
    WorkoutStatus::InProgress => {
      session.apply(SessionEvent::Start).await?;
    }
    WorkoutStatus::Paused => {
      session.apply(SessionEvent::Resume).await?;
    }
    // A session left in the gym by a crash: re-enter it through a
    // pause/resume pair so the clock restarts from the persisted value.
    WorkoutStatus::InGym => {
      session.apply(SessionEvent::Pause).await?;
      session.apply(SessionEvent::Resume).await?;
    }
    other => bail!("workout #{id} is {}, nothing to run", other.as_str()),
  }

  println!(
    "session running, {} s of {} s elapsed; Ctrl-C pauses",
    session.elapsed_seconds(),
    session.planned_seconds()
  );
  tokio::signal::ctrl_c()
    .await
    .context("waiting for Ctrl-C")?;

  session.apply(SessionEvent::Pause).await?;
  println!(
    "paused at {} s elapsed ({} s remaining)",
    session.elapsed_seconds(),
    session.remaining_seconds()
  );
  Ok(())
}

// ─── Rest timer ───────────────────────────────────────────────────────────────

async fn rest(
  store: &SqliteStore,
  schedule_id: i64,
  seconds: u64,
  json: bool,
) -> Result<()> {
  fettle_session::rest::run(store, schedule_id, seconds, |remaining| {
    if !json {
      println!("{remaining}...");
    }
  })
  .await?;

  if json {
    return print_json(&serde_json::json!({
      "schedule_id": schedule_id,
      "rested":      seconds,
    }));
  }
  println!("rest over, schedule entry #{schedule_id} completed");
  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn parse_date(s: &str) -> Result<LogDate> {
  LogDate::from_str(s)
    .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

fn parse_date_or_today(s: Option<&str>) -> Result<LogDate> {
  match s {
    Some(s) => parse_date(s),
    None => Ok(LogDate::today()),
  }
}

/// Render an optional value, with `-` standing in for blank.
fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
  value.as_ref().map_or_else(|| "-".to_owned(), T::to_string)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
