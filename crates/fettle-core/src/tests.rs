//! Unit tests for the pure domain logic.

use chrono::{Datelike, Weekday};

use crate::{
  Error,
  client::{Client, Gender, NutritionTargets},
  date::{LogDate, LogDateTime},
  nutrition::{FoodPhoto, NewFoodPhoto},
  session::{SessionEvent, apply},
  summary::DaySummary,
  week::Week,
  workout::{
    DEFAULT_SESSION_SECONDS, NewWorkout, ScheduleStatus, WorkoutStatus,
    estimated_calories,
  },
};

fn d(s: &str) -> LogDate {
  s.parse().expect("test date")
}

fn dt(s: &str) -> LogDateTime {
  s.parse().expect("test datetime")
}

// ─── Dates ───────────────────────────────────────────────────────────────────

#[test]
fn date_display_is_zero_padded() {
  assert_eq!(d("2024-03-05").to_string(), "2024-03-05");
  assert_eq!(dt("2024-03-05 08:00:00").to_string(), "2024-03-05 08:00:00");
}

#[test]
fn date_rejects_malformed_input() {
  assert!("2024-3-5".parse::<LogDate>().is_err());
  assert!("march 5".parse::<LogDate>().is_err());
  assert!("".parse::<LogDate>().is_err());
  assert!(matches!(
    "nope".parse::<LogDate>().unwrap_err(),
    Error::InvalidDate(_)
  ));
}

#[test]
fn datetime_accepts_legacy_forms() {
  // ISO separator, fractional seconds, minute precision.
  assert_eq!(
    dt("2024-03-05T08:00:00.123").to_string(),
    "2024-03-05 08:00:00"
  );
  assert_eq!(dt("2024-03-05T08:00").to_string(), "2024-03-05 08:00:00");
  assert_eq!(dt("2024-03-05 08:00").to_string(), "2024-03-05 08:00:00");
}

#[test]
fn datetime_rejects_malformed_input() {
  assert!("2024-03-05 8am".parse::<LogDateTime>().is_err());
  assert!("soon".parse::<LogDateTime>().is_err());
}

#[test]
fn datetime_date_portion() {
  assert_eq!(dt("2024-03-05 23:59:59").date(), d("2024-03-05"));
}

#[test]
fn date_at_builds_a_time_of_day() {
  let moment = d("2024-03-05").at(10, 5, 0).unwrap();
  assert_eq!(moment.to_string(), "2024-03-05 10:05:00");
  assert!(d("2024-03-05").at(25, 0, 0).is_none());
}

// ─── Weeks ───────────────────────────────────────────────────────────────────

#[test]
fn week_start_is_always_monday() {
  for day in [
    "2024-01-01", "2024-01-03", "2024-01-06", "2024-01-07", "2024-02-29",
    "2026-08-21",
  ] {
    let week = Week::containing(d(day));
    assert_eq!(week.start().date().weekday(), Weekday::Mon, "for {day}");
  }
}

#[test]
fn week_containing_is_idempotent() {
  for day in ["2024-01-01", "2024-01-05", "2024-01-07", "2026-08-21"] {
    let week = Week::containing(d(day));
    assert_eq!(Week::containing(week.start()), week, "for {day}");
  }
}

#[test]
fn sunday_belongs_to_preceding_monday() {
  // 2024-01-01 is a Monday, 2024-01-07 the Sunday after it.
  assert_eq!(Week::containing(d("2024-01-07")).start(), d("2024-01-01"));
}

#[test]
fn next_monday_starts_a_new_week() {
  assert_eq!(Week::containing(d("2024-01-08")).start(), d("2024-01-08"));
}

#[test]
fn monday_maps_to_itself() {
  assert_eq!(Week::containing(d("2024-01-01")).start(), d("2024-01-01"));
}

#[test]
fn every_date_is_in_its_own_week() {
  for day in ["2024-01-01", "2024-01-04", "2024-01-07", "2026-02-28"] {
    assert!(Week::containing(d(day)).contains(d(day)), "for {day}");
  }
}

#[test]
fn week_membership_is_half_open() {
  let week = Week::containing(d("2024-01-01"));
  assert!(week.contains(d("2024-01-01")));
  assert!(week.contains(d("2024-01-07")));
  assert!(!week.contains(d("2024-01-08")));
  assert!(!week.contains(d("2023-12-31")));
}

#[test]
fn next_and_prev_shift_by_exactly_seven_days() {
  let week = Week::containing(d("2024-01-03"));
  assert_eq!(week.next().start(), d("2024-01-08"));
  assert_eq!(week.prev().start(), d("2023-12-25"));
  assert_eq!(week.next().prev(), week);
}

#[test]
fn days_runs_monday_through_sunday() {
  let days = Week::containing(d("2024-01-03")).days();
  assert_eq!(days.len(), 7);
  assert_eq!(days[0], d("2024-01-01"));
  assert_eq!(days[6], d("2024-01-07"));
}

#[test]
fn day_index_positions_the_date() {
  let week = Week::containing(d("2024-01-01"));
  assert_eq!(week.day_index(d("2024-01-01")), Some(0));
  assert_eq!(week.day_index(d("2024-01-07")), Some(6));
  assert_eq!(week.day_index(d("2024-01-08")), None);
}

#[test]
fn week_end_is_the_closing_sunday() {
  assert_eq!(Week::containing(d("2024-01-03")).end(), d("2024-01-07"));
}

// ─── Client targets ──────────────────────────────────────────────────────────

fn blank_client() -> Client {
  Client {
    id:                Client::ID,
    gender:            None,
    age:               None,
    height_cm:         None,
    current_weight_kg: None,
    target_weight_kg:  None,
    target_date:       None,
    target_calories:   None,
    target_proteins_g: None,
    target_fats_g:     None,
    target_carbs_g:    None,
    target_water_ml:   None,
  }
}

#[test]
fn targets_default_to_the_fixed_fallbacks() {
  let targets = blank_client().targets();
  assert_eq!(targets.calories, 2200);
  assert_eq!(targets.proteins_g, 150.0);
  assert_eq!(targets.fats_g, 70.0);
  assert_eq!(targets.carbs_g, 250.0);
  assert_eq!(targets.water_ml, 2500.0);
  assert_eq!(targets, NutritionTargets::default());
}

#[test]
fn targets_fall_back_field_by_field() {
  let mut client = blank_client();
  client.target_calories = Some(1800);
  client.target_water_ml = Some(3000.0);

  let targets = client.targets();
  assert_eq!(targets.calories, 1800);
  assert_eq!(targets.water_ml, 3000.0);
  // Untouched fields still read the defaults.
  assert_eq!(targets.proteins_g, 150.0);
  assert_eq!(targets.carbs_g, 250.0);
}

#[test]
fn default_profile_uses_the_singleton_id() {
  let profile = Client::default_profile();
  assert_eq!(profile.id, Client::ID);
  assert_eq!(profile.gender, Some(Gender::Male));
  assert!(profile.target_date.is_some());
}

// ─── Day aggregation ─────────────────────────────────────────────────────────

fn photo(calories: Option<i64>, proteins: Option<f64>) -> FoodPhoto {
  FoodPhoto {
    id:         0,
    photo_path: "meals/a.jpg".into(),
    name:       None,
    calories,
    proteins_g: proteins,
    fats_g:     None,
    carbs_g:    None,
    water_ml:   None,
    weight_g:   None,
    taken_at:   dt("2024-03-05 08:00:00"),
    created_at: None,
  }
}

#[test]
fn empty_day_sums_to_zero() {
  let summary = DaySummary::for_day(&[], NutritionTargets::default());
  assert_eq!(summary.calories, 0);
  assert_eq!(summary.proteins_g, 0.0);
  assert_eq!(summary.water_ml, 0.0);
}

#[test]
fn missing_photo_values_count_as_zero() {
  let photos = vec![
    photo(Some(350), Some(25.0)),
    photo(None, None),
    photo(Some(420), Some(45.0)),
  ];
  let summary = DaySummary::for_day(&photos, NutritionTargets::default());
  assert_eq!(summary.calories, 770);
  assert_eq!(summary.proteins_g, 70.0);
}

#[test]
fn calorie_progress_is_a_fraction_of_the_goal() {
  let mut summary = DaySummary::for_day(
    &[photo(Some(1100), None)],
    NutritionTargets::default(),
  );
  assert_eq!(summary.calorie_progress(), 0.5);

  summary.targets.calories = 0;
  assert_eq!(summary.calorie_progress(), 0.0);
}

// ─── Workout helpers ─────────────────────────────────────────────────────────

fn workout_with_times(
  start: Option<&str>,
  end: Option<&str>,
) -> crate::workout::Workout {
  crate::workout::Workout {
    id:              1,
    date:            d("2024-03-05"),
    status:          WorkoutStatus::InProgress,
    planned_start:   start.map(str::to_owned),
    planned_end:     end.map(str::to_owned),
    started_at:      None,
    ended_at:        None,
    rating:          None,
    notes:           None,
    elapsed_seconds: 0,
    created_at:      None,
  }
}

#[test]
fn planned_duration_is_the_time_difference() {
  let workout = workout_with_times(Some("10:00"), Some("11:00"));
  assert_eq!(workout.planned_duration_seconds(), 3600);

  let workout = workout_with_times(Some("18:00"), Some("19:30"));
  assert_eq!(workout.planned_duration_seconds(), 5400);
}

#[test]
fn planned_duration_clamps_negative_spans() {
  let workout = workout_with_times(Some("12:00"), Some("10:00"));
  assert_eq!(workout.planned_duration_seconds(), 0);
}

#[test]
fn planned_duration_falls_back_when_unusable() {
  assert_eq!(
    workout_with_times(None, Some("11:00")).planned_duration_seconds(),
    DEFAULT_SESSION_SECONDS
  );
  assert_eq!(
    workout_with_times(Some("ten:00"), Some("11:00"))
      .planned_duration_seconds(),
    DEFAULT_SESSION_SECONDS
  );
  assert_eq!(
    workout_with_times(None, None).planned_duration_seconds(),
    DEFAULT_SESSION_SECONDS
  );
}

#[test]
fn calories_estimate_five_per_full_minute() {
  assert_eq!(estimated_calories(0), 0);
  assert_eq!(estimated_calories(59), 0);
  assert_eq!(estimated_calories(60), 5);
  assert_eq!(estimated_calories(600), 50);
}

#[test]
fn new_workout_starts_upcoming() {
  let workout = NewWorkout::new(d("2024-03-05"));
  assert_eq!(workout.status, WorkoutStatus::InProgress);
}

// ─── Status vocabularies ─────────────────────────────────────────────────────

#[test]
fn workout_status_text_round_trips() {
  for status in [
    WorkoutStatus::InProgress,
    WorkoutStatus::InGym,
    WorkoutStatus::Paused,
    WorkoutStatus::Completed,
    WorkoutStatus::Skipped,
  ] {
    assert_eq!(WorkoutStatus::parse(status.as_str()), Some(status));
  }
  assert_eq!(WorkoutStatus::parse("mystery"), None);
}

#[test]
fn schedule_status_text_round_trips() {
  for status in [
    ScheduleStatus::NotCompleted,
    ScheduleStatus::InProgress,
    ScheduleStatus::Completed,
  ] {
    assert_eq!(ScheduleStatus::parse(status.as_str()), Some(status));
  }
  assert_eq!(ScheduleStatus::parse(""), None);
}

#[test]
fn terminal_statuses() {
  assert!(WorkoutStatus::Completed.is_terminal());
  assert!(WorkoutStatus::Skipped.is_terminal());
  assert!(!WorkoutStatus::InGym.is_terminal());
  assert!(!WorkoutStatus::Paused.is_terminal());
}

// ─── Session transitions ─────────────────────────────────────────────────────

#[test]
fn session_happy_path() {
  let mut status = WorkoutStatus::InProgress;
  for (event, expected) in [
    (SessionEvent::Start, WorkoutStatus::InGym),
    (SessionEvent::Pause, WorkoutStatus::Paused),
    (SessionEvent::Resume, WorkoutStatus::InGym),
    (SessionEvent::Finish, WorkoutStatus::Completed),
  ] {
    status = apply(status, event).unwrap();
    assert_eq!(status, expected);
  }
}

#[test]
fn finish_is_legal_from_any_live_state() {
  for status in [
    WorkoutStatus::InProgress,
    WorkoutStatus::InGym,
    WorkoutStatus::Paused,
  ] {
    assert_eq!(
      apply(status, SessionEvent::Finish).unwrap(),
      WorkoutStatus::Completed
    );
  }
}

#[test]
fn skip_is_only_legal_before_starting() {
  assert_eq!(
    apply(WorkoutStatus::InProgress, SessionEvent::Skip).unwrap(),
    WorkoutStatus::Skipped
  );
  for status in [WorkoutStatus::InGym, WorkoutStatus::Paused] {
    assert!(apply(status, SessionEvent::Skip).is_err());
  }
}

#[test]
fn terminal_states_reject_every_event() {
  for status in [WorkoutStatus::Completed, WorkoutStatus::Skipped] {
    for event in [
      SessionEvent::Start,
      SessionEvent::Pause,
      SessionEvent::Resume,
      SessionEvent::Finish,
      SessionEvent::Skip,
    ] {
      let err = apply(status, event).unwrap_err();
      assert!(
        matches!(err, Error::InvalidTransition { .. }),
        "{status:?} + {event:?}"
      );
    }
  }
}

#[test]
fn pause_and_resume_require_the_right_state() {
  assert!(apply(WorkoutStatus::InProgress, SessionEvent::Pause).is_err());
  assert!(apply(WorkoutStatus::InGym, SessionEvent::Resume).is_err());
  assert!(apply(WorkoutStatus::InGym, SessionEvent::Start).is_err());
}

// ─── Meal record constructors ────────────────────────────────────────────────

#[test]
fn new_food_photo_defaults_to_blank_nutrition() {
  let photo = NewFoodPhoto::new("meals/lunch.jpg", dt("2024-03-05 12:30:00"));
  assert_eq!(photo.photo_path, "meals/lunch.jpg");
  assert!(photo.calories.is_none());
  assert!(photo.weight_g.is_none());
}
