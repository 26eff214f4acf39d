//! The client profile — the singleton row describing the app's one user.

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::date::LogDate;

/// Profile gender, as far as goal math cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Male => "male",
      Self::Female => "female",
    }
  }

  /// Strict decode; `None` for anything outside the vocabulary.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "male" => Some(Self::Male),
      "female" => Some(Self::Female),
      _ => None,
    }
  }
}

/// Daily nutrition goals. The `Default` values are the app-wide fallbacks
/// used whenever the profile leaves a goal blank or no profile exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
  pub calories:   i64,
  pub proteins_g: f64,
  pub fats_g:     f64,
  pub carbs_g:    f64,
  pub water_ml:   f64,
}

impl Default for NutritionTargets {
  fn default() -> Self {
    Self {
      calories:   2200,
      proteins_g: 150.0,
      fats_g:     70.0,
      carbs_g:    250.0,
      water_ml:   2500.0,
    }
  }
}

/// The singleton client profile.
///
/// Every field the user can leave blank is optional. Goal lookups go through
/// [`Client::targets`], which falls back field by field, so a half-filled
/// profile still yields usable numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  pub id:                i64,
  pub gender:            Option<Gender>,
  pub age:               Option<i64>,
  pub height_cm:         Option<f64>,
  pub current_weight_kg: Option<f64>,
  pub target_weight_kg:  Option<f64>,
  pub target_date:       Option<LogDate>,
  pub target_calories:   Option<i64>,
  pub target_proteins_g: Option<f64>,
  pub target_fats_g:     Option<f64>,
  pub target_carbs_g:    Option<f64>,
  pub target_water_ml:   Option<f64>,
}

impl Client {
  /// The fixed id of the singleton row.
  pub const ID: i64 = 1;

  /// The profile created on the spot when none exists yet.
  pub fn default_profile() -> Self {
    Self {
      id:                Self::ID,
      gender:            Some(Gender::Male),
      age:               Some(30),
      height_cm:         Some(180.0),
      current_weight_kg: Some(75.0),
      target_weight_kg:  Some(70.0),
      target_date:       LogDate::today()
        .date()
        .checked_add_months(Months::new(5))
        .map(LogDate::new),
      target_calories:   Some(2200),
      target_proteins_g: Some(120.0),
      target_fats_g:     Some(70.0),
      target_carbs_g:    Some(300.0),
      target_water_ml:   Some(2000.0),
    }
  }

  /// Daily goals, with each missing field replaced by the app-wide default.
  pub fn targets(&self) -> NutritionTargets {
    let fallback = NutritionTargets::default();
    NutritionTargets {
      calories:   self.target_calories.unwrap_or(fallback.calories),
      proteins_g: self.target_proteins_g.unwrap_or(fallback.proteins_g),
      fats_g:     self.target_fats_g.unwrap_or(fallback.fats_g),
      carbs_g:    self.target_carbs_g.unwrap_or(fallback.carbs_g),
      water_ml:   self.target_water_ml.unwrap_or(fallback.water_ml),
    }
  }
}
