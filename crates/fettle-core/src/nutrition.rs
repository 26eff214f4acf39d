//! Dishes (the recipe catalog) and food photos (the meal log).

use serde::{Deserialize, Serialize};

use crate::date::LogDateTime;

// ─── Dishes ──────────────────────────────────────────────────────────────────

/// A catalog recipe with its nutrition per serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
  pub id:          i64,
  pub name:        String,
  pub description: Option<String>,
  pub photo_path:  Option<String>,
  pub calories:    Option<i64>,
  pub proteins_g:  Option<f64>,
  pub fats_g:      Option<f64>,
  pub carbs_g:     Option<f64>,
  pub water_ml:    Option<f64>,
  pub created_at:  Option<LogDateTime>,
}

/// A dish not yet persisted; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDish {
  pub name:        String,
  pub description: Option<String>,
  pub photo_path:  Option<String>,
  pub calories:    Option<i64>,
  pub proteins_g:  Option<f64>,
  pub fats_g:      Option<f64>,
  pub carbs_g:     Option<f64>,
  pub water_ml:    Option<f64>,
  pub created_at:  Option<LogDateTime>,
}

impl NewDish {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:        name.into(),
      description: None,
      photo_path:  None,
      calories:    None,
      proteins_g:  None,
      fats_g:      None,
      carbs_g:     None,
      water_ml:    None,
      created_at:  None,
    }
  }
}

// ─── Food photos ─────────────────────────────────────────────────────────────

/// One logged meal: a photo plus whatever nutrition the user filled in.
///
/// The photo path is an opaque reference into the app data directory; the
/// store never opens it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPhoto {
  pub id:         i64,
  pub photo_path: String,
  pub name:       Option<String>,
  pub calories:   Option<i64>,
  pub proteins_g: Option<f64>,
  pub fats_g:     Option<f64>,
  pub carbs_g:    Option<f64>,
  pub water_ml:   Option<f64>,
  pub weight_g:   Option<f64>,
  /// When the meal was eaten. Decides which day bucket the record lands in.
  pub taken_at:   LogDateTime,
  pub created_at: Option<LogDateTime>,
}

/// A meal record not yet persisted; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodPhoto {
  pub photo_path: String,
  pub name:       Option<String>,
  pub calories:   Option<i64>,
  pub proteins_g: Option<f64>,
  pub fats_g:     Option<f64>,
  pub carbs_g:    Option<f64>,
  pub water_ml:   Option<f64>,
  pub weight_g:   Option<f64>,
  pub taken_at:   LogDateTime,
  pub created_at: Option<LogDateTime>,
}

impl NewFoodPhoto {
  pub fn new(photo_path: impl Into<String>, taken_at: LogDateTime) -> Self {
    Self {
      photo_path: photo_path.into(),
      name:       None,
      calories:   None,
      proteins_g: None,
      fats_g:     None,
      carbs_g:    None,
      water_ml:   None,
      weight_g:   None,
      taken_at,
      created_at: None,
    }
  }
}
