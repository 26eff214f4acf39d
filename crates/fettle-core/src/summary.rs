//! Day-level nutrition aggregation.

use serde::{Deserialize, Serialize};

use crate::{client::NutritionTargets, nutrition::FoodPhoto};

/// Totals consumed on one day, next to the day's goals.
///
/// Sums treat missing per-photo values as zero; a day with no logged meals
/// is all zeroes, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
  pub calories:   i64,
  pub proteins_g: f64,
  pub fats_g:     f64,
  pub carbs_g:    f64,
  pub water_ml:   f64,
  pub targets:    NutritionTargets,
}

impl DaySummary {
  /// Reduce one day's meal records against the given goals.
  pub fn for_day(photos: &[FoodPhoto], targets: NutritionTargets) -> Self {
    let mut summary = Self {
      calories:   0,
      proteins_g: 0.0,
      fats_g:     0.0,
      carbs_g:    0.0,
      water_ml:   0.0,
      targets,
    };
    for photo in photos {
      summary.calories += photo.calories.unwrap_or(0);
      summary.proteins_g += photo.proteins_g.unwrap_or(0.0);
      summary.fats_g += photo.fats_g.unwrap_or(0.0);
      summary.carbs_g += photo.carbs_g.unwrap_or(0.0);
      summary.water_ml += photo.water_ml.unwrap_or(0.0);
    }
    summary
  }

  /// Fraction of the calorie goal consumed, for progress displays. A
  /// non-positive goal reads as no progress rather than dividing by zero.
  pub fn calorie_progress(&self) -> f64 {
    if self.targets.calories <= 0 {
      return 0.0;
    }
    self.calories as f64 / self.targets.calories as f64
  }
}
