//! The exercise catalog.

use serde::{Deserialize, Serialize};

use crate::date::LogDateTime;

/// How demanding an exercise is.
///
/// Stored as plain text; decoding is lenient and reads anything
/// unrecognised as [`Difficulty::Beginner`].
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }

  /// Strict decode; `None` for anything outside the vocabulary.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "beginner" => Some(Self::Beginner),
      "intermediate" => Some(Self::Intermediate),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }
}

/// A catalog exercise. Media paths point at files under the app data
/// directory; no binary data lives in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
  pub id:           i64,
  pub name:         String,
  pub description:  String,
  pub image_path:   Option<String>,
  pub video_path:   Option<String>,
  pub tips:         Option<String>,
  pub muscle_group: Option<String>,
  pub difficulty:   Difficulty,
  pub created_at:   Option<LogDateTime>,
}

/// An exercise not yet persisted; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
  pub name:         String,
  pub description:  String,
  pub image_path:   Option<String>,
  pub video_path:   Option<String>,
  pub tips:         Option<String>,
  pub muscle_group: Option<String>,
  pub difficulty:   Difficulty,
  pub created_at:   Option<LogDateTime>,
}

impl NewExercise {
  pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      name:         name.into(),
      description:  description.into(),
      image_path:   None,
      video_path:   None,
      tips:         None,
      muscle_group: None,
      difficulty:   Difficulty::default(),
      created_at:   None,
    }
  }
}
