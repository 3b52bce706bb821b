//! Domain models used by the engine: exercise inputs, the user snapshot, and leaderboard rows.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// How hard was the exercise?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}
impl Default for Difficulty {
  fn default() -> Self { Difficulty::Easy }
}

impl FromStr for Difficulty {
  type Err = ScoringError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "easy" => Ok(Difficulty::Easy),
      "medium" => Ok(Difficulty::Medium),
      "hard" => Ok(Difficulty::Hard),
      other => Err(ScoringError::InvalidDifficulty(other.to_string())),
    }
  }
}

/// What kind of exercise produced the submission?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
  Code,
  Quiz,
  Project,
}
impl Default for ExerciseType {
  fn default() -> Self { ExerciseType::Code }
}

impl FromStr for ExerciseType {
  type Err = ScoringError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "code" => Ok(ExerciseType::Code),
      "quiz" => Ok(ExerciseType::Quiz),
      "project" => Ok(ExerciseType::Project),
      other => Err(ScoringError::InvalidType(other.to_string())),
    }
  }
}

/// Exercise result delivered by the submission flow. Input to the XP
/// calculation only; the engine never stores it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ExerciseOutcome {
  pub difficulty: Difficulty,
  #[serde(rename = "type")]
  pub exercise_type: ExerciseType,
}

impl ExerciseOutcome {
  /// Parse from the raw strings an API layer receives. Unknown values are
  /// rejected, never defaulted.
  pub fn parse(difficulty: &str, exercise_type: &str) -> Result<Self, ScoringError> {
    Ok(Self {
      difficulty: difficulty.parse()?,
      exercise_type: exercise_type.parse()?,
    })
  }
}

/// Gamification snapshot for one user. The caller owns storage; the engine
/// only ever derives new snapshots from old ones.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
  /// Period-scoped XP counter; when a period rolls over is caller policy.
  pub xp: u64,
  /// Lifetime XP, monotonically non-decreasing.
  #[serde(rename = "totalXP")]
  pub total_xp: u64,
  /// Derived: `total_xp / 100 + 1`.
  pub level: u32,
  /// Consecutive-day activity counter.
  pub streak: u32,
  pub hearts: u8,
  #[serde(default)]
  pub achievements: BTreeSet<String>,
  #[serde(default)]
  pub lessons_completed: u32,
  pub last_activity_date: NaiveDate,
  #[serde(default)]
  pub last_claim_date: Option<NaiveDate>,
}

impl UserState {
  /// Fresh snapshot at account registration.
  pub fn new(today: NaiveDate, max_hearts: u8) -> Self {
    Self {
      xp: 0,
      total_xp: 0,
      level: 1,
      streak: 0,
      hearts: max_hearts,
      achievements: BTreeSet::new(),
      lessons_completed: 0,
      last_activity_date: today,
      last_claim_date: None,
    }
  }

  /// Period rollover hook for the caller; the engine never invokes this.
  pub fn reset_period_xp(&mut self) {
    self.xp = 0;
  }
}

/// Podium medal for the top three leaderboard ranks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
  Gold,
  Silver,
  Bronze,
  None,
}

/// Caller-supplied leaderboard row.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
  pub user_id: String,
  #[serde(rename = "totalXP")]
  pub total_xp: u64,
  pub level: u32,
  pub streak: u32,
}

/// Row after ranking: 1-based position plus medal.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
  #[serde(flatten)]
  pub entry: LeaderboardEntry,
  pub rank: u32,
  pub medal: Medal,
}
