//! Pure progression math: XP awards, levels, streaks, hearts, and the daily
//! reward check. Everything here is deterministic and side-effect free; the
//! caller owns the snapshot and applies the results.

use chrono::NaiveDate;

use crate::config::Rules;
use crate::domain::{Difficulty, ExerciseType};
use crate::error::ScoringError;

/// XP span of one level.
pub const XP_PER_LEVEL: u64 = 100;

/// XP for one exercise: base by difficulty times the type multiplier,
/// rounded half away from zero (medium quiz: 25 x 1.5 = 37.5 -> 38).
pub fn calculate_xp(rules: &Rules, difficulty: Difficulty, exercise_type: ExerciseType) -> u64 {
  let base = rules.base_xp(difficulty);
  let mult = rules.multiplier(exercise_type);
  (base as f64 * mult).round() as u64
}

pub fn calculate_level(total_xp: u64) -> u32 {
  (total_xp / XP_PER_LEVEL) as u32 + 1
}

pub fn xp_to_next_level(total_xp: u64) -> u64 {
  (total_xp / XP_PER_LEVEL + 1) * XP_PER_LEVEL - total_xp
}

/// Progress into the current level as a percentage in [0, 100).
pub fn level_progress(total_xp: u64) -> f32 {
  (total_xp % XP_PER_LEVEL) as f32 / XP_PER_LEVEL as f32 * 100.0
}

/// Outcome of comparing an activity date against the stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreakUpdate {
  /// Same calendar day; nothing changes.
  Unchanged,
  /// Consecutive day; the streak grows by one from the caller's prior value.
  Extended,
  /// A gap of more than one day; the streak restarts at zero.
  Reset,
}

/// Calendar-day streak transition. `today` must not precede `last_activity`.
pub fn update_streak(last_activity: NaiveDate, today: NaiveDate) -> Result<StreakUpdate, ScoringError> {
  match days_between(last_activity, today)? {
    0 => Ok(StreakUpdate::Unchanged),
    1 => Ok(StreakUpdate::Extended),
    _ => Ok(StreakUpdate::Reset),
  }
}

/// Map a transition onto the caller-tracked counter.
pub fn apply_streak(prior: u32, update: StreakUpdate) -> u32 {
  match update {
    StreakUpdate::Unchanged => prior,
    StreakUpdate::Extended => prior + 1,
    StreakUpdate::Reset => 0,
  }
}

/// Whole calendar days from `last` to `today`; negative spans are rejected.
pub(crate) fn days_between(last: NaiveDate, today: NaiveDate) -> Result<i64, ScoringError> {
  let days = today.signed_duration_since(last).num_days();
  if days < 0 {
    return Err(ScoringError::InvalidTimestamp { last, today });
  }
  Ok(days)
}

/// One heart down, floor at zero.
pub fn lose_heart(current: u8) -> u8 {
  current.saturating_sub(1)
}

/// One heart back, capped at `max`.
pub fn gain_heart(current: u8, max: u8) -> u8 {
  current.saturating_add(1).min(max)
}

/// Result of a daily-reward check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyReward {
  pub can_claim: bool,
  pub xp: u64,
}

/// Claimable at most once per calendar day; a repeat claim on the same day
/// awards nothing and is not an error.
pub fn daily_reward(last_claim: Option<NaiveDate>, today: NaiveDate, reward_xp: u64) -> DailyReward {
  let can_claim = last_claim.map_or(true, |d| d != today);
  DailyReward {
    can_claim,
    xp: if can_claim { reward_xp } else { 0 },
  }
}
