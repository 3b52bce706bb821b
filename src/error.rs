//! Typed failures surfaced to callers. All conditions are deterministic
//! given the same inputs; nothing here is retryable.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScoringError {
  /// Difficulty outside {easy, medium, hard}. Never coerced to a default.
  #[error("invalid difficulty '{0}'")]
  InvalidDifficulty(String),
  /// Exercise type outside {code, quiz, project}. Never coerced to a default.
  #[error("invalid exercise type '{0}'")]
  InvalidType(String),
  /// `today` precedes the stored date; callers must supply monotonically
  /// sane timestamps.
  #[error("invalid timestamp: today {today} precedes last activity {last}")]
  InvalidTimestamp { last: NaiveDate, today: NaiveDate },
}
