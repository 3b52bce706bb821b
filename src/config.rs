//! Loading scoring configuration (rule table + optional extra achievements) from TOML.
//!
//! See `ScoringConfig` and `Rules` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::catalog::Achievement;
use crate::domain::{Difficulty, ExerciseType};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ScoringConfig {
  #[serde(default)]
  pub rules: Rules,
  #[serde(default)]
  pub achievements: Vec<Achievement>,
}

/// Tunable rule table. Defaults reproduce the stock RoboPlay values; you can
/// override them in TOML if a deployment needs different pacing.
#[derive(Clone, Debug, Deserialize)]
pub struct Rules {
  pub easy_xp: u64,
  pub medium_xp: u64,
  pub hard_xp: u64,
  pub code_multiplier: f64,
  pub quiz_multiplier: f64,
  pub project_multiplier: f64,
  pub max_hearts: u8,
  pub daily_reward_xp: u64,
}

impl Default for Rules {
  fn default() -> Self {
    Self {
      easy_xp: 10,
      medium_xp: 25,
      hard_xp: 50,
      code_multiplier: 1.0,
      quiz_multiplier: 1.5,
      project_multiplier: 2.0,
      max_hearts: 5,
      daily_reward_xp: 25,
    }
  }
}

impl Rules {
  pub fn base_xp(&self, difficulty: Difficulty) -> u64 {
    match difficulty {
      Difficulty::Easy => self.easy_xp,
      Difficulty::Medium => self.medium_xp,
      Difficulty::Hard => self.hard_xp,
    }
  }

  pub fn multiplier(&self, exercise_type: ExerciseType) -> f64 {
    match exercise_type {
      ExerciseType::Code => self.code_multiplier,
      ExerciseType::Quiz => self.quiz_multiplier,
      ExerciseType::Project => self.project_multiplier,
    }
  }
}

/// Attempt to load `ScoringConfig` from a TOML file. On any parsing/IO
/// error, returns None and the engine falls back to stock rules.
pub fn load_scoring_config(path: &str) -> Option<ScoringConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<ScoringConfig>(&s) {
      Ok(cfg) => {
        info!(target: "roboplay_scoring", %path, "Loaded scoring config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "roboplay_scoring", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "roboplay_scoring", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Attempt to load `ScoringConfig` from SCORING_CONFIG_PATH.
pub fn load_scoring_config_from_env() -> Option<ScoringConfig> {
  let path = std::env::var("SCORING_CONFIG_PATH").ok()?;
  load_scoring_config(&path)
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;
  use crate::catalog::Unlock;

  #[test]
  fn stock_rules_match_the_xp_table() {
    let r = Rules::default();
    assert_eq!(r.base_xp(Difficulty::Easy), 10);
    assert_eq!(r.base_xp(Difficulty::Medium), 25);
    assert_eq!(r.base_xp(Difficulty::Hard), 50);
    assert_eq!(r.multiplier(ExerciseType::Code), 1.0);
    assert_eq!(r.multiplier(ExerciseType::Quiz), 1.5);
    assert_eq!(r.multiplier(ExerciseType::Project), 2.0);
    assert_eq!(r.max_hearts, 5);
    assert_eq!(r.daily_reward_xp, 25);
  }

  #[test]
  fn empty_config_falls_back_to_stock_rules() {
    let cfg: ScoringConfig = toml::from_str("").expect("empty TOML");
    assert_eq!(cfg.rules.medium_xp, 25);
    assert!(cfg.achievements.is_empty());
  }

  #[test]
  fn config_file_with_overrides_and_extra_achievement() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
      f,
      r#"
        [rules]
        easy_xp = 5
        medium_xp = 20
        hard_xp = 40
        code_multiplier = 1.0
        quiz_multiplier = 2.0
        project_multiplier = 3.0
        max_hearts = 3
        daily_reward_xp = 10

        [[achievements]]
        id = "streak_30"
        title = "Iron Streak"
        xp_reward = 500
        unlock = {{ metric = "streak", at_least = 30 }}
      "#
    )
    .expect("write config");

    let cfg = load_scoring_config(f.path().to_str().expect("utf8 path")).expect("config loads");
    assert_eq!(cfg.rules.base_xp(Difficulty::Easy), 5);
    assert_eq!(cfg.rules.max_hearts, 3);
    assert_eq!(cfg.achievements.len(), 1);
    assert_eq!(cfg.achievements[0].unlock, Unlock::Streak { at_least: 30 });
  }

  #[test]
  fn unreadable_or_invalid_config_yields_none() {
    assert!(load_scoring_config("/nonexistent/scoring.toml").is_none());

    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    write!(f, "rules = \"not a table\"").expect("write config");
    assert!(load_scoring_config(f.path().to_str().expect("utf8 path")).is_none());
  }
}
