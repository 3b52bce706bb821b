//! Built-in achievement catalog and the declarative unlock predicates.
//!
//! The stock entries below guarantee the app has a working achievement set
//! even without external config; extra entries can be added through TOML
//! using the same predicate grammar.

use serde::{Deserialize, Serialize};

use crate::domain::UserState;

/// When does an achievement unlock?
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum Unlock {
  LessonsCompleted { at_least: u32 },
  Streak { at_least: u32 },
  TotalXp { at_least: u64 },
  Level { at_least: u32 },
  HeartsFull,
}

impl Unlock {
  /// True when the snapshot satisfies the predicate.
  pub fn is_met(&self, state: &UserState, max_hearts: u8) -> bool {
    match self {
      Unlock::LessonsCompleted { at_least } => state.lessons_completed >= *at_least,
      Unlock::Streak { at_least } => state.streak >= *at_least,
      Unlock::TotalXp { at_least } => state.total_xp >= *at_least,
      Unlock::Level { at_least } => state.level >= *at_least,
      Unlock::HeartsFull => state.hearts == max_hearts,
    }
  }
}

/// Catalog entry. The catalog is assembled once at engine construction and
/// immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Achievement {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub xp_reward: u64,
  pub unlock: Unlock,
}

/// The stock catalog that ships with the app.
pub fn builtin_achievements() -> Vec<Achievement> {
  vec![
    Achievement {
      id: "first_lesson".into(),
      title: "First Lesson".into(),
      xp_reward: 50,
      unlock: Unlock::LessonsCompleted { at_least: 1 },
    },
    Achievement {
      id: "streak_7".into(),
      title: "Golden Streak".into(),
      xp_reward: 100,
      unlock: Unlock::Streak { at_least: 7 },
    },
    Achievement {
      id: "xp_100".into(),
      title: "Point Collector".into(),
      xp_reward: 75,
      unlock: Unlock::TotalXp { at_least: 100 },
    },
    Achievement {
      id: "level_5".into(),
      title: "Level Climber".into(),
      xp_reward: 150,
      unlock: Unlock::Level { at_least: 5 },
    },
    Achievement {
      id: "hearts_full".into(),
      title: "Full Heart".into(),
      xp_reward: 200,
      unlock: Unlock::HeartsFull,
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_ids_are_unique() {
    let catalog = builtin_achievements();
    let mut ids: Vec<_> = catalog.iter().map(|a| a.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), catalog.len());
  }

  #[test]
  fn hearts_full_tracks_the_configured_max() {
    let day = "2025-03-01".parse().unwrap();
    let mut u = UserState::new(day, 3);
    assert!(Unlock::HeartsFull.is_met(&u, 3));
    u.hearts = 2;
    assert!(!Unlock::HeartsFull.is_met(&u, 3));
  }

  #[test]
  fn achievement_parses_from_toml_predicate_grammar() {
    let a: Achievement = toml::from_str(
      r#"
        id = "xp_1000"
        title = "Point Hoarder"
        xp_reward = 300
        unlock = { metric = "total_xp", at_least = 1000 }
      "#,
    )
    .expect("achievement TOML");
    assert_eq!(a.unlock, Unlock::TotalXp { at_least: 1000 });
  }
}
