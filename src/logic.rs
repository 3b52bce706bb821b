//! Core engine behaviors: one event in, one new snapshot out.
//!
//! This includes:
//!   - Exercise submissions and lesson completions (XP award + streak)
//!   - Day rollover, heart changes, daily rewards
//!   - The single achievement evaluation pass shared by every event

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::achievements::check_achievements;
use crate::context::Engine;
use crate::domain::{ExerciseOutcome, UserState};
use crate::error::ScoringError;
use crate::progression::{
  apply_streak, calculate_level, calculate_xp, daily_reward, days_between, gain_heart, lose_heart,
  update_streak,
};
use crate::protocol::{EngineEvent, EventOutcome};

/// Apply one event to a snapshot. The input is never mutated; the returned
/// outcome carries the new snapshot plus everything the caller needs to
/// answer the request that triggered the event.
///
/// Achievements are evaluated once per call, after the event's own XP is
/// applied. A grant whose reward crosses another threshold is reported by
/// the next call.
#[instrument(level = "info", skip(engine, state))]
pub fn apply_event(engine: &Engine, state: &UserState, event: &EngineEvent) -> Result<EventOutcome, ScoringError> {
  let prior_level = state.level;
  let mut next = state.clone();
  let mut awarded: u64 = 0;

  match event {
    EngineEvent::ExerciseSubmitted { outcome, today } => {
      record_activity(&mut next, *today)?;
      awarded += calculate_xp(&engine.rules, outcome.difficulty, outcome.exercise_type);
    }
    EngineEvent::LessonCompleted { today } => {
      record_activity(&mut next, *today)?;
      next.lessons_completed += 1;
    }
    EngineEvent::DayElapsed { today } => {
      // No activity: the streak only breaks once a full day has been skipped.
      if days_between(next.last_activity_date, *today)? > 1 {
        next.streak = 0;
      }
    }
    EngineEvent::HeartLost => {
      next.hearts = lose_heart(next.hearts);
    }
    EngineEvent::HeartGained => {
      next.hearts = gain_heart(next.hearts, engine.max_hearts());
    }
    EngineEvent::DailyRewardClaimed { today } => {
      let reward = daily_reward(next.last_claim_date, *today, engine.rules.daily_reward_xp);
      if reward.can_claim {
        next.last_claim_date = Some(*today);
        awarded += reward.xp;
      }
    }
  }

  award_xp(&mut next, awarded);

  let granted = check_achievements(engine.catalog(), &next, engine.max_hearts());
  for a in &granted {
    next.achievements.insert(a.id.clone());
    award_xp(&mut next, a.xp_reward);
    awarded += a.xp_reward;
    info!(target: "scoring", id = %a.id, xp_reward = a.xp_reward, "Achievement granted");
  }

  let leveled_up = next.level > prior_level;
  if leveled_up {
    info!(target: "scoring", from = prior_level, to = next.level, "Level up");
  }

  Ok(EventOutcome { state: next, xp_awarded: awarded, granted, leveled_up })
}

/// Convenience for API-style callers holding raw strings; unknown
/// difficulty/type values are rejected, never defaulted.
#[instrument(level = "info", skip(engine, state), fields(%difficulty, %exercise_type))]
pub fn submit_exercise(
  engine: &Engine,
  state: &UserState,
  difficulty: &str,
  exercise_type: &str,
  today: NaiveDate,
) -> Result<EventOutcome, ScoringError> {
  let outcome = ExerciseOutcome::parse(difficulty, exercise_type)?;
  apply_event(engine, state, &EngineEvent::ExerciseSubmitted { outcome, today })
}

/// Streak transition + activity stamp shared by submission-type events.
fn record_activity(state: &mut UserState, today: NaiveDate) -> Result<(), ScoringError> {
  let update = update_streak(state.last_activity_date, today)?;
  state.streak = apply_streak(state.streak, update);
  state.last_activity_date = today;
  Ok(())
}

/// Bump both XP counters and re-derive the level.
fn award_xp(state: &mut UserState, amount: u64) {
  if amount == 0 {
    return;
  }
  state.xp += amount;
  state.total_xp += amount;
  state.level = calculate_level(state.total_xp);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ScoringConfig;
  use crate::domain::{Difficulty, ExerciseType};

  fn day(s: &str) -> NaiveDate {
    s.parse().expect("test date")
  }

  fn engine() -> Engine {
    Engine::new(ScoringConfig::default())
  }

  /// Registered on day one, hearts below max so hearts_full stays quiet.
  fn seasoned_user() -> UserState {
    let mut u = UserState::new(day("2025-03-01"), 5);
    u.hearts = 3;
    u
  }

  #[test]
  fn submission_awards_xp_and_extends_streak() {
    let engine = engine();
    let u = seasoned_user();
    let event = EngineEvent::ExerciseSubmitted {
      outcome: ExerciseOutcome { difficulty: Difficulty::Medium, exercise_type: ExerciseType::Quiz },
      today: day("2025-03-02"),
    };

    let out = apply_event(&engine, &u, &event).expect("outcome");
    assert_eq!(out.xp_awarded, 38);
    assert_eq!(out.state.total_xp, 38);
    assert_eq!(out.state.xp, 38);
    assert_eq!(out.state.streak, 1);
    assert_eq!(out.state.last_activity_date, day("2025-03-02"));
    assert!(!out.leveled_up);
    // Input snapshot untouched.
    assert_eq!(u.total_xp, 0);
  }

  #[test]
  fn streak_extension_builds_on_the_prior_value() {
    let engine = engine();
    let mut u = seasoned_user();
    u.streak = 5;

    let out = apply_event(
      &engine,
      &u,
      &EngineEvent::LessonCompleted { today: day("2025-03-02") },
    )
    .expect("outcome");
    assert_eq!(out.state.streak, 6);
  }

  #[test]
  fn lesson_completion_grants_first_lesson() {
    let engine = engine();
    let u = seasoned_user();

    let out = apply_event(
      &engine,
      &u,
      &EngineEvent::LessonCompleted { today: day("2025-03-01") },
    )
    .expect("outcome");
    assert_eq!(out.state.lessons_completed, 1);
    let ids: Vec<_> = out.granted.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["first_lesson"]);
    assert_eq!(out.xp_awarded, 50);
    assert!(out.state.achievements.contains("first_lesson"));
  }

  #[test]
  fn reward_crossing_a_threshold_is_reported_next_call() {
    let engine = engine();
    let mut u = seasoned_user();
    u.xp = 60;
    u.total_xp = 60;

    // first_lesson's 50 XP lands after the evaluation pass, so xp_100 is
    // not met at evaluation time even though the snapshot ends at 110.
    let out = apply_event(
      &engine,
      &u,
      &EngineEvent::LessonCompleted { today: day("2025-03-01") },
    )
    .expect("outcome");
    assert_eq!(out.state.total_xp, 110);
    let ids: Vec<_> = out.granted.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["first_lesson"]);

    // The next event, whatever it is, reports the crossed threshold.
    let out2 = apply_event(&engine, &out.state, &EngineEvent::HeartLost).expect("outcome");
    let ids2: Vec<_> = out2.granted.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids2, ["xp_100"]);
    assert_eq!(out2.xp_awarded, 75);
  }

  #[test]
  fn day_elapsed_resets_only_after_a_skipped_day() {
    let engine = engine();
    let mut u = seasoned_user();
    u.streak = 4;

    // Yesterday was active: the streak survives today's rollover.
    let kept = apply_event(&engine, &u, &EngineEvent::DayElapsed { today: day("2025-03-02") })
      .expect("outcome");
    assert_eq!(kept.state.streak, 4);

    let reset = apply_event(&engine, &u, &EngineEvent::DayElapsed { today: day("2025-03-03") })
      .expect("outcome");
    assert_eq!(reset.state.streak, 0);
  }

  #[test]
  fn hearts_events_clamp_and_unlock_full_hearts() {
    let engine = engine();
    let mut u = seasoned_user();
    u.hearts = 1;

    let out = apply_event(&engine, &u, &EngineEvent::HeartLost).expect("outcome");
    assert_eq!(out.state.hearts, 0);
    let out = apply_event(&engine, &out.state, &EngineEvent::HeartLost).expect("outcome");
    assert_eq!(out.state.hearts, 0);

    let mut almost = seasoned_user();
    almost.hearts = 4;
    let out = apply_event(&engine, &almost, &EngineEvent::HeartGained).expect("outcome");
    assert_eq!(out.state.hearts, 5);
    let ids: Vec<_> = out.granted.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["hearts_full"]);
    assert_eq!(out.xp_awarded, 200);
  }

  #[test]
  fn daily_reward_claims_once_per_day() {
    let engine = engine();
    let u = seasoned_user();

    let out = apply_event(
      &engine,
      &u,
      &EngineEvent::DailyRewardClaimed { today: day("2025-03-02") },
    )
    .expect("outcome");
    assert_eq!(out.xp_awarded, 25);
    assert_eq!(out.state.last_claim_date, Some(day("2025-03-02")));

    let repeat = apply_event(
      &engine,
      &out.state,
      &EngineEvent::DailyRewardClaimed { today: day("2025-03-02") },
    )
    .expect("outcome");
    assert_eq!(repeat.xp_awarded, 0);
    assert_eq!(repeat.state.total_xp, out.state.total_xp);
  }

  #[test]
  fn reversed_timestamps_are_rejected() {
    let engine = engine();
    let u = seasoned_user();
    let err = apply_event(
      &engine,
      &u,
      &EngineEvent::LessonCompleted { today: day("2025-02-20") },
    )
    .unwrap_err();
    assert!(matches!(err, ScoringError::InvalidTimestamp { .. }));
  }

  #[test]
  fn submit_exercise_rejects_unknown_strings() {
    let engine = engine();
    let u = seasoned_user();
    let err = submit_exercise(&engine, &u, "brutal", "code", day("2025-03-02")).unwrap_err();
    assert_eq!(err, ScoringError::InvalidDifficulty("brutal".into()));

    // 100 XP lands exactly on the xp_100 threshold, so its 75 XP rides along.
    let ok = submit_exercise(&engine, &u, "hard", "project", day("2025-03-02")).expect("outcome");
    assert_eq!(ok.xp_awarded, 175);
    assert_eq!(ok.state.total_xp, 175);
    assert!(ok.leveled_up);
  }
}
