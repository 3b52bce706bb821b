//! RoboPlay · Scoring Demo
//!
//! Replays a scripted multi-day scenario through the engine and prints each
//! user's final snapshot plus the ranked leaderboard as JSON. Useful for
//! eyeballing rule changes (SCORING_CONFIG_PATH) without a running app.
//!
//! Important env variables:
//!   SCORING_CONFIG_PATH : path to TOML config (rule table + extra achievements)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

use chrono::NaiveDate;
use tracing::{info, instrument};

use roboplay_scoring::domain::{ExerciseOutcome, LeaderboardEntry, UserState};
use roboplay_scoring::leaderboard::rank_users;
use roboplay_scoring::logic::apply_event;
use roboplay_scoring::protocol::EngineEvent;
use roboplay_scoring::{telemetry, Engine, EngineCell, ScoringError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // The demo owns the cell and passes the engine by reference, the same way
  // an embedding app would.
  let cell = EngineCell::new();
  let engine = cell.acquire();

  let start: NaiveDate = "2025-03-01".parse()?;

  // Amal: a lesson on day one, then a quiz every day for eight days.
  let mut amal_events = vec![EngineEvent::LessonCompleted { today: start }];
  let mut day = start;
  for _ in 0..8 {
    amal_events.push(EngineEvent::ExerciseSubmitted {
      outcome: ExerciseOutcome::parse("medium", "quiz")?,
      today: day,
    });
    day = day.succ_opt().ok_or("date overflow")?;
  }
  let amal = play(&engine, "amal", UserState::new(start, engine.max_hearts()), &amal_events)?;

  // Omar: two easy days, a skipped day that breaks the streak, two misses.
  let omar_events = vec![
    EngineEvent::ExerciseSubmitted { outcome: ExerciseOutcome::parse("easy", "code")?, today: start },
    EngineEvent::ExerciseSubmitted {
      outcome: ExerciseOutcome::parse("easy", "code")?,
      today: "2025-03-02".parse()?,
    },
    EngineEvent::ExerciseSubmitted {
      outcome: ExerciseOutcome::parse("medium", "code")?,
      today: "2025-03-05".parse()?,
    },
    EngineEvent::HeartLost,
    EngineEvent::HeartLost,
  ];
  let omar = play(&engine, "omar", UserState::new(start, engine.max_hearts()), &omar_events)?;

  // Lina: daily rewards (one double-claim) and a single big project.
  let lina_events = vec![
    EngineEvent::DailyRewardClaimed { today: start },
    EngineEvent::ExerciseSubmitted {
      outcome: ExerciseOutcome::parse("hard", "project")?,
      today: "2025-03-02".parse()?,
    },
    EngineEvent::DailyRewardClaimed { today: "2025-03-02".parse()? },
    EngineEvent::DailyRewardClaimed { today: "2025-03-02".parse()? },
  ];
  let lina = play(&engine, "lina", UserState::new(start, engine.max_hearts()), &lina_events)?;

  let board: Vec<LeaderboardEntry> = [("amal", &amal), ("omar", &omar), ("lina", &lina)]
    .into_iter()
    .map(|(id, u)| LeaderboardEntry {
      user_id: id.to_string(),
      total_xp: u.total_xp,
      level: u.level,
      streak: u.streak,
    })
    .collect();

  println!("{}", serde_json::to_string_pretty(&rank_users(&board))?);
  Ok(())
}

/// Run one user's event script through the engine, logging what each event
/// produced, and return the final snapshot.
#[instrument(level = "info", skip(engine, state, events), fields(%name, events = events.len()))]
fn play(engine: &Engine, name: &str, state: UserState, events: &[EngineEvent]) -> Result<UserState, ScoringError> {
  let mut current = state;
  for event in events {
    let out = apply_event(engine, &current, event)?;
    if !out.granted.is_empty() || out.leveled_up {
      let ids: Vec<&str> = out.granted.iter().map(|a| a.id.as_str()).collect();
      info!(target: "scoring", user = %name, xp_awarded = out.xp_awarded, granted = ?ids, leveled_up = out.leveled_up, "Event outcome");
    }
    current = out.state;
  }
  info!(
    target: "roboplay_scoring",
    user = %name,
    total_xp = current.total_xp,
    level = current.level,
    streak = current.streak,
    "Scenario finished"
  );
  Ok(current)
}
