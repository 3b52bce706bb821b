//! Engine boundary DTOs (serde ready).
//! Keep this small and stable so the host API layer and the engine can
//! evolve independently. Field spelling matches the app's stored documents
//! (camelCase, `totalXP`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Achievement;
use crate::domain::{ExerciseOutcome, UserState};

/// Events the host application feeds into the engine.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    ExerciseSubmitted {
        outcome: ExerciseOutcome,
        today: NaiveDate,
    },
    LessonCompleted {
        today: NaiveDate,
    },
    DayElapsed {
        today: NaiveDate,
    },
    HeartLost,
    HeartGained,
    DailyRewardClaimed {
        today: NaiveDate,
    },
}

/// What one event application produced.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
    /// The new snapshot; the caller persists it.
    pub state: UserState,
    /// XP granted by this event, achievement rewards included.
    pub xp_awarded: u64,
    /// Newly unlocked achievements, already merged into `state`.
    pub granted: Vec<Achievement>,
    pub leveled_up: bool,
}
