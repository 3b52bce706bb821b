//! RoboPlay · Scoring Engine
//!
//! - Pure gamification math: XP awards, streaks, hearts, levels
//! - Achievement catalog + evaluator, leaderboard ranker
//! - Event-driven transitions over caller-owned user snapshots
//!
//! The HTTP layer, persistence, auth, and the code-execution sandbox are
//! external collaborators; this crate computes, the host stores and serves.
//!
//! Important env variables:
//!   SCORING_CONFIG_PATH : path to TOML config (rule table + extra achievements)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

pub mod telemetry;
pub mod error;
pub mod domain;
pub mod config;
pub mod catalog;
pub mod context;
pub mod progression;
pub mod achievements;
pub mod leaderboard;
pub mod protocol;
pub mod logic;

pub use context::{Engine, EngineCell};
pub use error::ScoringError;
