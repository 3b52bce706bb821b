//! Leaderboard ranking: stable ordering, 1-based ranks, podium medals.

use tracing::instrument;

use crate::domain::{LeaderboardEntry, Medal, RankedEntry};

/// Order users by total XP, then level, then streak (all descending). The
/// sort is stable: rows with identical keys keep their input order. Rank is
/// the 1-based position after sorting.
#[instrument(level = "debug", skip_all, fields(users = entries.len()))]
pub fn rank_users(entries: &[LeaderboardEntry]) -> Vec<RankedEntry> {
  let mut sorted = entries.to_vec();
  sorted.sort_by(|a, b| {
    b.total_xp
      .cmp(&a.total_xp)
      .then(b.level.cmp(&a.level))
      .then(b.streak.cmp(&a.streak))
  });
  sorted
    .into_iter()
    .enumerate()
    .map(|(i, entry)| {
      let rank = i as u32 + 1;
      RankedEntry { entry, rank, medal: medal_for(rank) }
    })
    .collect()
}

fn medal_for(rank: u32) -> Medal {
  match rank {
    1 => Medal::Gold,
    2 => Medal::Silver,
    3 => Medal::Bronze,
    _ => Medal::None,
  }
}

/// Rank of one user on the board, if present.
pub fn user_rank(entries: &[LeaderboardEntry], user_id: &str) -> Option<u32> {
  rank_users(entries)
    .into_iter()
    .find(|r| r.entry.user_id == user_id)
    .map(|r| r.rank)
}

/// The first `limit` rows of the ranked board.
pub fn top_users(entries: &[LeaderboardEntry], limit: usize) -> Vec<RankedEntry> {
  let mut ranked = rank_users(entries);
  ranked.truncate(limit);
  ranked
}
