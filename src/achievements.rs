//! Achievement evaluation: report which catalog entries a snapshot has newly earned.

use tracing::{debug, instrument};

use crate::catalog::Achievement;
use crate::domain::UserState;

/// Return the achievements whose predicate the snapshot meets and whose id
/// the user does not already hold. The list is fresh and owned by the
/// caller, which merges it into its authoritative set; the snapshot itself
/// is never touched, so re-running with the merged set yields nothing.
#[instrument(level = "debug", skip_all, fields(held = state.achievements.len()))]
pub fn check_achievements(catalog: &[Achievement], state: &UserState, max_hearts: u8) -> Vec<Achievement> {
  let mut granted = Vec::new();
  for a in catalog {
    if state.achievements.contains(&a.id) {
      continue;
    }
    if a.unlock.is_met(state, max_hearts) {
      debug!(target: "scoring", id = %a.id, "Achievement predicate met");
      granted.push(a.clone());
    }
  }
  granted
}
