//! Engine context: rule table plus the assembled achievement catalog, and
//! the shared lazily-initialized cell handed to callers.
//!
//! This module owns:
//!   - `Engine`: rules + catalog, built once from config, immutable after
//!   - `EngineCell`: explicit acquire/reset lifecycle; the embedding app
//!     owns the cell and passes it by reference instead of reaching for a
//!     hidden module-level singleton

use std::sync::{Arc, RwLock};

use tracing::{error, info, instrument};

use crate::catalog::{builtin_achievements, Achievement};
use crate::config::{load_scoring_config_from_env, Rules, ScoringConfig};

#[derive(Debug)]
pub struct Engine {
    pub rules: Rules,
    catalog: Vec<Achievement>,
}

impl Engine {
    /// Build from config: the builtin catalog first, then config extras.
    /// Extras never shadow builtin ids.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: ScoringConfig) -> Self {
        let mut catalog = builtin_achievements();
        let builtin = catalog.len();
        for extra in config.achievements {
            if catalog.iter().any(|a| a.id == extra.id) {
                error!(target: "scoring", id = %extra.id, "Skipping config achievement: id already in catalog.");
                continue;
            }
            catalog.push(extra);
        }
        info!(target: "scoring", builtin, extra = catalog.len() - builtin, "Achievement catalog assembled");
        Self { rules: config.rules, catalog }
    }

    /// Build from SCORING_CONFIG_PATH, falling back to stock rules.
    pub fn from_env() -> Self {
        Self::new(load_scoring_config_from_env().unwrap_or_default())
    }

    pub fn catalog(&self) -> &[Achievement] {
        &self.catalog
    }

    pub fn max_hearts(&self) -> u8 {
        self.rules.max_hearts
    }
}

/// Shared, lazily-initialized engine handle. `acquire` hands out the same
/// engine until `reset` drops it, after which the next `acquire` rebuilds
/// from the environment.
#[derive(Debug)]
pub struct EngineCell {
    slot: RwLock<Option<Arc<Engine>>>,
}

impl EngineCell {
    pub fn new() -> Self {
        Self { slot: RwLock::new(None) }
    }

    /// Hand out the shared engine, building it on first use.
    pub fn acquire(&self) -> Arc<Engine> {
        {
            let slot = read_guard(&self.slot);
            if let Some(engine) = slot.as_ref() {
                return engine.clone();
            }
        }
        let mut slot = write_guard(&self.slot);
        if let Some(engine) = slot.as_ref() {
            return engine.clone();
        }
        info!(target: "roboplay_scoring", "Building scoring engine from environment");
        let engine = Arc::new(Engine::from_env());
        *slot = Some(engine.clone());
        engine
    }

    /// Drop the cached engine; the next `acquire` rebuilds it.
    pub fn reset(&self) {
        let mut slot = write_guard(&self.slot);
        *slot = None;
    }
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::new()
    }
}

// The engine is immutable once built, so a poisoned lock cannot hold a
// half-written value; recover the guard instead of propagating the panic.
fn read_guard(slot: &RwLock<Option<Arc<Engine>>>) -> std::sync::RwLockReadGuard<'_, Option<Arc<Engine>>> {
    match slot.read() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_guard(slot: &RwLock<Option<Arc<Engine>>>) -> std::sync::RwLockWriteGuard<'_, Option<Arc<Engine>>> {
    match slot.write() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}
