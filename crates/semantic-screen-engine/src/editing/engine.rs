use std::sync::Arc;

use crate::editing::commands::Cmd;
use crate::editing::invariants::{self, InvariantViolation};
use crate::editing::transition::transition;
use crate::editing::{AppState, ChangedSlices, Patch};

/// Owner of the canonical state.
///
/// Commands are applied one at a time, in the order `dispatch` is called.
/// Readers hold `Arc<AppState>` snapshots that never change under them.
#[derive(Debug, Default)]
pub struct Engine {
    state: Arc<AppState>,
    /// Incremented on every dispatch that changed state
    version: u64,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state, refusing one that is already inconsistent
    pub fn from_state(state: AppState) -> Result<Self, InvariantViolation> {
        invariants::check(&state)?;
        Ok(Self {
            state: Arc::new(state),
            version: 0,
        })
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command and describe what changed
    pub fn dispatch(&mut self, cmd: &Cmd) -> Patch {
        let result = transition(&self.state, cmd);
        let changed = ChangedSlices::between(&self.state, &result.state);

        if changed.any() {
            if let Err(violation) = invariants::check(&result.state) {
                if cfg!(debug_assertions) {
                    panic!("Invariant violated after {cmd:?}: {violation}");
                }
                log::error!("Invariant violated after {cmd:?}: {violation}; keeping prior state");
                return Patch {
                    changed: ChangedSlices::default(),
                    effects: Vec::new(),
                    version: self.version,
                };
            }
            self.state = Arc::new(result.state);
            self.version += 1;
        }

        Patch {
            changed,
            effects: result.effects,
            version: self.version,
        }
    }
}
