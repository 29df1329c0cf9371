//! The UI controller: glue between the state machine, the catalog and the
//! store.
//!
//! The controller implements the verification protocol: a scanned id is
//! compared against the locally expected target first and rejected
//! immediately on mismatch; only a matching scan triggers a catalog query
//! for the record to render. Sequence authority rests entirely with this
//! side; the server never tracks progress.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{timer, Advance, HuntError, HuntState};
use crate::catalog::Catalog;
use crate::store::StateStore;
use crate::types::LocationId;

/// Data for the "location found" screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundView {
    pub name: String,
    pub fun_fact: String,
    /// Clue pointing at the next stop; `None` on the final location.
    pub next_clue: Option<String>,
    pub is_last: bool,
    pub found_count: usize,
}

/// Result of leaving the found screen.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceView {
    /// Back to the clue screen, hunting `target`.
    NextClue { target: LocationId },
    /// The hunt is over.
    Victory {
        elapsed_ms: u64,
        elapsed_display: String,
        /// Whether this run set a new best time.
        new_best: bool,
    },
}

/// Owns the hunt state machine and keeps it persisted across mutations.
pub struct HuntController<S: StateStore> {
    catalog: Arc<Catalog>,
    store: S,
    state: HuntState,
}

impl<S: StateStore> HuntController<S> {
    pub fn new(catalog: Arc<Catalog>, store: S) -> Self {
        let state = HuntState::new(catalog.count());
        Self {
            catalog,
            store,
            state,
        }
    }

    pub fn state(&self) -> &HuntState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load a previously saved session. Returns `true` when an active hunt
    /// was restored and the UI should jump back in.
    ///
    /// Anything unloadable (missing, unparsable, or violating the machine's
    /// invariants) silently falls back to a fresh idle state.
    pub fn resume(&mut self) -> bool {
        let saved = match self.store.load_hunt() {
            Ok(Some(saved)) => saved,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("Discarding unreadable saved hunt: {}", e);
                self.discard_save();
                return false;
            }
        };

        match HuntState::restore(&saved, self.catalog.count()) {
            Ok(state) => {
                let active = state.is_active();
                self.state = state;
                active
            }
            Err(e) => {
                tracing::warn!("Discarding invalid saved hunt: {}", e);
                self.discard_save();
                false
            }
        }
    }

    /// Start a new hunt and return the clue leading to the first location.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<String, HuntError> {
        let first = self.catalog.get_by_id(1).ok_or(HuntError::UnknownLocation(1))?;
        let clue = first
            .start_clue
            .clone()
            .unwrap_or_else(|| first.clue.clone());

        self.state.start(now);
        self.persist();
        Ok(clue)
    }

    /// Handle a scanned location id.
    ///
    /// Mismatches are rejected locally without touching the catalog and
    /// leave all state unchanged.
    pub fn handle_scan(&mut self, scanned: LocationId) -> Result<FoundView, HuntError> {
        let found = self.state.verify(scanned)?;

        let record = self
            .catalog
            .get_by_id(found)
            .ok_or(HuntError::UnknownLocation(found))?;
        let view = FoundView {
            name: record.name.clone(),
            fun_fact: record.fun_fact.clone(),
            next_clue: (!record.is_last).then(|| record.clue.clone()),
            is_last: record.is_last,
            found_count: self.state.found().len(),
        };

        self.persist();
        Ok(view)
    }

    /// Leave the found screen. On the final location this completes the
    /// hunt and commits the best time if the run improved it.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceView, HuntError> {
        let view = match self.state.advance(now)? {
            Advance::NextTarget(target) => AdvanceView::NextClue { target },
            Advance::Completed { elapsed_ms } => {
                let new_best = self.commit_best_time(elapsed_ms);
                AdvanceView::Victory {
                    elapsed_ms,
                    elapsed_display: timer::format_elapsed(elapsed_ms),
                    new_best,
                }
            }
        };

        self.persist();
        Ok(view)
    }

    /// Abandon the current hunt. Clears the session blob but never the
    /// best time.
    pub fn reset(&mut self) {
        self.state.reset();
        self.discard_save();
    }

    /// Current elapsed time formatted for display, when a hunt has started.
    pub fn elapsed_display(&self, now: DateTime<Utc>) -> Option<String> {
        self.state.started_at()?;
        Some(timer::format_elapsed(self.state.elapsed_ms(now)))
    }

    /// Stored best time formatted for display.
    pub fn best_time_display(&self) -> Option<String> {
        match self.store.best_time_ms() {
            Ok(best) => best.map(timer::format_elapsed),
            Err(e) => {
                tracing::warn!("Failed to read best time: {}", e);
                None
            }
        }
    }

    fn commit_best_time(&mut self, elapsed_ms: u64) -> bool {
        let stored = match self.store.best_time_ms() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read best time: {}", e);
                None
            }
        };
        if !timer::improves_best(stored, elapsed_ms) {
            return false;
        }
        if let Err(e) = self.store.save_best_time_ms(elapsed_ms) {
            tracing::warn!("Failed to save best time: {}", e);
        }
        true
    }

    fn persist(&mut self) {
        let result = match self.state.capture() {
            Some(saved) => self.store.save_hunt(&saved),
            None => self.store.clear_hunt(),
        };
        if let Err(e) = result {
            // Persistence failures are not fatal; the hunt continues in
            // memory and the next mutation retries.
            tracing::warn!("Failed to persist hunt state: {}", e);
        }
    }

    fn discard_save(&mut self) {
        if let Err(e) = self.store.clear_hunt() {
            tracing::warn!("Failed to clear saved hunt: {}", e);
        }
    }
}
