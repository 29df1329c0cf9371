//! Client-side hunt progression.
//!
//! The state machine in this module is a plain value: the UI controller owns
//! it, feeds it scan events and clock readings, and persists it through a
//! [`crate::store::StateStore`]. Nothing here touches the network or the
//! wall clock on its own, which keeps every transition testable in
//! isolation.

pub mod controller;
pub mod saved;
pub mod timer;

pub use controller::{AdvanceView, FoundView, HuntController};
pub use saved::SavedHunt;

use chrono::{DateTime, Utc};

use crate::types::LocationId;

/// Errors surfaced by the hunt state machine and its controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HuntError {
    /// Scanned code does not match the location currently being hunted.
    /// Re-scanning an already-found code lands here too; the hunt never
    /// accepts a location out of order.
    #[error("wrong location: you scanned location {scanned}, but you need to find location {expected}")]
    Mismatch {
        scanned: LocationId,
        expected: LocationId,
    },

    /// `verify` called while no scan is expected (idle, mid-found-screen,
    /// or after completion).
    #[error("no scan is expected right now")]
    NotAwaitingScan,

    /// `advance` called while no location is waiting to be confirmed.
    #[error("no freshly found location to advance from")]
    NothingToAdvance,

    /// The id passed local verification but the catalog has no record for
    /// it. Only reachable when machine and catalog disagree on N.
    #[error("location {0} not found")]
    UnknownLocation(LocationId),

    /// A persisted hunt failed validation on restore.
    #[error("saved hunt state is corrupt: {0}")]
    CorruptSave(String),
}

/// Where the player currently is in the hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntPhase {
    /// No active hunt.
    Idle,
    /// Hunting for `target`; the next scan must be exactly this id.
    AwaitingScan { target: LocationId },
    /// `location` was just scanned successfully; waiting for the player to
    /// continue to the next clue (or to the victory screen).
    LocationFound { location: LocationId },
    /// All locations found.
    Complete,
}

/// Outcome of [`HuntState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to hunting the next location.
    NextTarget(LocationId),
    /// That was the final location; the hunt is complete.
    Completed { elapsed_ms: u64 },
}

/// The hunt progression state machine.
///
/// Invariants (checked by `debug_assert` and by restore validation):
/// while active and incomplete, the found list is exactly `1..target`,
/// strictly ascending, no duplicates; `target` never exceeds N.
#[derive(Debug, Clone, PartialEq)]
pub struct HuntState {
    phase: HuntPhase,
    found: Vec<LocationId>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    location_count: u32,
}

impl HuntState {
    /// A fresh idle machine for a hunt of `location_count` stops.
    pub fn new(location_count: u32) -> Self {
        Self {
            phase: HuntPhase::Idle,
            found: Vec::new(),
            started_at: None,
            finished_at: None,
            location_count,
        }
    }

    pub fn phase(&self) -> HuntPhase {
        self.phase
    }

    /// Discovery order of found locations.
    pub fn found(&self) -> &[LocationId] {
        &self.found
    }

    /// The id the next scan must match, if a scan is expected.
    pub fn current_target(&self) -> Option<LocationId> {
        match self.phase {
            HuntPhase::AwaitingScan { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, HuntPhase::Idle | HuntPhase::Complete)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == HuntPhase::Complete
    }

    pub fn location_count(&self) -> u32 {
        self.location_count
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Begin a new hunt. Valid from any state and acts as an implicit
    /// reset: the found list and timestamps of a previous run are dropped.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.found.clear();
        self.started_at = Some(now);
        self.finished_at = None;
        self.phase = HuntPhase::AwaitingScan { target: 1 };
    }

    /// Feed a scanned id into the machine.
    ///
    /// On a match the location is appended to the found list and the
    /// machine moves to [`HuntPhase::LocationFound`]. On a mismatch nothing
    /// changes and the error names both ids so the UI can explain.
    pub fn verify(&mut self, scanned: LocationId) -> Result<LocationId, HuntError> {
        let expected = match self.phase {
            HuntPhase::AwaitingScan { target } => target,
            _ => return Err(HuntError::NotAwaitingScan),
        };

        if scanned != expected {
            return Err(HuntError::Mismatch { scanned, expected });
        }

        self.found.push(expected);
        self.phase = HuntPhase::LocationFound { location: expected };
        self.check_invariants();
        Ok(expected)
    }

    /// Leave the found screen: either continue to the next target or, when
    /// the final location was just found, complete the hunt and freeze the
    /// clock at `now`.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, HuntError> {
        let location = match self.phase {
            HuntPhase::LocationFound { location } => location,
            _ => return Err(HuntError::NothingToAdvance),
        };

        if location >= self.location_count {
            self.finished_at = Some(now);
            self.phase = HuntPhase::Complete;
            Ok(Advance::Completed {
                elapsed_ms: self.elapsed_ms(now),
            })
        } else {
            let target = location + 1;
            self.phase = HuntPhase::AwaitingScan { target };
            self.check_invariants();
            Ok(Advance::NextTarget(target))
        }
    }

    /// Drop all session data and return to [`HuntPhase::Idle`].
    pub fn reset(&mut self) {
        self.found.clear();
        self.started_at = None;
        self.finished_at = None;
        self.phase = HuntPhase::Idle;
    }

    /// Elapsed hunt time in milliseconds.
    ///
    /// Always recomputed from the start instant rather than accumulated, so
    /// display restarts cannot drift. Once complete, the frozen finish
    /// instant wins over `now`.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        let Some(started) = self.started_at else {
            return 0;
        };
        let end = self.finished_at.unwrap_or(now);
        (end - started).num_milliseconds().max(0) as u64
    }

    fn check_invariants(&self) {
        debug_assert!(self
            .found
            .iter()
            .enumerate()
            .all(|(i, id)| *id == i as LocationId + 1));
        if let HuntPhase::AwaitingScan { target } = self.phase {
            debug_assert_eq!(self.found.len() as u32, target - 1);
            debug_assert!(target <= self.location_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_machine_is_idle() {
        let state = HuntState::new(10);
        assert_eq!(state.phase(), HuntPhase::Idle);
        assert!(!state.is_active());
        assert!(state.found().is_empty());
        assert_eq!(state.current_target(), None);
    }

    #[test]
    fn test_start_targets_first_location() {
        let mut state = HuntState::new(10);
        state.start(t0());

        assert_eq!(state.phase(), HuntPhase::AwaitingScan { target: 1 });
        assert!(state.is_active());
        assert_eq!(state.started_at(), Some(t0()));
    }

    #[test]
    fn test_verify_match_moves_to_found() {
        let mut state = HuntState::new(10);
        state.start(t0());

        assert_eq!(state.verify(1), Ok(1));
        assert_eq!(state.phase(), HuntPhase::LocationFound { location: 1 });
        assert_eq!(state.found(), &[1]);
    }

    #[test]
    fn test_verify_mismatch_leaves_state_unchanged() {
        let mut state = HuntState::new(10);
        state.start(t0());

        let before = state.clone();
        assert_eq!(
            state.verify(3),
            Err(HuntError::Mismatch {
                scanned: 3,
                expected: 1
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_rescanning_found_location_is_a_mismatch() {
        let mut state = HuntState::new(10);
        state.start(t0());
        state.verify(1).unwrap();
        state.advance(t0()).unwrap();

        // Location 1 is already found; only 2 is accepted now.
        assert_eq!(
            state.verify(1),
            Err(HuntError::Mismatch {
                scanned: 1,
                expected: 2
            })
        );
        assert_eq!(state.found(), &[1]);
    }

    #[test]
    fn test_verify_rejected_outside_awaiting_scan() {
        let mut state = HuntState::new(10);
        assert_eq!(state.verify(1), Err(HuntError::NotAwaitingScan));

        state.start(t0());
        state.verify(1).unwrap();
        assert_eq!(state.verify(2), Err(HuntError::NotAwaitingScan));
    }

    #[test]
    fn test_advance_rejected_outside_location_found() {
        let mut state = HuntState::new(10);
        assert_eq!(state.advance(t0()), Err(HuntError::NothingToAdvance));

        state.start(t0());
        assert_eq!(state.advance(t0()), Err(HuntError::NothingToAdvance));
    }

    #[test]
    fn test_full_run_completes_exactly_once() {
        let mut state = HuntState::new(10);
        state.start(t0());

        for id in 1..=9 {
            state.verify(id).unwrap();
            assert_eq!(state.advance(t0()), Ok(Advance::NextTarget(id + 1)));
            assert_eq!(state.found().len(), id as usize);
        }

        state.verify(10).unwrap();
        let finish = t0() + chrono::Duration::seconds(754);
        assert_eq!(
            state.advance(finish),
            Ok(Advance::Completed { elapsed_ms: 754_000 })
        );
        assert!(state.is_complete());
        assert_eq!(state.found(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        // Complete is terminal; no further scan or advance is accepted.
        assert_eq!(state.verify(1), Err(HuntError::NotAwaitingScan));
        assert_eq!(state.advance(finish), Err(HuntError::NothingToAdvance));
    }

    #[test]
    fn test_found_list_tracks_target_invariant() {
        let mut state = HuntState::new(10);
        state.start(t0());

        for id in 1..=5 {
            state.verify(id).unwrap();
            state.advance(t0()).unwrap();
            let target = state.current_target().unwrap();
            assert_eq!(state.found().len() as u32, target - 1);
            let expected: Vec<LocationId> = (1..target).collect();
            assert_eq!(state.found(), expected.as_slice());
        }
    }

    #[test]
    fn test_start_acts_as_implicit_reset() {
        let mut state = HuntState::new(10);
        state.start(t0());
        state.verify(1).unwrap();
        state.advance(t0()).unwrap();

        let later = t0() + chrono::Duration::minutes(5);
        state.start(later);
        assert_eq!(state.phase(), HuntPhase::AwaitingScan { target: 1 });
        assert!(state.found().is_empty());
        assert_eq!(state.started_at(), Some(later));
    }

    #[test]
    fn test_reset_clears_session_data() {
        let mut state = HuntState::new(10);
        state.start(t0());
        state.verify(1).unwrap();

        state.reset();
        assert_eq!(state.phase(), HuntPhase::Idle);
        assert!(state.found().is_empty());
        assert_eq!(state.started_at(), None);
        assert_eq!(state.elapsed_ms(t0()), 0);
    }

    #[test]
    fn test_elapsed_is_recomputed_not_accumulated() {
        let mut state = HuntState::new(10);
        state.start(t0());

        assert_eq!(state.elapsed_ms(t0() + chrono::Duration::seconds(30)), 30_000);
        // A "display restart" changes nothing; elapsed depends only on now.
        assert_eq!(state.elapsed_ms(t0() + chrono::Duration::seconds(90)), 90_000);
    }

    #[test]
    fn test_elapsed_frozen_after_completion() {
        let mut state = HuntState::new(1);
        state.start(t0());
        state.verify(1).unwrap();
        let finish = t0() + chrono::Duration::seconds(60);
        state.advance(finish).unwrap();

        let much_later = finish + chrono::Duration::hours(2);
        assert_eq!(state.elapsed_ms(much_later), 60_000);
    }
}
