//! Capture and restore of hunt progress.
//!
//! The whole session is one small serializable blob, kept under a single
//! store key so a hunt survives page reloads. Restore validates every
//! invariant the machine maintains; anything inconsistent is rejected and
//! the caller falls back to a full reset.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::{HuntError, HuntPhase, HuntState};
use crate::types::LocationId;

/// The persisted form of [`HuntState`].
///
/// `LocationFound` is encoded implicitly: when the found list already
/// contains `current_location_id` the player is on the found screen,
/// otherwise they are still hunting it. A completed hunt is a full found
/// list with the active flag cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedHunt {
    pub current_location_id: LocationId,
    pub found_locations: Vec<LocationId>,
    /// Unix milliseconds of the hunt start.
    pub start_time: Option<i64>,
    pub is_game_active: bool,
}

impl HuntState {
    /// Snapshot the current session, or `None` when idle (an idle machine
    /// has nothing worth persisting).
    pub fn capture(&self) -> Option<SavedHunt> {
        let current_location_id = match self.phase() {
            HuntPhase::Idle => return None,
            HuntPhase::AwaitingScan { target } => target,
            HuntPhase::LocationFound { location } => location,
            HuntPhase::Complete => self.location_count(),
        };

        Some(SavedHunt {
            current_location_id,
            found_locations: self.found().to_vec(),
            start_time: self.started_at().map(|t| t.timestamp_millis()),
            is_game_active: self.is_active(),
        })
    }

    /// Rebuild a machine from a persisted session.
    ///
    /// Every field is cross-checked; a blob that violates the machine's
    /// invariants yields [`HuntError::CorruptSave`].
    pub fn restore(saved: &SavedHunt, location_count: u32) -> Result<Self, HuntError> {
        let corrupt = |why: &str| HuntError::CorruptSave(why.to_string());

        // The found list must be the sequential prefix 1..=k.
        for (i, id) in saved.found_locations.iter().enumerate() {
            if *id != i as LocationId + 1 {
                return Err(corrupt("found locations are not the sequential prefix"));
            }
        }
        let found_count = saved.found_locations.len() as u32;
        if found_count > location_count {
            return Err(corrupt("more locations found than the hunt has"));
        }

        let started_at = match saved.start_time {
            Some(ms) => Some(
                DateTime::from_timestamp_millis(ms).ok_or_else(|| corrupt("bad start time"))?,
            ),
            None => None,
        };

        let phase = if saved.is_game_active {
            if started_at.is_none() {
                return Err(corrupt("active hunt without a start time"));
            }
            let current = saved.current_location_id;
            if current < 1 || current > location_count {
                return Err(corrupt("current location out of range"));
            }
            if found_count == current {
                // Found screen for the current location.
                HuntPhase::LocationFound { location: current }
            } else if found_count + 1 == current {
                HuntPhase::AwaitingScan { target: current }
            } else {
                return Err(corrupt("found count does not match current location"));
            }
        } else {
            if found_count != location_count {
                return Err(corrupt("inactive hunt that never finished"));
            }
            HuntPhase::Complete
        };

        let mut state = HuntState::new(location_count);
        state.phase = phase;
        state.found = saved.found_locations.clone();
        state.started_at = started_at;
        // The finish instant is not persisted; a restored completed hunt
        // only needs its found list and best time, both of which are.
        state.finished_at = None;
        Ok(state)
    }
}
