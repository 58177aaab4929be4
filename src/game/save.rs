//! Save files.
//!
//! A save is the full `GameState` (pile order, counters, pending effects
//! and RNG position) in a bincode envelope that starts with a format
//! version. Loading checks the version, then re-validates the state so a
//! damaged file is refused instead of played.

use serde::Serialize;

use crate::core::{GameState, SaveError};

/// Current save format.
pub const SAVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    state: &'a GameState,
}

/// Encode a game.
pub fn to_bytes(state: &GameState) -> Result<Vec<u8>, SaveError> {
    let bytes = bincode::serialize(&Envelope {
        version: SAVE_VERSION,
        state,
    })
    .map_err(SaveError::Encode)?;
    tracing::debug!(bytes = bytes.len(), turn = state.turn(), "game saved");
    Ok(bytes)
}

/// Decode and validate a game.
pub fn from_bytes(bytes: &[u8]) -> Result<GameState, SaveError> {
    // The version leads the envelope, so it can be read on its own
    let version: u32 = bincode::deserialize(bytes).map_err(SaveError::Decode)?;
    if version != SAVE_VERSION {
        return Err(SaveError::Version {
            found: version,
            expected: SAVE_VERSION,
        });
    }

    let (_, state): (u32, GameState) = bincode::deserialize(bytes).map_err(SaveError::Decode)?;
    state.verify_invariants().map_err(SaveError::Corrupt)?;

    tracing::debug!(turn = state.turn(), "game loaded");
    Ok(state)
}
