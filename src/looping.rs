//! End-of-media handling under the global loop flag.

use crate::registry::{PlayState, Track};

/// What the caller must do with the player after an end-of-media event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndAction {
    /// Seek the player to 0 and play it again.
    Restart,
    /// Leave the player idle until the user acts.
    Stay,
    /// The track was not playing; the notification is stale.
    Ignore,
}

/// Drive `Playing -> Ended`, then immediately `Ended -> Playing` when
/// looping is enabled.
pub fn on_media_ended(track: &mut Track, loop_enabled: bool) -> EndAction {
    if track.state != PlayState::Playing {
        return EndAction::Ignore;
    }

    track.state = PlayState::Ended;
    if loop_enabled {
        track.state = PlayState::Playing;
        EndAction::Restart
    } else {
        EndAction::Stay
    }
}
