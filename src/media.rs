//! Playback primitive used by the mixing session.
//!
//! `MediaBackend` is the seam between the session and whatever actually
//! produces sound. `RodioMedia` drives one `rodio::Sink` per track on a
//! shared output stream.

mod player;
mod sink;
mod types;

pub use player::RodioMedia;
pub use types::*;
