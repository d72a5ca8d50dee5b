//! Playlist ownership: the ordered set of tracks plus the mix-wide flags.
//!
//! The `Registry` is the only place track records live. Everything else
//! borrows from it or addresses tracks by `TrackId`.

mod model;

pub use model::*;
