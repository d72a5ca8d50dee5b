//! Playlist files: `{ "savedAt": ..., "items": [{ "path", "name", "volume" }] }`.

mod file;

pub use file::*;
