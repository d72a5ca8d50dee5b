//! Media admission helpers: which paths become tracks, what they are called
//! and how long they are.
//!
//! Directories are expanded with `walkdir`; durations come from container
//! metadata via `lofty`.

mod display;
mod probe;
mod scan;

pub use display::{display_name, format_duration};
pub use probe::probe_duration;
pub use scan::{collect_media, has_extension, is_playlist_file};

#[cfg(test)]
mod tests;
