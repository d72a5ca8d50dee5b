//! Media-facing types: notifications, errors and the backend trait.

use std::path::Path;

use crate::registry::TrackId;

/// Notifications raised by a backend, drained on every timer tick.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The player ran out of media while playing.
    Ended(TrackId),
    /// The player learned the track's duration in seconds.
    LoadedMetadata(TrackId, f64),
    /// The player failed to load or decode the track.
    Error(TrackId, String),
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("no audio output device: {0}")]
    Output(String),
}

/// Per-track playback operations. Calls for ids without an open player are
/// ignored.
pub trait MediaBackend {
    /// Create a paused player for `id` positioned at 0.
    fn open(&mut self, id: TrackId, path: &Path) -> Result<(), MediaError>;
    fn is_open(&self, id: TrackId) -> bool;
    /// Stop and drop the player. No further calls for `id` have any effect.
    fn release(&mut self, id: TrackId);
    fn set_volume(&mut self, id: TrackId, volume: f32);
    fn set_muted(&mut self, id: TrackId, muted: bool);
    fn play(&mut self, id: TrackId);
    fn pause(&mut self, id: TrackId);
    fn seek(&mut self, id: TrackId, secs: f64);
    fn current_time(&self, id: TrackId) -> Option<f64>;
    fn duration(&self, id: TrackId) -> Option<f64>;
    /// Drain notifications raised since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}

/// Gain actually applied to a sink: muting is modelled as zero gain.
pub fn sink_volume(volume: f32, muted: bool) -> f32 {
    if muted { 0.0 } else { volume.clamp(0.0, 1.0) }
}
