use std::fmt;
use std::path::PathBuf;

use crate::spectrum::BandProfile;

/// Opaque handle for one playlist entry.
///
/// Ids come from a monotonically increasing counter owned by the registry,
/// so an id is never handed out twice during a process lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-track transport state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Never started, or paused by the user.
    #[default]
    Stopped,
    /// Should be advancing.
    Playing,
    /// Reached end of media and was not restarted.
    Ended,
}

/// Clamp a gain value into `[0, 1]`. NaN collapses to silence.
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    pub path: PathBuf,
    pub name: String,
    volume: f32,
    pub muted: bool,
    pub solo: bool,
    pub state: PlayState,
    /// Seconds; `0.0` while unknown or after a failed probe.
    pub duration_secs: f64,
    /// `None` until analysis succeeds. Distinct from an all-zero profile.
    pub spectrum: Option<BandProfile>,
}

impl Track {
    fn new(id: TrackId, path: PathBuf, name: String, volume: f32) -> Self {
        Self {
            id,
            path,
            name,
            volume: clamp_unit(volume),
            muted: false,
            solo: false,
            state: PlayState::Stopped,
            duration_secs: 0.0,
            spectrum: None,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the per-track gain, clamping into `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_unit(volume);
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Known, nonzero duration in seconds.
    pub fn known_duration(&self) -> Option<f64> {
        (self.duration_secs.is_finite() && self.duration_secs > 0.0).then_some(self.duration_secs)
    }
}

/// Ordered playlist (insertion order is playlist order) plus the global
/// loop flag and master volume.
#[derive(Debug)]
pub struct Registry {
    tracks: Vec<Track>,
    next_id: u64,
    master_volume: f32,
    pub loop_enabled: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

impl Registry {
    pub fn new(master_volume: f32, loop_enabled: bool) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            master_volume: clamp_unit(master_volume),
            loop_enabled,
        }
    }

    /// Append a new track and return its freshly allocated id.
    pub fn add(&mut self, path: PathBuf, name: String, volume: f32) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        self.tracks.push(Track::new(id, path, name, volume));
        id
    }

    /// Drop the record for `id`. Callers release the media player first.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.position(id)?;
        Some(self.tracks.remove(pos))
    }

    /// Drop every record, returning them in playlist order.
    pub fn clear(&mut self) -> Vec<Track> {
        std::mem::take(&mut self.tracks)
    }

    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.find(id).is_some()
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.iter_mut()
    }

    pub fn ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(Track::id).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = clamp_unit(volume);
    }

    /// Gain actually sent to the player: `track.volume * master_volume`.
    pub fn effective_volume(&self, id: TrackId) -> Option<f32> {
        self.find(id).map(|t| t.volume * self.master_volume)
    }
}
