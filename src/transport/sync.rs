use std::time::{Duration, Instant};

use log::debug;

use crate::registry::{Track, TrackId};

use super::SeekGuard;

/// The playing track with the greatest known duration, and that duration.
///
/// Ties keep the earliest track in playlist order. Tracks whose duration is
/// unknown (zero) are never candidates.
pub fn reference_track(tracks: &[Track]) -> Option<(TrackId, f64)> {
    let mut best: Option<(TrackId, f64)> = None;
    for t in tracks.iter().filter(|t| t.is_playing()) {
        let Some(d) = t.known_duration() else {
            continue;
        };
        if best.is_none_or(|(_, longest)| d > longest) {
            best = Some((t.id(), d));
        }
    }
    best
}

/// Clamp a progress ratio into `[0, 1]`; NaN maps to the start.
pub fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Seek position (seconds) for every playing track with a known duration.
///
/// The reference track lands at `d * p`. Every other track lands at
/// `d * p * (d / D)`, i.e. scaled by the square of its duration ratio to the
/// reference. Non-playing tracks are not included.
pub fn seek_targets(tracks: &[Track], p: f64) -> Vec<(TrackId, f64)> {
    let Some((reference, longest)) = reference_track(tracks) else {
        return Vec::new();
    };
    let p = clamp_progress(p);

    tracks
        .iter()
        .filter(|t| t.is_playing())
        .filter_map(|t| {
            let d = t.known_duration()?;
            let target = if t.id() == reference {
                d * p
            } else {
                d * p * (d / longest)
            };
            Some((t.id(), target))
        })
        .collect()
}

/// Master progress derived from the reference track's playhead.
pub fn progress_from_position(tracks: &[Track], position_of: impl Fn(TrackId) -> Option<f64>) -> Option<f64> {
    let (reference, longest) = reference_track(tracks)?;
    let pos = position_of(reference)?;
    Some(clamp_progress(pos / longest))
}

/// Holds the last broadcast master progress and the post-seek guard.
#[derive(Debug, Clone)]
pub struct Transport {
    progress: f64,
    guard: SeekGuard,
}

impl Transport {
    pub fn new(seek_grace: Duration) -> Self {
        Self {
            progress: 0.0,
            guard: SeekGuard::new(seek_grace),
        }
    }

    /// Last known master progress. Held while nothing is playing.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
    }

    /// Read path. Returns the new progress when one could be derived and the
    /// post-seek window has elapsed; never moves any track.
    pub fn report_progress(
        &mut self,
        tracks: &[Track],
        position_of: impl Fn(TrackId) -> Option<f64>,
        now: Instant,
    ) -> Option<f64> {
        if self.guard.is_active(now) {
            return None;
        }
        let p = progress_from_position(tracks, position_of)?;
        self.progress = p;
        Some(p)
    }

    /// Write path. Returns the per-track seek targets to apply and arms the
    /// guard; an empty result means nothing was playing with a known duration.
    pub fn seek_to(&mut self, tracks: &[Track], p: f64, now: Instant) -> Vec<(TrackId, f64)> {
        let targets = seek_targets(tracks, p);
        if targets.is_empty() {
            debug!("seek to {p:.3} ignored: no playing track with a known duration");
            return targets;
        }
        self.progress = clamp_progress(p);
        self.guard.arm(now);
        debug!("seek to {:.3} across {} track(s)", self.progress, targets.len());
        targets
    }
}
