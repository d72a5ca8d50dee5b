use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::analysis::{AnalysisJob, Completion, JobQueue, Outcome};
use crate::audibility::{self, Audibility};
use crate::config::Settings;
use crate::looping::{EndAction, on_media_ended};
use crate::media::{MediaBackend, MediaEvent};
use crate::playlist::PlaylistItem;
use crate::registry::{PlayState, Registry, TrackId};
use crate::spectrum;
use crate::transport::Transport;

use super::types::{Event, Notice};

/// Owns the registry and drives the media backend. Single-threaded: the
/// caller feeds events one at a time and drains notices after each batch.
pub struct Session<M, Q> {
    registry: Registry,
    media: M,
    jobs: Q,
    transport: Transport,
    notices: Vec<Notice>,
}

impl<M: MediaBackend, Q: JobQueue> Session<M, Q> {
    pub fn new(media: M, jobs: Q, settings: &Settings) -> Self {
        Self {
            registry: Registry::new(settings.mix.master_volume, settings.mix.loop_enabled),
            media,
            jobs,
            transport: Transport::new(Duration::from_millis(settings.sync.seek_grace_ms)),
            notices: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn jobs(&self) -> &Q {
        &self.jobs
    }

    /// Last broadcast master progress.
    pub fn progress(&self) -> f64 {
        self.transport.progress()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Admit a media file. Returns immediately; duration and spectrum arrive
    /// later as `Event::Analysis` completions.
    pub fn add(&mut self, path: PathBuf, name: String, volume: f32) -> TrackId {
        let id = self.registry.add(path.clone(), name, volume);
        info!("track {id}: added {}", path.display());

        self.jobs.submit(AnalysisJob::Probe {
            id,
            path: path.clone(),
        });
        self.jobs.submit(AnalysisJob::Spectrum { id, path });

        // The player is opened on first play.
        self.apply_audibility();
        id
    }

    /// Replace the playlist, re-running analysis for every entry.
    pub fn load_playlist(&mut self, items: Vec<PlaylistItem>) {
        self.clear();
        for item in items {
            self.add(item.path, item.name, item.volume);
        }
    }

    pub fn handle(&mut self, event: Event) {
        self.handle_at(event, Instant::now());
    }

    pub fn handle_at(&mut self, event: Event, now: Instant) {
        debug!("event: {event:?}");
        match event {
            Event::VolumeChanged { id, volume } => {
                let Some(track) = self.registry.find_mut(id) else {
                    return;
                };
                track.set_volume(volume);
                self.push_volume(id);
                self.remix();
            }
            Event::MasterVolumeChanged(volume) => {
                self.registry.set_master_volume(volume);
                for id in self.registry.ids() {
                    self.push_volume(id);
                }
            }
            Event::MuteToggled(id) => {
                if let Some(track) = self.registry.find_mut(id) {
                    track.muted = !track.muted;
                    self.apply_audibility();
                }
            }
            Event::SoloToggled(id) => {
                if let Some(track) = self.registry.find_mut(id) {
                    track.solo = !track.solo;
                    self.apply_audibility();
                }
            }
            Event::PlayPauseToggled(id) => {
                let Some(track) = self.registry.find(id) else {
                    return;
                };
                if track.is_playing() {
                    self.pause(id);
                } else {
                    self.play(id);
                }
                self.report_progress(now);
            }
            Event::PlayAll => self.play_all(now),
            Event::PauseAll => {
                for id in self.registry.ids() {
                    self.pause(id);
                }
            }
            Event::SeekRequested(p) => self.seek(p, now),
            Event::LoopToggled => {
                self.registry.loop_enabled = !self.registry.loop_enabled;
                info!("loop {}", if self.registry.loop_enabled { "on" } else { "off" });
            }
            Event::Remove(id) => self.remove(id, now),
            Event::Clear => self.clear(),
            Event::Tick => {
                for media_event in self.media.poll_events() {
                    self.handle_media(media_event, now);
                }
                self.report_progress(now);
            }
            Event::Media(media_event) => self.handle_media(media_event, now),
            Event::Analysis(completion) => self.apply_completion(completion),
        }
    }

    fn handle_media(&mut self, event: MediaEvent, now: Instant) {
        match event {
            MediaEvent::Ended(id) => {
                let loop_enabled = self.registry.loop_enabled;
                let Some(track) = self.registry.find_mut(id) else {
                    debug!("track {id}: end of media for a removed track");
                    return;
                };
                match on_media_ended(track, loop_enabled) {
                    EndAction::Restart => {
                        debug!("track {id}: looping");
                        self.media.seek(id, 0.0);
                        self.media.play(id);
                    }
                    EndAction::Stay => debug!("track {id}: ended"),
                    EndAction::Ignore => return,
                }
                self.report_progress(now);
                self.remix();
            }
            MediaEvent::LoadedMetadata(id, secs) => self.set_duration(id, Some(secs)),
            MediaEvent::Error(id, reason) => {
                warn!("track {id}: media error: {reason}");
                let Some(track) = self.registry.find_mut(id) else {
                    return;
                };
                if track.is_playing() {
                    track.state = PlayState::Stopped;
                    self.report_progress(now);
                    self.remix();
                }
            }
        }
    }

    /// Apply an analysis result if its track still exists.
    fn apply_completion(&mut self, completion: Completion) {
        let Completion { id, outcome } = completion;
        if !self.registry.contains(id) {
            debug!("track {id}: discarding analysis for a removed track");
            return;
        }
        match outcome {
            Outcome::Duration(secs) => self.set_duration(id, secs),
            Outcome::Spectrum(profile) => {
                let Some(track) = self.registry.find_mut(id) else {
                    return;
                };
                let analysed = profile.is_some();
                track.spectrum = profile;
                if analysed {
                    self.remix();
                }
            }
        }
    }

    /// Record a duration. Unknown or zero never replaces a known value.
    fn set_duration(&mut self, id: TrackId, secs: Option<f64>) {
        let Some(track) = self.registry.find_mut(id) else {
            debug!("track {id}: discarding duration for a removed track");
            return;
        };
        match secs.filter(|d| d.is_finite() && *d > 0.0) {
            Some(d) => track.duration_secs = d,
            None if track.known_duration().is_none() => {
                debug!("track {id}: duration unknown");
            }
            None => {}
        }
    }

    /// Open a player for `id` if it has none, with the current gain and
    /// audibility applied.
    fn ensure_player(&mut self, id: TrackId) -> bool {
        if self.media.is_open(id) {
            return true;
        }
        let Some(track) = self.registry.find(id) else {
            return false;
        };
        let path = track.path.clone();
        match self.media.open(id, &path) {
            Ok(()) => {
                let audible = audibility::resolve(self.registry.tracks()).is_audible(id);
                self.push_volume(id);
                self.media.set_muted(id, !audible);
                if let Some(secs) = self.media.duration(id) {
                    self.set_duration(id, Some(secs));
                }
                true
            }
            Err(e) => {
                warn!("track {id}: {e}");
                false
            }
        }
    }

    fn play(&mut self, id: TrackId) {
        if !self.ensure_player(id) {
            return;
        }
        self.media.play(id);
        if let Some(track) = self.registry.find_mut(id) {
            track.state = PlayState::Playing;
        }
    }

    fn pause(&mut self, id: TrackId) {
        self.media.pause(id);
        if let Some(track) = self.registry.find_mut(id) {
            track.state = PlayState::Stopped;
        }
    }

    fn play_all(&mut self, now: Instant) {
        for id in self.registry.ids() {
            self.play(id);
        }
        for track in self.registry.iter_mut() {
            track.solo = false;
            track.muted = false;
        }
        self.apply_audibility();
        self.report_progress(now);
    }

    fn seek(&mut self, p: f64, now: Instant) {
        let targets = self.transport.seek_to(self.registry.tracks(), p, now);
        if targets.is_empty() {
            return;
        }
        for (id, secs) in targets {
            self.media.seek(id, secs);
        }
        self.notices
            .push(Notice::MasterProgressChanged(self.transport.progress()));
    }

    fn remove(&mut self, id: TrackId, now: Instant) {
        if !self.registry.contains(id) {
            return;
        }
        self.media.release(id);
        self.jobs.cancel(id);
        if let Some(track) = self.registry.remove(id) {
            info!("track {id}: removed {}", track.name);
        }
        self.apply_audibility();
        self.report_progress(now);
    }

    fn clear(&mut self) {
        for id in self.registry.ids() {
            self.media.release(id);
            self.jobs.cancel(id);
        }
        let removed = self.registry.clear();
        if !removed.is_empty() {
            info!("cleared {} track(s)", removed.len());
        }
        self.transport.reset();
        self.notices.push(Notice::MasterProgressChanged(0.0));
        self.notices
            .push(Notice::AudibilityChanged(Audibility::default()));
        self.notices.push(Notice::SpectrumChanged(None));
    }

    fn push_volume(&mut self, id: TrackId) {
        if let Some(volume) = self.registry.effective_volume(id) {
            self.media.set_volume(id, volume);
        }
    }

    /// Resolve solo/mute over the whole set and push it to every player.
    fn apply_audibility(&mut self) {
        let resolved = audibility::resolve(self.registry.tracks());
        for (id, audible) in resolved.iter() {
            self.media.set_muted(id, !audible);
        }
        self.notices.push(Notice::AudibilityChanged(resolved));
        self.remix();
    }

    fn remix(&mut self) {
        let mixed = spectrum::mix(self.registry.tracks());
        self.notices.push(Notice::SpectrumChanged(mixed));
    }

    fn report_progress(&mut self, now: Instant) {
        let media = &self.media;
        if let Some(p) =
            self.transport
                .report_progress(self.registry.tracks(), |id| media.current_time(id), now)
        {
            self.notices.push(Notice::MasterProgressChanged(p));
        }
    }
}

#[cfg(test)]
impl<M, Q> Session<M, Q> {
    pub(super) fn media(&self) -> &M {
        &self.media
    }

    pub(super) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}
