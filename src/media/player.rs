use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::registry::TrackId;

use super::sink::create_sink;
use super::types::{MediaBackend, MediaError, MediaEvent, sink_volume};

struct Player {
    path: PathBuf,
    sink: Sink,
    volume: f32,
    muted: bool,
    playing: bool,
    duration: Option<f64>,
}

impl Player {
    fn apply_gain(&self) {
        self.sink.set_volume(sink_volume(self.volume, self.muted));
    }
}

/// One `Sink` per track, all mixed into the default output device.
pub struct RodioMedia {
    stream: OutputStream,
    players: HashMap<TrackId, Player>,
    pending: Vec<MediaEvent>,
}

impl RodioMedia {
    pub fn open_default() -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which corrupts the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            players: HashMap::new(),
            pending: Vec::new(),
        })
    }

    /// Replace a consumed sink with a fresh one, keeping gain and play state.
    fn rebuild(&mut self, id: TrackId) -> bool {
        let Some(player) = self.players.get(&id) else {
            return false;
        };
        match create_sink(&self.stream, &player.path) {
            Ok((sink, _)) => {
                if let Some(player) = self.players.get_mut(&id) {
                    player.sink.stop();
                    player.sink = sink;
                    player.apply_gain();
                }
                true
            }
            Err(e) => {
                warn!("track {id}: failed to reload media: {e}");
                self.pending.push(MediaEvent::Error(id, e.to_string()));
                false
            }
        }
    }
}

impl MediaBackend for RodioMedia {
    fn open(&mut self, id: TrackId, path: &Path) -> Result<(), MediaError> {
        let (sink, total) = create_sink(&self.stream, path)?;
        let duration = total.map(|d| d.as_secs_f64()).filter(|d| *d > 0.0);
        if let Some(d) = duration {
            self.pending.push(MediaEvent::LoadedMetadata(id, d));
        }

        let player = Player {
            path: path.to_path_buf(),
            sink,
            volume: 1.0,
            muted: false,
            playing: false,
            duration,
        };
        player.apply_gain();
        if let Some(old) = self.players.insert(id, player) {
            old.sink.stop();
        }
        debug!("track {id}: opened {}", path.display());
        Ok(())
    }

    fn is_open(&self, id: TrackId) -> bool {
        self.players.contains_key(&id)
    }

    fn release(&mut self, id: TrackId) {
        if let Some(player) = self.players.remove(&id) {
            player.sink.stop();
            debug!("track {id}: released");
        }
        self.pending.retain(|e| match e {
            MediaEvent::Ended(i) | MediaEvent::LoadedMetadata(i, _) | MediaEvent::Error(i, _) => {
                *i != id
            }
        });
    }

    fn set_volume(&mut self, id: TrackId, volume: f32) {
        if let Some(player) = self.players.get_mut(&id) {
            player.volume = volume;
            player.apply_gain();
        }
    }

    fn set_muted(&mut self, id: TrackId, muted: bool) {
        if let Some(player) = self.players.get_mut(&id) {
            player.muted = muted;
            player.apply_gain();
        }
    }

    fn play(&mut self, id: TrackId) {
        let needs_reload = match self.players.get(&id) {
            Some(player) => player.sink.empty(),
            None => return,
        };
        if needs_reload && !self.rebuild(id) {
            return;
        }
        if let Some(player) = self.players.get_mut(&id) {
            player.sink.play();
            player.playing = true;
        }
    }

    fn pause(&mut self, id: TrackId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.sink.pause();
            player.playing = false;
        }
    }

    fn seek(&mut self, id: TrackId, secs: f64) {
        let needs_reload = match self.players.get(&id) {
            Some(player) => player.sink.empty(),
            None => return,
        };
        if needs_reload && !self.rebuild(id) {
            return;
        }
        let Some(player) = self.players.get_mut(&id) else {
            return;
        };
        let pos = Duration::from_secs_f64(secs.max(0.0));
        if let Err(e) = player.sink.try_seek(pos) {
            warn!("track {id}: seek to {secs:.2}s failed: {e}");
        }
        if player.playing {
            player.sink.play();
        }
    }

    fn current_time(&self, id: TrackId) -> Option<f64> {
        self.players.get(&id).map(|p| p.sink.get_pos().as_secs_f64())
    }

    fn duration(&self, id: TrackId) -> Option<f64> {
        self.players.get(&id).and_then(|p| p.duration)
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        for (&id, player) in self.players.iter_mut() {
            if player.playing && player.sink.empty() {
                player.playing = false;
                self.pending.push(MediaEvent::Ended(id));
            }
        }
        std::mem::take(&mut self.pending)
    }
}
