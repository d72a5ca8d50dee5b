//! `App`: selection, last published mix state and the status line.

use std::path::PathBuf;

use crate::audibility::Audibility;
use crate::registry::{Registry, TrackId};
use crate::session::Notice;
use crate::spectrum::BandProfile;

pub struct App {
    /// Index into the registry's playlist order.
    pub selected: usize,
    pub progress: f64,
    /// `None` renders as a blank visualization.
    pub spectrum: Option<BandProfile>,
    pub audibility: Audibility,
    /// One-line feedback for the last user action (save, load, errors).
    pub status: Option<String>,
    /// Where `w` saves the playlist.
    pub playlist_path: PathBuf,
}

impl App {
    pub fn new(playlist_path: PathBuf) -> Self {
        Self {
            selected: 0,
            progress: 0.0,
            spectrum: None,
            audibility: Audibility::default(),
            status: None,
            playlist_path,
        }
    }

    /// Fold one session notice into the display state.
    pub fn apply(&mut self, notice: Notice) {
        match notice {
            Notice::AudibilityChanged(a) => self.audibility = a,
            Notice::MasterProgressChanged(p) => self.progress = p,
            Notice::SpectrumChanged(s) => self.spectrum = s,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Id of the track under the cursor.
    pub fn selected_id(&self, registry: &Registry) -> Option<TrackId> {
        registry.get(self.selected).map(|t| t.id())
    }

    /// Keep the cursor on a real row after the playlist shrinks.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Move selection to the next track.
    pub fn next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move selection to the previous track.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
