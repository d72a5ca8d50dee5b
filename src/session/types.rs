use crate::analysis::Completion;
use crate::audibility::Audibility;
use crate::media::MediaEvent;
use crate::registry::TrackId;
use crate::spectrum::BandProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    VolumeChanged { id: TrackId, volume: f32 },
    MasterVolumeChanged(f32),
    MuteToggled(TrackId),
    SoloToggled(TrackId),
    PlayPauseToggled(TrackId),
    PlayAll,
    PauseAll,
    /// Scrub the master transport to a progress ratio.
    SeekRequested(f64),
    LoopToggled,
    Remove(TrackId),
    Clear,
    /// Timer tick: drain backend notifications, then report progress.
    Tick,
    Media(MediaEvent),
    Analysis(Completion),
}

/// Display-facing updates.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    AudibilityChanged(Audibility),
    MasterProgressChanged(f64),
    /// `None` clears the visualization.
    SpectrumChanged(Option<BandProfile>),
}
