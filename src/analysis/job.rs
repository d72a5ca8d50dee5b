use std::path::PathBuf;

use log::{debug, warn};

use crate::config::SpectrumSettings;
use crate::library::{has_extension, probe_duration};
use crate::registry::TrackId;
use crate::spectrum::{BandProfile, DecodeError, analyze, decode_to_mono};

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisJob {
    /// Read the container's duration.
    Probe { id: TrackId, path: PathBuf },
    /// Decode to mono and compute a band profile.
    Spectrum { id: TrackId, path: PathBuf },
}

impl AnalysisJob {
    pub fn id(&self) -> TrackId {
        match self {
            AnalysisJob::Probe { id, .. } | AnalysisJob::Spectrum { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `None` when the probe failed or reported zero.
    Duration(Option<f64>),
    /// `None` when the file is not analysable audio or failed to decode.
    Spectrum(Option<BandProfile>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub id: TrackId,
    pub outcome: Outcome,
}

/// Anything that accepts analysis jobs.
pub trait JobQueue {
    fn submit(&mut self, job: AnalysisJob);

    /// Drop every job for `id` that has not started yet. A job already
    /// running still completes; the session discards its result.
    fn cancel(&mut self, id: TrackId);
}

impl JobQueue for Vec<AnalysisJob> {
    fn submit(&mut self, job: AnalysisJob) {
        self.push(job);
    }

    fn cancel(&mut self, id: TrackId) {
        self.retain(|job| job.id() != id);
    }
}

/// Execute one job synchronously.
pub fn run_job(job: AnalysisJob, settings: &SpectrumSettings) -> Completion {
    match job {
        AnalysisJob::Probe { id, path } => {
            let duration = probe_duration(&path);
            if duration.is_none() {
                warn!("track {id}: could not read duration of {}", path.display());
            }
            Completion {
                id,
                outcome: Outcome::Duration(duration),
            }
        }
        AnalysisJob::Spectrum { id, path } => {
            if !has_extension(&path, &settings.extensions) {
                debug!("track {id}: {} is not analysable audio", path.display());
                return Completion {
                    id,
                    outcome: Outcome::Spectrum(None),
                };
            }
            let profile = match decode_to_mono(&path) {
                Ok(samples) => Some(analyze(&samples, settings.gain)),
                Err(DecodeError::Empty(_)) => {
                    debug!("track {id}: {} decoded to no samples", path.display());
                    None
                }
                Err(e) => {
                    warn!("track {id}: spectrum analysis failed: {e}");
                    None
                }
            };
            Completion {
                id,
                outcome: Outcome::Spectrum(profile),
            }
        }
    }
}
