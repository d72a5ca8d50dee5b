use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::config::SpectrumSettings;
use crate::registry::TrackId;

use super::job::{AnalysisJob, Completion, JobQueue, run_job};

/// Runs analysis jobs on a dedicated thread, one at a time, in submission
/// order. Dropping the worker closes the job channel; the thread exits after
/// the job it is currently running.
pub struct AnalysisWorker {
    tx: Sender<AnalysisJob>,
    rx: Receiver<Completion>,
    cancelled: Arc<Mutex<HashSet<TrackId>>>,
    _handle: Option<JoinHandle<()>>,
}

impl AnalysisWorker {
    pub fn spawn(settings: SpectrumSettings) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<AnalysisJob>();
        let (done_tx, done_rx) = mpsc::channel::<Completion>();
        let cancelled = Arc::new(Mutex::new(HashSet::new()));
        let skip = Arc::clone(&cancelled);

        let handle = thread::Builder::new()
            .name("analysis".to_string())
            .spawn(move || {
                for job in job_rx {
                    let id = job.id();
                    if is_cancelled(&skip, id) {
                        debug!("track {id}: skipping analysis for a removed track");
                        continue;
                    }
                    let completion = run_job(job, &settings);
                    if done_tx.send(completion).is_err() {
                        break;
                    }
                }
                debug!("analysis worker stopped");
            })
            .ok();

        Self {
            tx: job_tx,
            rx: done_rx,
            cancelled,
            _handle: handle,
        }
    }

    /// Completions that have arrived so far, without blocking.
    pub fn try_completions(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }

    /// Block until one completion arrives or the worker is gone.
    #[cfg(test)]
    pub fn recv(&self) -> Option<Completion> {
        self.rx.recv().ok()
    }
}

fn is_cancelled(set: &Mutex<HashSet<TrackId>>, id: TrackId) -> bool {
    set.lock().map(|s| s.contains(&id)).unwrap_or(false)
}

impl JobQueue for AnalysisWorker {
    fn submit(&mut self, job: AnalysisJob) {
        if self.tx.send(job).is_err() {
            debug!("analysis worker is gone; job dropped");
        }
    }

    // Ids are never reused, so a cancelled id stays in the set.
    fn cancel(&mut self, id: TrackId) {
        if let Ok(mut set) = self.cancelled.lock() {
            set.insert(id);
        }
    }
}
