//! Background duration probing and spectrum analysis.
//!
//! Jobs are fire-and-forget: the session submits them on admission and later
//! receives `Completion`s keyed by `TrackId`. A completion for a track that
//! is no longer in the registry is dropped by the session on arrival.

mod job;
mod worker;

pub use job::*;
pub use worker::AnalysisWorker;
