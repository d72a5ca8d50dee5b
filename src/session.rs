//! Event dispatcher wiring the registry, transport, spectrum mixer and loop
//! controller to a media backend and an analysis queue.
//!
//! Every user action, timer tick, media notification and analysis completion
//! is one `Event`, handled to completion by `Session::handle`. Results meant
//! for the display are queued as `Notice`s and drained by the caller.

mod dispatch;
mod types;

pub use dispatch::Session;
pub use types::*;
