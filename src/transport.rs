//! Master transport: maps one progress ratio onto every playing track and
//! derives that ratio back from the longest playing track.

mod guard;
mod sync;

pub use guard::SeekGuard;
pub use sync::*;
