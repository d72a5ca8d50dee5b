use std::path::Path;

use lofty::file::AudioFile;

/// Container duration in seconds, or `None` when it cannot be read or is zero.
pub fn probe_duration(path: &Path) -> Option<f64> {
    let tagged = lofty::read_from_path(path).ok()?;
    let secs = tagged.properties().duration().as_secs_f64();
    (secs > 0.0).then_some(secs)
}
