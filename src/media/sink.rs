//! Utilities for creating `rodio` sinks from media files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at position 0 on the shared mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::MediaError;

/// Create a paused `Sink` for `path`, returning the decoder's total
/// duration when the container reports one.
pub(super) fn create_sink(
    stream: &OutputStream,
    path: &Path,
) -> Result<(Sink, Option<Duration>), MediaError> {
    let file = File::open(path).map_err(|source| MediaError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
