use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::analysis::JobQueue;
use crate::config::LibrarySettings;
use crate::library::{collect_media, display_name, is_playlist_file};
use crate::media::MediaBackend;
use crate::playlist;
use crate::session::Session;

/// Admit command-line inputs in order: playlist files contribute their
/// items, everything else goes through the media filter.
///
/// Returns the first playlist loaded, which becomes the save target.
pub fn admit<M: MediaBackend, Q: JobQueue>(
    inputs: &[PathBuf],
    library: &LibrarySettings,
    session: &mut Session<M, Q>,
) -> Option<PathBuf> {
    let mut loaded: Option<PathBuf> = None;
    let mut media: Vec<PathBuf> = Vec::new();

    for input in inputs {
        if input.is_file() && is_playlist_file(input) {
            flush(&mut media, library, session);
            if load_into(input, session) && loaded.is_none() {
                loaded = Some(input.clone());
            }
        } else {
            media.push(input.clone());
        }
    }
    flush(&mut media, library, session);

    info!("{} track(s) admitted", session.registry().len());
    loaded
}

fn flush<M: MediaBackend, Q: JobQueue>(
    pending: &mut Vec<PathBuf>,
    library: &LibrarySettings,
    session: &mut Session<M, Q>,
) {
    for path in collect_media(pending.as_slice(), library) {
        let name = display_name(&path);
        session.add(path, name, 1.0);
    }
    pending.clear();
}

fn load_into<M: MediaBackend, Q: JobQueue>(path: &Path, session: &mut Session<M, Q>) -> bool {
    match playlist::load(path) {
        Ok(items) => {
            for item in items {
                session.add(item.path, item.name, item.volume);
            }
            true
        }
        Err(e) => {
            warn!("{e}");
            false
        }
    }
}
