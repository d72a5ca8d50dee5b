use crate::audibility;
use crate::registry::Track;

use super::profile::{BAND_COUNT, BandProfile};

/// Combine the profiles of audible, analysed tracks into one display profile.
///
/// Each audible track contributes `band * volume`; the sum is normalised by
/// its peak. Returns `None` ("empty") when no audible track has a profile.
/// An all-zero sum stays all-zero.
pub fn mix(tracks: &[Track]) -> Option<BandProfile> {
    let audible = audibility::resolve(tracks);

    let mut contributors = tracks
        .iter()
        .filter(|t| audible.is_audible(t.id()))
        .filter_map(|t| t.spectrum.as_ref().map(|p| (p, t.volume())))
        .peekable();
    contributors.peek()?;

    let mut acc = [0.0f32; BAND_COUNT];
    for (profile, volume) in contributors {
        for (slot, band) in acc.iter_mut().zip(profile.bands()) {
            *slot += band * volume;
        }
    }

    let peak = acc.iter().copied().fold(0.0, f32::max);
    if peak > 0.0 {
        Some(BandProfile::from_fn(|i| acc[i] / peak))
    } else {
        Some(BandProfile::silent())
    }
}
