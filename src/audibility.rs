//! Solo/mute resolution.
//!
//! When any track is soloed, exactly the soloed tracks are audible and mute
//! flags are ignored. Otherwise a track is audible unless it is muted.
//! The result depends on the whole track set, so it is recomputed and
//! re-applied after every mute or solo change on any track.

use crate::registry::{Track, TrackId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audibility {
    entries: Vec<(TrackId, bool)>,
    solo_active: bool,
}

impl Audibility {
    /// Whether `id` should reach the output. Unknown ids are silent.
    pub fn is_audible(&self, id: TrackId) -> bool {
        self.entries
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, a)| *a)
            .unwrap_or(false)
    }

    /// True when at least one track is soloed.
    pub fn solo_active(&self) -> bool {
        self.solo_active
    }

    /// `(id, audible)` pairs in playlist order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, bool)> + '_ {
        self.entries.iter().copied()
    }

    pub fn audible_count(&self) -> usize {
        self.entries.iter().filter(|(_, a)| *a).count()
    }
}

pub fn resolve(tracks: &[Track]) -> Audibility {
    let solo_active = tracks.iter().any(|t| t.solo);
    let entries = tracks
        .iter()
        .map(|t| {
            let audible = if solo_active { t.solo } else { !t.muted };
            (t.id(), audible)
        })
        .collect();

    Audibility {
        entries,
        solo_active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::path::PathBuf;

    fn registry(flags: &[(bool, bool)]) -> (Registry, Vec<TrackId>) {
        let mut reg = Registry::default();
        let mut ids = Vec::new();
        for (i, &(muted, solo)) in flags.iter().enumerate() {
            let id = reg.add(PathBuf::from(format!("/tmp/{i}.wav")), format!("{i}"), 1.0);
            let t = reg.find_mut(id).unwrap();
            t.muted = muted;
            t.solo = solo;
            ids.push(id);
        }
        (reg, ids)
    }

    #[test]
    fn without_solo_audible_means_not_muted() {
        let (reg, ids) = registry(&[(false, false), (true, false), (false, false)]);
        let a = resolve(reg.tracks());
        assert!(!a.solo_active());
        assert!(a.is_audible(ids[0]));
        assert!(!a.is_audible(ids[1]));
        assert!(a.is_audible(ids[2]));
        assert_eq!(a.audible_count(), 2);
    }

    #[test]
    fn solo_overrides_mute_everywhere() {
        let (reg, ids) = registry(&[(false, false), (true, true), (false, true), (true, false)]);
        let a = resolve(reg.tracks());
        assert!(a.solo_active());
        assert!(!a.is_audible(ids[0]));
        assert!(a.is_audible(ids[1]));
        assert!(a.is_audible(ids[2]));
        assert!(!a.is_audible(ids[3]));
    }

    #[test]
    fn only_soloed_track_that_is_also_muted_is_audible() {
        let (reg, ids) = registry(&[(true, true), (false, false)]);
        let a = resolve(reg.tracks());
        assert!(a.is_audible(ids[0]));
        assert!(!a.is_audible(ids[1]));
    }

    #[test]
    fn toggling_one_solo_changes_every_other_track() {
        let (mut reg, ids) = registry(&[(false, false), (false, false), (false, false)]);
        assert_eq!(resolve(reg.tracks()).audible_count(), 3);

        reg.find_mut(ids[1]).unwrap().solo = true;
        let a = resolve(reg.tracks());
        assert_eq!(a.audible_count(), 1);
        assert!(!a.is_audible(ids[0]));
        assert!(!a.is_audible(ids[2]));
    }

    #[test]
    fn resolve_is_pure() {
        let (reg, _) = registry(&[(true, false), (false, true)]);
        assert_eq!(resolve(reg.tracks()), resolve(reg.tracks()));
    }

    #[test]
    fn empty_track_set_resolves_to_empty() {
        let a = resolve(&[]);
        assert_eq!(a.iter().count(), 0);
        assert!(!a.solo_active());
    }
}
