use super::*;
use crate::audibility;
use crate::registry::Registry;
use crate::session::Notice;
use crate::spectrum::BandProfile;
use std::path::PathBuf;

fn registry(n: usize) -> Registry {
    let mut reg = Registry::default();
    for i in 0..n {
        reg.add(PathBuf::from(format!("/t/{i}.wav")), format!("{i}.wav"), 1.0);
    }
    reg
}

#[test]
fn selection_stays_within_the_playlist() {
    let mut app = App::new(PathBuf::from("playlist.json"));
    app.prev();
    assert_eq!(app.selected, 0);

    app.next(3);
    app.next(3);
    app.next(3);
    assert_eq!(app.selected, 2);

    app.clamp_selection(1);
    assert_eq!(app.selected, 0);
    app.clamp_selection(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn selected_id_follows_playlist_order() {
    let reg = registry(2);
    let mut app = App::new(PathBuf::from("playlist.json"));
    app.next(reg.len());
    assert_eq!(app.selected_id(&reg), reg.get(1).map(|t| t.id()));
    assert_eq!(app.selected_id(&Registry::default()), None);
}

#[test]
fn notices_replace_display_state() {
    let reg = registry(2);
    let mut app = App::new(PathBuf::from("playlist.json"));

    app.apply(Notice::MasterProgressChanged(0.25));
    app.apply(Notice::SpectrumChanged(Some(BandProfile::uniform(0.5))));
    app.apply(Notice::AudibilityChanged(audibility::resolve(reg.tracks())));
    assert_eq!(app.progress, 0.25);
    assert!(app.spectrum.is_some());
    assert_eq!(app.audibility.audible_count(), 2);

    app.apply(Notice::SpectrumChanged(None));
    assert!(app.spectrum.is_none());
}
