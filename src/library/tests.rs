use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn has_extension_matches_configured_extensions_case_insensitive() {
    let settings = LibrarySettings::default();
    assert!(has_extension(Path::new("/tmp/a.mp3"), &settings.extensions));
    assert!(has_extension(Path::new("/tmp/a.MP3"), &settings.extensions));
    assert!(has_extension(Path::new("/tmp/a.webm"), &settings.extensions));
    assert!(has_extension(Path::new("/tmp/a.wav"), &settings.extensions));
    assert!(!has_extension(Path::new("/tmp/a.txt"), &settings.extensions));
    assert!(!has_extension(Path::new("/tmp/a"), &settings.extensions));

    let dotted = vec![".OGG".to_string(), "  ".to_string()];
    assert!(has_extension(Path::new("/tmp/a.ogg"), &dotted));
}

#[test]
fn display_name_is_the_file_name() {
    assert_eq!(display_name(Path::new("/music/stems/Bass.wav")), "Bass.wav");
    assert_eq!(display_name(Path::new("drums.mp3")), "drums.mp3");
}

#[test]
fn format_duration_pads_and_hides_unknown() {
    assert_eq!(format_duration(0.0), "--:--");
    assert_eq!(format_duration(f64::NAN), "--:--");
    assert_eq!(format_duration(5.9), "00:05");
    assert_eq!(format_duration(754.0), "12:34");
}

#[test]
fn playlist_files_are_recognised_by_extension() {
    assert!(is_playlist_file(Path::new("/tmp/mix.json")));
    assert!(is_playlist_file(Path::new("/tmp/mix.JSON")));
    assert!(!is_playlist_file(Path::new("/tmp/mix.wav")));
}

#[test]
fn collect_keeps_explicit_files_in_argument_order() {
    let settings = LibrarySettings::default();
    let inputs = vec![
        PathBuf::from("/tmp/z.wav"),
        PathBuf::from("/tmp/notes.txt"),
        PathBuf::from("/tmp/a.mov"),
    ];
    let out = collect_media(&inputs, &settings);
    assert_eq!(out, vec![PathBuf::from("/tmp/z.wav"), PathBuf::from("/tmp/a.mov")]);
}

#[test]
fn collect_expands_directories_sorted_by_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let out = collect_media(&[dir.path().to_path_buf()], &LibrarySettings::default());
    let names: Vec<String> = out.iter().map(|p| display_name(p)).collect();
    assert_eq!(names, vec!["A.ogg".to_string(), "b.MP3".to_string()]);
}

#[test]
fn collect_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let out = collect_media(&[dir.path().to_path_buf()], &settings);
    assert_eq!(out.len(), 1);
    assert_eq!(display_name(&out[0]), "visible.mp3");
}

#[test]
fn collect_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let out = collect_media(&[dir.path().to_path_buf()], &settings);
    assert_eq!(out.len(), 1);
    assert_eq!(display_name(&out[0]), "root.mp3");
}

#[test]
fn collect_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(d1.join("one.mp3"), b"not real").unwrap();
    fs::write(d2.join("two.mp3"), b"not real").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let names: Vec<String> = collect_media(&[dir.path().to_path_buf()], &settings)
        .iter()
        .map(|p| display_name(p))
        .collect();
    assert!(names.contains(&"root.mp3".to_string()));
    assert!(names.contains(&"one.mp3".to_string()));
    assert!(!names.contains(&"two.mp3".to_string()));
}

#[test]
fn probe_duration_is_none_for_garbage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fake.mp3");
    fs::write(&path, b"not a real mp3").unwrap();
    assert_eq!(probe_duration(&path), None);
}
