use std::path::Path;

/// The playlist label for a file: its final path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Format seconds as `MM:SS`; unknown (zero, negative or non-finite)
/// durations render as `--:--`.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "--:--".to_string();
    }
    let total = secs.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
