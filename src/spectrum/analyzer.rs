use super::profile::{BAND_COUNT, BandProfile};

/// Scale applied to each band's RMS before clamping to `[0, 1]`.
pub const DEFAULT_GAIN: f32 = 10.0;

/// Split `samples` into `BAND_COUNT` contiguous slices of `len / BAND_COUNT`
/// samples each (the last slice also takes the remainder) and map each slice
/// to `min(1, rms * gain)`. Empty slices yield 0.
pub fn analyze(samples: &[f32], gain: f32) -> BandProfile {
    let n = samples.len();
    let band_len = n / BAND_COUNT;

    BandProfile::from_fn(|band| {
        let start = (band * band_len).min(n);
        let end = if band == BAND_COUNT - 1 {
            n
        } else {
            ((band + 1) * band_len).min(n)
        };
        rms(&samples[start..end]) * gain
    })
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples
        .iter()
        .filter(|s| s.is_finite())
        .map(|&s| f64::from(s) * f64::from(s))
        .sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}
