pub const BAND_COUNT: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct BandProfile(Box<[f32; BAND_COUNT]>);

impl BandProfile {
    pub fn silent() -> Self {
        Self(Box::new([0.0; BAND_COUNT]))
    }

    /// Build from any per-band values, clamping each into `[0, 1]`.
    pub fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        let mut bands = Box::new([0.0; BAND_COUNT]);
        for (i, slot) in bands.iter_mut().enumerate() {
            let v = f(i);
            *slot = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        }
        Self(bands)
    }

    #[cfg(test)]
    pub fn uniform(value: f32) -> Self {
        Self::from_fn(|_| value)
    }

    pub fn bands(&self) -> &[f32; BAND_COUNT] {
        &self.0
    }
}
