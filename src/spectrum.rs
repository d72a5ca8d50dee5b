//! Band-energy profiles: per-track analysis and the mixed display profile.
//!
//! A profile is always exactly `BAND_COUNT` values in `[0, 1]`. Absence of a
//! profile is modelled with `Option`, never with an all-zero profile.

mod analyzer;
mod decode;
mod mixer;
mod profile;

pub use analyzer::{DEFAULT_GAIN, analyze};
pub use decode::{DecodeError, decode_to_mono};
pub use mixer::mix;
pub use profile::{BAND_COUNT, BandProfile};
