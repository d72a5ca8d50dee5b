use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::Source;
use rodio::decoder::{Decoder, DecoderError};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecoderError,
    },
    #[error("{0} contains no samples")]
    Empty(String),
}

/// Decode a file into its first channel as a flat sample sequence.
pub fn decode_to_mono(path: &Path) -> Result<Vec<f32>, DecodeError> {
    let file = File::open(path).map_err(|source| DecodeError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| DecodeError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let channels = usize::from(decoder.channels()).max(1);
    let samples: Vec<f32> = decoder.step_by(channels).collect();
    if samples.is_empty() {
        return Err(DecodeError::Empty(path.display().to_string()));
    }
    Ok(samples)
}
