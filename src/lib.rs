//! Audio-to-contour transcription and tune retrieval for monophonic folk
//! recordings.
//!
//! The pipeline runs in the order the modules are declared below: a raw PCM
//! buffer becomes a fine spectrogram ([`spectrogram`]), which is reduced and
//! sparsified into a per-MIDI spectrogram ([`postprocess`]), decoded into a
//! pitch contour ([`decoder`]), encoded into a query string ([`contour`]),
//! and finally matched against a tune index ([`retrieval`]).

pub mod config;
pub mod contour;
pub mod decoder;
pub mod error;
pub mod io;
pub mod postprocess;
pub mod retrieval;
pub mod spectrogram;

pub use config::Config;
pub use error::{Error, Result};

/// Run the full transcription pipeline (components A-C) over an 8-second,
/// `config::SAMPLE_RATE`-Hz, mono PCM buffer and return its decoded pitch
/// contour.
pub fn transcribe(samples: &[f32], cfg: &Config) -> Result<decoder::Decoded> {
    let fine = spectrogram::build_fine_spectrogram(samples, cfg)?;
    let coarse = postprocess::build_coarse_spectrogram(&fine);
    decoder::decode(coarse, cfg)
}

/// Run the full pipeline (components A-E) over a PCM buffer and an index,
/// returning ranked `(setting_id, score)` matches. An empty result means the
/// query had no detectable pitched content (`Decoded::NoSignal`), not an
/// error.
pub fn query(samples: &[f32], cfg: &Config, index: &retrieval::Index) -> Result<Vec<(String, f64)>> {
    let decoded = transcribe(samples, cfg)?;
    let contour = match decoded {
        decoder::Decoded::NoSignal => return Ok(Vec::new()),
        decoder::Decoded::Contour(c) => c,
    };

    let query_string = contour::encode(&contour);
    let query_pitches = contour::decode_to_pitches(&query_string)?;

    Ok(retrieval::run_query(&query_pitches, index))
}
