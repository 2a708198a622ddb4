//! Component A: PCM -> MIDI-linear enhanced-autocorrelation spectrogram.

mod eac;

pub use eac::build_fine_spectrogram;
