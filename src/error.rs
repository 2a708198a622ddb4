use thiserror::Error;

/// Error taxonomy for the query pipeline.
///
/// `NoSignal` is intentionally absent here: per design, an all-zero
/// spectrogram is a successful, empty result, not a failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error("insufficient samples: need at least {needed}, got {got}")]
    InsufficientSamples { needed: usize, got: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("index error: {0}")]
    Index(String),

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
