//! Fixed constants and precomputed, process-wide tables shared by every
//! stage (component F). Nothing in this module is query-dependent; a single
//! [`Config`] is built once and shared read-only thereafter.

use std::sync::{Mutex, OnceLock};

use crate::error::{Error, Result};

pub const SAMPLE_RATE: u32 = 48_000;
pub const AUDIO_QUERY_SECS: usize = 8;
pub const AUDIO_SAMPLES: usize = SAMPLE_RATE as usize * AUDIO_QUERY_SECS;

pub const SPEC_WINDOW_SIZE: usize = 1024;
pub const SPEC_NUM_FRAMES: usize = 375;

pub const MIDI_LOW: i32 = 48;
pub const MIDI_HIGH: i32 = 95;
pub const MIDI_NUM: usize = 48;
pub const SPEC_BINS_PER_MIDI: usize = 3;
pub const SPEC_NUM_BINS: usize = MIDI_NUM * SPEC_BINS_PER_MIDI;

pub const OCTAVE_DEDUPE_THRESH: f64 = 1.0;
pub const SPARSE_TOP_K: usize = 5;

pub const BEAM_WIDTH: usize = 40;
pub const TEMPO_LENGTH_SCALE: f64 = 8.0;
pub const TEMPO_MODEL_WEIGHT: f64 = 0.4;
pub const PITCH_MODEL_WEIGHT: f64 = 0.12;
pub const PITCH_UNKNOWN_INTERVAL_SCORE: f64 = -20.0;

pub const NW_CANDIDATE_NUM: usize = 500;
pub const NW_RESULT_NUM: usize = 100;
pub const NW_MATCH: i32 = 2;
pub const NW_MISMATCH: i32 = -2;
pub const NW_GAP: i32 = -1;

/// 48-symbol query alphabet, `a..z A..V`. `-` is reserved as a blank and is
/// never emitted by the contour codec.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUV";
pub const ALPHABET_BLANK: char = '-';

/// Sparse interpolation weights for MIDI-linear resampling of the raw
/// enhanced-autocorrelation vector (length `SPEC_WINDOW_SIZE / 2`, after the
/// DC bin is dropped) onto `SPEC_NUM_BINS` linearly-spaced MIDI positions.
///
/// Applied as `out[i] = lo_w[i] * source[lo_idx[i]] + hi_w[i] * source[hi_idx[i]]`.
#[derive(Debug, Clone)]
pub struct ResampleTable {
    pub lo_idx: Vec<usize>,
    pub hi_idx: Vec<usize>,
    pub lo_w: Vec<f64>,
    pub hi_w: Vec<f64>,
}

/// Convert a raw autocorrelation bin index (1-based, i.e. the DC bin has
/// already been dropped) to the MIDI pitch it represents, per
/// `midi = 69 + log2((SAMPLE_RATE/440)/index) / log2(2^(1/12))`.
fn bin_to_midi(bin_index: f64) -> f64 {
    let log_base = 2f64.powf(1.0 / 12.0);
    69.0 + (SAMPLE_RATE as f64 / 440.0 / bin_index).log2() / log_base.log2()
}

fn build_resample_table() -> Result<ResampleTable> {
    // Source bins are indices 1..=n_source of the raw (DC-dropped) EAC
    // vector; source_midi[j] is the MIDI value of physical bin (j + 1).
    let n_source = SPEC_WINDOW_SIZE / 2;
    let source_midi: Vec<f64> = (0..n_source).map(|j| bin_to_midi((j + 1) as f64)).collect();

    // Target bin centers: linspace from MIDI_HIGH + half a bin down to
    // MIDI_LOW - half a bin, SPEC_NUM_BINS points, endpoint inclusive.
    let half_step = (SPEC_BINS_PER_MIDI as f64 / 2.0) / SPEC_BINS_PER_MIDI as f64;
    let high_end = MIDI_HIGH as f64 + half_step;
    let low_end = MIDI_LOW as f64 - half_step;
    let n = SPEC_NUM_BINS;

    let mut lo_idx = vec![0usize; n];
    let mut hi_idx = vec![0usize; n];
    let mut lo_w = vec![0f64; n];
    let mut hi_w = vec![0f64; n];

    for i in 0..n {
        let target = if n == 1 {
            high_end
        } else {
            high_end + (low_end - high_end) * (i as f64) / ((n - 1) as f64)
        };

        // source_midi is monotonically decreasing; find the first index
        // whose value has already dropped below `target`.
        let idx = source_midi.partition_point(|&v| v >= target);

        if idx == 0 || idx >= n_source {
            return Err(Error::Config(format!(
                "target MIDI bin {target:.3} (output bin {i}) falls outside \
                 the source-bin range [{:.3}, {:.3}]",
                source_midi[n_source - 1],
                source_midi[0]
            )));
        }

        let hi = idx;
        let lo = idx - 1;
        let denom = source_midi[lo] - source_midi[hi];
        let w_lo = if denom.abs() < f64::EPSILON {
            1.0
        } else {
            (target - source_midi[hi]) / denom
        };

        lo_idx[i] = lo;
        hi_idx[i] = hi;
        lo_w[i] = w_lo;
        hi_w[i] = 1.0 - w_lo;
    }

    Ok(ResampleTable {
        lo_idx,
        hi_idx,
        lo_w,
        hi_w,
    })
}

/// Log-prior log-likelihood table for pitch intervals, semitones -12..=12
/// (0 excluded, a pitch never "changes" to itself). Values carried over from
/// the reference implementation's fitted interval model.
fn pitch_interval_table() -> std::collections::HashMap<i32, f64> {
    [
        (-12, -2.639916731),
        (-11, -4.394149488),
        (-10, -2.972304221),
        (-9, -2.166698359),
        (-8, -2.306580069),
        (-7, -1.162611053),
        (-6, -3.731280049),
        (-5, -0.6308846752),
        (-4, -0.6756249503),
        (-3, -0.3947562571),
        (-2, -0.2396100196),
        (-1, -1.375965628),
        (1, -1.300531153),
        (2, 0.0),
        (3, -0.3356148385),
        (4, -0.59683188),
        (5, -0.3042728195),
        (6, -3.049916994),
        (7, -1.22192358),
        (8, -2.487884978),
        (9, -2.772818809),
        (10, -3.572246443),
        (11, -5.149161163),
        (12, -3.41406825),
    ]
    .into_iter()
    .collect()
}

pub struct Config {
    pub resample: ResampleTable,
    pitch_table: std::collections::HashMap<i32, f64>,
    tempo_memo: Mutex<Vec<Option<f64>>>,
}

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Config {
            resample: build_resample_table()?,
            pitch_table: pitch_interval_table(),
            tempo_memo: Mutex::new(vec![None; SPEC_NUM_FRAMES + 1]),
        })
    }

    /// Process-wide, lazily-built shared configuration. Panics only if the
    /// fixed constants in this module are themselves inconsistent, which
    /// would be a build-time programming error, not a runtime condition.
    pub fn global() -> &'static Config {
        static INSTANCE: OnceLock<Config> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            Config::new().expect("built-in configuration constants must be internally consistent")
        })
    }

    /// `pitch_score(interval)`: weighted log-prior log-likelihood for a
    /// pitch changing by `interval` semitones. Unknown intervals (outside
    /// -12..=12, or the impossible interval 0) score a large fixed penalty.
    pub fn pitch_score(&self, interval: i32) -> f64 {
        let raw = if interval == 0 {
            PITCH_UNKNOWN_INTERVAL_SCORE
        } else {
            *self
                .pitch_table
                .get(&interval)
                .unwrap_or(&PITCH_UNKNOWN_INTERVAL_SCORE)
        };
        PITCH_MODEL_WEIGHT * raw
    }

    /// `tempo_score(d)`: log-partition cost of `d` frames since the last
    /// note change, memoized across the lifetime of the process.
    pub fn tempo_score(&self, d: usize) -> f64 {
        {
            let memo = self.tempo_memo.lock().unwrap();
            if let Some(Some(cached)) = memo.get(d) {
                return *cached;
            }
        }

        let score = compute_tempo_score(d);

        let mut memo = self.tempo_memo.lock().unwrap();
        if d >= memo.len() {
            memo.resize(d + 1, None);
        }
        memo[d] = Some(score);
        score
    }
}

fn compute_tempo_score(d: usize) -> f64 {
    let x = d as f64 / TEMPO_LENGTH_SCALE;
    let n_lo = x.floor() as i64;
    let n_hi = n_lo + 1;

    let hi_score = n_hi as f64 * (x / n_hi as f64).ln().abs();
    let score = if n_lo > 0 {
        let lo_score = n_lo as f64 * (x / n_lo as f64).ln().abs();
        lo_score.min(hi_score)
    } else {
        hi_score
    };

    TEMPO_MODEL_WEIGHT * score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_table_covers_all_target_bins() {
        let cfg = Config::new().expect("fixed constants must build a valid table");
        assert_eq!(cfg.resample.lo_idx.len(), SPEC_NUM_BINS);
        for i in 0..SPEC_NUM_BINS {
            assert!(cfg.resample.lo_idx[i] < cfg.resample.hi_idx[i]);
            let w = cfg.resample.lo_w[i] + cfg.resample.hi_w[i];
            assert!((w - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tempo_score_minimized_at_multiples_of_length_scale() {
        let cfg = Config::new().unwrap();
        let at_multiple = cfg.tempo_score(TEMPO_LENGTH_SCALE as usize * 3);
        assert!(at_multiple < 1e-9);

        let off_multiple = cfg.tempo_score(TEMPO_LENGTH_SCALE as usize * 3 + 3);
        assert!(off_multiple > at_multiple);
    }

    #[test]
    fn tempo_score_is_never_negative() {
        let cfg = Config::new().unwrap();
        for d in 1..400 {
            assert!(cfg.tempo_score(d) >= 0.0);
        }
    }

    #[test]
    fn pitch_score_known_interval_matches_table() {
        let cfg = Config::new().unwrap();
        assert!((cfg.pitch_score(2) - 0.0).abs() < 1e-12);
        assert!(cfg.pitch_score(-11) < cfg.pitch_score(2));
    }

    #[test]
    fn pitch_score_unknown_interval_is_large_and_negative() {
        let cfg = Config::new().unwrap();
        let unknown = cfg.pitch_score(40);
        assert!((unknown - PITCH_MODEL_WEIGHT * PITCH_UNKNOWN_INTERVAL_SCORE).abs() < 1e-12);
    }
}
