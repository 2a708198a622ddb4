use std::f64::consts::PI;

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::config::{Config, AUDIO_SAMPLES, SPEC_NUM_BINS, SPEC_WINDOW_SIZE};
use crate::error::{Error, Result};

/// Blackman window of length `n`.
fn blackman_window(n: usize) -> Vec<f64> {
    let denom = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let x = i as f64;
            0.42 - 0.5 * (2.0 * PI * x / denom).cos() + 0.08 * (4.0 * PI * x / denom).cos()
        })
        .collect()
}

/// Build the fine (pre-postprocessing) MIDI-linear enhanced-autocorrelation
/// spectrogram for an 8-second, `SAMPLE_RATE`-Hz, mono PCM buffer.
///
/// Input shorter than `AUDIO_SAMPLES` fails with `Error::InsufficientSamples`.
/// Longer input is truncated silently, matching §4.A.
pub fn build_fine_spectrogram(samples: &[f32], cfg: &Config) -> Result<Vec<Vec<f64>>> {
    if samples.len() < AUDIO_SAMPLES {
        return Err(Error::InsufficientSamples {
            needed: AUDIO_SAMPLES,
            got: samples.len(),
        });
    }
    let samples = &samples[..AUDIO_SAMPLES];
    let num_frames = AUDIO_SAMPLES / SPEC_WINDOW_SIZE;

    let window = blackman_window(SPEC_WINDOW_SIZE);

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(SPEC_WINDOW_SIZE);

    let mut spectrogram = vec![vec![0f64; SPEC_NUM_BINS]; num_frames];

    spectrogram.par_iter_mut().enumerate().for_each(|(frame_idx, out_row)| {
        let start = frame_idx * SPEC_WINDOW_SIZE;
        let frame = &samples[start..start + SPEC_WINDOW_SIZE];

        let mut buf: Vec<Complex<f64>> = frame
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| Complex::new(s as f64 * w, 0.0))
            .collect();
        fft.process(&mut buf);

        // Cube-root magnitude compression, then a second forward transform.
        let mut compressed: Vec<Complex<f64>> =
            buf.iter().map(|c| Complex::new(c.norm().cbrt(), 0.0)).collect();
        fft.process(&mut compressed);

        // Real part, clipped to non-negative, DC bin dropped: physical bins
        // 1..=SPEC_WINDOW_SIZE/2 of the raw autocorrelation vector.
        let eac: Vec<f64> = compressed[1..=SPEC_WINDOW_SIZE / 2]
            .iter()
            .map(|c| c.re.max(0.0))
            .collect();

        for i in 0..SPEC_NUM_BINS {
            let lo = cfg.resample.lo_idx[i];
            let hi = cfg.resample.hi_idx[i];
            out_row[i] = cfg.resample.lo_w[i] * eac[lo] + cfg.resample.hi_w[i] * eac[hi];
        }
    });

    Ok(spectrogram)
}
