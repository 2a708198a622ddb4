//! Component B: fine spectrogram -> sparse coarse (per-MIDI) spectrogram.
//!
//! Three sub-stages run in this order: per-MIDI summation first (it is what
//! produces the 48-wide MIDI axis that octave deduplication operates on),
//! then octave deduplication, then top-K sparsification. spec.md's own prose
//! lists octave deduplication first, but its own worked description of that
//! stage ("reshape the 48-pitch axis") only makes sense once the per-MIDI
//! axis exists; this ordering also matches the reference pipeline's actual
//! stage order (see DESIGN.md).

use rayon::prelude::*;

use crate::config::{MIDI_NUM, OCTAVE_DEDUPE_THRESH, SPARSE_TOP_K, SPEC_BINS_PER_MIDI};

/// B2: sum `SPEC_BINS_PER_MIDI` consecutive fine bins into each coarse bin.
/// Preserves the fine spectrogram's inverted axis (index 0 = `MIDI_HIGH`).
pub fn sum_per_midi(fine: &[Vec<f64>]) -> Vec<Vec<f64>> {
    fine.par_iter()
        .map(|row| {
            (0..MIDI_NUM)
                .map(|m| {
                    let base = m * SPEC_BINS_PER_MIDI;
                    row[base..base + SPEC_BINS_PER_MIDI].iter().sum()
                })
                .collect()
        })
        .collect()
}

/// B1: collapse octave-doubled energy down onto its fundamental.
///
/// Operates per frame, independently. Internally the coarse axis (index 0 =
/// `MIDI_HIGH`, descending) is reversed to ascending-pitch order so the
/// comparison below reads the same way the reference implementation does
/// (lower octave = lower array index), then reversed back.
pub fn dedupe_octaves(coarse: &mut [Vec<f64>]) {
    let num_octaves = MIDI_NUM / 12;

    coarse.par_iter_mut().for_each(|frame| {
        let mut asc: Vec<f64> = frame.iter().rev().copied().collect();
        let orig = asc.clone();

        // mask[o][p]: should energy at octave (o+1) fold down into octave o?
        // Computed once from the frame's pristine values, before any carries
        // are applied, matching the reference implementation.
        let mask: Vec<[bool; 12]> = (0..num_octaves - 1)
            .map(|o| {
                let mut row = [false; 12];
                for p in 0..12 {
                    row[p] = orig[(o + 1) * 12 + p] < OCTAVE_DEDUPE_THRESH * orig[o * 12 + p];
                }
                row
            })
            .collect();

        for octave in (1..num_octaves).rev() {
            for p in 0..12 {
                if mask[octave - 1][p] {
                    asc[(octave - 1) * 12 + p] += asc[octave * 12 + p];
                    asc[octave * 12 + p] = 0.0;
                }
            }
        }

        for k in 0..MIDI_NUM {
            frame[k] = asc[MIDI_NUM - 1 - k];
        }
    });
}

/// B3: keep only the `SPARSE_TOP_K` largest energies per frame, zeroing the
/// rest. Ties are broken by lower MIDI index (arbitrary but deterministic).
pub fn sparsify(coarse: &mut [Vec<f64>]) {
    coarse.par_iter_mut().for_each(|frame| {
        let mut order: Vec<usize> = (0..frame.len()).collect();
        order.sort_by(|&a, &b| {
            frame[b]
                .partial_cmp(&frame[a])
                .unwrap()
                .then(a.cmp(&b))
        });
        for &idx in order.iter().skip(SPARSE_TOP_K) {
            frame[idx] = 0.0;
        }
    });
}

/// Run all three sub-stages in order, producing the sparse coarse
/// spectrogram the decoder consumes.
pub fn build_coarse_spectrogram(fine: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut coarse = sum_per_midi(fine);
    dedupe_octaves(&mut coarse);
    sparsify(&mut coarse);
    coarse
}
