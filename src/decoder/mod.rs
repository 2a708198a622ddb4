//! Component C: beam-search decoder turning a sparse coarse spectrogram into
//! a per-frame pitch contour (decoder-index space, 0 = `MIDI_HIGH`).

use crate::config::{Config, BEAM_WIDTH};
use crate::error::{Error, Result};

/// Decoded output. An all-zero spectrogram (silence, or a query with no
/// detectable pitched content) is a successful, empty result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Contour(Vec<usize>),
    NoSignal,
}

#[derive(Clone)]
struct Proposal {
    prev: usize,
    pitch: usize,
    score: f64,
    duration: u32,
    pitch_changed: bool,
}

/// Run the beam-search decoder over a sparse coarse spectrogram.
///
/// `spectrogram` is consumed and normalized in place (§5: energy
/// normalization, `spec *= num_frames / total_energy`, happens once up
/// front).
pub fn decode(mut spectrogram: Vec<Vec<f64>>, cfg: &Config) -> Result<Decoded> {
    let num_frames = spectrogram.len();
    if num_frames == 0 {
        return Ok(Decoded::NoSignal);
    }
    let num_pitches = spectrogram[0].len();

    let total_energy: f64 = spectrogram.iter().flatten().sum();
    if total_energy <= 0.0 {
        return Ok(Decoded::NoSignal);
    }
    let scale = num_frames as f64 / total_energy;
    for row in spectrogram.iter_mut() {
        for v in row.iter_mut() {
            *v *= scale;
        }
    }

    let mut beams: Vec<Vec<Proposal>> = Vec::with_capacity(num_frames);
    beams.push(
        (0..num_pitches)
            .map(|pitch| Proposal {
                prev: 0,
                pitch,
                score: spectrogram[0][pitch],
                duration: 1,
                pitch_changed: true,
            })
            .collect(),
    );

    for f in 1..num_frames {
        let active: Vec<usize> = (0..num_pitches).filter(|&q| spectrogram[f][q] != 0.0).collect();

        let mut drafted: Vec<Proposal> = Vec::new();
        for (prev_id, p) in beams[f - 1].iter().enumerate() {
            let mut pitches = active.clone();
            if !pitches.contains(&p.pitch) {
                pitches.push(p.pitch);
            }

            for &q in &pitches {
                let e = spectrogram[f][q];
                let changed = q != p.pitch;

                let (score, duration) = if changed {
                    // Real-semitone interval: the decoder axis is inverted
                    // (higher index = lower pitch), so the sign flips here.
                    let interval = p.pitch as i32 - q as i32;
                    // tempo_score is a non-negative inconsistency cost, so it
                    // must be subtracted, not added, or off-grid durations
                    // would be rewarded instead of penalized.
                    let s = p.score + e + cfg.pitch_score(interval) - cfg.tempo_score(p.duration as usize);
                    (s, 1u32)
                } else {
                    (p.score + e, p.duration + 1)
                };

                drafted.push(Proposal {
                    prev: prev_id,
                    pitch: q,
                    score,
                    duration,
                    pitch_changed: changed,
                });
            }
        }

        // Dedup: keep only the best-scoring proposal per destination pitch,
        // regardless of whether it arrived by holding or by changing pitch
        // (a held proposal can land on the same pitch a changed proposal
        // transitions into).
        let mut best_by_pitch: std::collections::HashMap<usize, Proposal> = std::collections::HashMap::new();
        for prop in drafted {
            match best_by_pitch.get(&prop.pitch) {
                Some(existing) if existing.score >= prop.score => {}
                _ => {
                    best_by_pitch.insert(prop.pitch, prop);
                }
            }
        }
        let mut kept: Vec<Proposal> = best_by_pitch.into_values().collect();

        kept.sort_by(|a, b| b.score.partial_cmp(&a.score).expect("scores are never NaN"));
        kept.truncate(BEAM_WIDTH);

        if kept.is_empty() {
            return Err(Error::Internal("beam emptied mid-query".to_string()));
        }

        beams.push(kept);
    }

    let last = beams.last().expect("at least one frame was processed");
    let (best_idx, _) = last
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.score.partial_cmp(&b.1.score).expect("scores are never NaN"))
        .ok_or_else(|| Error::Internal("final beam is empty".to_string()))?;

    let mut contour = vec![0usize; num_frames];
    let mut frame_idx = num_frames - 1;
    let mut beam_idx = best_idx;
    loop {
        let p = &beams[frame_idx][beam_idx];
        contour[frame_idx] = p.pitch;
        if frame_idx == 0 {
            break;
        }
        beam_idx = p.prev;
        frame_idx -= 1;
    }

    Ok(Decoded::Contour(contour))
}
