//! Component D: pitch-contour <-> query-string codec.
//!
//! A decoder contour (decoder-index space, one entry per frame, 0 =
//! `MIDI_HIGH`) is run-length compressed and mapped onto the 48-symbol query
//! alphabet. The alphabet itself runs in ascending-MIDI order, matching the
//! reference implementation's `MIDI_MAP_[midi - MIDI_LOW]`: alphabet
//! position `MIDI_NUM-1-decoder_index` (equivalently `pitch - MIDI_LOW`)
//! holds the symbol for a decoder index, so ascending MIDI pitch walks
//! forward through the alphabet even though the decoder's own axis is
//! inverted.

use std::collections::HashSet;

use crate::config::{ALPHABET, MIDI_LOW, MIDI_NUM, TEMPO_LENGTH_SCALE};
use crate::error::{Error, Result};

fn alphabet_char(decoder_index: usize) -> char {
    ALPHABET
        .chars()
        .nth(MIDI_NUM - 1 - decoder_index)
        .expect("decoder index is always within the alphabet's range")
}

/// Encode a decoder-index contour into a query string: run-length compress,
/// quantize each run's length to a whole number of quavers
/// (`q = max(1, round(run_length / TEMPO_LENGTH_SCALE))`), and emit that many
/// copies of the run's alphabet symbol.
pub fn encode(contour: &[usize]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < contour.len() {
        let pitch = contour[i];
        let mut run_len = 1usize;
        while i + run_len < contour.len() && contour[i + run_len] == pitch {
            run_len += 1;
        }

        let quavers = ((run_len as f64 / TEMPO_LENGTH_SCALE).round() as usize).max(1);
        let ch = alphabet_char(pitch);
        for _ in 0..quavers {
            out.push(ch);
        }

        i += run_len;
    }
    out
}

/// Decode a query string back into a sequence of real MIDI pitches, one per
/// symbol (quaver), for use by the retrieval engine. Alphabet position `i`
/// holds MIDI pitch `i + MIDI_LOW`, matching the reference's ascending
/// `MIDI_MAP_[midi - MIDI_LOW]` convention.
pub fn decode_to_pitches(query: &str) -> Result<Vec<i32>> {
    query
        .chars()
        .map(|c| {
            let idx = ALPHABET
                .find(c)
                .ok_or_else(|| Error::Index(format!("invalid query-string symbol '{c}'")))?;
            Ok(idx as i32 + MIDI_LOW)
        })
        .collect()
}

/// All length-3 contiguous sub-sequences of `seq`, `{seq[i..i+3] : i in
/// 0..len(seq)-3}` (the reference implementation's own off-by-one: a
/// `len(seq) == 3` sequence yields zero trigrams, not one).
pub fn trigrams(seq: &[i32]) -> HashSet<(i32, i32, i32)> {
    let limit = seq.len().saturating_sub(3);
    (0..limit).map(|i| (seq[i], seq[i + 1], seq[i + 2])).collect()
}
