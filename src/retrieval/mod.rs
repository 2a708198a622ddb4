//! Component E: two-phase retrieval (trigram-overlap heuristic, then
//! Needleman-Wunsch alignment) over a tune index.

mod align;
mod index;

pub use align::needleman_wunsch;
pub use index::Index;

use rayon::prelude::*;

use crate::config::{NW_CANDIDATE_NUM, NW_RESULT_NUM};
use crate::contour::trigrams;

/// Run a query contour against an index. Returns up to `NW_RESULT_NUM`
/// `(setting_id, score)` pairs, sorted by descending score, ties broken by
/// ascending setting id.
pub fn run_query(query_contour: &[i32], index: &Index) -> Vec<(String, f64)> {
    if query_contour.is_empty() {
        return Vec::new();
    }

    let query_trigrams = trigrams(query_contour);

    let mut heuristic: Vec<(&String, usize)> = index
        .contours
        .keys()
        .map(|id| {
            let overlap = index.trigrams[id].intersection(&query_trigrams).count();
            (id, overlap)
        })
        .collect();
    heuristic.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    heuristic.truncate(NW_CANDIDATE_NUM);

    let mut scored: Vec<(String, f64)> = heuristic
        .par_iter()
        .map(|(id, _)| {
            let candidate = &index.contours[*id];
            let score = needleman_wunsch(query_contour, candidate);
            ((*id).clone(), score)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .expect("alignment scores are never NaN")
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(NW_RESULT_NUM);
    scored
}
