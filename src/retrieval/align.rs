use crate::config::{NW_GAP, NW_MATCH, NW_MISMATCH};

/// Memory-efficient Needleman-Wunsch global alignment, one row at a time.
/// Grounded directly on the reference aligner, including its edge-case
/// correction: after each row, the row's last cell is also compared against
/// the diagonal value carried from the previous row, not just the standard
/// three-way max.
///
/// Returns `0.5 * best_score / min(len(a), len(b))`, or `0.0` if either
/// sequence is empty.
pub fn needleman_wunsch(a: &[i32], b: &[i32]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Columns track the shorter sequence so the working row stays small.
    let (cols, rows) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut row = vec![0i32; cols.len() + 1];

    for &r_val in rows {
        let mut diag = 0i32;
        for col in 1..=cols.len() {
            let prev_diag = diag;
            diag = row[col];

            let match_score = prev_diag + if cols[col - 1] == r_val { NW_MATCH } else { NW_MISMATCH };
            row[col] = match_score.max(row[col - 1] + NW_GAP).max(row[col] + NW_GAP);
        }
        let last = row[cols.len()];
        row[cols.len()] = last.max(diag);
    }

    let best = *row.iter().max().expect("row is never empty");
    0.5 * best as f64 / cols.len().min(rows.len()) as f64
}
