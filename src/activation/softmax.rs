use crate::math::matrix::Matrix;

/// Row-wise softmax: every row of the result is a probability distribution
/// over the columns.
///
/// Each row is shifted by its maximum before exponentiating, so large scores
/// do not overflow. The shift cancels out in the normalization and leaves the
/// result mathematically unchanged. Rows that already contain NaN or ∞ still
/// produce non-finite output; that is left for the caller to notice in the loss.
pub fn softmax(scores: &Matrix) -> Matrix {
    let mut out = scores.clone();

    for r in 0..out.rows() {
        let row = out.row_mut(r);
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for x in row.iter_mut() {
            *x = (*x - max).exp();
        }
        let sum: f64 = row.iter().sum();
        for x in row.iter_mut() {
            *x /= sum;
        }
    }

    out
}
