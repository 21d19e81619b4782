use crate::math::matrix::Matrix;

/// L2 weight-decay penalty: `Σ_W 0.5 · λ · Σ(W ⊙ W)`.
///
/// Only weight matrices are passed in; biases are never regularized.
pub fn l2_penalty(lambda: f64, weights: &[&Matrix]) -> f64 {
    weights.iter().map(|w| 0.5 * lambda * w.sum_squares()).sum()
}
