pub mod cross_entropy;
pub mod l2;

pub use cross_entropy::{cross_entropy, one_hot_classes};
pub use l2::l2_penalty;

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::params::ParameterSet;

/// Regularized objective reported while training: cross-entropy of the
/// probabilities plus the L2 penalty on both weight matrices.
///
/// Monitoring only. Gradients are derived analytically in
/// `network::backward` and never from this value.
pub fn total_loss(
    probabilities: &Matrix,
    labels: &Matrix,
    lambda: f64,
    params: &ParameterSet,
) -> Result<f64> {
    Ok(cross_entropy(probabilities, labels)? + l2_penalty(lambda, &[&params.w1, &params.w2]))
}
