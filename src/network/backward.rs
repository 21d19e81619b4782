use crate::activation::zero_inactive;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::forward::ForwardCache;
use crate::network::params::ParameterSet;

/// Gradient of the regularized loss for every parameter array. Shapes mirror
/// `ParameterSet` one for one.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
}

/// Backpropagates the softmax + cross-entropy error through both layers.
///
/// The output error is the combined softmax/cross-entropy gradient
/// `(P - Y) / n`; neither Jacobian is applied separately. Layer 2 is handled
/// first and reads the pre-update `W2`, then the signal is pushed through
/// `W2ᵀ` and masked by the ReLU before layer 1.
pub fn backward(
    features: &Matrix,
    labels: &Matrix,
    cache: &ForwardCache,
    params: &ParameterSet,
    lambda: f64,
) -> Result<Gradients> {
    let probabilities = &cache.probabilities;
    if labels.shape() != probabilities.shape() {
        return Err(NetError::shape("backward", probabilities.shape(), labels.shape()));
    }
    if features.rows() != labels.rows() {
        return Err(NetError::shape(
            "backward",
            (labels.rows(), params.features()),
            features.shape(),
        ));
    }
    let n = features.rows();
    if n == 0 {
        return Err(NetError::EmptyBatch);
    }

    let output_delta = probabilities.sub(labels)?.scale(1.0 / n as f64);

    // Layer 2
    let w2 = cache
        .hidden
        .transpose()
        .matmul(&output_delta)?
        .add(&params.w2.scale(lambda))?;
    let b2 = output_delta.sum_rows();

    // Layer 1
    let hidden_delta = zero_inactive(
        &output_delta.matmul(&params.w2.transpose())?,
        &cache.hidden,
    )?;
    let w1 = features
        .transpose()
        .matmul(&hidden_delta)?
        .add(&params.w1.scale(lambda))?;
    let b1 = hidden_delta.sum_rows();

    Ok(Gradients { w1, b1, w2, b2 })
}
