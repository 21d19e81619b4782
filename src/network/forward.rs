use crate::activation::{relu, softmax};
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::params::ParameterSet;

/// Intermediates of one forward pass, kept for the backward pass.
#[derive(Debug, Clone)]
pub struct ForwardCache {
    /// `X·W1 + b1`
    pub pre_activation: Matrix,
    /// `relu(pre_activation)`
    pub hidden: Matrix,
    /// `hidden·W2 + b2`
    pub scores: Matrix,
    /// `softmax(scores)`
    pub probabilities: Matrix,
}

/// Maps a feature batch to class probabilities. Never touches `params`.
pub fn forward(features: &Matrix, params: &ParameterSet) -> Result<ForwardCache> {
    if features.cols() != params.features() {
        return Err(NetError::shape(
            "forward",
            (features.rows(), params.features()),
            features.shape(),
        ));
    }

    let pre_activation = features.matmul(&params.w1)?.add_row(&params.b1)?;
    let hidden = relu(&pre_activation);
    let scores = hidden.matmul(&params.w2)?.add_row(&params.b2)?;
    let probabilities = softmax(&scores);

    Ok(ForwardCache {
        pre_activation,
        hidden,
        scores,
        probabilities,
    })
}
