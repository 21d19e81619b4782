use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Rectified-linear transform: `max(x, 0)` element-wise.
pub fn relu(x: &Matrix) -> Matrix {
    x.map(|v| if v > 0.0 { v } else { 0.0 })
}

/// Row-major mask, `true` wherever the activated value is `<= 0`.
///
/// Those are the inactive units whose error signal must be dropped during
/// backprop. Works on either pre- or post-activation values, since both agree
/// on the sign.
pub fn relu_inactive_mask(activated: &Matrix) -> Vec<bool> {
    activated.as_slice().iter().map(|&v| v <= 0.0).collect()
}

/// Zeroes every entry of `signal` whose matching `activated` unit is inactive.
pub fn zero_inactive(signal: &Matrix, activated: &Matrix) -> Result<Matrix> {
    if signal.shape() != activated.shape() {
        return Err(NetError::shape("zero_inactive", activated.shape(), signal.shape()));
    }
    let (rows, cols) = signal.shape();
    let data = signal
        .as_slice()
        .iter()
        .zip(relu_inactive_mask(activated))
        .map(|(&s, inactive)| if inactive { 0.0 } else { s })
        .collect();
    Matrix::from_vec(rows, cols, data)
}
