use rand::Rng;

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Weights and biases of the one-hidden-layer network.
///
/// Shapes:
/// - `w1` — features x hidden
/// - `b1` — 1 x hidden
/// - `w2` — hidden x classes
/// - `b2` — 1 x classes
///
/// The trainer owns the only mutable copy and swaps in a whole new set after
/// every update; forward and backward passes only ever borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
}

impl ParameterSet {
    /// Draws both weight matrices from N(0, init_std²) and zeroes the biases.
    pub fn init<R: Rng + ?Sized>(
        features: usize,
        hidden: usize,
        classes: usize,
        init_std: f64,
        rng: &mut R,
    ) -> Result<ParameterSet> {
        if features == 0 || hidden == 0 || classes == 0 {
            return Err(NetError::InvalidConfig(format!(
                "layer widths must be positive, got {features}-{hidden}-{classes}"
            )));
        }
        let params = ParameterSet {
            w1: Matrix::random_normal(features, hidden, init_std, rng)?,
            b1: Matrix::zeros(1, hidden),
            w2: Matrix::random_normal(hidden, classes, init_std, rng)?,
            b2: Matrix::zeros(1, classes),
        };
        log::debug!("initialized parameters {features}-{hidden}-{classes}, std {init_std}");
        Ok(params)
    }

    /// Assembles a set from caller-supplied arrays, checking every shape.
    pub fn from_parts(w1: Matrix, b1: Matrix, w2: Matrix, b2: Matrix) -> Result<ParameterSet> {
        let params = ParameterSet { w1, b1, w2, b2 };
        params.validate()?;
        Ok(params)
    }

    pub fn features(&self) -> usize {
        self.w1.rows()
    }

    pub fn hidden(&self) -> usize {
        self.w1.cols()
    }

    pub fn classes(&self) -> usize {
        self.w2.cols()
    }

    /// Checks that all four arrays agree on features, hidden width and classes,
    /// and that none of those widths is zero.
    pub fn validate(&self) -> Result<()> {
        let (features, hidden, classes) = (self.features(), self.hidden(), self.classes());
        if features == 0 || hidden == 0 || classes == 0 {
            return Err(NetError::ShapeMismatch {
                op: "parameters",
                expected: "positive layer widths".to_string(),
                got: format!("{features}-{hidden}-{classes}"),
            });
        }
        if self.w2.rows() != hidden {
            return Err(NetError::shape("w2", (hidden, classes), self.w2.shape()));
        }
        if self.b1.shape() != (1, hidden) {
            return Err(NetError::shape("b1", (1, hidden), self.b1.shape()));
        }
        if self.b2.shape() != (1, classes) {
            return Err(NetError::shape("b2", (1, classes), self.b2.shape()));
        }
        Ok(())
    }

    /// `Σ(W1²) + Σ(W2²)`; biases excluded, same as the L2 penalty.
    pub fn sum_squared_weights(&self) -> f64 {
        self.w1.sum_squares() + self.w2.sum_squares()
    }
}
