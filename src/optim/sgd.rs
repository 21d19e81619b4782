use crate::error::Result;
use crate::network::backward::Gradients;
use crate::network::params::ParameterSet;

/// Plain gradient descent: `param -= learning_rate * gradient`.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to every array of `params`.
    ///
    /// The new set is built in full before being swapped in, so a shape error
    /// halfway through leaves `params` untouched.
    pub fn step(&self, params: &mut ParameterSet, grads: &Gradients) -> Result<()> {
        let lr = self.learning_rate;
        let next = ParameterSet {
            w1: params.w1.sub(&grads.w1.scale(lr))?,
            b1: params.b1.sub(&grads.b1.scale(lr))?,
            w2: params.w2.sub(&grads.w2.scale(lr))?,
            b2: params.b2.sub(&grads.b2.scale(lr))?,
        };
        *params = next;
        Ok(())
    }
}
