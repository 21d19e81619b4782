pub mod backward;
pub mod forward;
pub mod inference;
pub mod params;

pub use backward::{backward, Gradients};
pub use forward::{forward, ForwardCache};
pub use inference::{accuracy, classify, predict};
pub use params::ParameterSet;
