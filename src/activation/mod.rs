pub mod relu;
pub mod softmax;

pub use relu::{relu, relu_inactive_mask, zero_inactive};
pub use softmax::softmax;
