pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use network::{accuracy, classify, predict, ParameterSet};
pub use optim::sgd::Sgd;
pub use train::{train, IterationStats, TrainConfig, TrainOutcome, Trainer, TrainerState};
