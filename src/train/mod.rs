pub mod batch;
pub mod iteration_stats;
pub mod train_config;
pub mod trainer;

pub use batch::BatchSchedule;
pub use iteration_stats::IterationStats;
pub use train_config::TrainConfig;
pub use trainer::{train, TrainOutcome, Trainer, TrainerState};
