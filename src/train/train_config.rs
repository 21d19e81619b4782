use std::path::Path;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::train::iteration_stats::IterationStats;

/// Configuration for a training run.
///
/// # Fields
/// - `hidden_units`  — width of the hidden layer
/// - `learning_rate` — gradient-descent step size
/// - `lambda`        — L2 weight-decay coefficient; `0` disables it
/// - `iterations`    — exact number of updates to apply (no early stopping)
/// - `batch_size`    — `None` trains on the full batch every iteration;
///                     `Some(b)` walks `b`-row slices with wraparound
/// - `seed`          — seeds weight initialization
/// - `init_std`      — standard deviation of the initial weights
/// - `report_every`  — log/send the loss every this many iterations
/// - `progress_tx`   — optional channel receiving one `IterationStats` per
///                     report. A dropped receiver detaches the channel; the
///                     run itself continues to the iteration limit.
///
/// Everything but `progress_tx` can be read from JSON; missing fields take
/// their `Default` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub hidden_units: usize,
    pub learning_rate: f64,
    pub lambda: f64,
    pub iterations: usize,
    pub batch_size: Option<usize>,
    pub seed: u64,
    pub init_std: f64,
    pub report_every: Option<usize>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            hidden_units: 5,
            learning_rate: 0.01,
            lambda: 0.01,
            iterations: 5000,
            batch_size: None,
            seed: 0,
            init_std: 1.0,
            report_every: Some(500),
            progress_tx: None,
        }
    }
}

impl TrainConfig {
    /// Full-batch config with the given hyperparameters and defaults elsewhere.
    pub fn new(hidden_units: usize, learning_rate: f64, lambda: f64, iterations: usize) -> Self {
        TrainConfig {
            hidden_units,
            learning_rate,
            lambda,
            iterations,
            ..TrainConfig::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_report_every(mut self, report_every: Option<usize>) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<IterationStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Rejects any setting that would make training meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.hidden_units == 0 {
            return Err(invalid("hidden_units must be positive"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(invalid(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if !(self.lambda >= 0.0 && self.lambda.is_finite()) {
            return Err(invalid(format!(
                "lambda must be non-negative and finite, got {}",
                self.lambda
            )));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations must be positive"));
        }
        if self.batch_size == Some(0) {
            return Err(invalid("batch_size must be positive when set"));
        }
        if !(self.init_std > 0.0 && self.init_std.is_finite()) {
            return Err(invalid(format!(
                "init_std must be positive and finite, got {}",
                self.init_std
            )));
        }
        if self.report_every == Some(0) {
            return Err(invalid("report_every must be positive when set"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<TrainConfig> {
        let config: TrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file written by hand or by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let json = std::fs::read_to_string(path)?;
        TrainConfig::from_json_str(&json)
    }

    /// Writes the serializable part of the configuration as pretty JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> NetError {
    NetError::InvalidConfig(msg.into())
}
