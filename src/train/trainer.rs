use std::borrow::Cow;

use rand::{rngs::StdRng, SeedableRng};

use crate::error::{NetError, Result};
use crate::loss::{one_hot_classes, total_loss};
use crate::math::matrix::Matrix;
use crate::network::{backward, forward, ParameterSet};
use crate::optim::sgd::Sgd;
use crate::train::batch::BatchSchedule;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;

/// Lifecycle of a `Trainer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// Parameters drawn, no update applied yet.
    Initialized,
    /// At least one update applied, more to go.
    Training,
    /// The configured iteration count has been reached.
    StoppedByIterationLimit,
}

/// What a finished run hands back to the caller.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub params: ParameterSet,
    /// Full-dataset loss of the freshly initialized parameters.
    pub initial_loss: f64,
    /// Full-dataset loss of the returned parameters.
    pub final_loss: f64,
    /// One entry per reporting point, in order.
    pub history: Vec<IterationStats>,
}

/// Runs gradient descent over a borrowed feature/label pair.
///
/// Owns the only mutable `ParameterSet`. Each `step` is forward pass, loss
/// (for monitoring), backward pass, then a whole-set update; nothing reads
/// the parameters mid-update.
pub struct Trainer<'a> {
    features: &'a Matrix,
    labels: &'a Matrix,
    config: TrainConfig,
    sgd: Sgd,
    schedule: BatchSchedule,
    params: ParameterSet,
    state: TrainerState,
    completed: usize,
    initial_loss: f64,
    history: Vec<IterationStats>,
    saw_non_finite: bool,
}

impl<'a> Trainer<'a> {
    /// Validates the configuration and data, then initializes parameters.
    ///
    /// Every error this can return is raised before the first iteration.
    pub fn new(features: &'a Matrix, labels: &'a Matrix, config: TrainConfig) -> Result<Self> {
        config.validate()?;
        check_data(features, labels)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let params = ParameterSet::init(
            features.cols(),
            config.hidden_units,
            labels.cols(),
            config.init_std,
            &mut rng,
        )?;
        let schedule = BatchSchedule::new(features.rows(), config.batch_size);
        let initial_loss = full_loss(features, labels, config.lambda, &params)?;

        log::debug!(
            "batch of {} rows out of {} (full batch: {})",
            schedule.batch_rows(),
            features.rows(),
            schedule.is_full_batch()
        );

        Ok(Trainer {
            features,
            labels,
            sgd: Sgd::new(config.learning_rate),
            config,
            schedule,
            params,
            state: TrainerState::Initialized,
            completed: 0,
            initial_loss,
            history: Vec::new(),
            saw_non_finite: false,
        })
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Number of updates applied so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Runs one iteration and returns its monitoring loss, or `None` once the
    /// iteration limit has been reached.
    pub fn step(&mut self) -> Result<Option<f64>> {
        if self.state == TrainerState::StoppedByIterationLimit {
            return Ok(None);
        }

        let (x, y) = self.batch()?;
        let lambda = self.config.lambda;

        let cache = forward(&x, &self.params)?;
        let loss = total_loss(&cache.probabilities, &y, lambda, &self.params)?;
        let grads = backward(&x, &y, &cache, &self.params, lambda)?;
        let batch_rows = x.rows();

        self.sgd.step(&mut self.params, &grads)?;
        self.completed += 1;
        self.state = if self.completed >= self.config.iterations {
            TrainerState::StoppedByIterationLimit
        } else {
            TrainerState::Training
        };

        if !loss.is_finite() && !self.saw_non_finite {
            self.saw_non_finite = true;
            log::warn!(
                "loss became {loss} at iteration {}; consider a smaller learning rate or scaled inputs",
                self.completed
            );
        }
        if self.should_report() {
            self.report(loss, batch_rows);
        }

        Ok(Some(loss))
    }

    /// Steps until the iteration limit and returns the trained parameters.
    pub fn run(mut self) -> Result<TrainOutcome> {
        log::info!(
            "training {}-{}-{} network for {} iterations (lr {}, lambda {})",
            self.params.features(),
            self.params.hidden(),
            self.params.classes(),
            self.config.iterations,
            self.config.learning_rate,
            self.config.lambda
        );

        while self.step()?.is_some() {}

        let final_loss = full_loss(self.features, self.labels, self.config.lambda, &self.params)?;
        log::info!(
            "finished after {} iterations: loss {:.6} -> {:.6}",
            self.completed,
            self.initial_loss,
            final_loss
        );

        Ok(TrainOutcome {
            params: self.params,
            initial_loss: self.initial_loss,
            final_loss,
            history: self.history,
        })
    }

    fn batch(&self) -> Result<(Cow<'a, Matrix>, Cow<'a, Matrix>)> {
        match self.schedule.rows_for(self.completed) {
            None => Ok((Cow::Borrowed(self.features), Cow::Borrowed(self.labels))),
            Some(rows) => {
                log::trace!("iteration {} uses rows {:?}", self.completed + 1, rows);
                Ok((
                    Cow::Owned(self.features.select_rows(&rows)?),
                    Cow::Owned(self.labels.select_rows(&rows)?),
                ))
            }
        }
    }

    /// First iteration, every `report_every`-th after it, and the last one.
    fn should_report(&self) -> bool {
        let Some(every) = self.config.report_every else {
            return false;
        };
        self.completed == 1
            || self.completed % every == 0
            || self.state == TrainerState::StoppedByIterationLimit
    }

    fn report(&mut self, loss: f64, batch_rows: usize) {
        let stats = IterationStats {
            iteration: self.completed,
            total_iterations: self.config.iterations,
            loss,
            batch_rows,
        };
        log::info!("iteration {}/{}: loss = {loss:.6}", stats.iteration, stats.total_iterations);

        let dropped = self
            .config
            .progress_tx
            .as_ref()
            .is_some_and(|tx| tx.send(stats.clone()).is_err());
        if dropped {
            log::debug!("progress receiver dropped, no more reports will be sent");
            self.config.progress_tx = None;
        }
        self.history.push(stats);
    }
}

/// Trains a fresh network on `features`/`labels` for `config.iterations`
/// iterations and returns the final parameters.
pub fn train(features: &Matrix, labels: &Matrix, config: TrainConfig) -> Result<TrainOutcome> {
    Trainer::new(features, labels, config)?.run()
}

fn full_loss(
    features: &Matrix,
    labels: &Matrix,
    lambda: f64,
    params: &ParameterSet,
) -> Result<f64> {
    let cache = forward(features, params)?;
    total_loss(&cache.probabilities, labels, lambda, params)
}

/// Row counts agree, there is data, and every label row is one-hot.
fn check_data(features: &Matrix, labels: &Matrix) -> Result<()> {
    if features.rows() == 0 {
        return Err(NetError::EmptyBatch);
    }
    if features.rows() != labels.rows() {
        return Err(NetError::ShapeMismatch {
            op: "train",
            expected: format!("{} label rows", features.rows()),
            got: format!("{} label rows", labels.rows()),
        });
    }
    if features.cols() == 0 || labels.cols() == 0 {
        return Err(NetError::ShapeMismatch {
            op: "train",
            expected: "at least one feature and one class".to_string(),
            got: format!("{} features, {} classes", features.cols(), labels.cols()),
        });
    }
    one_hot_classes(labels).map(|_| ())
}
