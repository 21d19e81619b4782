/// Loss snapshot emitted by the trainer at each reporting point.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent per report; the same values are collected in `TrainOutcome::history`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Total iterations requested for this run.
    pub total_iterations: usize,
    /// Cross-entropy plus L2 penalty on the batch used by this iteration,
    /// measured before its update.
    pub loss: f64,
    /// Rows in that batch.
    pub batch_rows: usize,
}
