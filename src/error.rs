use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, NetError>;

/// Everything that can go wrong before or during training.
///
/// Numerical blow-ups (NaN/∞ in the loss) are deliberately absent: they are
/// values, not errors, and surface through the reported loss.
#[derive(Error, Debug)]
pub enum NetError {
    #[error("shape mismatch in {op}: expected {expected}, got {got}")]
    ShapeMismatch {
        op: &'static str,
        expected: String,
        got: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("label row {row} is not one-hot")]
    InvalidLabels { row: usize },

    #[error("training batch has no rows")]
    EmptyBatch,

    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl NetError {
    pub(crate) fn shape(
        op: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    ) -> NetError {
        NetError::ShapeMismatch {
            op,
            expected: format!("{}x{}", expected.0, expected.1),
            got: format!("{}x{}", got.0, got.1),
        }
    }
}
