use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Mean categorical cross-entropy of softmax probabilities against one-hot labels.
///
///   L = -(1/n) · Σ_rows ln(p[row, true_class])
///
/// The true class of a row is the column holding its `1`. No epsilon is
/// added: a true-class probability of exactly zero yields `+inf`.
pub fn cross_entropy(probabilities: &Matrix, labels: &Matrix) -> Result<f64> {
    if probabilities.shape() != labels.shape() {
        return Err(NetError::shape(
            "cross_entropy",
            labels.shape(),
            probabilities.shape(),
        ));
    }
    let n = probabilities.rows();
    if n == 0 {
        return Err(NetError::EmptyBatch);
    }

    let total: f64 = one_hot_classes(labels)?
        .into_iter()
        .enumerate()
        .map(|(row, class)| -probabilities[(row, class)].ln())
        .sum();

    Ok(total / n as f64)
}

/// Hot column of every label row.
///
/// Each row must hold exactly one `1.0` with `0.0` everywhere else; the first
/// offending row is reported as `InvalidLabels`.
pub fn one_hot_classes(labels: &Matrix) -> Result<Vec<usize>> {
    if labels.cols() == 0 {
        return Err(NetError::ShapeMismatch {
            op: "labels",
            expected: "at least one class".to_string(),
            got: format!("{}x0", labels.rows()),
        });
    }
    (0..labels.rows())
        .map(|row| {
            let mut hot = None;
            for (class, &v) in labels.row(row).iter().enumerate() {
                if v == 1.0 && hot.is_none() {
                    hot = Some(class);
                } else if v != 0.0 {
                    return Err(NetError::InvalidLabels { row });
                }
            }
            hot.ok_or(NetError::InvalidLabels { row })
        })
        .collect()
}
