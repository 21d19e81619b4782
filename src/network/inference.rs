use crate::error::{NetError, Result};
use crate::loss::one_hot_classes;
use crate::math::matrix::Matrix;
use crate::network::forward::forward;
use crate::network::params::ParameterSet;

/// Class probabilities for each row of `features`. Forward pass only.
pub fn predict(features: &Matrix, params: &ParameterSet) -> Result<Matrix> {
    params.validate()?;
    Ok(forward(features, params)?.probabilities)
}

/// Most likely class index for each row of `features`.
pub fn classify(features: &Matrix, params: &ParameterSet) -> Result<Vec<usize>> {
    Ok(predict(features, params)?.argmax_rows())
}

/// Fraction of rows whose predicted class matches the label's hot column.
pub fn accuracy(predicted: &[usize], labels: &Matrix) -> Result<f64> {
    if predicted.len() != labels.rows() {
        return Err(NetError::ShapeMismatch {
            op: "accuracy",
            expected: format!("{} predictions", labels.rows()),
            got: format!("{} predictions", predicted.len()),
        });
    }
    if predicted.is_empty() {
        return Ok(0.0);
    }
    let correct = predicted
        .iter()
        .zip(one_hot_classes(labels)?)
        .filter(|&(&p, t)| p == t)
        .count();
    Ok(correct as f64 / predicted.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn predict_is_bit_identical_across_calls() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = ParameterSet::init(3, 6, 4, 1.0, &mut rng).unwrap();
        let x = Matrix::random_normal(20, 3, 2.0, &mut rng).unwrap();

        let a = predict(&x, &params).unwrap();
        let b = predict(&x, &params).unwrap();
        assert_eq!(a.shape(), (20, 4));
        let bits = |m: &Matrix| m.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn classify_takes_row_argmax() {
        let params = ParameterSet::from_parts(
            Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap(),
            Matrix::zeros(1, 2),
            Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap(),
            Matrix::zeros(1, 2),
        )
        .unwrap();
        let x = Matrix::from_rows(vec![vec![3.0, 1.0], vec![0.5, 2.0]]).unwrap();
        assert_eq!(classify(&x, &params).unwrap(), vec![0, 1]);
    }

    #[test]
    fn predict_rejects_inconsistent_parameters() {
        let params = ParameterSet {
            w1: Matrix::zeros(2, 3),
            b1: Matrix::zeros(1, 2),
            w2: Matrix::zeros(3, 2),
            b2: Matrix::zeros(1, 2),
        };
        assert!(predict(&Matrix::zeros(1, 2), &params).is_err());
    }

    #[test]
    fn zero_class_parameters_are_rejected() {
        let params = ParameterSet {
            w1: Matrix::zeros(2, 3),
            b1: Matrix::zeros(1, 3),
            w2: Matrix::zeros(3, 0),
            b2: Matrix::zeros(1, 0),
        };
        let x = Matrix::zeros(2, 2);
        assert!(matches!(
            predict(&x, &params),
            Err(NetError::ShapeMismatch { op: "parameters", .. })
        ));
        assert!(classify(&x, &params).is_err());
    }

    #[test]
    fn accuracy_counts_matches() {
        let labels = Matrix::from_rows(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0],
        ])
        .unwrap();
        assert_eq!(accuracy(&[0, 2, 0, 1], &labels).unwrap(), 0.75);
        assert!(accuracy(&[0, 2], &labels).is_err());
    }

    #[test]
    fn accuracy_rejects_non_one_hot_labels() {
        let soft = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.4, 0.6]]).unwrap();
        assert!(matches!(
            accuracy(&[0, 1], &soft),
            Err(NetError::InvalidLabels { row: 1 })
        ));
        assert!(matches!(
            accuracy(&[0, 0], &Matrix::zeros(2, 0)),
            Err(NetError::ShapeMismatch { .. })
        ));
    }
}
