use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use relu_softmax_net::{
    accuracy, classify, predict, train, Matrix, NetError, TrainConfig, Trainer, TrainerState,
};

/// `per_class` samples from a unit-variance Gaussian around each center,
/// with one-hot labels.
fn gaussian_clusters(
    centers: &[(f64, f64)],
    per_class: usize,
    rng: &mut StdRng,
) -> (Matrix, Matrix) {
    let noise = Normal::new(0.0, 1.0).unwrap();
    let classes = centers.len();
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (class, &(cx, cy)) in centers.iter().enumerate() {
        for _ in 0..per_class {
            x.push(vec![cx + noise.sample(rng), cy + noise.sample(rng)]);
            y.push((0..classes).map(|c| if c == class { 1.0 } else { 0.0 }).collect());
        }
    }
    (Matrix::from_rows(x).unwrap(), Matrix::from_rows(y).unwrap())
}

const TWO_CENTERS: [(f64, f64); 2] = [(-3.0, -3.0), (3.0, 3.0)];
const THREE_CENTERS: [(f64, f64); 3] = [(0.0, 4.0), (-4.0, -3.0), (4.0, -3.0)];

#[test]
fn separable_two_class_loss_decreases() {
    let mut rng = StdRng::seed_from_u64(3);
    let (x, y) = gaussian_clusters(&TWO_CENTERS, 50, &mut rng);

    let config = TrainConfig::new(3, 0.01, 0.01, 1000).with_seed(17);
    let outcome = train(&x, &y, config).unwrap();

    assert!(
        outcome.final_loss < outcome.initial_loss,
        "loss went from {} to {}",
        outcome.initial_loss,
        outcome.final_loss
    );
    let acc = accuracy(&classify(&x, &outcome.params).unwrap(), &y).unwrap();
    assert!(acc >= 0.9, "accuracy {acc}");
}

#[test]
fn three_clusters_end_to_end() {
    let mut rng = StdRng::seed_from_u64(2024);
    let (train_x, train_y) = gaussian_clusters(&THREE_CENTERS, 100, &mut rng);
    let (test_x, test_y) = gaussian_clusters(&THREE_CENTERS, 50, &mut rng);

    let config = TrainConfig::new(5, 0.01, 0.01, 5000).with_seed(5);
    assert_eq!(config.batch_size, None);
    let outcome = train(&train_x, &train_y, config).unwrap();

    let acc = accuracy(&classify(&test_x, &outcome.params).unwrap(), &test_y).unwrap();
    assert!(acc >= 0.9, "test accuracy {acc}");

    let probs = predict(&test_x, &outcome.params).unwrap();
    assert_eq!(probs.shape(), (150, 3));
    for r in 0..probs.rows() {
        let sum: f64 = probs.row(r).iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }
}

#[test]
fn larger_lambda_shrinks_weights() {
    let mut rng = StdRng::seed_from_u64(8);
    let (x, y) = gaussian_clusters(&THREE_CENTERS, 40, &mut rng);

    let run = |lambda: f64| {
        let config = TrainConfig::new(5, 0.01, lambda, 2000).with_seed(21);
        train(&x, &y, config).unwrap().params.sum_squared_weights()
    };
    let unregularized = run(0.0);
    let regularized = run(1.0);
    assert!(
        regularized < unregularized,
        "lambda 1.0 gave {regularized}, lambda 0 gave {unregularized}"
    );
}

#[test]
fn mini_batches_wrap_around_dataset() {
    let mut rng = StdRng::seed_from_u64(4);
    let (x, y) = gaussian_clusters(&TWO_CENTERS, 50, &mut rng);

    // 100 rows, batches of 16: 1000 iterations wrap the dataset many times.
    let config = TrainConfig::new(3, 0.01, 0.01, 1000)
        .with_batch_size(16)
        .with_seed(17);
    let outcome = train(&x, &y, config).unwrap();

    assert!(outcome.final_loss < outcome.initial_loss);
    assert!(outcome.history.iter().all(|s| s.batch_rows == 16));
    let acc = accuracy(&classify(&x, &outcome.params).unwrap(), &y).unwrap();
    assert!(acc >= 0.9, "accuracy {acc}");
}

#[test]
fn same_seed_same_parameters() {
    let mut rng = StdRng::seed_from_u64(6);
    let (x, y) = gaussian_clusters(&TWO_CENTERS, 20, &mut rng);

    let config = || TrainConfig::new(4, 0.05, 0.01, 200).with_seed(99);
    let a = train(&x, &y, config()).unwrap();
    let b = train(&x, &y, config()).unwrap();
    assert_eq!(a.params, b.params);

    let c = train(&x, &y, config().with_seed(100)).unwrap();
    assert_ne!(a.params, c.params);
}

#[test]
fn step_by_step_matches_train() {
    let mut rng = StdRng::seed_from_u64(12);
    let (x, y) = gaussian_clusters(&THREE_CENTERS, 10, &mut rng);
    let config = || TrainConfig::new(5, 0.01, 0.01, 50).with_report_every(None);

    let mut trainer = Trainer::new(&x, &y, config()).unwrap();
    let mut losses = Vec::new();
    while let Some(loss) = trainer.step().unwrap() {
        losses.push(loss);
    }
    assert_eq!(losses.len(), 50);
    assert_eq!(trainer.state(), TrainerState::StoppedByIterationLimit);

    let outcome = train(&x, &y, config()).unwrap();
    assert_eq!(trainer.params(), &outcome.params);
}

#[test]
fn predict_rejects_wrong_feature_width() {
    let mut rng = StdRng::seed_from_u64(1);
    let (x, y) = gaussian_clusters(&TWO_CENTERS, 5, &mut rng);
    let outcome = train(&x, &y, TrainConfig::new(2, 0.01, 0.0, 5)).unwrap();

    let wide = Matrix::zeros(3, 4);
    assert!(matches!(
        predict(&wide, &outcome.params),
        Err(NetError::ShapeMismatch { .. })
    ));
}
