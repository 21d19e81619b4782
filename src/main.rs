// Demo driver: trains on three synthetic Gaussian clusters and reports
// held-out accuracy.
//
//   cargo run --release                       # default hyperparameters
//   cargo run --release -- path/to/config.json
//   RUST_LOG=debug cargo run --release        # more detail
use std::process::ExitCode;

use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use relu_softmax_net::{accuracy, classify, train, Matrix, Result, TrainConfig};

const CENTERS: [(f64, f64); 3] = [(0.0, 4.0), (-4.0, -3.0), (4.0, -3.0)];
const TRAIN_PER_CLASS: usize = 300;
const TEST_PER_CLASS: usize = 100;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading configuration from {path}");
            TrainConfig::load_json(path)?
        }
        None => TrainConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let (train_x, train_y) = clusters(TRAIN_PER_CLASS, &mut rng)?;
    let (test_x, test_y) = clusters(TEST_PER_CLASS, &mut rng)?;

    let outcome = train(&train_x, &train_y, config)?;

    let train_acc = accuracy(&classify(&train_x, &outcome.params)?, &train_y)?;
    let test_acc = accuracy(&classify(&test_x, &outcome.params)?, &test_y)?;
    log::info!("train accuracy {:.2}%", train_acc * 100.0);
    log::info!("test accuracy  {:.2}%", test_acc * 100.0);
    Ok(())
}

/// `per_class` unit-variance samples around each of `CENTERS`, with one-hot labels.
fn clusters(per_class: usize, rng: &mut StdRng) -> Result<(Matrix, Matrix)> {
    let mut noise = || -> f64 { StandardNormal.sample(&mut *rng) };
    let classes = CENTERS.len();
    let mut features = Vec::with_capacity(per_class * classes * 2);
    let mut labels = Vec::with_capacity(per_class * classes * classes);

    for (class, &(cx, cy)) in CENTERS.iter().enumerate() {
        for _ in 0..per_class {
            features.push(cx + noise());
            features.push(cy + noise());
            labels.extend((0..classes).map(|c| if c == class { 1.0 } else { 0.0 }));
        }
    }

    let rows = per_class * classes;
    Ok((
        Matrix::from_vec(rows, 2, features)?,
        Matrix::from_vec(rows, classes, labels)?,
    ))
}
