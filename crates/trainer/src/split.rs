//! Seeded train/test partitioning.

use dataset::DataFrame;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, TrainError};
use crate::labels::LabelEncoder;

/// Row-disjoint partition of a frame's features and encoded target.
///
/// `train rows + test rows` equals the frame's row count at split time.
/// The class vocabulary and feature column names ride along so the train
/// stage needs nothing but this value.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Vec<Vec<f64>>,
    pub x_test: Vec<Vec<f64>>,
    pub y_train: Vec<i32>,
    pub y_test: Vec<i32>,
    pub classes: Vec<String>,
    pub feature_names: Vec<String>,
}

impl TrainTestSplit {
    /// (rows, feature columns) of the training feature set
    pub fn train_shape(&self) -> (usize, usize) {
        (self.x_train.len(), self.feature_names.len())
    }

    /// (rows, feature columns) of the holdout feature set
    pub fn test_shape(&self) -> (usize, usize) {
        (self.x_test.len(), self.feature_names.len())
    }
}

/// Partition the frame's rows into train and holdout subsets.
///
/// Rows are shuffled with a seeded RNG, so the same frame, fraction and
/// seed always yield the identical partition. `test_size` is a fraction in
/// (0, 1); the holdout gets `ceil(rows * test_size)` rows and both
/// partitions must end up non-empty.
pub fn train_test_split(
    frame: &DataFrame,
    target_col: &str,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if !frame.has_column(target_col) {
        return Err(TrainError::InvalidTarget(target_col.to_string()));
    }
    if !test_size.is_finite() || test_size <= 0.0 || test_size >= 1.0 {
        return Err(TrainError::InvalidParameter {
            name: "test_size".to_string(),
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }

    let feature_names = frame.feature_names(target_col);
    if feature_names.is_empty() {
        return Err(TrainError::InvalidData(
            "dataset has no feature columns".to_string(),
        ));
    }

    let features = frame.feature_matrix(target_col)?;
    let rows = features.len();
    let test_rows = (rows as f64 * test_size).ceil() as usize;
    if test_rows == 0 || test_rows >= rows {
        return Err(TrainError::InvalidParameter {
            name: "test_size".to_string(),
            reason: format!("leaves an empty partition for {rows} rows"),
        });
    }

    let (encoder, labels) = LabelEncoder::fit_transform(&frame.column(target_col)?.data)?;

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let (train_idx, test_idx) = indices.split_at(rows - test_rows);

    let gather_x = |idx: &[usize]| idx.iter().map(|&i| features[i].clone()).collect();
    let gather_y = |idx: &[usize]| idx.iter().map(|&i| labels[i]).collect();

    Ok(TrainTestSplit {
        x_train: gather_x(train_idx),
        x_test: gather_x(test_idx),
        y_train: gather_y(train_idx),
        y_test: gather_y(test_idx),
        classes: encoder.classes().to_vec(),
        feature_names,
    })
}
