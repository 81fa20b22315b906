//! Classifier selection, fitting and evaluation.

use std::fmt;

use serde::Serialize;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{
    LogisticRegression, LogisticRegressionParameters,
};
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

use crate::error::{Result, TrainError};
use crate::metrics;
use crate::split::TrainTestSplit;

/// The fixed classifier menu. Unrecognized names fall back to the decision
/// tree, matching the workflow contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Logistic,
    DecisionTree,
}

impl ModelKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "logistic" => ModelKind::Logistic,
            _ => ModelKind::DecisionTree,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Logistic => "logistic",
            ModelKind::DecisionTree => "decision_tree",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labelled confusion counts; rows are actual classes, columns predicted
#[derive(Debug, Clone, Serialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[i32], predicted: &[i32], labels: &[String]) -> Self {
        let n = labels.len();
        let mut counts = vec![vec![0usize; n]; n];
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            if let Some(row) = counts.get_mut(a as usize) {
                if let Some(cell) = row.get_mut(p as usize) {
                    *cell += 1;
                }
            }
        }
        Self {
            labels: labels.to_vec(),
            counts,
        }
    }

    /// Total observations on the diagonal
    pub fn correct(&self) -> usize {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, row)| row[i])
            .sum()
    }
}

/// Outcome of one train request; never persisted across requests
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub model: ModelKind,
    pub accuracy: f64,
    pub predictions: Vec<i32>,
    pub confusion: ConfusionMatrix,
}

/// Fit the selected classifier on the training subset, predict the holdout
/// and score the predictions.
pub fn train_and_evaluate(split: &TrainTestSplit, model: ModelKind) -> Result<TrainReport> {
    if split.x_train.is_empty() || split.x_test.is_empty() {
        return Err(TrainError::InvalidData(
            "split has an empty partition".to_string(),
        ));
    }

    let x_train = DenseMatrix::from_2d_vec(&split.x_train);
    let x_test = DenseMatrix::from_2d_vec(&split.x_test);

    let predictions = match model {
        ModelKind::Logistic => {
            let fitted = LogisticRegression::fit(
                &x_train,
                &split.y_train,
                LogisticRegressionParameters::default(),
            )
            .map_err(|e| TrainError::Fit(e.to_string()))?;
            fitted
                .predict(&x_test)
                .map_err(|e| TrainError::Predict(e.to_string()))?
        }
        ModelKind::DecisionTree => {
            let fitted = DecisionTreeClassifier::fit(
                &x_train,
                &split.y_train,
                DecisionTreeClassifierParameters::default(),
            )
            .map_err(|e| TrainError::Fit(e.to_string()))?;
            fitted
                .predict(&x_test)
                .map_err(|e| TrainError::Predict(e.to_string()))?
        }
    };

    let accuracy = metrics::accuracy(&split.y_test, &predictions);
    if !accuracy.is_finite() {
        return Err(TrainError::Predict(
            "accuracy is undefined for the holdout".to_string(),
        ));
    }

    let confusion = ConfusionMatrix::from_predictions(&split.y_test, &predictions, &split.classes);

    Ok(TrainReport {
        model,
        accuracy,
        predictions,
        confusion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two well-separated clusters so both classifiers score perfectly
    fn separable_split() -> TrainTestSplit {
        let low: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64 * 0.1, 1.0]).collect();
        let high: Vec<Vec<f64>> = (0..20).map(|i| vec![10.0 + i as f64 * 0.1, 9.0]).collect();

        let mut x_train: Vec<Vec<f64>> = Vec::new();
        let mut y_train: Vec<i32> = Vec::new();
        x_train.extend(low[..16].iter().cloned());
        y_train.extend(std::iter::repeat(0).take(16));
        x_train.extend(high[..16].iter().cloned());
        y_train.extend(std::iter::repeat(1).take(16));

        let mut x_test: Vec<Vec<f64>> = Vec::new();
        let mut y_test: Vec<i32> = Vec::new();
        x_test.extend(low[16..].iter().cloned());
        y_test.extend(std::iter::repeat(0).take(4));
        x_test.extend(high[16..].iter().cloned());
        y_test.extend(std::iter::repeat(1).take(4));

        TrainTestSplit {
            x_train,
            x_test,
            y_train,
            y_test,
            classes: vec!["0".to_string(), "1".to_string()],
            feature_names: vec!["x1".to_string(), "x2".to_string()],
        }
    }

    #[test]
    fn model_name_selection() {
        assert_eq!(ModelKind::from_name("logistic"), ModelKind::Logistic);
        assert_eq!(ModelKind::from_name("tree"), ModelKind::DecisionTree);
        assert_eq!(ModelKind::from_name(""), ModelKind::DecisionTree);
        assert_eq!(ModelKind::from_name("LOGISTIC"), ModelKind::DecisionTree);
    }

    #[test]
    fn logistic_separates_clusters() {
        let report = train_and_evaluate(&separable_split(), ModelKind::Logistic).unwrap();
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.predictions.len(), 8);
    }

    #[test]
    fn decision_tree_separates_clusters() {
        let report = train_and_evaluate(&separable_split(), ModelKind::DecisionTree).unwrap();
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn accuracy_stays_in_unit_interval() {
        for kind in [ModelKind::Logistic, ModelKind::DecisionTree] {
            let report = train_and_evaluate(&separable_split(), kind).unwrap();
            assert!((0.0..=1.0).contains(&report.accuracy));
        }
    }

    #[test]
    fn confusion_matrix_counts_the_holdout() {
        let report = train_and_evaluate(&separable_split(), ModelKind::DecisionTree).unwrap();
        let total: usize = report.confusion.counts.iter().flatten().sum();
        assert_eq!(total, 8);
        assert_eq!(report.confusion.correct(), 8);
        assert_eq!(report.confusion.labels, vec!["0", "1"]);
    }

    #[test]
    fn empty_partition_rejected() {
        let mut split = separable_split();
        split.x_test.clear();
        split.y_test.clear();
        let result = train_and_evaluate(&split, ModelKind::Logistic);
        assert!(matches!(result, Err(TrainError::InvalidData(_))));
    }
}
