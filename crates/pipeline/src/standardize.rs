//! Standardize step

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::ScaleStep;

/// Parameters learned from a fitted column
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Moments {
    mean: f64,
    std_dev: f64,
}

/// Rescale a column to zero mean and unit variance
///
/// Parameters are fit on the column itself. A constant column (zero
/// variance) maps to all zeros.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardizeStep {
    fitted: Option<Moments>,
}

impl StandardizeStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(&self) -> Option<f64> {
        self.fitted.map(|m| m.mean)
    }

    pub fn std_dev(&self) -> Option<f64> {
        self.fitted.map(|m| m.std_dev)
    }
}

impl ScaleStep for StandardizeStep {
    fn fit(&mut self, values: &[f64]) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev =
            (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
        self.fitted = Some(Moments { mean, std_dev });
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        let Moments { mean, std_dev } = self
            .fitted
            .ok_or_else(|| PipelineError::NotFitted(self.name().to_string()))?;

        if std_dev == 0.0 {
            return Ok(vec![0.0; values.len()]);
        }
        Ok(values.iter().map(|&x| (x - mean) / std_dev).collect())
    }

    fn name(&self) -> &str {
        "standardize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mean_unit_variance() {
        let values = vec![2.0, 4.0, 6.0, 8.0];
        let mut step = StandardizeStep::new();
        step.fit(&values);
        let out = step.transform(&values).unwrap();

        let mean: f64 = out.iter().sum::<f64>() / out.len() as f64;
        let var: f64 = out.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / out.len() as f64;
        assert!(mean.abs() < 1e-9);
        assert!((var - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_column_maps_to_zeros() {
        let values = vec![5.0; 4];
        let mut step = StandardizeStep::new();
        step.fit(&values);
        assert_eq!(step.transform(&values).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn transform_before_fit_fails() {
        let step = StandardizeStep::new();
        assert!(matches!(
            step.transform(&[1.0]),
            Err(PipelineError::NotFitted(_))
        ));
    }
}
