//! Normalize step

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::ScaleStep;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Bounds {
    min: f64,
    max: f64,
}

/// Rescale a column into the [0, 1] range
///
/// A constant column (zero range) maps to 0.5.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeStep {
    fitted: Option<Bounds>,
}

impl NormalizeStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<f64> {
        self.fitted.map(|b| b.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.fitted.map(|b| b.max)
    }
}

impl ScaleStep for NormalizeStep {
    fn fit(&mut self, values: &[f64]) {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        self.fitted = Some(Bounds { min, max });
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        let Bounds { min, max } = self
            .fitted
            .ok_or_else(|| PipelineError::NotFitted(self.name().to_string()))?;

        let range = max - min;
        if range == 0.0 {
            return Ok(vec![0.5; values.len()]);
        }
        Ok(values.iter().map(|&x| (x - min) / range).collect())
    }

    fn name(&self) -> &str {
        "normalize"
    }
}
