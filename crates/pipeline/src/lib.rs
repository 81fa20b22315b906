//! Column scaling pipeline
//!
//! Preprocessing for the workflow's tabular data: optional standardization
//! (zero mean, unit variance) and min-max normalization into [0, 1], applied
//! per feature column. When both are requested they compose in that order,
//! so normalization operates on the already-standardized values.
//!
//! ## Example
//!
//! ```rust
//! use dataset::DataFrame;
//! use pipeline::{preprocess, PreprocessOptions};
//!
//! let mut frame = DataFrame::from_csv_bytes(b"x,y\n1,0\n2,1\n3,0\n").unwrap();
//! let opts = PreprocessOptions { standardize: true, normalize: true };
//! preprocess(&mut frame, "y", &opts).unwrap();
//! ```

mod error;
mod normalize;
mod standardize;

pub use error::{PipelineError, Result};
pub use normalize::NormalizeStep;
pub use standardize::StandardizeStep;

use dataset::DataFrame;

/// Common trait for column scaling steps
pub trait ScaleStep: Send + Sync {
    /// Learn the step's parameters from a column of values
    fn fit(&mut self, values: &[f64]);

    /// Apply the fitted step to a column of values
    fn transform(&self, values: &[f64]) -> Result<Vec<f64>>;

    /// Name of this step
    fn name(&self) -> &str;
}

/// Which transforms the preprocess stage should apply
#[derive(Debug, Clone, Copy, Default)]
pub struct PreprocessOptions {
    pub standardize: bool,
    pub normalize: bool,
}

/// Rescale every non-target column of the frame in place.
///
/// All-or-nothing: the target column and every feature column are validated
/// before the first write-back, so a failed request leaves the frame as it
/// was. The target column is never touched.
pub fn preprocess(
    frame: &mut DataFrame,
    target_col: &str,
    opts: &PreprocessOptions,
) -> Result<()> {
    if !frame.has_column(target_col) {
        return Err(PipelineError::InvalidTarget(target_col.to_string()));
    }
    if !(opts.standardize || opts.normalize) {
        return Ok(());
    }

    let feature_names = frame.feature_names(target_col);
    let mut transformed: Vec<(String, Vec<f64>)> = Vec::with_capacity(feature_names.len());

    for name in feature_names {
        let mut values = frame.numeric_values(&name)?.to_vec();
        if opts.standardize {
            values = fit_transform(&mut StandardizeStep::new(), &values)?;
        }
        if opts.normalize {
            values = fit_transform(&mut NormalizeStep::new(), &values)?;
        }
        transformed.push((name, values));
    }

    for (name, values) in transformed {
        frame.replace_numeric(&name, values)?;
    }
    Ok(())
}

fn fit_transform(step: &mut dyn ScaleStep, values: &[f64]) -> Result<Vec<f64>> {
    step.fit(values);
    step.transform(values)
}
