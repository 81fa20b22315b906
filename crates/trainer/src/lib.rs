//! Split, train and evaluate
//!
//! The model side of the workflow, organized by stage:
//!
//! - [`labels`]: target-column label encoding
//! - [`split`]: seeded, reproducible train/test partitioning
//! - [`model`]: classifier selection, fitting and evaluation (via `smartcore`)
//! - [`metrics`]: classification metrics
//! - [`plot`]: prediction histogram rendered to base64 PNG
//!
//! ## Example
//!
//! ```rust
//! use dataset::DataFrame;
//! use trainer::{train_and_evaluate, train_test_split, ModelKind};
//!
//! let csv = "x1,x2,y\n1,1,0\n2,1,0\n3,2,0\n7,8,1\n8,9,1\n9,9,1\n1,2,0\n8,8,1\n2,2,0\n9,8,1\n";
//! let frame = DataFrame::from_csv_bytes(csv.as_bytes()).unwrap();
//! let split = train_test_split(&frame, "y", 0.2, 42).unwrap();
//! let report = train_and_evaluate(&split, ModelKind::DecisionTree).unwrap();
//! assert!((0.0..=1.0).contains(&report.accuracy));
//! ```

mod error;
pub mod labels;
pub mod metrics;
pub mod model;
pub mod plot;
pub mod split;

pub use error::{Result, TrainError};
pub use labels::LabelEncoder;
pub use model::{train_and_evaluate, ConfusionMatrix, ModelKind, TrainReport};
pub use split::{train_test_split, TrainTestSplit};
