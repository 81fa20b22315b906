//! Shared workflow state.
//!
//! The workflow is a four-stage sequence; each stage consumes state left by
//! its predecessor. Instead of the process-wide globals a quick script would
//! use, the state lives in one session object owned by the server and handed
//! to each handler: `Empty -> Uploaded -> Preprocessed (optional) -> Split ->
//! Trained`. A new upload replaces the dataset wholesale and explicitly
//! clears the split, so later stages can never see a partition of a dataset
//! that is gone.

use std::sync::Arc;

use dataset::DataFrame;
use tokio::sync::RwLock;
use trainer::TrainTestSplit;

use crate::config::Config;

/// Session state for the single logical client
#[derive(Debug, Default)]
pub struct WorkflowState {
    dataset: Option<DataFrame>,
    split: Option<TrainTestSplit>,
}

impl WorkflowState {
    pub fn dataset(&self) -> Option<&DataFrame> {
        self.dataset.as_ref()
    }

    pub fn dataset_mut(&mut self) -> Option<&mut DataFrame> {
        self.dataset.as_mut()
    }

    pub fn split(&self) -> Option<&TrainTestSplit> {
        self.split.as_ref()
    }

    /// Store a freshly uploaded dataset. Any existing split belongs to the
    /// old dataset and is dropped with it.
    pub fn replace_dataset(&mut self, frame: DataFrame) {
        self.dataset = Some(frame);
        self.split = None;
    }

    pub fn store_split(&mut self, split: TrainTestSplit) {
        self.split = Some(split);
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<RwLock<WorkflowState>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            workflow: Arc::new(RwLock::new(WorkflowState::default())),
            config: Arc::new(config),
        }
    }
}
