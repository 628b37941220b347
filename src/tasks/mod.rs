//! Benchmark task definitions.
//!
//! Each task is a unit struct wrapping a `static` [`TaskMetadata`] record.
//! Clustering tasks additionally implement [`ClusteringTask`], whose
//! `dataset_transform` prepares the loaded splits for scoring.
//!
//! ```ignore
//! let task = mteb_tasks::get_task("RedditClusteringP2P.v2")?;
//! let prepared = task.as_clustering().unwrap().dataset_transform(dataset)?;
//! ```

pub mod clustering;
pub mod metadata;
pub mod reddit;
pub mod sts13;

use serde_json::{Map, Value};

use crate::error::{Result, TaskError};

pub use clustering::{clean_eval_splits, ClusteringTask, PreparedDataset};
pub use metadata::{Category, DatasetRef, MainScore, TaskMetadata, TaskType};
pub use reddit::{RedditClusteringP2P, RedditFastClusteringP2P};
pub use sts13::Sts13;

/// A benchmark task known to the catalogue.
pub trait Task: Send + Sync {
    fn metadata(&self) -> &'static TaskMetadata;

    /// Name of the task that replaces this one, if any.
    fn superseded_by(&self) -> Option<&'static str> {
        None
    }

    /// Metadata as a JSON object, the form the harness stores with results.
    fn metadata_dict(&self) -> Map<String, Value> {
        metadata_object(self.metadata())
    }

    /// Downcast to the clustering interface.
    fn as_clustering(&self) -> Option<&dyn ClusteringTask> {
        None
    }
}

pub(crate) fn metadata_object(metadata: &TaskMetadata) -> Map<String, Value> {
    match serde_json::to_value(metadata) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

static TASKS: [&dyn Task; 3] = [&Sts13, &RedditClusteringP2P, &RedditFastClusteringP2P];

/// Every task in the catalogue, in registration order.
pub fn all_tasks() -> &'static [&'static dyn Task] {
    &TASKS
}

/// Look a task up by its metadata name (e.g. `"STS13"`).
pub fn get_task(name: &str) -> Result<&'static dyn Task> {
    TASKS
        .iter()
        .copied()
        .find(|t| t.metadata().name == name)
        .ok_or_else(|| TaskError::UnknownTask(name.to_string()))
}
