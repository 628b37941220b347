//! Embedding benchmark task definitions and clustering split preparation.
//!
//! - [`tasks`] – static task metadata (`STS13`, `RedditClusteringP2P`,
//!   `RedditClusteringP2P.v2`) and each task's dataset transform
//! - [`data`] – split types, local file IO, the label distribution check and
//!   the singleton-label filter

pub mod data;
pub mod error;
pub mod tasks;

pub use crate::data::distribution::{check_label_distribution, Diagnostic, LabelDistribution};
pub use crate::data::filter::{clean, flatten};
pub use crate::data::model::{CleanedDataset, CleanedSplit, FlatSplit, Label, RawDataset, RawSplit};
pub use crate::error::{InvalidShapeError, Result, TaskError};
pub use crate::tasks::{all_tasks, get_task, ClusteringTask, PreparedDataset, Task, TaskMetadata};
