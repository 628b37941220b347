//! Error types for split cleaning and the task catalogue.
//!
//! File loading and the binaries use `anyhow`; these are the typed errors a
//! caller can match on.

use thiserror::Error;

/// A grouped split whose `labels` and `sentences` do not line up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidShapeError {
    /// Different number of groups on each side.
    #[error("split has {labels} label groups but {sentences} sentence groups")]
    GroupCount { labels: usize, sentences: usize },
    /// Group `group` has a different number of labels and sentences.
    #[error("group {group} has {labels} labels but {sentences} sentences")]
    GroupLength {
        group: usize,
        labels: usize,
        sentences: usize,
    },
}

/// Errors raised while applying a task's dataset transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("split '{split}' is malformed: {source}")]
    InvalidShape {
        split: String,
        #[source]
        source: InvalidShapeError,
    },
    /// An eval split listed in the task metadata is absent from the dataset.
    #[error("dataset has no '{0}' split")]
    MissingSplit(String),
    #[error("unknown task: {0}")]
    UnknownTask(String),
    #[error("task {0} is not a clustering task")]
    NotClustering(String),
}

pub type Result<T, E = TaskError> = std::result::Result<T, E>;
