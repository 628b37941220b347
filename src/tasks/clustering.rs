use log::{debug, info};

use super::Task;
use crate::data::distribution::check_label_distribution;
use crate::data::filter::{clean, validate_shape};
use crate::data::model::{CleanedDataset, RawDataset};
use crate::error::{Result, TaskError};

/// A dataset after a clustering task's transform.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedDataset {
    /// Splits left in their grouped form; each group is clustered on its own.
    Grouped(RawDataset),
    /// Flattened splits with singleton labels removed; clustered as a whole.
    Cleaned(CleanedDataset),
}

impl PreparedDataset {
    pub fn split_names(&self) -> Vec<&str> {
        match self {
            PreparedDataset::Grouped(ds) => ds.keys().map(String::as_str).collect(),
            PreparedDataset::Cleaned(ds) => ds.keys().map(String::as_str).collect(),
        }
    }

    /// Number of labelled entries in `split`, if present.
    pub fn entries(&self, split: &str) -> Option<usize> {
        match self {
            PreparedDataset::Grouped(ds) => ds.get(split).map(|s| s.num_entries()),
            PreparedDataset::Cleaned(ds) => ds.get(split).map(|s| s.len()),
        }
    }
}

pub trait ClusteringTask: Task {
    /// Prepare loaded splits for scoring. The default keeps them as loaded.
    fn dataset_transform(&self, dataset: RawDataset) -> Result<PreparedDataset> {
        Ok(PreparedDataset::Grouped(dataset))
    }
}

/// Check and clean each of `eval_splits` independently.
///
/// Every split is checked for shape before any is cleaned, so a malformed
/// split yields an error and no output at all. Splits not listed are
/// dropped from the result.
pub fn clean_eval_splits(dataset: &RawDataset, eval_splits: &[&str]) -> Result<CleanedDataset> {
    let splits = eval_splits
        .iter()
        .map(|&name| {
            dataset
                .get(name)
                .map(|split| (name, split))
                .ok_or_else(|| TaskError::MissingSplit(name.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    for &(name, split) in &splits {
        validate_shape(split).map_err(|source| TaskError::InvalidShape {
            split: name.to_string(),
            source,
        })?;
    }

    let mut cleaned = CleanedDataset::new();
    for (name, split) in splits {
        let report = check_label_distribution(split);
        debug!(
            "split '{name}': {} groups, {} entries, {} distinct labels",
            report.groups, report.entries, report.distinct_labels
        );

        let out = clean(split).map_err(|source| TaskError::InvalidShape {
            split: name.to_string(),
            source,
        })?;
        info!(
            "split '{name}': kept {} of {} entries",
            out.len(),
            split.num_entries()
        );
        cleaned.insert(name.to_string(), out);
    }
    Ok(cleaned)
}
