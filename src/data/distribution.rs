use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;
use serde::Serialize;

use super::model::{Label, RawSplit};

/// Ratio between the most and least frequent label above which a split is
/// reported as imbalanced.
pub const IMBALANCE_RATIO: usize = 100;

/// Minimum number of distinct labels for a clustering split to be meaningful.
pub const MIN_DISTINCT_LABELS: usize = 2;

/// Something about a split's labels that looks off. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    TooFewLabels { distinct: usize },
    SingletonLabels { count: usize },
    Imbalanced { most_frequent: usize, least_frequent: usize },
    EmptyGroups { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TooFewLabels { distinct } => {
                write!(f, "only {distinct} distinct label(s); clustering is degenerate")
            }
            Diagnostic::SingletonLabels { count } => {
                write!(f, "{count} label(s) occur exactly once and will be dropped")
            }
            Diagnostic::Imbalanced {
                most_frequent,
                least_frequent,
            } => write!(
                f,
                "label frequencies range from {least_frequent} to {most_frequent}"
            ),
            Diagnostic::EmptyGroups { count } => write!(f, "{count} group(s) are empty"),
        }
    }
}

/// Summary of the raw, grouped label distribution of one split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelDistribution {
    pub groups: usize,
    pub entries: usize,
    pub distinct_labels: usize,
    /// Distinct labels within each group, in group order.
    pub distinct_per_group: Vec<usize>,
    pub singleton_labels: usize,
    pub most_frequent: usize,
    pub least_frequent: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LabelDistribution {
    pub fn is_healthy(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Inspect the grouped labels of a split before it is flattened.
///
/// Every diagnostic found is logged at `warn` level and returned in the
/// report; none of them stops the caller from cleaning the split.
pub fn check_label_distribution(split: &RawSplit) -> LabelDistribution {
    let mut counts: HashMap<&Label, usize> = HashMap::new();
    for label in split.labels.iter().flatten() {
        *counts.entry(label).or_insert(0) += 1;
    }

    let distinct_per_group: Vec<usize> = split
        .labels
        .iter()
        .map(|g| g.iter().collect::<HashSet<_>>().len())
        .collect();

    let singleton_labels = counts.values().filter(|&&c| c == 1).count();
    let most_frequent = counts.values().copied().max().unwrap_or(0);
    let least_frequent = counts.values().copied().min().unwrap_or(0);
    let empty_groups = split.labels.iter().filter(|g| g.is_empty()).count();

    let mut diagnostics = Vec::new();
    if counts.len() < MIN_DISTINCT_LABELS {
        diagnostics.push(Diagnostic::TooFewLabels {
            distinct: counts.len(),
        });
    }
    if singleton_labels > 0 {
        diagnostics.push(Diagnostic::SingletonLabels {
            count: singleton_labels,
        });
    }
    if least_frequent > 0 && most_frequent > least_frequent * IMBALANCE_RATIO {
        diagnostics.push(Diagnostic::Imbalanced {
            most_frequent,
            least_frequent,
        });
    }
    if empty_groups > 0 {
        diagnostics.push(Diagnostic::EmptyGroups {
            count: empty_groups,
        });
    }

    for d in &diagnostics {
        warn!("label distribution: {d}");
    }

    LabelDistribution {
        groups: split.labels.len(),
        entries: split.num_entries(),
        distinct_labels: counts.len(),
        distinct_per_group,
        singleton_labels,
        most_frequent,
        least_frequent,
        diagnostics,
    }
}
