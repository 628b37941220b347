use serde::Serialize;

// ---------------------------------------------------------------------------
// Enumerated metadata fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskType {
    Clustering,
    #[serde(rename = "STS")]
    Sts,
}

/// Granularity of the compared texts: sentence-to-sentence or
/// paragraph-to-paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    S2s,
    P2p,
}

/// Name of the score the evaluation harness ranks models by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MainScore {
    VMeasure,
    CosineSpearman,
}

impl MainScore {
    /// Field name under which the harness reports this score.
    pub fn as_str(self) -> &'static str {
        match self {
            MainScore::VMeasure => "v_measure",
            MainScore::CosineSpearman => "cosine_spearman",
        }
    }
}

/// Hub dataset pinned to a revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetRef {
    pub path: &'static str,
    pub revision: &'static str,
}

// ---------------------------------------------------------------------------
// TaskMetadata
// ---------------------------------------------------------------------------

/// Static description of one benchmark task.
///
/// Every task lives in a `static`, so the records are immutable and shared.
/// Absent optional fields serialize as `null`, matching the harness dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub reference: &'static str,
    pub dataset: DatasetRef,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub category: Category,
    pub modalities: &'static [&'static str],
    pub eval_splits: &'static [&'static str],
    pub eval_langs: &'static [&'static str],
    pub main_score: MainScore,
    /// Inclusive `(start, end)` collection window, ISO dates.
    pub date: Option<(&'static str, &'static str)>,
    pub domains: Option<&'static [&'static str]>,
    pub task_subtypes: Option<&'static [&'static str]>,
    pub license: Option<&'static str>,
    pub annotations_creators: Option<&'static str>,
    pub dialect: Option<&'static [&'static str]>,
    pub sample_creation: Option<&'static str>,
    pub bibtex_citation: &'static str,
    pub prompt: Option<&'static str>,
    pub adapted_from: Option<&'static [&'static str]>,
}

impl TaskMetadata {
    /// Whether `split` is one of the splits the task is scored on.
    pub fn evaluates(&self, split: &str) -> bool {
        self.eval_splits.contains(&split)
    }
}
