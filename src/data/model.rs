use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Label – a single cluster label
// ---------------------------------------------------------------------------

/// A cluster label as found in clustering datasets.
///
/// Hub datasets use either integer class ids or free-text names (subreddit
/// names for the Reddit tasks). The two kinds never compare equal, so `1`
/// and `"1"` are different clusters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Integer(i) => write!(f, "{i}"),
            Label::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<i64> for Label {
    fn from(i: i64) -> Self {
        Label::Integer(i)
    }
}

// ---------------------------------------------------------------------------
// RawSplit – one split as shipped on the hub (grouped)
// ---------------------------------------------------------------------------

/// A split in its grouped form: group `i` of `labels` pairs element-wise
/// with group `i` of `sentences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSplit {
    pub labels: Vec<Vec<Label>>,
    pub sentences: Vec<Vec<String>>,
}

impl RawSplit {
    pub fn new(labels: Vec<Vec<Label>>, sentences: Vec<Vec<String>>) -> Self {
        RawSplit { labels, sentences }
    }

    /// Number of groups (taken from `labels`).
    pub fn num_groups(&self) -> usize {
        self.labels.len()
    }

    /// Total number of labelled entries across all groups.
    pub fn num_entries(&self) -> usize {
        self.labels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries() == 0
    }
}

// ---------------------------------------------------------------------------
// FlatSplit – groups concatenated into two parallel sequences
// ---------------------------------------------------------------------------

/// Parallel label/sentence sequences. Position `k` of `labels` belongs to
/// position `k` of `sentences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatSplit {
    pub labels: Vec<Label>,
    pub sentences: Vec<String>,
}

impl FlatSplit {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, sentence)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &str)> {
        self.labels
            .iter()
            .zip(self.sentences.iter().map(String::as_str))
    }
}

// ---------------------------------------------------------------------------
// CleanedSplit – a FlatSplit with no singleton labels left
// ---------------------------------------------------------------------------

/// A flat split in which every label occurs at least twice.
///
/// Only [`crate::data::filter::clean`] builds one, so holding a
/// `CleanedSplit` is proof the singleton filter ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CleanedSplit(FlatSplit);

impl CleanedSplit {
    pub(crate) fn from_filtered(flat: FlatSplit) -> Self {
        CleanedSplit(flat)
    }

    pub fn into_flat(self) -> FlatSplit {
        self.0
    }
}

impl Deref for CleanedSplit {
    type Target = FlatSplit;

    fn deref(&self) -> &FlatSplit {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Datasets – split name → split
// ---------------------------------------------------------------------------

/// Grouped splits keyed by split name (`"test"`, `"validation"`, …).
pub type RawDataset = BTreeMap<String, RawSplit>;

/// Cleaned splits keyed by split name.
pub type CleanedDataset = BTreeMap<String, CleanedSplit>;
