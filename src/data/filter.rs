use std::collections::HashMap;

use log::debug;

use super::model::{CleanedSplit, FlatSplit, Label, RawSplit};
use crate::error::InvalidShapeError;

// ---------------------------------------------------------------------------
// Shape check + flattening
// ---------------------------------------------------------------------------

/// Verify that every label group pairs with a sentence group of equal length.
///
/// Group counts are compared first, then each group in order; the first
/// mismatch is reported.
pub fn validate_shape(split: &RawSplit) -> Result<(), InvalidShapeError> {
    if split.labels.len() != split.sentences.len() {
        return Err(InvalidShapeError::GroupCount {
            labels: split.labels.len(),
            sentences: split.sentences.len(),
        });
    }
    for (group, (labels, sentences)) in split.labels.iter().zip(&split.sentences).enumerate() {
        if labels.len() != sentences.len() {
            return Err(InvalidShapeError::GroupLength {
                group,
                labels: labels.len(),
                sentences: sentences.len(),
            });
        }
    }
    Ok(())
}

/// Concatenate all groups, in order, into two parallel sequences.
pub fn flatten(split: &RawSplit) -> Result<FlatSplit, InvalidShapeError> {
    validate_shape(split)?;

    let total = split.num_entries();
    let mut labels = Vec::with_capacity(total);
    let mut sentences = Vec::with_capacity(total);
    for (group_labels, group_sentences) in split.labels.iter().zip(&split.sentences) {
        labels.extend(group_labels.iter().cloned());
        sentences.extend(group_sentences.iter().cloned());
    }
    Ok(FlatSplit { labels, sentences })
}

// ---------------------------------------------------------------------------
// Singleton filter
// ---------------------------------------------------------------------------

/// Number of occurrences of each distinct label.
pub fn label_counts(labels: &[Label]) -> HashMap<&Label, usize> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Drop every entry whose label occurs exactly once in `flat`.
///
/// Labels and sentences are filtered in the same pass, so they stay aligned
/// and keep their relative order.
pub fn remove_singletons(flat: FlatSplit) -> CleanedSplit {
    let keep: Vec<bool> = {
        let counts = label_counts(&flat.labels);
        flat.labels.iter().map(|l| counts[l] >= 2).collect()
    };

    let before = flat.len();
    let (labels, sentences): (Vec<Label>, Vec<String>) = flat
        .labels
        .into_iter()
        .zip(flat.sentences)
        .zip(&keep)
        .filter_map(|(pair, &k)| k.then_some(pair))
        .unzip();

    debug!(
        "removed {} singleton entries ({} -> {})",
        before - labels.len(),
        before,
        labels.len()
    );
    CleanedSplit::from_filtered(FlatSplit { labels, sentences })
}

/// Flatten a grouped split and remove singleton-label entries.
///
/// The shape is checked for the whole split before anything is removed, so
/// a malformed split never yields partial output. A split in which every
/// label is a singleton cleans to an empty split.
pub fn clean(split: &RawSplit) -> Result<CleanedSplit, InvalidShapeError> {
    let flat = flatten(split)?;
    Ok(remove_singletons(flat))
}
