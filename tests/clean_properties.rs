//! Property-based tests for the singleton-label filter.
//!
//! For any well-formed grouped split:
//! - labels and sentences stay the same length
//! - no label survives with a single occurrence
//! - survivors keep their flattened order and their original pairing
//! - cleaning twice is the same as cleaning once

use std::collections::HashMap;

use mteb_tasks::{clean, flatten, InvalidShapeError, Label, RawSplit};
use proptest::prelude::*;

prop_compose! {
    /// A grouped split over a small label alphabet so collisions and
    /// singletons are both common. Sentences encode their flat position.
    fn arb_split()(groups in prop::collection::vec(prop::collection::vec(0i64..8, 0..12), 0..6))
        -> RawSplit
    {
        let mut k = 0;
        let mut sentences = Vec::with_capacity(groups.len());
        for g in &groups {
            let mut out = Vec::with_capacity(g.len());
            for _ in g {
                out.push(format!("s{k}"));
                k += 1;
            }
            sentences.push(out);
        }
        let labels = groups
            .into_iter()
            .map(|g| g.into_iter().map(Label::Integer).collect())
            .collect();
        RawSplit::new(labels, sentences)
    }
}

fn counts(labels: &[Label]) -> HashMap<&Label, usize> {
    let mut m = HashMap::new();
    for l in labels {
        *m.entry(l).or_insert(0) += 1;
    }
    m
}

proptest! {
    #[test]
    fn output_is_aligned(split in arb_split()) {
        let out = clean(&split).unwrap();
        prop_assert_eq!(out.labels.len(), out.sentences.len());
    }

    #[test]
    fn no_singleton_survives(split in arb_split()) {
        let out = clean(&split).unwrap();
        for (label, n) in counts(&out.labels) {
            prop_assert!(n >= 2, "label {} survived with count {}", label, n);
        }
    }

    #[test]
    fn survivors_keep_order_and_pairing(split in arb_split()) {
        let flat = flatten(&split).unwrap();
        let out = clean(&split).unwrap();

        // Sentences are "s<k>" for flat position k, so we can recover where
        // each survivor came from.
        let positions: Vec<usize> = out
            .sentences
            .iter()
            .map(|s| s[1..].parse().unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for (label, &k) in out.labels.iter().zip(&positions) {
            prop_assert_eq!(label, &flat.labels[k]);
        }
    }

    #[test]
    fn everything_with_a_repeat_is_kept(split in arb_split()) {
        let flat = flatten(&split).unwrap();
        let expected = counts(&flat.labels)
            .values()
            .filter(|&&n| n >= 2)
            .sum::<usize>();
        prop_assert_eq!(clean(&split).unwrap().len(), expected);
    }

    #[test]
    fn cleaning_is_idempotent(split in arb_split()) {
        let once = clean(&split).unwrap();
        let regrouped = RawSplit::new(vec![once.labels.clone()], vec![once.sentences.clone()]);
        let twice = clean(&regrouped).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn regrouping_does_not_change_result(split in arb_split()) {
        // Counts are taken over the whole split, not per group.
        let flat = flatten(&split).unwrap();
        let single_group = RawSplit::new(vec![flat.labels.clone()], vec![flat.sentences.clone()]);
        prop_assert_eq!(clean(&split).unwrap(), clean(&single_group).unwrap());
    }
}

fn text_split(labels: &[&[&str]], sentences: &[&[&str]]) -> RawSplit {
    RawSplit::new(
        labels
            .iter()
            .map(|g| g.iter().map(|&l| Label::from(l)).collect())
            .collect(),
        sentences
            .iter()
            .map(|g| g.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

#[test]
fn singleton_in_one_group_is_removed() {
    let out = clean(&text_split(&[&["a", "a", "b"]], &[&["s1", "s2", "s3"]])).unwrap();
    assert_eq!(out.labels, vec![Label::from("a"), Label::from("a")]);
    assert_eq!(out.sentences, vec!["s1", "s2"]);
}

#[test]
fn all_singletons_give_empty_output() {
    let out = clean(&text_split(&[&["x"], &["y"]], &[&["sx"], &["sy"]])).unwrap();
    assert!(out.labels.is_empty());
    assert!(out.sentences.is_empty());
}

#[test]
fn no_singletons_give_flattened_input() {
    let split = text_split(&[&["a", "a", "b", "b"]], &[&["s1", "s2", "s3", "s4"]]);
    assert_eq!(clean(&split).unwrap().into_flat(), flatten(&split).unwrap());
}

#[test]
fn mismatched_group_fails_without_output() {
    let result = clean(&text_split(&[&["a", "b"]], &[&["s1"]]));
    assert_eq!(
        result,
        Err(InvalidShapeError::GroupLength {
            group: 0,
            labels: 2,
            sentences: 1
        })
    );
}
