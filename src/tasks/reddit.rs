use log::info;

use super::clustering::{clean_eval_splits, ClusteringTask, PreparedDataset};
use super::metadata::{Category, DatasetRef, MainScore, TaskMetadata, TaskType};
use super::Task;
use crate::data::model::RawDataset;
use crate::error::Result;

const REDDIT_P2P_BASE: TaskMetadata = TaskMetadata {
    name: "RedditClusteringP2P",
    description: "Clustering of title+posts from reddit. Clustering of 10 sets of 50k paragraphs and 40 sets of 10k paragraphs.",
    reference: "https://arxiv.org/abs/2104.07081",
    dataset: DatasetRef {
        path: "mteb/reddit-clustering-p2p",
        revision: "385e3cb46b4cfa89021f56c4380204149d0efe33",
    },
    task_type: TaskType::Clustering,
    category: Category::P2p,
    modalities: &["text"],
    eval_splits: &["test"],
    eval_langs: &["eng-Latn"],
    main_score: MainScore::VMeasure,
    date: Some(("2021-01-01", "2021-04-14")),
    domains: Some(&["Web", "Social", "Written"]),
    task_subtypes: Some(&["Thematic clustering"]),
    // derived from pushshift
    license: Some("not specified"),
    annotations_creators: Some("derived"),
    dialect: Some(&[]),
    sample_creation: Some("found"),
    bibtex_citation: r#"@article{geigle:2021:arxiv,
        author    = {Gregor Geigle and
                        Nils Reimers and
                        Andreas R{"u}ckl{'e} and
                        Iryna Gurevych},
        title     = {TWEAC: Transformer with Extendable QA Agent Classifiers},
        journal   = {arXiv preprint},
        volume    = {abs/2104.07081},
        year      = {2021},
        url       = {http://arxiv.org/abs/2104.07081},
        archivePrefix = {arXiv},
        eprint    = {2104.07081}
        }"#,
    prompt: Some("Identify the topic or theme of Reddit posts based on the titles and posts"),
    adapted_from: None,
};

pub static REDDIT_P2P_METADATA: TaskMetadata = REDDIT_P2P_BASE;

pub static REDDIT_P2P_V2_METADATA: TaskMetadata = TaskMetadata {
    name: "RedditClusteringP2P.v2",
    adapted_from: Some(&["RedditClusteringP2P"]),
    ..REDDIT_P2P_BASE
};

/// Reddit title+post clustering, scored per group of paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedditClusteringP2P;

impl Task for RedditClusteringP2P {
    fn metadata(&self) -> &'static TaskMetadata {
        &REDDIT_P2P_METADATA
    }

    fn superseded_by(&self) -> Option<&'static str> {
        Some(REDDIT_P2P_V2_METADATA.name)
    }

    fn as_clustering(&self) -> Option<&dyn ClusteringTask> {
        Some(self)
    }
}

impl ClusteringTask for RedditClusteringP2P {}

/// Reddit clustering over each split as a whole, with singleton labels
/// removed so every cluster has at least two members.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedditFastClusteringP2P;

impl Task for RedditFastClusteringP2P {
    fn metadata(&self) -> &'static TaskMetadata {
        &REDDIT_P2P_V2_METADATA
    }

    fn as_clustering(&self) -> Option<&dyn ClusteringTask> {
        Some(self)
    }
}

impl ClusteringTask for RedditFastClusteringP2P {
    fn dataset_transform(&self, dataset: RawDataset) -> Result<PreparedDataset> {
        let meta = self.metadata();
        info!("{}: flattening eval splits {:?}", meta.name, meta.eval_splits);
        let cleaned = clean_eval_splits(&dataset, meta.eval_splits)?;
        Ok(PreparedDataset::Cleaned(cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Label, RawSplit};
    use crate::error::TaskError;

    fn dataset() -> RawDataset {
        let mut ds = RawDataset::new();
        ds.insert(
            "test".into(),
            RawSplit::new(
                vec![
                    vec!["askscience".into(), "rust".into(), "askscience".into()],
                    vec!["rust".into(), "cooking".into()],
                ],
                vec![
                    vec!["p1".into(), "p2".into(), "p3".into()],
                    vec!["p4".into(), "p5".into()],
                ],
            ),
        );
        ds
    }

    #[test]
    fn v2_shares_dataset_with_legacy_task() {
        assert_eq!(REDDIT_P2P_V2_METADATA.dataset, REDDIT_P2P_METADATA.dataset);
        assert_eq!(REDDIT_P2P_V2_METADATA.main_score, MainScore::VMeasure);
        assert_eq!(
            RedditClusteringP2P.superseded_by(),
            Some("RedditClusteringP2P.v2")
        );
        assert_eq!(RedditFastClusteringP2P.superseded_by(), None);
    }

    #[test]
    fn legacy_transform_keeps_groups() {
        let prepared = RedditClusteringP2P.dataset_transform(dataset()).unwrap();
        assert_eq!(prepared, PreparedDataset::Grouped(dataset()));
    }

    #[test]
    fn v2_transform_flattens_and_drops_singletons() {
        let prepared = RedditFastClusteringP2P.dataset_transform(dataset()).unwrap();
        let PreparedDataset::Cleaned(ds) = prepared else {
            panic!("expected cleaned dataset");
        };
        let test = &ds["test"];
        assert_eq!(
            test.labels,
            vec![
                Label::from("askscience"),
                Label::from("rust"),
                Label::from("askscience"),
                Label::from("rust"),
            ]
        );
        assert_eq!(test.sentences, vec!["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn v2_transform_requires_test_split() {
        let err = RedditFastClusteringP2P
            .dataset_transform(RawDataset::new())
            .unwrap_err();
        assert_eq!(err, TaskError::MissingSplit("test".into()));
    }

    #[test]
    fn metadata_dict_matches_harness_layout() {
        let dict = RedditFastClusteringP2P.metadata_dict();
        assert_eq!(dict["type"], "Clustering");
        assert_eq!(dict["category"], "p2p");
        assert_eq!(dict["date"], serde_json::json!(["2021-01-01", "2021-04-14"]));
        assert_eq!(dict["adapted_from"], serde_json::json!(["RedditClusteringP2P"]));
        assert_eq!(dict["dialect"], serde_json::json!([]));
        assert_eq!(dict["modalities"], serde_json::json!(["text"]));
        assert!(RedditClusteringP2P.metadata_dict()["adapted_from"].is_null());
    }

    #[test]
    fn citation_keeps_published_layout() {
        let bib = REDDIT_P2P_BASE.bibtex_citation;
        assert_eq!(bib, RedditFastClusteringP2P.metadata().bibtex_citation);
        assert!(bib.starts_with("@article{geigle:2021:arxiv,\n        author    = {Gregor Geigle and\n"));
        assert!(bib.contains("\n                        Andreas R{\"u}ckl{'e} and\n"));
        assert!(bib.ends_with("eprint    = {2104.07081}\n        }"));
        assert_eq!(bib.lines().count(), 13);
    }
}
