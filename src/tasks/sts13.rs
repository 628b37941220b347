use serde_json::{Map, Value};

use super::metadata::{Category, DatasetRef, MainScore, TaskMetadata, TaskType};
use super::{metadata_object, Task};

/// Lowest gold similarity score in the STS13 annotations.
pub const MIN_SCORE: u8 = 0;
/// Highest gold similarity score in the STS13 annotations.
pub const MAX_SCORE: u8 = 5;

pub static STS13_METADATA: TaskMetadata = TaskMetadata {
    name: "STS13",
    description: "SemEval STS 2013 dataset.",
    reference: "https://www.aclweb.org/anthology/S13-1004/",
    dataset: DatasetRef {
        path: "mteb/sts13-sts",
        revision: "7e90230a92c190f1bf69ae9002b8cea547a64cca",
    },
    task_type: TaskType::Sts,
    category: Category::S2s,
    modalities: &["text"],
    eval_splits: &["test"],
    eval_langs: &["eng-Latn"],
    main_score: MainScore::CosineSpearman,
    date: None,
    domains: None,
    task_subtypes: None,
    license: None,
    annotations_creators: None,
    dialect: None,
    sample_creation: None,
    bibtex_citation: r"@inproceedings{Agirre2013SEM2S,
  title={*SEM 2013 shared task: Semantic Textual Similarity},
  author={Eneko Agirre and Daniel Matthew Cer and Mona T. Diab and Aitor Gonzalez-Agirre and Weiwei Guo},
  booktitle={International Workshop on Semantic Evaluation},
  year={2013},
  url={https://api.semanticscholar.org/CorpusID:10241043}
}",
    prompt: None,
    adapted_from: None,
};

/// SemEval 2013 semantic textual similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sts13;

impl Task for Sts13 {
    fn metadata(&self) -> &'static TaskMetadata {
        &STS13_METADATA
    }

    /// Adds the gold score range, which the harness uses to normalise scores.
    fn metadata_dict(&self) -> Map<String, Value> {
        let mut dict = metadata_object(self.metadata());
        dict.insert("min_score".into(), MIN_SCORE.into());
        dict.insert("max_score".into(), MAX_SCORE.into());
        dict
    }
}
