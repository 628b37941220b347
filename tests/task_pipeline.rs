//! End-to-end: grouped split file → task transform → cleaned split file.

use std::sync::Arc;

use arrow::array::{Int64Builder, ListBuilder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use mteb_tasks::data::loader::load_split;
use mteb_tasks::data::writer::write_split;
use mteb_tasks::tasks::{MainScore, TaskType};
use mteb_tasks::{
    all_tasks, check_label_distribution, get_task, Diagnostic, FlatSplit, Label, PreparedDataset,
    RawDataset, TaskError,
};

/// Two groups with integer labels; label 9 appears once.
fn write_grouped_parquet(dir: &TempDir) -> std::path::PathBuf {
    let groups: [(&[i64], &[&str]); 2] = [
        (&[1, 2, 1], &["a", "b", "c"]),
        (&[2, 9], &["d", "e"]),
    ];

    let mut labels = ListBuilder::new(Int64Builder::new());
    let mut sentences = ListBuilder::new(StringBuilder::new());
    for (ls, ss) in groups {
        for &l in ls {
            labels.values().append_value(l);
        }
        for &s in ss {
            sentences.values().append_value(s);
        }
        labels.append(true);
        sentences.append(true);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new(
            "labels",
            DataType::List(Arc::new(Field::new("item", DataType::Int64, true))),
            false,
        ),
        Field::new(
            "sentences",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(labels.finish()), Arc::new(sentences.finish())],
    )
    .unwrap();

    let path = dir.path().join("test.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

#[test]
fn parquet_split_through_v2_transform() {
    let dir = TempDir::new().unwrap();
    let raw = load_split(&write_grouped_parquet(&dir)).unwrap();
    assert_eq!(raw.num_groups(), 2);

    let report = check_label_distribution(&raw);
    assert_eq!(report.diagnostics, vec![Diagnostic::SingletonLabels { count: 1 }]);

    let mut dataset = RawDataset::new();
    dataset.insert("test".into(), raw);

    let task = get_task("RedditClusteringP2P.v2").unwrap();
    let prepared = task
        .as_clustering()
        .unwrap()
        .dataset_transform(dataset)
        .unwrap();
    let PreparedDataset::Cleaned(mut cleaned) = prepared else {
        panic!("v2 transform should flatten");
    };
    let test = cleaned.remove("test").unwrap().into_flat();
    assert_eq!(
        test,
        FlatSplit {
            labels: [1, 2, 1, 2].into_iter().map(Label::Integer).collect(),
            sentences: ["a", "b", "c", "d"].map(String::from).to_vec(),
        }
    );

    let out = dir.path().join("test.cleaned.json");
    write_split(&out, &test).unwrap();
    let back: FlatSplit = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(back, test);
}

#[test]
fn jsonl_split_through_legacy_transform() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.jsonl");
    std::fs::write(
        &path,
        "{\"sentences\": [\"p1\", \"p2\"], \"labels\": [\"rust\", \"chess\"]}\n",
    )
    .unwrap();

    let mut dataset = RawDataset::new();
    dataset.insert("test".into(), load_split(&path).unwrap());

    let task = get_task("RedditClusteringP2P").unwrap();
    assert_eq!(task.superseded_by(), Some("RedditClusteringP2P.v2"));
    let prepared = task
        .as_clustering()
        .unwrap()
        .dataset_transform(dataset.clone())
        .unwrap();
    assert_eq!(prepared, PreparedDataset::Grouped(dataset));
}

#[test]
fn malformed_split_yields_no_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.json");
    std::fs::write(&path, r#"{"labels": [["a", "b"]], "sentences": [["s1"]]}"#).unwrap();

    let mut dataset = RawDataset::new();
    dataset.insert("test".into(), load_split(&path).unwrap());

    let err = get_task("RedditClusteringP2P.v2")
        .unwrap()
        .as_clustering()
        .unwrap()
        .dataset_transform(dataset)
        .unwrap_err();
    assert!(matches!(err, TaskError::InvalidShape { ref split, .. } if split == "test"));
}

#[test]
fn catalogue_matches_published_tasks() {
    let names: Vec<_> = all_tasks().iter().map(|t| t.metadata().name).collect();
    assert_eq!(
        names,
        vec!["STS13", "RedditClusteringP2P", "RedditClusteringP2P.v2"]
    );

    let sts = get_task("STS13").unwrap();
    assert_eq!(sts.metadata().task_type, TaskType::Sts);
    assert_eq!(sts.metadata().main_score, MainScore::CosineSpearman);
    assert_eq!(
        sts.metadata().dataset.revision,
        "7e90230a92c190f1bf69ae9002b8cea547a64cca"
    );
    assert!(sts.as_clustering().is_none());

    let reddit = get_task("RedditClusteringP2P.v2").unwrap();
    assert_eq!(reddit.metadata().dataset.path, "mteb/reddit-clustering-p2p");
    assert!(reddit.metadata().evaluates("test"));
    assert!(!reddit.metadata().evaluates("train"));
}
