use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;

use super::model::{FlatSplit, Label};

/// Write a flat (usually cleaned) split to a local file. Dispatch by extension.
///
/// * `.json`    – `{ "labels": [...], "sentences": [...] }`
/// * `.jsonl`   – a single `{ "labels": [...], "sentences": [...] }` row,
///   which loads back as a one-group split
/// * `.parquet` – flat `labels` and `sentences` columns
pub fn write_split(path: &Path, split: &FlatSplit) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => write_json(path, split),
        "jsonl" => write_jsonl(path, split),
        "parquet" | "pq" => write_parquet(path, split),
        other => bail!("Unsupported output extension: .{other}"),
    }
    .with_context(|| format!("writing split to {}", path.display()))?;

    info!("wrote {} entries to {}", split.len(), path.display());
    Ok(())
}

fn write_json(path: &Path, split: &FlatSplit) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer(&mut out, split).context("serializing split")?;
    out.flush().context("flushing JSON file")?;
    Ok(())
}

fn write_jsonl(path: &Path, split: &FlatSplit) -> Result<()> {
    let file = File::create(path).context("creating JSONL file")?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer(&mut out, split).context("serializing split")?;
    out.write_all(b"\n").context("writing JSONL file")?;
    out.flush().context("flushing JSONL file")?;
    Ok(())
}

/// Integer labels are written as Int64 when every label is an integer;
/// otherwise all labels are written as text.
fn labels_array(labels: &[Label]) -> ArrayRef {
    let ints: Option<Vec<i64>> = labels
        .iter()
        .map(|l| match l {
            Label::Integer(i) => Some(*i),
            Label::Text(_) => None,
        })
        .collect();

    match ints {
        Some(values) if !labels.is_empty() => Arc::new(Int64Array::from(values)) as ArrayRef,
        _ => Arc::new(StringArray::from(
            labels.iter().map(|l| l.to_string()).collect::<Vec<_>>(),
        )),
    }
}

fn write_parquet(path: &Path, split: &FlatSplit) -> Result<()> {
    let labels = labels_array(&split.labels);
    let sentences: ArrayRef = Arc::new(StringArray::from(
        split.sentences.iter().map(String::as_str).collect::<Vec<_>>(),
    ));

    let schema = Arc::new(Schema::new(vec![
        Field::new("labels", labels.data_type().clone(), false),
        Field::new("sentences", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(schema.clone(), vec![labels, sentences])
        .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
