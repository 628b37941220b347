use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, LargeListArray, ListArray};
use arrow::datatypes::DataType;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Label, RawSplit};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one grouped clustering split from a local file. Dispatch by extension.
///
/// Supported formats:
/// * `.jsonl`   – one `{ "sentences": [...], "labels": [...] }` row per group
/// * `.json`    – an array of such rows, one such row, or one object of
///   lists of lists
/// * `.parquet` – `labels` and `sentences` list columns, one row per group
/// * `.csv`     – flat `group,label,sentence` rows
///
/// The shape is not validated here; [`crate::data::filter::clean`] does that.
pub fn load_split(path: &Path) -> Result<RawSplit> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let split = match ext.as_str() {
        "jsonl" => load_jsonl(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading split from {}", path.display()))?;

    debug!(
        "loaded {} groups / {} entries from {}",
        split.num_groups(),
        split.num_entries(),
        path.display()
    );
    Ok(split)
}

// ---------------------------------------------------------------------------
// JSON / JSON Lines loaders
// ---------------------------------------------------------------------------

/// A single hub row: one group of texts with their labels.
#[derive(Debug, Deserialize)]
struct GroupRow {
    labels: Vec<Label>,
    sentences: Vec<String>,
}

fn rows_to_split(rows: Vec<GroupRow>) -> RawSplit {
    let (labels, sentences) = rows.into_iter().map(|r| (r.labels, r.sentences)).unzip();
    RawSplit { labels, sentences }
}

/// Hub export layout:
///
/// ```json
/// {"sentences": ["title + post", ...], "labels": ["askreddit", ...]}
/// {"sentences": [...], "labels": [...]}
/// ```
fn load_jsonl(path: &Path) -> Result<RawSplit> {
    let text = std::fs::read_to_string(path).context("reading JSONL file")?;

    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<GroupRow>(line).with_context(|| format!("JSONL line {}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(rows_to_split(rows))
}

/// Object layouts accepted at the top level of a `.json` file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonObject {
    /// `{ "labels": [[...], ...], "sentences": [[...], ...] }`
    Columns(RawSplit),
    /// `{ "labels": [...], "sentences": [...] }`, as written by `write_split`.
    Group(GroupRow),
}

/// Either `[{labels, sentences}, ...]` (records), a columns object with
/// lists of lists, or a single flat group object.
fn load_json(path: &Path) -> Result<RawSplit> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    match root {
        JsonValue::Array(_) => {
            let rows: Vec<GroupRow> =
                serde_json::from_value(root).context("Expected an array of group rows")?;
            Ok(rows_to_split(rows))
        }
        JsonValue::Object(_) => {
            let object: JsonObject = serde_json::from_value(root).context(
                "Expected an object with 'labels' and 'sentences' lists (flat or lists of lists)",
            )?;
            Ok(match object {
                JsonObject::Columns(split) => split,
                JsonObject::Group(row) => rows_to_split(vec![row]),
            })
        }
        _ => bail!("Expected top-level JSON array or object"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row `group,label,sentence`, one row per entry.
/// Consecutive rows sharing a `group` value form one group. Labels that
/// parse as integers become [`Label::Integer`].
fn load_csv(path: &Path) -> Result<RawSplit> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let group_idx = column("group")?;
    let label_idx = column("label")?;
    let sentence_idx = column("sentence")?;

    let mut split = RawSplit::default();
    let mut current_group: Option<String> = None;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let group = field(group_idx);
        if current_group.as_deref() != Some(group) {
            split.labels.push(Vec::new());
            split.sentences.push(Vec::new());
            current_group = Some(group.to_string());
        }

        // Both vectors were pushed above for the first row of every group.
        if let (Some(labels), Some(sentences)) = (split.labels.last_mut(), split.sentences.last_mut()) {
            labels.push(guess_label(field(label_idx)));
            sentences.push(field(sentence_idx).to_string());
        }
    }

    Ok(split)
}

/// Surrounding whitespace is not part of the label, whichever type it is.
fn guess_label(s: &str) -> Label {
    let s = s.trim();
    match s.parse::<i64>() {
        Ok(i) => Label::Integer(i),
        Err(_) => Label::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding a grouped split.
///
/// Expected schema:
/// - `labels`: List/LargeList of Utf8, Int64 or Int32
/// - `sentences`: List/LargeList of Utf8
/// - other columns are ignored
///
/// This is what `datasets` writes when a hub clustering split is exported
/// with `to_parquet()`.
fn load_parquet(path: &Path) -> Result<RawSplit> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut split = RawSplit::default();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let labels_idx = schema
            .index_of("labels")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'labels' column"))?;
        let sentences_idx = schema
            .index_of("sentences")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'sentences' column"))?;

        let labels_col = batch.column(labels_idx);
        let sentences_col = batch.column(sentences_idx);

        for row in 0..batch.num_rows() {
            let labels = extract_label_list(labels_col, row)
                .with_context(|| format!("Row {row}: failed to read 'labels'"))?;
            let sentences = extract_string_list(sentences_col, row)
                .with_context(|| format!("Row {row}: failed to read 'sentences'"))?;
            split.labels.push(labels);
            split.sentences.push(sentences);
        }
    }

    Ok(split)
}

// -- Parquet / Arrow helpers --

/// The inner values array of a List or LargeList column at the given row.
fn list_values(col: &Arc<dyn Array>, row: usize) -> Result<Arc<dyn Array>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }
    match col.data_type() {
        DataType::List(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<ListArray>()
                .context("expected ListArray")?;
            Ok(list_arr.value(row))
        }
        DataType::LargeList(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<LargeListArray>()
                .context("expected LargeListArray")?;
            Ok(list_arr.value(row))
        }
        other => bail!("Expected List or LargeList column, got {other:?}"),
    }
}

fn string_values(values: &dyn Array) -> Result<Vec<String>> {
    if values.null_count() > 0 {
        bail!("null entry in string list");
    }
    match values.data_type() {
        DataType::Utf8 => Ok(values
            .as_string::<i32>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()),
        DataType::LargeUtf8 => Ok(values
            .as_string::<i64>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()),
        other => bail!("List inner type is {other:?}, expected Utf8"),
    }
}

fn extract_string_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<String>> {
    let values = list_values(col, row)?;
    string_values(values.as_ref())
}

fn extract_label_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<Label>> {
    let values = list_values(col, row)?;
    if values.null_count() > 0 {
        bail!("null entry in label list");
    }

    if let Some(arr) = values.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.values().iter().map(|&v| Label::Integer(v)).collect())
    } else if let Some(arr) = values.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.values().iter().map(|&v| Label::Integer(v as i64)).collect())
    } else {
        let texts = string_values(values.as_ref())
            .context("labels must be Int64, Int32 or Utf8")?;
        Ok(texts.into_iter().map(Label::Text).collect())
    }
}
