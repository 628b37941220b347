//! Write a synthetic grouped clustering split to `sample_split.parquet`.
//!
//! Each group mimics one Reddit P2P set: posts drawn from a handful of
//! subreddits, plus a few one-off subreddits so the singleton filter has
//! something to remove.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ListBuilder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;

const SUBREDDITS: &[(&str, &[&str])] = &[
    ("askscience", &["photons", "entropy", "enzymes", "tectonics"]),
    ("rust", &["borrow checker", "async traits", "lifetimes", "cargo workspaces"]),
    ("cooking", &["sourdough", "cast iron", "braising", "knife skills"]),
    ("personalfinance", &["index funds", "emergency fund", "credit score", "budgeting"]),
];

const ONE_OFF: &[&str] = &["birdwatching", "chess", "bonsai", "origami", "lockpicking"];

/// Deterministic index picker (splitmix64), so every run writes the same file.
struct Picker(u64);

impl Picker {
    fn below(&mut self, n: usize) -> usize {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        ((z ^ (z >> 31)) % n as u64) as usize
    }
}

fn post(rng: &mut Picker, subreddit: &str, topics: &[&str]) -> String {
    let topic = topics[rng.below(topics.len())];
    format!("Question about {topic} in r/{subreddit}\nLooking for advice on {topic}, any pointers?")
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = Picker(42);

    let n_groups = 3;
    let posts_per_group = 40;

    let mut labels = ListBuilder::new(StringBuilder::new());
    let mut sentences = ListBuilder::new(StringBuilder::new());
    let mut total = 0usize;

    for group in 0..n_groups {
        for _ in 0..posts_per_group {
            let (subreddit, topics) = SUBREDDITS[rng.below(SUBREDDITS.len())];
            labels.values().append_value(subreddit);
            sentences.values().append_value(post(&mut rng, subreddit, topics));
            total += 1;
        }
        // One post from a subreddit that appears nowhere else in the split.
        let one_off = ONE_OFF[group % ONE_OFF.len()];
        labels.values().append_value(one_off);
        sentences.values().append_value(post(&mut rng, one_off, &["getting started"]));
        total += 1;

        labels.append(true);
        sentences.append(true);
    }

    let item = Arc::new(Field::new("item", DataType::Utf8, true));
    let schema = Arc::new(Schema::new(vec![
        Field::new("labels", DataType::List(item.clone()), false),
        Field::new("sentences", DataType::List(item), false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(labels.finish()), Arc::new(sentences.finish())],
    )
    .context("building record batch")?;

    let output_path = "sample_split.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    info!("generated {n_groups} groups");
    println!("Wrote {n_groups} groups ({total} posts) to {output_path}");
    Ok(())
}
