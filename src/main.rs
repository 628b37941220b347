//! `mteb-tasks` – inspect benchmark tasks and prepare clustering splits.
//!
//! ```bash
//! mteb-tasks list
//! mteb-tasks show STS13
//! mteb-tasks check test.jsonl
//! mteb-tasks clean test.jsonl --output test.cleaned.parquet
//! RUST_LOG=debug mteb-tasks clean test.parquet --task RedditClusteringP2P.v2
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use mteb_tasks::data::loader::load_split;
use mteb_tasks::data::writer::write_split;
use mteb_tasks::{
    all_tasks, check_label_distribution, flatten, get_task, PreparedDataset, RawDataset, TaskError,
};

#[derive(Parser)]
#[command(name = "mteb-tasks", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all registered tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a task's metadata as JSON
    Show {
        /// Task name, e.g. STS13
        task: String,
    },
    /// Report the label distribution of a grouped split file
    Check {
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a clustering task's dataset transform on a split file
    Clean {
        file: PathBuf,
        /// Clustering task whose transform to apply
        #[arg(long, default_value = "RedditClusteringP2P.v2")]
        task: String,
        /// Split the file holds
        #[arg(long, default_value = "test")]
        split: String,
        /// Write the prepared split here (.json, .jsonl or .parquet)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::List { json } => list(json),
        Command::Show { task } => show(&task),
        Command::Check { file, json } => check(&file, json),
        Command::Clean {
            file,
            task,
            split,
            output,
        } => clean_file(&file, &task, &split, output.as_deref()),
    }
}

fn list(json: bool) -> Result<()> {
    if json {
        let metas: Vec<_> = all_tasks().iter().map(|t| t.metadata()).collect();
        println!("{}", serde_json::to_string_pretty(&metas)?);
        return Ok(());
    }
    for task in all_tasks() {
        let meta = task.metadata();
        let note = match task.superseded_by() {
            Some(next) => format!("  (superseded by {next})"),
            None => String::new(),
        };
        println!(
            "{:<28} {:<11} {}{note}",
            meta.name,
            format!("{:?}", meta.task_type),
            meta.main_score.as_str()
        );
    }
    Ok(())
}

fn show(name: &str) -> Result<()> {
    let task = get_task(name)?;
    println!("{}", serde_json::to_string_pretty(&task.metadata_dict())?);
    Ok(())
}

fn check(file: &Path, json: bool) -> Result<()> {
    let split = load_split(file)?;
    let report = check_label_distribution(&split);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("groups:           {}", report.groups);
    println!("entries:          {}", report.entries);
    println!("distinct labels:  {}", report.distinct_labels);
    println!("singleton labels: {}", report.singleton_labels);
    println!(
        "label frequency:  {}..{}",
        report.least_frequent, report.most_frequent
    );
    for d in &report.diagnostics {
        println!("warning: {d}");
    }
    Ok(())
}

fn clean_file(
    file: &Path,
    task_name: &str,
    split_name: &str,
    output: Option<&Path>,
) -> Result<()> {
    let task = get_task(task_name)?;
    let clustering = task
        .as_clustering()
        .ok_or_else(|| TaskError::NotClustering(task_name.to_string()))?;
    if !task.metadata().evaluates(split_name) {
        bail!(
            "{task_name} is evaluated on {:?}, not '{split_name}'",
            task.metadata().eval_splits
        );
    }

    let raw = load_split(file)?;
    let before = raw.num_entries();
    let mut dataset = RawDataset::new();
    dataset.insert(split_name.to_string(), raw);

    let prepared = clustering
        .dataset_transform(dataset)
        .with_context(|| format!("running {task_name} transform"))?;
    let after = prepared.entries(split_name).unwrap_or(0);
    println!("{task_name} [{split_name}]: {after} of {before} entries kept");

    let Some(output) = output else {
        return Ok(());
    };
    let flat = match prepared {
        PreparedDataset::Cleaned(mut ds) => ds
            .remove(split_name)
            .context("transform dropped the split")?
            .into_flat(),
        PreparedDataset::Grouped(ds) => {
            info!("{task_name} keeps groups; writing the split flattened");
            let raw = ds.get(split_name).context("transform dropped the split")?;
            flatten(raw)?
        }
    };
    write_split(output, &flat)
}
