use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use prediction_pool::init_tracing;
use prediction_pool::loader::parse_prediction_lines;
use prediction_pool::reorder::{parse_mapping, reorder_lines};

/// Rewrites a prediction file after fixtures were moved in the schedule.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Prediction file to rewrite
    file: PathBuf,

    /// 1-based `from:to` pairs, e.g. "57:65,58:69"
    #[arg(long)]
    mapping: String,

    /// Destination (defaults to overwriting the input)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let mapping = parse_mapping(&args.mapping).context("invalid --mapping")?;
    let lines = reorder_lines(&parse_prediction_lines(&raw), &mapping);

    let out = args.out.unwrap_or_else(|| args.file.clone());
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(&out, body).with_context(|| format!("write {}", out.display()))?;

    println!("Rows reordered and saved to {}", out.display());
    Ok(())
}
