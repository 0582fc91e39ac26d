use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;

use prediction_pool::config::PoolConfig;
use prediction_pool::report::{ReportOptions, SeasonReport, render_participant, render_text};
use prediction_pool::scoring::ScoringOptions;
use prediction_pool::{export, init_tracing, loader};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prediction pool leaderboard and season statistics")]
struct Cli {
    /// Base directory for the schedule, results and predictions
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Schedule CSV (relative to the data dir)
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Directory holding Results.csv
    #[arg(long)]
    results: Option<PathBuf>,

    /// Directory of per-participant prediction files
    #[arg(long)]
    predictions: Option<PathBuf>,

    /// Write every table to an .xlsx workbook
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Only show one participant
    #[arg(long)]
    participant: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = PoolConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.schedule {
        config.schedule_file = path;
    }
    if let Some(path) = cli.results {
        config.results_dir = path;
    }
    if let Some(path) = cli.predictions {
        config.predictions_dir = path;
    }
    info!(data_dir = %config.data_dir.display(), "loading season");

    let season = loader::load_season(&config)?;
    let options = ReportOptions {
        scoring: ScoringOptions {
            form_window: config.form_window,
        },
    };
    let report = SeasonReport::build(&season, &options).context("build season report")?;

    if let Some(path) = cli.xlsx.as_deref() {
        let summary = export::export_report(path, &report)?;
        info!(
            sheets = summary.sheets,
            leaderboard = summary.leaderboard_rows,
            matchwise = summary.matchwise_rows,
            team_picks = summary.team_pick_rows,
            "export complete"
        );
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report")?
        );
    } else if let Some(name) = cli.participant.as_deref() {
        let text = render_participant(&report, name)
            .ok_or_else(|| anyhow!("no predictions found for participant `{name}`"))?;
        print!("{text}");
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
