use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::season::{Fixture, MatchResult, Outcome, Predictions, Season};

pub const RESULTS_FILE: &str = "Results.csv";
pub const WINNER_COLUMN: &str = "Winner";
pub const BONUS_COLUMN: &str = "Bonus Points";
const PREDICTION_EXT: &str = "txt";

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Schedule rows by position: match number, date, home team, away team.
pub fn parse_schedule<R: Read>(reader: R) -> crate::error::Result<Vec<Fixture>> {
    let mut rdr = csv_reader(reader);
    let mut fixtures = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;
        if record.len() < 4 {
            return Err(PoolError::ShortRow {
                table: "schedule",
                row,
                expected: 4,
                found: record.len(),
            });
        }
        let number = record[0]
            .parse::<u32>()
            .map_err(|_| PoolError::InvalidNumber {
                table: "schedule",
                row,
                field: "match number",
                value: record[0].to_string(),
            })?;
        fixtures.push(Fixture {
            number,
            date: record[1].to_string(),
            home: record[2].to_string(),
            away: record[3].to_string(),
        });
    }
    Ok(fixtures)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Results rows need a `Winner` column; `Bonus Points` is optional.
/// Blank winner cells are undecided matches and blank bonus cells are zero.
pub fn parse_results<R: Read>(reader: R) -> crate::error::Result<Vec<MatchResult>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let winner_idx = column_index(&headers, WINNER_COLUMN).ok_or(PoolError::MissingColumn {
        table: "results",
        column: WINNER_COLUMN.to_string(),
    })?;
    let bonus_idx = column_index(&headers, BONUS_COLUMN);

    let mut results = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;
        let outcome = record
            .get(winner_idx)
            .filter(|w| !w.is_empty())
            .map(Outcome::parse);
        let bonus_points = match bonus_idx.and_then(|i| record.get(i)) {
            None | Some("") => 0,
            Some(raw) => raw.parse::<u32>().map_err(|_| PoolError::InvalidNumber {
                table: "results",
                row,
                field: "bonus points",
                value: raw.to_string(),
            })?,
        };
        results.push(MatchResult {
            outcome,
            bonus_points,
        });
    }
    Ok(results)
}

/// One predicted winner per line, whitespace trimmed. Blank lines stay in place
/// so later picks keep their match alignment.
pub fn parse_prediction_lines(raw: &str) -> Vec<String> {
    raw.lines().map(|line| line.trim().to_string()).collect()
}

pub fn load_schedule(path: &Path) -> Result<Vec<Fixture>> {
    let file = File::open(path).with_context(|| format!("open schedule {}", path.display()))?;
    let fixtures =
        parse_schedule(file).with_context(|| format!("parse schedule {}", path.display()))?;
    debug!(path = %path.display(), fixtures = fixtures.len(), "schedule loaded");
    Ok(fixtures)
}

pub fn load_results(results_dir: &Path) -> Result<Vec<MatchResult>> {
    let path = results_dir.join(RESULTS_FILE);
    let file = File::open(&path).with_context(|| format!("open results {}", path.display()))?;
    let results =
        parse_results(file).with_context(|| format!("parse results {}", path.display()))?;
    debug!(path = %path.display(), rows = results.len(), "results loaded");
    Ok(results)
}

/// Every `.txt` file is one participant, named after the file stem. Files are
/// read in name order so participant order does not depend on the filesystem.
pub fn load_predictions(dir: &Path) -> Result<Predictions> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read predictions {}", dir.display()))? {
        let path = entry.context("read predictions entry")?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == PREDICTION_EXT) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut predictions = Predictions::new();
    for path in paths {
        let Some(participant) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read prediction file {}", path.display()))?;
        predictions.insert(participant, parse_prediction_lines(&raw))?;
    }
    debug!(dir = %dir.display(), participants = predictions.len(), "predictions loaded");
    Ok(predictions)
}

pub fn load_season(config: &PoolConfig) -> Result<Season> {
    let fixtures = load_schedule(&config.schedule_path())?;
    let results = load_results(&config.results_dir())?;
    let predictions = load_predictions(&config.predictions_dir())?;
    let season = Season::new(fixtures, results, predictions).context("assemble season")?;
    info!(
        fixtures = season.fixtures().len(),
        completed = season.completed_matches(),
        participants = season.predictions().len(),
        "season loaded"
    );
    Ok(season)
}
