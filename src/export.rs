use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::report::{SeasonReport, join_points};
use crate::scoring::{LeaderboardRow, format_movement};

pub struct ExportReport {
    pub sheets: usize,
    pub leaderboard_rows: usize,
    pub matchwise_rows: usize,
    pub team_pick_rows: usize,
}

/// Writes every report table to its own worksheet.
pub fn export_report(path: &Path, report: &SeasonReport) -> Result<ExportReport> {
    let mut leaderboard_rows = vec![strings(&[
        "Rank",
        "Movement",
        "Participant",
        "Points",
        "Accuracy (%)",
        "Matchwise Points (Last 5)",
        "Last 5 Matches",
    ])];
    leaderboard_rows.extend(report.leaderboard.iter().map(leaderboard_row));

    let mut progression_rows = vec![{
        let mut header = vec!["Participant".to_string()];
        let longest = report
            .progression
            .iter()
            .map(|p| p.totals.len())
            .max()
            .unwrap_or(0);
        header.extend((0..longest).map(|k| format!("After {k}")));
        header
    }];
    progression_rows.extend(report.progression.iter().map(|p| {
        let mut row = vec![p.participant.clone()];
        row.extend(p.totals.iter().map(u32::to_string));
        row
    }));

    let mut matchwise_rows = vec![strings(&[
        "Match",
        "Date",
        "Home Team",
        "Home Predictors",
        "Away Team",
        "Away Predictors",
    ])];
    matchwise_rows.extend(report.matchwise.iter().map(|row| {
        vec![
            row.number.to_string(),
            row.date.clone(),
            row.home.clone(),
            row.home_predictors_joined(),
            row.away.clone(),
            row.away_predictors_joined(),
        ]
    }));

    let mut ratio_rows = vec![strings(&["Table", "Label", "Count"])];
    ratio_rows.extend(
        report
            .ratios
            .absolute
            .iter()
            .map(|r| vec!["Prediction Ratio".to_string(), r.label.clone(), r.count.to_string()]),
    );
    ratio_rows.extend(
        report
            .ratios
            .directional
            .iter()
            .map(|r| vec!["Home:Away".to_string(), r.label.clone(), r.count.to_string()]),
    );

    let mut home_away_rows = vec![strings(&[
        "Participant",
        "Home Picks",
        "Away Picks",
        "Home (%)",
        "Away (%)",
    ])];
    home_away_rows.extend(report.home_away.iter().map(|s| {
        vec![
            s.participant.clone(),
            s.home_picks.to_string(),
            s.away_picks.to_string(),
            format!("{:.2}", s.home_pct),
            format!("{:.2}", s.away_pct),
        ]
    }));

    let mut team_pick_rows = vec![strings(&["Participant", "Team", "Wins"])];
    team_pick_rows.extend(
        report
            .team_picks
            .iter()
            .map(|p| vec![p.participant.clone(), p.team.clone(), p.count.to_string()]),
    );
    team_pick_rows.push(Vec::new());
    team_pick_rows.push(strings(&["Team", "Mean Picks"]));
    team_pick_rows.extend(
        report
            .most_picked
            .iter()
            .map(|m| vec![m.team.clone(), format!("{:.2}", m.mean_picks)]),
    );

    let mut prediction_rows = vec![{
        let mut header = strings(&["Match", "Home", "Away"]);
        header.extend(report.participants.iter().cloned());
        header
    }];
    prediction_rows.extend(report.prediction_grid.iter().map(|row| {
        let mut out = vec![row.number.to_string(), row.home.clone(), row.away.clone()];
        out.extend(row.picks.iter().map(|p| p.clone().unwrap_or_default()));
        out
    }));

    let summary_rows = vec![
        vec!["Generated".to_string(), report.generated_at.clone()],
        vec!["Matches".to_string(), report.total_matches.to_string()],
        vec!["Decided".to_string(), report.completed_matches.to_string()],
        vec!["Participants".to_string(), report.participants.len().to_string()],
        vec!["Remaining Outcomes".to_string(), report.outcomes.formatted.clone()],
        vec!["Outcome Label".to_string(), report.outcomes.magnitude_label.clone()],
    ];

    let sheets: [(&str, &[Vec<String>]); 8] = [
        ("Leaderboard", &leaderboard_rows),
        ("Progression", &progression_rows),
        ("Matchwise", &matchwise_rows),
        ("Ratios", &ratio_rows),
        ("HomeAway", &home_away_rows),
        ("TeamPicks", &team_pick_rows),
        ("Predictions", &prediction_rows),
        ("Summary", &summary_rows),
    ];

    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    info!(path = %path.display(), "report workbook written");

    Ok(ExportReport {
        sheets: sheets.len(),
        leaderboard_rows: leaderboard_rows.len().saturating_sub(1),
        matchwise_rows: matchwise_rows.len().saturating_sub(1),
        team_pick_rows: report.team_picks.len(),
    })
}

fn leaderboard_row(row: &LeaderboardRow) -> Vec<String> {
    vec![
        row.rank.to_string(),
        format_movement(row.movement),
        row.score.participant.clone(),
        row.score.points.to_string(),
        format!("{:.2}", row.score.accuracy_pct),
        join_points(&row.score.recent_points),
        row.score.recent_form.clone(),
    ]
}

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
