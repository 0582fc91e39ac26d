use std::fmt::Write as _;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::matchwise::{MatchwiseRow, matchwise_predictions};
use crate::outcomes::{OutcomeSpace, remaining_outcomes};
use crate::ratios::{HomeAwaySplit, PredictionRatios, home_away_percentages, prediction_ratios};
use crate::scoring::{
    LeaderboardRow, PointsProgression, ScoringOptions, build_leaderboard, calculate_scores,
    format_movement,
};
use crate::season::Season;
use crate::team_picks::{
    PredictionGridRow, TeamPickCount, TeamPickMean, most_picked_teams, participant_team_picks,
    prediction_grid,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub scoring: ScoringOptions,
}

/// Everything the leaderboard, charts and tables need for one season snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonReport {
    pub generated_at: String,
    pub total_matches: usize,
    pub completed_matches: usize,
    pub participants: Vec<String>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub progression: Vec<PointsProgression>,
    pub matchwise: Vec<MatchwiseRow>,
    pub ratios: PredictionRatios,
    pub home_away: Vec<HomeAwaySplit>,
    pub team_picks: Vec<TeamPickCount>,
    pub most_picked: Vec<TeamPickMean>,
    pub prediction_grid: Vec<PredictionGridRow>,
    pub outcomes: OutcomeSpace,
}

impl SeasonReport {
    pub fn build(season: &Season, options: &ReportOptions) -> Result<Self> {
        let predictions = season.predictions();
        let sheet = calculate_scores(season.results(), predictions, options.scoring);
        let leaderboard = build_leaderboard(&sheet);
        let matchwise = matchwise_predictions(season.fixtures(), predictions);
        let ratios = prediction_ratios(&matchwise);
        let home_away = home_away_percentages(season.fixtures(), predictions);
        let outcomes = remaining_outcomes(season.results())?;

        info!(
            participants = leaderboard.len(),
            completed = sheet.completed_matches,
            remaining = outcomes.remaining_matches,
            "season report built"
        );

        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_matches: season.fixtures().len(),
            completed_matches: sheet.completed_matches,
            participants: predictions.participants().map(str::to_string).collect(),
            leaderboard,
            progression: sheet.progression,
            matchwise,
            ratios,
            home_away,
            team_picks: participant_team_picks(predictions),
            most_picked: most_picked_teams(predictions),
            prediction_grid: prediction_grid(season.fixtures(), predictions),
            outcomes,
        })
    }

    pub fn leaderboard_row(&self, participant: &str) -> Option<&LeaderboardRow> {
        self.leaderboard
            .iter()
            .find(|row| row.score.participant == participant)
    }

    pub fn progression_for(&self, participant: &str) -> Option<&PointsProgression> {
        self.progression.iter().find(|p| p.participant == participant)
    }

    pub fn outcome_summary(&self) -> String {
        format!(
            "Total possible outcomes for remaining league matches: {} ({} outcomes)",
            self.outcomes.magnitude_label, self.outcomes.formatted
        )
    }
}

pub fn join_points(points: &[u32]) -> String {
    points
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_leaderboard(rows: &[LeaderboardRow]) -> String {
    let name_w = rows
        .iter()
        .map(|r| r.score.participant.chars().count())
        .max()
        .unwrap_or(0)
        .max("Participant".len());
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>4}  {:<name_w$}  {:>6}  {:>8}  {:<18}  Last 5",
        "Rank", "Move", "Participant", "Points", "Acc (%)", "Points (Last 5)"
    );
    for row in rows {
        let s = &row.score;
        let _ = writeln!(
            out,
            "{:>4}  {:>4}  {:<name_w$}  {:>6}  {:>8.2}  {:<18}  {}",
            row.rank,
            format_movement(row.movement),
            s.participant,
            s.points,
            s.accuracy_pct,
            join_points(&s.recent_points),
            s.recent_form
        );
    }
    out
}

pub fn render_matchwise(rows: &[MatchwiseRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "#{:<3} {:<12} {} [{}] vs {} [{}]",
            row.number,
            row.date,
            row.home,
            row.home_predictors_joined(),
            row.away,
            row.away_predictors_joined()
        );
    }
    out
}

pub fn render_text(report: &SeasonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Leaderboard ({} of {} matches decided)",
        report.completed_matches, report.total_matches
    );
    out.push_str(&render_leaderboard(&report.leaderboard));
    let _ = writeln!(out, "\n{}", report.outcome_summary());

    out.push_str("\nMatchwise predictions\n");
    out.push_str(&render_matchwise(&report.matchwise));

    out.push_str("\nPrediction ratios\n");
    for r in &report.ratios.absolute {
        let _ = writeln!(out, "  {:>5}  {}", r.label, r.count);
    }
    out.push_str("Home:away splits\n");
    for r in &report.ratios.directional {
        let _ = writeln!(out, "  {:>5}  {}", r.label, r.count);
    }

    out.push_str("\nHome/away picks\n");
    for split in &report.home_away {
        let _ = writeln!(
            out,
            "  {:<16} home {:>6.2}%  away {:>6.2}%",
            split.participant, split.home_pct, split.away_pct
        );
    }

    out.push_str("\nMost picked teams\n");
    for team in &report.most_picked {
        let _ = writeln!(out, "  {:<16} {:.2}", team.team, team.mean_picks);
    }
    out
}

/// Single-participant view: leaderboard line, team picks and the worm series.
pub fn render_participant(report: &SeasonReport, participant: &str) -> Option<String> {
    let row = report.leaderboard_row(participant)?;
    let mut out = render_leaderboard(std::slice::from_ref(row));
    if let Some(series) = report.progression_for(participant) {
        let _ = writeln!(out, "Progression: {}", join_points(&series.totals));
    }
    for pick in report.team_picks.iter().filter(|p| p.participant == participant) {
        let _ = writeln!(out, "  {:<16} {}", pick.team, pick.count);
    }
    Some(out)
}
