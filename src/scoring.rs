use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::season::{MatchResult, Outcome, ParticipantPicks, Predictions};

pub const CORRECT_PICK_POINTS: u32 = 10;
pub const NO_RESULT_POINTS: u32 = 5;
pub const DEFAULT_FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickMark {
    Correct,
    Incorrect,
    NoResult,
}

impl PickMark {
    pub fn symbol(self) -> &'static str {
        match self {
            PickMark::Correct => "✅",
            PickMark::Incorrect => "❌",
            PickMark::NoResult => "➖",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringOptions {
    /// How many of the most recent completed matches feed the form columns.
    pub form_window: usize,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            form_window: DEFAULT_FORM_WINDOW,
        }
    }
}

/// Unranked per-participant totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantScore {
    pub participant: String,
    pub points: u32,
    pub correct: usize,
    pub accuracy_pct: f64,
    /// Points from the last `form_window` completed matches, oldest first.
    pub recent_points: Vec<u32>,
    pub recent_form: String,
}

/// Running totals with a leading zero: `totals[k]` is the score after the k-th completed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsProgression {
    pub participant: String,
    pub totals: Vec<u32>,
}

impl PointsProgression {
    pub fn latest(&self) -> u32 {
        self.totals.last().copied().unwrap_or(0)
    }

    /// Total before the most recent completed match.
    pub fn previous(&self) -> u32 {
        let n = self.totals.len();
        if n >= 2 { self.totals[n - 2] } else { self.latest() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub completed_matches: usize,
    pub scores: Vec<ParticipantScore>,
    pub progression: Vec<PointsProgression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    /// Positive when the participant climbed since the previous completed match.
    pub movement: i64,
    #[serde(flatten)]
    pub score: ParticipantScore,
}

/// Scores every participant against the decided matches, in participant order.
pub fn calculate_scores(
    results: &[MatchResult],
    predictions: &Predictions,
    options: ScoringOptions,
) -> ScoreSheet {
    let completed: Vec<(usize, &MatchResult)> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_complete())
        .collect();

    let (scores, progression): (Vec<_>, Vec<_>) = predictions
        .entries()
        .par_iter()
        .map(|entry| score_participant(entry, &completed, options))
        .unzip();

    debug!(
        participants = scores.len(),
        completed = completed.len(),
        "scored prediction pool"
    );

    ScoreSheet {
        completed_matches: completed.len(),
        scores,
        progression,
    }
}

fn score_participant(
    entry: &ParticipantPicks,
    completed: &[(usize, &MatchResult)],
    options: ScoringOptions,
) -> (ParticipantScore, PointsProgression) {
    let mut score = 0u32;
    let mut correct = 0usize;
    let mut match_points = Vec::with_capacity(completed.len());
    let mut marks = Vec::with_capacity(completed.len());
    let mut totals = Vec::with_capacity(completed.len() + 1);
    totals.push(0);

    for (position, result) in completed {
        let (points, mark) = match &result.outcome {
            Some(Outcome::NoResult) => (NO_RESULT_POINTS, PickMark::NoResult),
            Some(Outcome::Winner(winner)) if entry.pick_for(*position) == Some(winner.as_str()) => {
                correct += 1;
                (CORRECT_PICK_POINTS + result.bonus_points, PickMark::Correct)
            }
            // Missing trailing picks count as misses.
            _ => (0, PickMark::Incorrect),
        };
        score += points;
        match_points.push(points);
        marks.push(mark);
        totals.push(score);
    }

    let accuracy_pct = if completed.is_empty() {
        0.0
    } else {
        round2(correct as f64 / completed.len() as f64 * 100.0)
    };

    let window = match_points.len().saturating_sub(options.form_window);
    let recent_form = marks[window..].iter().map(|m| m.symbol()).collect();

    (
        ParticipantScore {
            participant: entry.participant.clone(),
            points: score,
            correct,
            accuracy_pct,
            recent_points: match_points[window..].to_vec(),
            recent_form,
        },
        PointsProgression {
            participant: entry.participant.clone(),
            totals,
        },
    )
}

/// Dense rank for each value: 1 + number of distinct strictly higher values.
pub fn dense_ranks(points: &[u32]) -> Vec<u32> {
    let mut distinct = points.to_vec();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();
    points
        .iter()
        .map(|p| distinct.iter().take_while(|d| *d > p).count() as u32 + 1)
        .collect()
}

/// Rank change per participant between the previous and the latest completed match.
pub fn rank_movements(progression: &[PointsProgression]) -> Vec<i64> {
    let before: Vec<u32> = progression.iter().map(PointsProgression::previous).collect();
    let now: Vec<u32> = progression.iter().map(PointsProgression::latest).collect();
    dense_ranks(&before)
        .into_iter()
        .zip(dense_ranks(&now))
        .map(|(b, n)| i64::from(b) - i64::from(n))
        .collect()
}

/// Orders the sheet by points (ties keep participant order) and attaches dense ranks.
pub fn build_leaderboard(sheet: &ScoreSheet) -> Vec<LeaderboardRow> {
    let points: Vec<u32> = sheet.scores.iter().map(|s| s.points).collect();
    let ranks = dense_ranks(&points);
    let movements = rank_movements(&sheet.progression);

    let mut rows: Vec<LeaderboardRow> = sheet
        .scores
        .iter()
        .zip(ranks)
        .zip(movements)
        .map(|((score, rank), movement)| LeaderboardRow {
            rank,
            movement,
            score: score.clone(),
        })
        .collect();
    rows.sort_by(|a, b| b.score.points.cmp(&a.score.points));
    rows
}

pub fn format_movement(delta: i64) -> String {
    if delta > 0 {
        format!("{}🔼", delta.abs())
    } else if delta < 0 {
        format!("{}🔽", delta.abs())
    } else {
        delta.to_string()
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
