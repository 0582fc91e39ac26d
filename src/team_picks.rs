use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};
use crate::season::{Fixture, Predictions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPickCount {
    pub participant: String,
    pub team: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPickMean {
    pub team: String,
    pub mean_picks: f64,
}

/// Counts in first-seen order, so equal counts keep the order teams were first picked.
fn count_in_order<'a>(picks: impl IntoIterator<Item = &'a String>) -> Vec<(&'a str, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for pick in picks {
        match index.get(pick.as_str()) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(pick.as_str(), order.len());
                order.push((pick.as_str(), 1));
            }
        }
    }
    order
}

/// Every team each participant picked, most-picked first within a participant.
pub fn participant_team_picks(predictions: &Predictions) -> Vec<TeamPickCount> {
    let mut rows = Vec::new();
    for entry in predictions.iter() {
        let mut counts = count_in_order(&entry.picks);
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        rows.extend(counts.into_iter().map(|(team, count)| TeamPickCount {
            participant: entry.participant.clone(),
            team: team.to_string(),
            count,
        }));
    }
    rows
}

/// Average picks per team across all participants; a participant who never
/// picked a team contributes zero to its mean.
pub fn most_picked_teams(predictions: &Predictions) -> Vec<TeamPickMean> {
    if predictions.is_empty() {
        return Vec::new();
    }
    let totals = count_in_order(predictions.iter().flat_map(|e| e.picks.iter()));
    let participants = predictions.len() as f64;
    let mut means: Vec<TeamPickMean> = totals
        .into_iter()
        .map(|(team, count)| TeamPickMean {
            team: team.to_string(),
            mean_picks: count as f64 / participants,
        })
        .collect();
    means.sort_by(|a, b| b.mean_picks.total_cmp(&a.mean_picks));
    means
}

/// Participant × team pick counts, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickMatrix {
    pub teams: Vec<String>,
    pub rows: Vec<PickMatrixRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickMatrixRow {
    pub participant: String,
    /// Aligned with `PickMatrix::teams`.
    pub counts: Vec<usize>,
}

impl PickMatrix {
    /// Needs every participant to have submitted the same number of picks.
    pub fn build(predictions: &Predictions) -> Result<Self> {
        let mut entries = predictions.iter();
        let Some(first) = entries.next() else {
            return Ok(Self {
                teams: Vec::new(),
                rows: Vec::new(),
            });
        };
        let expected = first.picks.len();
        if let Some(uneven) = entries.find(|e| e.picks.len() != expected) {
            return Err(PoolError::UnevenPredictions {
                participant: uneven.participant.clone(),
                expected,
                found: uneven.picks.len(),
            });
        }

        let mut teams: Vec<String> = predictions
            .iter()
            .flat_map(|e| e.picks.iter().cloned())
            .collect();
        teams.sort();
        teams.dedup();

        let rows = predictions
            .iter()
            .map(|entry| {
                let counts = count_in_order(&entry.picks);
                PickMatrixRow {
                    participant: entry.participant.clone(),
                    counts: teams
                        .iter()
                        .map(|team| {
                            counts
                                .iter()
                                .find(|(t, _)| *t == team.as_str())
                                .map_or(0, |(_, n)| *n)
                        })
                        .collect(),
                }
            })
            .collect();
        Ok(Self { teams, rows })
    }
}

/// One fixture with every participant's pick for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionGridRow {
    pub number: u32,
    pub home: String,
    pub away: String,
    /// Aligned with participant order; `None` once a sequence runs out.
    pub picks: Vec<Option<String>>,
}

pub fn prediction_grid(fixtures: &[Fixture], predictions: &Predictions) -> Vec<PredictionGridRow> {
    fixtures
        .iter()
        .enumerate()
        .map(|(position, fixture)| PredictionGridRow {
            number: fixture.number,
            home: fixture.home.clone(),
            away: fixture.away.clone(),
            picks: predictions
                .iter()
                .map(|e| e.pick_for(position).map(str::to_string))
                .collect(),
        })
        .collect()
}
