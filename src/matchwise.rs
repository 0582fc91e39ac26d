use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::season::{Fixture, Predictions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchwiseRow {
    pub number: u32,
    pub date: String,
    pub home: String,
    pub away: String,
    pub home_predictors: Vec<String>,
    pub away_predictors: Vec<String>,
}

impl MatchwiseRow {
    pub fn home_predictors_joined(&self) -> String {
        self.home_predictors.join(", ")
    }

    pub fn away_predictors_joined(&self) -> String {
        self.away_predictors.join(", ")
    }

    /// Home-side predictors minus away-side predictors.
    pub fn difference(&self) -> i64 {
        self.home_predictors.len() as i64 - self.away_predictors.len() as i64
    }
}

/// Splits participants by which side they picked, one row per fixture in schedule order.
///
/// Picks are compared exactly against the two team names; anything else (typos,
/// stray casing, blank lines) lands in neither list.
pub fn matchwise_predictions(fixtures: &[Fixture], predictions: &Predictions) -> Vec<MatchwiseRow> {
    fixtures
        .iter()
        .enumerate()
        .map(|(position, fixture)| {
            let mut home_predictors = Vec::new();
            let mut away_predictors = Vec::new();
            for entry in predictions.iter() {
                let Some(pick) = entry.pick_for(position) else {
                    continue;
                };
                if pick == fixture.home {
                    home_predictors.push(entry.participant.clone());
                } else if pick == fixture.away {
                    away_predictors.push(entry.participant.clone());
                } else {
                    debug!(
                        participant = %entry.participant,
                        match_number = fixture.number,
                        pick,
                        "pick matches neither side"
                    );
                }
            }
            MatchwiseRow {
                number: fixture.number,
                date: fixture.date.clone(),
                home: fixture.home.clone(),
                away: fixture.away.clone(),
                home_predictors,
                away_predictors,
            }
        })
        .collect()
}
