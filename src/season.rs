use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Result-table marker for a match abandoned without a winner.
pub const NO_RESULT: &str = "NR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// 1-based position in the schedule.
    pub number: u32,
    pub date: String,
    pub home: String,
    pub away: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(String),
    NoResult,
}

impl Outcome {
    pub fn parse(raw: &str) -> Self {
        if raw == NO_RESULT {
            Outcome::NoResult
        } else {
            Outcome::Winner(raw.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Outcome::Winner(team) => team,
            Outcome::NoResult => NO_RESULT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// `None` until the match has been decided.
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub bonus_points: u32,
}

impl MatchResult {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn won_by(team: &str) -> Self {
        Self {
            outcome: Some(Outcome::Winner(team.to_string())),
            bonus_points: 0,
        }
    }

    pub fn no_result() -> Self {
        Self {
            outcome: Some(Outcome::NoResult),
            bonus_points: 0,
        }
    }

    pub fn with_bonus(mut self, bonus_points: u32) -> Self {
        self.bonus_points = bonus_points;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPicks {
    pub participant: String,
    /// Index `i` is the predicted winner of match `i + 1`.
    pub picks: Vec<String>,
}

impl ParticipantPicks {
    pub fn pick_for(&self, position: usize) -> Option<&str> {
        self.picks.get(position).map(String::as_str)
    }
}

/// Participant picks in insertion order. Several outputs (predictor lists,
/// progression order) follow this order, so it is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predictions {
    entries: Vec<ParticipantPicks>,
}

impl Predictions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, participant: &str, picks: Vec<String>) -> Result<()> {
        if self.get(participant).is_some() {
            return Err(PoolError::DuplicateParticipant(participant.to_string()));
        }
        self.entries.push(ParticipantPicks {
            participant: participant.to_string(),
            picks,
        });
        Ok(())
    }

    pub fn get(&self, participant: &str) -> Option<&ParticipantPicks> {
        self.entries.iter().find(|e| e.participant == participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantPicks> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[ParticipantPicks] {
        &self.entries
    }

    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.participant.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Vec<&'a str>)> for Predictions {
    /// Later duplicates of a participant are ignored.
    fn from_iter<I: IntoIterator<Item = (&'a str, Vec<&'a str>)>>(iter: I) -> Self {
        let mut out = Predictions::new();
        for (participant, picks) in iter {
            let picks = picks.into_iter().map(str::to_string).collect();
            let _ = out.insert(participant, picks);
        }
        out
    }
}

/// One season snapshot: schedule, aligned results and every participant's picks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    fixtures: Vec<Fixture>,
    results: Vec<MatchResult>,
    predictions: Predictions,
}

impl Season {
    pub fn new(
        fixtures: Vec<Fixture>,
        results: Vec<MatchResult>,
        predictions: Predictions,
    ) -> Result<Self> {
        for (position, fixture) in fixtures.iter().enumerate() {
            if fixture.number as usize != position + 1 {
                return Err(PoolError::MisnumberedFixture {
                    position: position + 1,
                    number: fixture.number,
                });
            }
        }
        if results.len() != fixtures.len() {
            return Err(PoolError::ResultsMismatch {
                results: results.len(),
                fixtures: fixtures.len(),
            });
        }
        Ok(Self {
            fixtures,
            results,
            predictions,
        })
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn predictions(&self) -> &Predictions {
        &self.predictions
    }

    pub fn completed_matches(&self) -> usize {
        self.results.iter().filter(|r| r.is_complete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(number: u32, home: &str, away: &str) -> Fixture {
        Fixture {
            number,
            date: format!("2025-03-{number:02}"),
            home: home.to_string(),
            away: away.to_string(),
        }
    }

    #[test]
    fn nr_sentinel_parses_as_no_result() {
        assert_eq!(Outcome::parse("NR"), Outcome::NoResult);
        assert_eq!(Outcome::parse("nr"), Outcome::Winner("nr".to_string()));
        assert_eq!(Outcome::NoResult.label(), "NR");
    }

    #[test]
    fn duplicate_participant_is_rejected() {
        let mut preds = Predictions::new();
        preds.insert("X", vec!["A".to_string()]).unwrap();
        let err = preds.insert("X", Vec::new()).unwrap_err();
        assert!(matches!(err, PoolError::DuplicateParticipant(name) if name == "X"));
        assert_eq!(preds.len(), 1);
    }

    #[test]
    fn insertion_order_is_kept() {
        let preds: Predictions = [("Zed", vec!["A"]), ("Amy", vec!["B"]), ("Max", vec![])]
            .into_iter()
            .collect();
        let names: Vec<&str> = preds.participants().collect();
        assert_eq!(names, vec!["Zed", "Amy", "Max"]);
    }

    #[test]
    fn season_rejects_gaps_in_numbering() {
        let err = Season::new(
            vec![fixture(1, "A", "B"), fixture(3, "C", "D")],
            vec![MatchResult::pending(), MatchResult::pending()],
            Predictions::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PoolError::MisnumberedFixture {
                position: 2,
                number: 3
            }
        ));
    }

    #[test]
    fn season_rejects_result_count_mismatch() {
        let err = Season::new(
            vec![fixture(1, "A", "B"), fixture(2, "C", "D")],
            vec![MatchResult::won_by("A")],
            Predictions::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PoolError::ResultsMismatch {
                results: 1,
                fixtures: 2
            }
        ));
    }

    #[test]
    fn completed_counts_nr_but_not_pending() {
        let season = Season::new(
            vec![fixture(1, "A", "B"), fixture(2, "C", "D"), fixture(3, "A", "C")],
            vec![
                MatchResult::won_by("A"),
                MatchResult::no_result(),
                MatchResult::pending(),
            ],
            Predictions::new(),
        )
        .unwrap();
        assert_eq!(season.completed_matches(), 2);
    }
}
