use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matchwise::MatchwiseRow;
use crate::scoring::round2;
use crate::season::{Fixture, Predictions};

/// Absolute predictor-count gap → split label, sized for an 11-person pool.
pub static ABSOLUTE_RATIO_BUCKETS: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "5:6"),
        (3, "4:7"),
        (5, "3:8"),
        (7, "2:9"),
        (9, "1:10"),
        (11, "11:0"),
    ])
});

/// Signed gap (home minus away) → home:away split label.
pub static DIRECTIONAL_RATIO_BUCKETS: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (-9, "1:10"),
        (-7, "2:9"),
        (-5, "3:8"),
        (-3, "4:7"),
        (-1, "5:6"),
        (1, "6:5"),
        (3, "7:4"),
        (5, "8:3"),
        (7, "9:2"),
        (9, "10:1"),
    ])
});

pub fn absolute_ratio_label(difference: i64) -> Option<&'static str> {
    ABSOLUTE_RATIO_BUCKETS.get(&difference.abs()).copied()
}

pub fn directional_ratio_label(difference: i64) -> Option<&'static str> {
    DIRECTIONAL_RATIO_BUCKETS.get(&difference).copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRatios {
    /// Most frequent split first.
    pub absolute: Vec<RatioCount>,
    /// Ordered from away-heavy to home-heavy.
    pub directional: Vec<RatioCount>,
}

/// Buckets every match by how lopsided its predictor split was.
///
/// Gaps outside a table (a level split, or more predictors than the tables cover)
/// are left out of that table's counts.
pub fn prediction_ratios(rows: &[MatchwiseRow]) -> PredictionRatios {
    let mut absolute: HashMap<&'static str, usize> = HashMap::new();
    let mut directional: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let diff = row.difference();
        match absolute_ratio_label(diff) {
            Some(label) => *absolute.entry(label).or_default() += 1,
            None => debug!(match_number = row.number, diff, "no absolute ratio bucket"),
        }
        if directional_ratio_label(diff).is_some() {
            *directional.entry(diff).or_default() += 1;
        } else {
            debug!(match_number = row.number, diff, "no directional ratio bucket");
        }
    }

    let mut absolute: Vec<RatioCount> = absolute
        .into_iter()
        .map(|(label, count)| RatioCount {
            label: label.to_string(),
            count,
        })
        .collect();
    absolute.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    let mut directional: Vec<(i64, usize)> = directional.into_iter().collect();
    directional.sort_by_key(|(diff, _)| *diff);
    let directional = directional
        .into_iter()
        .filter_map(|(diff, count)| {
            directional_ratio_label(diff).map(|label| RatioCount {
                label: label.to_string(),
                count,
            })
        })
        .collect();

    PredictionRatios {
        absolute,
        directional,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAwaySplit {
    pub participant: String,
    pub home_picks: usize,
    pub away_picks: usize,
    pub home_pct: f64,
    pub away_pct: f64,
}

/// Anything other than the designated home team counts as an away pick.
pub fn classify_pick(fixture: &Fixture, pick: &str) -> Side {
    if pick == fixture.home {
        Side::Home
    } else {
        Side::Away
    }
}

/// Share of each participant's picks that backed the home side.
pub fn home_away_percentages(fixtures: &[Fixture], predictions: &Predictions) -> Vec<HomeAwaySplit> {
    predictions
        .iter()
        .map(|entry| {
            let (mut home_picks, mut away_picks) = (0usize, 0usize);
            for (fixture, pick) in fixtures.iter().zip(entry.picks.iter()) {
                match classify_pick(fixture, pick) {
                    Side::Home => home_picks += 1,
                    Side::Away => away_picks += 1,
                }
            }
            let total = home_picks + away_picks;
            let pct = |n: usize| {
                if total == 0 {
                    0.0
                } else {
                    round2(n as f64 / total as f64 * 100.0)
                }
            };
            HomeAwaySplit {
                participant: entry.participant.clone(),
                home_picks,
                away_picks,
                home_pct: pct(home_picks),
                away_pct: pct(away_picks),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: u32, home: usize, away: usize) -> MatchwiseRow {
        MatchwiseRow {
            number,
            date: String::new(),
            home: "H".to_string(),
            away: "A".to_string(),
            home_predictors: (0..home).map(|i| format!("h{i}")).collect(),
            away_predictors: (0..away).map(|i| format!("a{i}")).collect(),
        }
    }

    #[test]
    fn magnitude_is_symmetric_direction_is_not() {
        assert_eq!(absolute_ratio_label(5), Some("3:8"));
        assert_eq!(absolute_ratio_label(-5), Some("3:8"));
        assert_eq!(directional_ratio_label(5), Some("8:3"));
        assert_eq!(directional_ratio_label(-5), Some("3:8"));
    }

    #[test]
    fn out_of_domain_gaps_have_no_bucket() {
        assert_eq!(absolute_ratio_label(0), None);
        assert_eq!(directional_ratio_label(0), None);
        assert_eq!(absolute_ratio_label(2), None);
        assert_eq!(absolute_ratio_label(13), None);
        assert_eq!(absolute_ratio_label(-11), Some("11:0"));
        assert_eq!(directional_ratio_label(11), None);
    }

    #[test]
    fn ratio_distributions_are_ordered() {
        let rows = vec![
            row(1, 8, 3),
            row(2, 3, 8),
            row(3, 6, 5),
            row(4, 8, 3),
            row(5, 5, 5),
            row(6, 11, 0),
        ];
        let ratios = prediction_ratios(&rows);
        assert_eq!(
            ratios.absolute,
            vec![
                RatioCount { label: "3:8".to_string(), count: 3 },
                RatioCount { label: "11:0".to_string(), count: 1 },
                RatioCount { label: "5:6".to_string(), count: 1 },
            ]
        );
        let labels: Vec<(&str, usize)> = ratios
            .directional
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect();
        assert_eq!(labels, vec![("3:8", 1), ("6:5", 1), ("8:3", 2)]);
    }

    #[test]
    fn home_away_shares() {
        let fixtures: Vec<Fixture> = [("A", "B"), ("C", "D"), ("A", "C"), ("B", "D")]
            .iter()
            .enumerate()
            .map(|(i, (h, a))| Fixture {
                number: i as u32 + 1,
                date: String::new(),
                home: h.to_string(),
                away: a.to_string(),
            })
            .collect();
        let preds: Predictions = [
            ("X", vec!["A", "D", "A"]),
            ("Y", vec![]),
            ("Z", vec!["B", "D", "C", "B", "extra"]),
        ]
        .into_iter()
        .collect();
        let splits = home_away_percentages(&fixtures, &preds);
        assert_eq!(splits[0].home_picks, 2);
        assert_eq!(splits[0].home_pct, 66.67);
        assert_eq!(splits[0].away_pct, 33.33);
        assert_eq!(splits[1].home_pct, 0.0);
        assert_eq!(splits[1].away_pct, 0.0);
        // The fifth pick has no fixture and is ignored.
        assert_eq!(splits[2].home_picks + splits[2].away_picks, 4);
        assert_eq!(splits[2].home_pct, 25.0);
    }
}
