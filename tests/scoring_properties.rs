use prediction_pool::outcomes::remaining_outcomes;
use prediction_pool::scoring::{ScoringOptions, build_leaderboard, calculate_scores};
use prediction_pool::{MatchResult, Predictions};

const TEAMS: [&str; 6] = ["CSK", "MI", "RCB", "KKR", "SRH", "RR"];

/// Deterministic pseudo-random season: varying pick lengths, some NRs, bonus points.
fn synthetic(matches: usize, decided: usize, participants: usize) -> (Vec<MatchResult>, Predictions) {
    let results = (0..matches)
        .map(|i| {
            if i >= decided {
                MatchResult::pending()
            } else if i % 7 == 3 {
                MatchResult::no_result()
            } else {
                MatchResult::won_by(TEAMS[(i * 5 + 1) % TEAMS.len()]).with_bonus((i % 3) as u32)
            }
        })
        .collect();

    let mut predictions = Predictions::new();
    for p in 0..participants {
        let len = matches - (p % 4) * 3;
        let picks = (0..len)
            .map(|i| TEAMS[(i * (p + 2) + p) % TEAMS.len()].to_string())
            .collect();
        predictions
            .insert(&format!("P{p:02}"), picks)
            .expect("unique participant names");
    }
    (results, predictions)
}

#[test]
fn form_window_length_matches_completed() {
    for decided in [0, 1, 3, 5, 12, 30] {
        let (results, predictions) = synthetic(30, decided, 9);
        let sheet = calculate_scores(&results, &predictions, ScoringOptions::default());
        for score in &sheet.scores {
            assert_eq!(score.recent_points.len(), decided.min(5));
            assert_eq!(score.recent_form.chars().count(), decided.min(5));
        }
    }
}

#[test]
fn progression_is_monotone_and_consistent() {
    let (results, predictions) = synthetic(40, 28, 11);
    let sheet = calculate_scores(&results, &predictions, ScoringOptions::default());
    assert_eq!(sheet.scores.len(), 11);
    for (score, series) in sheet.scores.iter().zip(&sheet.progression) {
        assert_eq!(score.participant, series.participant);
        assert_eq!(series.totals[0], 0);
        assert_eq!(series.totals.len(), 29);
        assert!(series.totals.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.latest(), score.points);
        assert!(score.accuracy_pct >= 0.0 && score.accuracy_pct <= 100.0);
    }
}

#[test]
fn dense_ranking_properties_hold() {
    let (results, predictions) = synthetic(40, 33, 16);
    let sheet = calculate_scores(&results, &predictions, ScoringOptions::default());
    let board = build_leaderboard(&sheet);
    assert_eq!(board[0].rank, 1);
    for a in &board {
        for b in &board {
            if a.score.points == b.score.points {
                assert_eq!(a.rank, b.rank);
            } else if a.score.points > b.score.points {
                assert!(a.rank < b.rank);
            }
        }
    }
    // Dense: ranks have no gaps.
    let mut ranks: Vec<u32> = board.iter().map(|r| r.rank).collect();
    ranks.dedup();
    assert!(ranks.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn one_participant_never_changes_another() {
    let (results, mut predictions) = synthetic(20, 15, 5);
    let before = calculate_scores(&results, &predictions, ScoringOptions::default());
    predictions
        .insert("Garbage", vec!["???".to_string(); 3])
        .unwrap();
    let after = calculate_scores(&results, &predictions, ScoringOptions::default());
    assert_eq!(&after.scores[..5], &before.scores[..]);
    assert_eq!(after.scores[5].correct, 0);
}

#[test]
fn outcome_count_extremes() {
    let (results, _) = synthetic(20, 0, 1);
    assert_eq!(remaining_outcomes(&results).unwrap().count, 1 << 20);
    let (results, _) = synthetic(20, 20, 1);
    assert_eq!(remaining_outcomes(&results).unwrap().count, 1);
}
