use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};
use crate::season::MatchResult;

const MAGNITUDES: [&str; 6] = [
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Win/lose combinations left across the undecided matches. A display figure,
/// not a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSpace {
    pub remaining_matches: usize,
    pub count: u128,
    /// `count` with thousands separators.
    pub formatted: String,
    pub magnitude_label: String,
}

pub fn remaining_outcomes(results: &[MatchResult]) -> Result<OutcomeSpace> {
    let known = results.iter().filter(|r| r.is_complete()).count();
    let remaining = results.len() - known;
    let count = u32::try_from(remaining)
        .ok()
        .and_then(|shift| 1u128.checked_shl(shift))
        .ok_or(PoolError::OutcomeOverflow { remaining })?;
    let groups = digit_groups(count);
    Ok(OutcomeSpace {
        remaining_matches: remaining,
        count,
        formatted: groups.join(","),
        magnitude_label: magnitude_label(&groups),
    })
}

/// Splits into comma groups, most significant first: 73786 → ["73", "786"].
pub fn digit_groups(value: u128) -> Vec<String> {
    let digits = value.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut groups = vec![digits[..head].to_string()];
    let mut rest = &digits[head..];
    while !rest.is_empty() {
        groups.push(rest[..3].to_string());
        rest = &rest[3..];
    }
    groups
}

/// Leading group plus its magnitude word; past the ladder (or below a thousand)
/// only the last group is shown.
pub fn magnitude_label(groups: &[String]) -> String {
    match groups.len() {
        n @ 2..=7 => format!("{} {}", groups[0], MAGNITUDES[n - 2]),
        _ => groups.last().cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(total: usize, completed: usize) -> Vec<MatchResult> {
        (0..total)
            .map(|i| {
                if i < completed {
                    MatchResult::won_by("A")
                } else {
                    MatchResult::pending()
                }
            })
            .collect()
    }

    #[test]
    fn two_pending_of_ten() {
        let space = remaining_outcomes(&results(10, 8)).unwrap();
        assert_eq!(space.count, 4);
        assert_eq!(space.magnitude_label, "4");
    }

    #[test]
    fn bounds() {
        assert_eq!(remaining_outcomes(&results(12, 0)).unwrap().count, 4096);
        assert_eq!(remaining_outcomes(&results(12, 12)).unwrap().count, 1);
        assert_eq!(remaining_outcomes(&[]).unwrap().count, 1);
    }

    #[test]
    fn nr_counts_as_known() {
        let mut rs = results(3, 1);
        rs[1] = MatchResult::no_result();
        assert_eq!(remaining_outcomes(&rs).unwrap().count, 2);
    }

    #[test]
    fn ladder_labels() {
        assert_eq!(remaining_outcomes(&results(12, 0)).unwrap().magnitude_label, "4 thousand");
        let space = remaining_outcomes(&results(66, 0)).unwrap();
        assert_eq!(space.formatted, "73,786,976,294,838,206,464");
        assert_eq!(space.magnitude_label, "73 quintillion");
        assert_eq!(remaining_outcomes(&results(20, 0)).unwrap().magnitude_label, "1 million");
    }

    #[test]
    fn beyond_ladder_falls_back_to_last_group() {
        // 2^70 = 1,180,591,620,717,411,303,424
        let space = remaining_outcomes(&results(70, 0)).unwrap();
        assert_eq!(space.magnitude_label, "424");
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(remaining_outcomes(&results(127, 0)).is_ok());
        assert!(matches!(
            remaining_outcomes(&results(128, 0)),
            Err(PoolError::OutcomeOverflow { remaining: 128 })
        ));
    }

    #[test]
    fn grouping() {
        assert_eq!(digit_groups(7), vec!["7"]);
        assert_eq!(digit_groups(1000), vec!["1", "000"]);
        assert_eq!(digit_groups(999_999), vec!["999", "999"]);
    }
}
