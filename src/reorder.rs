use tracing::warn;

/// Moves prediction lines after the schedule is reshuffled. Each `(from, to)` pair is
/// 1-based: slot `to` receives the line that was originally at `from`. Slots not named
/// as a destination keep their original line.
pub fn reorder_lines(lines: &[String], mapping: &[(usize, usize)]) -> Vec<String> {
    let mut out = lines.to_vec();
    for &(from, to) in mapping {
        let in_range = |n: usize| n >= 1 && n <= lines.len();
        if !in_range(from) || !in_range(to) {
            warn!(from, to, lines = lines.len(), "skipping out-of-range reorder pair");
            continue;
        }
        out[to - 1] = lines[from - 1].clone();
    }
    out
}

/// Parses `from:to` pairs separated by commas or whitespace, e.g. `57:65, 58:69`.
pub fn parse_mapping(raw: &str) -> anyhow::Result<Vec<(usize, usize)>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| -> anyhow::Result<(usize, usize)> {
            let (from, to) = part
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("expected from:to, got `{part}`"))?;
            Ok((from.trim().parse()?, to.trim().parse()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn swaps_use_original_lines() {
        let out = reorder_lines(&lines(&["a", "b", "c", "d"]), &[(2, 3), (3, 2)]);
        assert_eq!(out, lines(&["a", "c", "b", "d"]));
    }

    #[test]
    fn out_of_range_pairs_are_skipped() {
        let out = reorder_lines(&lines(&["a", "b"]), &[(0, 1), (1, 5), (2, 1)]);
        assert_eq!(out, lines(&["b", "b"]));
    }

    #[test]
    fn mapping_parses_pairs() {
        assert_eq!(parse_mapping("57:65, 58:69\n59:67").unwrap(), vec![(57, 65), (58, 69), (59, 67)]);
        assert!(parse_mapping("57-65").is_err());
        assert!(parse_mapping("a:1").is_err());
    }
}
