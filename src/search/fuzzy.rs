/// Scores at or below this value count as a match (0.0 is perfect).
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Characters of offset that cost a full point of score.
const LOCATION_DISTANCE: f64 = 100.0;

/// Score `pattern` against `text`, both already lowercased.
///
/// Finds the substring of `text` with the smallest edit distance to
/// `pattern` and combines the error ratio with how far into the field that
/// substring starts. Returns a value in `0.0..=1.0`.
pub fn field_score(pattern: &[char], text: &[char]) -> f64 {
    let m = pattern.len();
    if m == 0 {
        return 1.0;
    }

    // dist[j]: edit distance of pattern[..i] against a substring ending at
    // text[j]; start[j]: where that substring begins.
    let mut dist: Vec<usize> = vec![0; text.len() + 1];
    let mut start: Vec<usize> = (0..=text.len()).collect();
    let mut next_dist = vec![0; text.len() + 1];
    let mut next_start = vec![0; text.len() + 1];

    for i in 1..=m {
        next_dist[0] = i;
        next_start[0] = 0;
        for j in 1..=text.len() {
            let substitute = dist[j - 1] + usize::from(pattern[i - 1] != text[j - 1]);
            let skip_pattern = dist[j] + 1;
            let skip_text = next_dist[j - 1] + 1;

            let (d, s) = if substitute <= skip_pattern && substitute <= skip_text {
                (substitute, start[j - 1])
            } else if skip_pattern <= skip_text {
                (skip_pattern, start[j])
            } else {
                (skip_text, next_start[j - 1])
            };
            next_dist[j] = d;
            next_start[j] = s;
        }
        std::mem::swap(&mut dist, &mut next_dist);
        std::mem::swap(&mut start, &mut next_start);
    }

    let mut best = 1.0_f64;
    for j in 0..=text.len() {
        let score = dist[j] as f64 / m as f64 + start[j] as f64 / LOCATION_DISTANCE;
        if score < best {
            best = score;
        }
    }
    best.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(p: &str, t: &str) -> f64 {
        let p: Vec<char> = p.chars().collect();
        let t: Vec<char> = t.chars().collect();
        field_score(&p, &t)
    }

    #[test]
    fn test_exact_prefix_is_perfect() {
        assert_eq!(score("milk", "milk powder"), 0.0);
    }

    #[test]
    fn test_offset_is_penalized() {
        let s = score("milk", "local milk");
        assert!((s - 0.06).abs() < 1e-9, "got {}", s);
    }

    #[test]
    fn test_single_typo_within_threshold() {
        let s = score("milc", "milk powder");
        assert!((s - 0.25).abs() < 1e-9, "got {}", s);
        assert!(s <= DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_unrelated_text_is_rejected() {
        assert!(score("milk", "toothpaste") > DEFAULT_THRESHOLD);
        assert_eq!(score("milk", ""), 1.0);
        assert_eq!(score("", "milk"), 1.0);
    }
}
