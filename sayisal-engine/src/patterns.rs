use std::collections::HashMap;

use sayisal_data::models::DrawHistory;

use crate::bucket::{shape_pattern, BucketConvention, ShapePattern};
use crate::config::PatternConfig;

/// Shape pattern of every draw, oldest first.
pub fn pattern_series(history: &DrawHistory, convention: BucketConvention) -> Vec<ShapePattern> {
    history.iter().map(|d| shape_pattern(d, convention)).collect()
}

/// Counts sorted by count descending; equal counts keep first-seen order.
pub fn count_first_seen<'a>(patterns: impl IntoIterator<Item = &'a ShapePattern>) -> Vec<(ShapePattern, u32)> {
    let mut index: HashMap<&ShapePattern, usize> = HashMap::new();
    let mut counts: Vec<(ShapePattern, u32)> = Vec::new();
    for p in patterns {
        match index.get(p) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(p, counts.len());
                counts.push((p.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn pattern_counts(series: &[ShapePattern]) -> Vec<(ShapePattern, u32)> {
    count_first_seen(series)
}

/// Same as `pattern_counts` over the descending-sorted form of each pattern.
pub fn normalized_counts(series: &[ShapePattern]) -> Vec<(ShapePattern, u32)> {
    let normalized: Vec<ShapePattern> = series.iter().map(|p| p.normalized()).collect();
    count_first_seen(&normalized)
}

pub fn most_common(series: &[ShapePattern]) -> Option<ShapePattern> {
    pattern_counts(series).into_iter().next().map(|(p, _)| p)
}

#[derive(Debug, Clone)]
pub struct PatternScore {
    pub pattern: ShapePattern,
    pub share: f64,
    pub absent_recently: bool,
    /// The two latest draws both had this pattern.
    pub streak: bool,
    pub score: f64,
}

/// share × w + absent-from-window bonus − repeat streak penalty, best first.
pub fn pattern_scores(series: &[ShapePattern], config: &PatternConfig) -> Vec<PatternScore> {
    if series.is_empty() {
        return Vec::new();
    }
    let total = series.len() as f64;
    let recent = &series[series.len().saturating_sub(config.window)..];
    let streak_pattern = match recent {
        [.., a, b] if a == b => Some(b),
        _ => None,
    };

    let mut scores: Vec<PatternScore> = pattern_counts(series)
        .into_iter()
        .map(|(pattern, count)| {
            let share = count as f64 / total;
            let absent_recently = !recent.contains(&pattern);
            let streak = streak_pattern == Some(&pattern);
            let mut score = share * config.share_weight;
            if absent_recently {
                score += config.absence_weight;
            }
            if streak {
                score -= config.streak_penalty;
            }
            PatternScore { pattern, share, absent_recently, streak, score }
        })
        .collect();

    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use sayisal_data::models::Draw;

    fn p(s: &str) -> ShapePattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_series_example() {
        let history = DrawHistory::from_chronological(vec![
            Draw::new([1, 2, 3, 40, 41, 50]),
            Draw::new([1, 2, 15, 40, 60, 70]),
        ]);
        let series = pattern_series(&history, BucketConvention::Decimal);
        assert_eq!(series, vec![p("3-2-1"), p("2-1-1-1-1")]);
    }

    #[test]
    fn test_counts_first_seen_ties() {
        let series = vec![p("2-2-2"), p("1-1-1-1-2"), p("1-1-1-1-2"), p("2-2-2"), p("3-3")];
        let counts = pattern_counts(&series);
        assert_eq!(counts[0], (p("2-2-2"), 2));
        assert_eq!(counts[1], (p("1-1-1-1-2"), 2));
        assert_eq!(counts[2], (p("3-3"), 1));
        assert_eq!(most_common(&series), Some(p("2-2-2")));
    }

    #[test]
    fn test_normalized_counts_merge_orderings() {
        let series = vec![p("1-2-3"), p("3-2-1"), p("2-2-2")];
        let counts = normalized_counts(&series);
        assert_eq!(counts[0], (p("3-2-1"), 2));
        assert_eq!(counts[1], (p("2-2-2"), 1));
    }

    #[test]
    fn test_pattern_scores_absence_and_streak() {
        let config = PatternConfig { window: 2, ..PatternConfig::default() };
        let series = vec![p("3-3"), p("3-3"), p("2-2-2"), p("2-2-2")];
        let scores = pattern_scores(&series, &config);
        assert_eq!(scores.len(), 2);

        // 3-3: 0.5 × 0.5 + 0.3 (absent from the last two)
        assert_eq!(scores[0].pattern, p("3-3"));
        assert!(scores[0].absent_recently);
        assert!((scores[0].score - 0.55).abs() < 1e-9);

        // 2-2-2: 0.5 × 0.5 − 0.3 (streak)
        assert!(scores[1].streak);
        assert!((scores[1].score - (-0.05)).abs() < 1e-9);
    }

    #[test]
    fn test_pattern_scores_empty() {
        assert!(pattern_scores(&[], &PatternConfig::default()).is_empty());
        assert_eq!(most_common(&[]), None);
    }
}
