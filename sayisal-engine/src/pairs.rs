use sayisal_data::models::{Draw, DrawHistory, MAX_NUMBER, MIN_NUMBER};

const SIDE: usize = MAX_NUMBER as usize + 1;

/// Symmetric count of draws containing both numbers of a pair.
#[derive(Debug, Clone)]
pub struct PairMatrix {
    counts: Vec<u32>,
    draws: usize,
}

impl PairMatrix {
    pub fn from_draws(draws: &[Draw]) -> Self {
        let mut counts = vec![0u32; SIDE * SIDE];
        for draw in draws {
            let numbers: Vec<u8> = draw
                .sorted()
                .into_iter()
                .filter(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n))
                .collect();
            for i in 0..numbers.len() {
                for j in (i + 1)..numbers.len() {
                    let (a, b) = (numbers[i] as usize, numbers[j] as usize);
                    counts[a * SIDE + b] += 1;
                    counts[b * SIDE + a] += 1;
                }
            }
        }
        Self { counts, draws: draws.len() }
    }

    /// 0 on the diagonal and outside 1..=90.
    pub fn count(&self, a: u8, b: u8) -> u32 {
        if a == b || a > MAX_NUMBER || b > MAX_NUMBER {
            return 0;
        }
        self.counts[a as usize * SIDE + b as usize]
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Sum of pair counts between `n` and every number of `others`.
    pub fn synergy(&self, n: u8, others: &[u8]) -> u32 {
        others.iter().map(|&o| self.count(n, o)).sum()
    }

    /// Pairs by count descending, then by pair ascending. Pairs never seen are left out.
    pub fn top_pairs(&self, k: usize) -> Vec<((u8, u8), u32)> {
        let mut pairs = Vec::new();
        for a in MIN_NUMBER..=MAX_NUMBER {
            for b in (a + 1)..=MAX_NUMBER {
                let c = self.count(a, b);
                if c > 0 {
                    pairs.push(((a, b), c));
                }
            }
        }
        pairs.sort_by(|x, y| y.1.cmp(&x.1).then(x.0.cmp(&y.0)));
        pairs.truncate(k);
        pairs
    }
}

/// All-time tally plus the tally restricted to the trailing `window` draws.
#[derive(Debug, Clone)]
pub struct CoOccurrence {
    pub all_time: PairMatrix,
    pub recent: PairMatrix,
    pub window: usize,
}

impl CoOccurrence {
    pub fn build(history: &DrawHistory, window: usize) -> Self {
        Self {
            all_time: PairMatrix::from_draws(history.draws()),
            recent: PairMatrix::from_draws(history.recent(window)),
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_test_history;

    #[test]
    fn test_pair_example() {
        let draws = vec![
            Draw::new([1, 2, 3, 40, 41, 50]),
            Draw::new([1, 2, 15, 40, 60, 70]),
        ];
        let matrix = PairMatrix::from_draws(&draws);
        assert_eq!(matrix.count(1, 2), 2);
        assert_eq!(matrix.count(2, 1), 2);
        assert_eq!(matrix.count(1, 40), 2);
        assert_eq!(matrix.count(3, 70), 0);
        assert_eq!(matrix.count(15, 70), 1);
    }

    #[test]
    fn test_pair_matrix_symmetric() {
        let history = make_test_history(60);
        let matrix = PairMatrix::from_draws(history.draws());
        for a in 1..=90u8 {
            assert_eq!(matrix.count(a, a), 0);
            for b in 1..=90u8 {
                assert_eq!(matrix.count(a, b), matrix.count(b, a));
            }
        }
    }

    #[test]
    fn test_pair_total_is_fifteen_per_draw() {
        let history = make_test_history(25);
        let matrix = PairMatrix::from_draws(history.draws());
        let total: u32 = matrix.top_pairs(usize::MAX).iter().map(|(_, c)| c).sum();
        assert_eq!(total, 15 * 25);
    }

    #[test]
    fn test_top_pairs_order() {
        let draws = vec![
            Draw::new([1, 2, 3, 40, 41, 50]),
            Draw::new([1, 2, 15, 40, 60, 70]),
        ];
        let top = PairMatrix::from_draws(&draws).top_pairs(3);
        assert_eq!(top, vec![((1, 2), 2), ((1, 40), 2), ((2, 40), 2)]);
    }

    #[test]
    fn test_recent_window() {
        let history = DrawHistory::from_chronological(vec![
            Draw::new([1, 2, 3, 4, 5, 6]),
            Draw::new([1, 2, 30, 40, 50, 60]),
        ]);
        let co = CoOccurrence::build(&history, 1);
        assert_eq!(co.all_time.count(1, 2), 2);
        assert_eq!(co.recent.count(1, 2), 1);
        assert_eq!(co.recent.count(3, 4), 0);
        assert_eq!(co.recent.draws(), 1);
        assert_eq!(co.all_time.synergy(1, &[2, 3, 60]), 4);
    }

    #[test]
    fn test_out_of_range_numbers_are_skipped() {
        let matrix = PairMatrix::from_draws(&[Draw::new([0, 1, 2, 3, 4, 95])]);
        assert_eq!(matrix.count(1, 2), 1);
        assert_eq!(matrix.count(3, 4), 1);
        assert_eq!(matrix.count(0, 1), 0);
        assert_eq!(matrix.count(4, 95), 0);
        assert_eq!(matrix.top_pairs(usize::MAX).len(), 6);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let matrix = PairMatrix::from_draws(&[]);
        assert_eq!(matrix.count(0, 5), 0);
        assert_eq!(matrix.count(91, 5), 0);
    }
}
