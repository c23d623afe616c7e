use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use sayisal_data::models::{DrawHistory, Parity, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};

use crate::bucket::{bucket, bucket_counts, bucket_numbers, run_lengths, BucketConvention, ShapePattern, BUCKET_COUNT};
use crate::config::{EngineConfig, ScoreWeights};
use crate::frequency::{classify, number_stats, Classification, FrequencyTable, NumberTag};
use crate::pairs::CoOccurrence;
use crate::position::PositionTable;

/// Mean gap of a number under uniform draws: 90 / 6.
const EXPECTED_GAP: f64 = MAX_NUMBER as f64 / PICK_COUNT as f64;
const MAX_WAITING_RATIO: f64 = 3.0;

/// Statistics read by the scorer, computed once per history.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub convention: BucketConvention,
    pub classification: Classification,
    pub positions: PositionTable,
    pub pairs: CoOccurrence,
    pub frequency: FrequencyTable,
    pub weights: ScoreWeights,
    gaps: Vec<u32>,
    overheat: FrequencyTable,
    repeat: FrequencyTable,
    bucket_load: [u32; BUCKET_COUNT as usize],
}

impl ScoringContext {
    pub fn build(history: &DrawHistory, config: &EngineConfig) -> Self {
        let weights = config.weights.clone();

        let mut gaps = vec![history.len() as u32; MAX_NUMBER as usize + 1];
        for stat in number_stats(history) {
            gaps[stat.number as usize] = stat.gap;
        }

        let mut bucket_load = [0u32; BUCKET_COUNT as usize];
        for draw in history.recent(weights.saturation_window) {
            for (b, count) in bucket_counts(draw, config.bucket_convention).iter().enumerate() {
                bucket_load[b] += *count as u32;
            }
        }

        Self {
            convention: config.bucket_convention,
            classification: classify(history, &config.frequency),
            positions: PositionTable::build(history, config.position_convention),
            pairs: CoOccurrence::build(history, config.pair_window),
            frequency: FrequencyTable::from_draws(history.draws()),
            gaps,
            overheat: FrequencyTable::from_draws(history.recent(weights.overheat_window)),
            repeat: FrequencyTable::from_draws(history.recent(weights.repeat_window)),
            bucket_load,
            weights,
        }
    }

    pub fn gap(&self, n: u8) -> u32 {
        self.gaps.get(n as usize).copied().unwrap_or(0)
    }

    pub fn is_overheated(&self, n: u8) -> bool {
        self.overheat.count(n) >= self.weights.overheat_threshold
    }

    /// Terms that do not depend on the other numbers of the combination.
    pub fn base_score(&self, n: u8, slot: usize) -> f64 {
        let w = &self.weights;
        let mut score = match self.classification.tag(n) {
            NumberTag::Hot => w.hot,
            NumberTag::Neutral => w.neutral,
            NumberTag::Cold => w.cold,
        };
        score += w.position * self.positions.share(slot, n);
        score += w.waiting * (self.gap(n) as f64 / EXPECTED_GAP).min(MAX_WAITING_RATIO);
        if self.repeat.count(n) > 0 {
            score -= w.recent_repeat;
        }
        if self.is_overheated(n) {
            score -= w.overheat;
        }
        score
    }

    pub fn pair_score(&self, a: u8, b: u8) -> f64 {
        self.weights.pair_all_time * self.pairs.all_time.count(a, b) as f64
            + self.weights.pair_recent * self.pairs.recent.count(a, b) as f64
    }

    /// Score of `n` for `slot` given the numbers already picked.
    pub fn score(&self, n: u8, slot: usize, chosen: &[u8]) -> f64 {
        let w = &self.weights;
        let mut score = self.base_score(n, slot);

        let long_waiting = self.gap(n) >= w.long_wait_threshold;
        for &c in chosen {
            score += self.pair_score(n, c);
            if long_waiting && self.gap(c) >= w.long_wait_threshold && self.pairs.all_time.count(n, c) > 0 {
                score += w.long_wait_pair;
            }
        }

        let b = bucket(n, self.convention);
        let bucket_taken = chosen.iter().any(|&c| bucket(c, self.convention) == b);
        if bucket_taken && self.bucket_load[b as usize] >= w.saturation_threshold {
            score -= w.bucket_saturation;
        }

        score
    }

    /// Post-hoc score of a finished combination: base terms at each sorted slot plus all pair terms.
    pub fn score_candidate(&self, numbers: &[u8; PICK_COUNT]) -> f64 {
        let mut sorted = *numbers;
        sorted.sort();
        let mut score = 0.0;
        for (slot, &n) in sorted.iter().enumerate() {
            score += self.base_score(n, slot);
            for &m in &sorted[slot + 1..] {
                score += self.pair_score(n, m);
            }
        }
        score
    }
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub numbers: [u8; PICK_COUNT],
    pub target: ShapePattern,
    /// Shape of the produced numbers; differs from `target` only when a fill was needed.
    pub achieved: ShapePattern,
    pub buckets: Vec<u8>,
    pub offset: usize,
    pub score: f64,
}

/// Unused numbers of `range`, narrowed by preference: observed ∩ parity, observed, parity, all.
pub fn candidate_pool(
    ctx: &ScoringContext,
    range: RangeInclusive<u8>,
    parity: Option<Parity>,
    chosen: &[u8],
    observed_only: bool,
) -> Vec<u8> {
    let unused: Vec<u8> = range
        .filter(|n| !chosen.contains(n))
        .collect();

    let observed = |n: &u8| ctx.frequency.count(*n) > 0;
    let parity_ok = |n: &u8| parity.map_or(true, |p| p.matches(*n));

    let mut tiers: Vec<Vec<u8>> = Vec::with_capacity(4);
    if observed_only {
        tiers.push(unused.iter().copied().filter(|n| observed(n) && parity_ok(n)).collect());
        tiers.push(unused.iter().copied().filter(observed).collect());
    }
    tiers.push(unused.iter().copied().filter(parity_ok).collect());

    match tiers.into_iter().find(|tier| !tier.is_empty()) {
        Some(pool) => pool,
        None => unused,
    }
}

pub struct CandidateGenerator<'a> {
    ctx: &'a ScoringContext,
    rng: StdRng,
    parity: Option<Vec<Parity>>,
    observed_only: bool,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(ctx: &'a ScoringContext, seed: u64) -> Self {
        Self {
            ctx,
            rng: StdRng::seed_from_u64(seed),
            parity: None,
            observed_only: true,
        }
    }

    /// One parity per sorted slot. Anything other than six entries disables the constraint.
    pub fn with_parity(mut self, parity: Option<Vec<Parity>>) -> Self {
        self.parity = parity.filter(|p| p.len() == PICK_COUNT);
        self
    }

    pub fn with_observed_only(mut self, observed_only: bool) -> Self {
        self.observed_only = observed_only;
        self
    }

    fn slot_parity(&self, slot: usize) -> Option<Parity> {
        self.parity.as_ref().and_then(|p| p.get(slot).copied())
    }

    fn rank_score(&self, n: u8, slot: usize, chosen: &[u8]) -> f64 {
        let mut score = self.ctx.score(n, slot, chosen);
        if self.slot_parity(slot).is_some_and(|p| p.matches(n)) {
            score += self.ctx.weights.parity_match;
        }
        score
    }

    pub fn score_candidate(&self, numbers: &[u8; PICK_COUNT]) -> f64 {
        let mut score = self.ctx.score_candidate(numbers);
        let mut sorted = *numbers;
        sorted.sort();
        for (slot, &n) in sorted.iter().enumerate() {
            if self.slot_parity(slot).is_some_and(|p| p.matches(n)) {
                score += self.ctx.weights.parity_match;
            }
        }
        score
    }

    /// `runs` distinct buckets, ascending, so run i lands below run i + 1.
    fn assign_buckets(&mut self, runs: usize) -> Vec<u8> {
        let mut buckets: Vec<u8> = (0..BUCKET_COUNT).collect();
        buckets.shuffle(&mut self.rng);
        buckets.truncate(runs);
        buckets.sort();
        buckets
    }

    /// Highest number `slot` may take while the `remaining` later picks of its run still fit
    /// above it in `(floor, end]`, each with its slot parity when that is possible.
    fn slot_ceiling(&self, end: u8, slot: usize, remaining: usize, floor: u8) -> u8 {
        let plain = end - remaining as u8;
        let mut ceiling = end + 1;
        for later in (slot + 1..=slot + remaining).rev() {
            let parity = self.slot_parity(later);
            let mut n = ceiling - 1;
            while n > floor && !parity.map_or(true, |p| p.matches(n)) {
                n -= 1;
            }
            if n <= floor {
                return plain;
            }
            ceiling = n;
        }
        if ceiling - 1 <= floor {
            plain
        } else {
            ceiling - 1
        }
    }

    /// Pool shuffled then stably sorted by score, best first.
    fn rank(&mut self, mut pool: Vec<u8>, slot: usize, chosen: &[u8]) -> Vec<u8> {
        pool.shuffle(&mut self.rng);
        let mut scored: Vec<(u8, f64)> = pool
            .into_iter()
            .map(|n| (n, self.rank_score(n, slot, chosen)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(n, _)| n).collect()
    }

    fn fill(&mut self, target: &ShapePattern, buckets: &[u8], offset: usize) -> [u8; PICK_COUNT] {
        let mut chosen: Vec<u8> = Vec::with_capacity(PICK_COUNT);

        // Picks inside a run are ascending, so pick order is sorted slot order.
        for (&run, &b) in target.runs().iter().zip(buckets) {
            let range = bucket_numbers(b, self.ctx.convention);
            let mut floor = range.start() - 1;
            for k in 0..run as usize {
                let slot = chosen.len();
                let remaining = run as usize - k - 1;
                let ceiling = self.slot_ceiling(*range.end(), slot, remaining, floor);
                let pool = candidate_pool(
                    self.ctx,
                    floor + 1..=ceiling,
                    self.slot_parity(slot),
                    &chosen,
                    self.observed_only,
                );
                let ranked = self.rank(pool, slot, &chosen);
                match ranked.get(offset.min(ranked.len().saturating_sub(1))) {
                    Some(&n) => {
                        chosen.push(n);
                        floor = n;
                    }
                    None => break,
                }
            }
        }

        while chosen.len() < PICK_COUNT {
            let slot = chosen.len();
            let pool: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER).filter(|n| !chosen.contains(n)).collect();
            let ranked = self.rank(pool, slot, &chosen);
            log::debug!("Pattern {} under-filled, topping up slot {}", target, slot + 1);
            match ranked.first() {
                Some(&n) => chosen.push(n),
                None => break,
            }
        }

        let mut numbers = [0u8; PICK_COUNT];
        for (slot, n) in chosen.into_iter().take(PICK_COUNT).enumerate() {
            numbers[slot] = n;
        }
        numbers.sort();
        numbers
    }

    fn build(&mut self, target: &ShapePattern, buckets: &[u8], offset: usize) -> Candidate {
        let numbers = self.fill(target, buckets, offset);
        let achieved = ShapePattern::new(run_lengths(&numbers, self.ctx.convention))
            .unwrap_or_else(|_| target.clone());
        Candidate {
            numbers,
            target: target.clone(),
            achieved,
            buckets: buckets.to_vec(),
            offset,
            score: self.score_candidate(&numbers),
        }
    }

    /// One candidate per offset, all sharing the same bucket assignment.
    pub fn generate_with_offsets(&mut self, target: &ShapePattern, offsets: &[usize]) -> Vec<Candidate> {
        let buckets = self.assign_buckets(target.len());
        log::debug!("Pattern {} assigned to buckets {:?}", target, buckets);
        offsets
            .iter()
            .map(|&offset| self.build(target, &buckets, offset))
            .collect()
    }

    pub fn generate(&mut self, target: &ShapePattern, offset: usize) -> Candidate {
        let buckets = self.assign_buckets(target.len());
        log::debug!("Pattern {} assigned to buckets {:?}", target, buckets);
        self.build(target, &buckets, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_test_history;
    use sayisal_data::models::Draw;

    fn assert_valid(numbers: &[u8; PICK_COUNT]) {
        for &n in numbers {
            assert!((1..=90).contains(&n), "{:?}", numbers);
        }
        for i in 0..PICK_COUNT {
            for j in (i + 1)..PICK_COUNT {
                assert_ne!(numbers[i], numbers[j], "{:?}", numbers);
            }
        }
    }

    fn all_patterns() -> Vec<ShapePattern> {
        fn compositions(remaining: u8, prefix: &mut Vec<u8>, out: &mut Vec<ShapePattern>) {
            if remaining == 0 {
                out.push(ShapePattern::new(prefix.clone()).unwrap());
                return;
            }
            for r in 1..=remaining {
                prefix.push(r);
                compositions(remaining - r, prefix, out);
                prefix.pop();
            }
        }
        let mut out = Vec::new();
        compositions(6, &mut Vec::new(), &mut out);
        out
    }

    #[test]
    fn test_every_pattern_yields_six_distinct_numbers() {
        let history = make_test_history(80);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let mut generator = CandidateGenerator::new(&ctx, 42);
        let patterns = all_patterns();
        assert_eq!(patterns.len(), 32);
        for pattern in &patterns {
            for offset in [0, 1, 5, 50] {
                let candidate = generator.generate(pattern, offset);
                assert_valid(&candidate.numbers);
                assert_eq!(&candidate.achieved, pattern, "offset {}", offset);
                assert!(candidate.numbers.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_any_weights_yield_valid_candidates() {
        let history = make_test_history(30);
        let mut config = EngineConfig::default();
        config.weights = ScoreWeights {
            hot: -100.0,
            cold: 1e9,
            position: f64::NAN,
            pair_recent: -3.0,
            overheat: -50.0,
            overheat_threshold: 0,
            ..ScoreWeights::default()
        };
        let ctx = ScoringContext::build(&history, &config);
        let mut generator = CandidateGenerator::new(&ctx, 7);
        for pattern in all_patterns() {
            assert_valid(&generator.generate(&pattern, 0).numbers);
        }
    }

    #[test]
    fn test_empty_history_still_generates() {
        let ctx = ScoringContext::build(&DrawHistory::default(), &EngineConfig::default());
        let mut generator = CandidateGenerator::new(&ctx, 1);
        let candidate = generator.generate(&"2-1-1-1-1".parse().unwrap(), 0);
        assert_valid(&candidate.numbers);
    }

    fn even_thirties_history() -> DrawHistory {
        // Bucket 3 (30-39) only ever holds even numbers, every other observed number is odd.
        DrawHistory::from_chronological(vec![
            Draw::new([1, 11, 30, 41, 61, 81]),
            Draw::new([3, 13, 32, 43, 63, 83]),
            Draw::new([5, 15, 34, 45, 65, 85]),
            Draw::new([7, 17, 36, 47, 67, 87]),
            Draw::new([9, 19, 38, 49, 69, 89]),
        ])
    }

    #[test]
    fn test_parity_falls_back_when_preferred_pool_is_empty() {
        let history = even_thirties_history();
        let ctx = ScoringContext::build(&history, &EngineConfig::default());

        let thirties = || bucket_numbers(3, BucketConvention::Decimal);

        let pool = candidate_pool(&ctx, thirties(), Some(Parity::Odd), &[], true);
        assert_eq!(pool, vec![30, 32, 34, 36, 38]);

        let pool = candidate_pool(&ctx, thirties(), Some(Parity::Odd), &[30, 32, 34, 36, 38], true);
        assert_eq!(pool, vec![31, 33, 35, 37, 39]);

        let pool = candidate_pool(&ctx, thirties(), Some(Parity::Odd), &[], false);
        assert_eq!(pool, vec![31, 33, 35, 37, 39]);

        let pool = candidate_pool(&ctx, 33..=36, Some(Parity::Odd), &[], true);
        assert_eq!(pool, vec![34, 36]);
    }

    #[test]
    fn test_all_odd_six_singletons_still_six_numbers() {
        let history = even_thirties_history();
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let pattern: ShapePattern = "1-1-1-1-1-1".parse().unwrap();
        for seed in 0..20 {
            let mut generator = CandidateGenerator::new(&ctx, seed).with_parity(Some(vec![Parity::Odd; 6]));
            let candidate = generator.generate(&pattern, 0);
            assert_valid(&candidate.numbers);
            assert_eq!(candidate.buckets.len(), 6);
            for &n in &candidate.numbers {
                if bucket(n, BucketConvention::Decimal) == 3 {
                    assert_eq!(n % 2, 0, "bucket 3 only has observed even numbers");
                } else {
                    assert_eq!(n % 2, 1);
                }
            }
        }
    }

    #[test]
    fn test_seed_determinism() {
        let history = make_test_history(50);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let pattern: ShapePattern = "2-2-1-1".parse().unwrap();
        let a = CandidateGenerator::new(&ctx, 123).generate_with_offsets(&pattern, &[0, 1]);
        let b = CandidateGenerator::new(&ctx, 123).generate_with_offsets(&pattern, &[0, 1]);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.numbers, y.numbers);
            assert_eq!(x.score, y.score);
        }
    }

    #[test]
    fn test_alternative_shares_buckets() {
        let history = make_test_history(50);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let pattern: ShapePattern = "2-2-2".parse().unwrap();
        let candidates = CandidateGenerator::new(&ctx, 9).generate_with_offsets(&pattern, &[0, 1]);
        assert_eq!(candidates[0].buckets, candidates[1].buckets);
        assert_eq!(candidates[0].achieved, candidates[1].achieved);
        assert_eq!(candidates[1].offset, 1);
    }

    #[test]
    fn test_overheated_number_is_penalised() {
        let history = DrawHistory::from_chronological(vec![
            Draw::new([1, 12, 23, 34, 45, 56]),
            Draw::new([1, 13, 24, 35, 46, 57]),
            Draw::new([1, 14, 25, 36, 47, 58]),
            Draw::new([2, 15, 26, 37, 48, 59]),
            Draw::new([3, 16, 27, 38, 49, 60]),
        ]);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        assert!(ctx.is_overheated(1));
        assert!(!ctx.is_overheated(2));

        let mut config = EngineConfig::default();
        config.weights.overheat = 0.0;
        let relaxed = ScoringContext::build(&history, &config);
        assert!((relaxed.base_score(1, 0) - ctx.base_score(1, 0) - 10.0).abs() < 1e-9);
        assert_eq!(relaxed.base_score(2, 0), ctx.base_score(2, 0));
    }

    #[test]
    fn test_pair_synergy_raises_score() {
        let history = DrawHistory::from_chronological(vec![
            Draw::new([10, 20, 30, 40, 50, 60]),
            Draw::new([10, 20, 31, 41, 51, 61]),
            Draw::new([11, 22, 33, 44, 55, 66]),
        ]);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let with = ctx.score(20, 1, &[10]) - ctx.base_score(20, 1);
        assert!((with - (1.0 * 2.0 + 3.0 * 2.0)).abs() < 1e-9);
        assert_eq!(ctx.score(22, 1, &[]), ctx.base_score(22, 1));
    }

    #[test]
    fn test_score_candidate_counts_all_pairs() {
        let history = DrawHistory::from_chronological(vec![Draw::new([1, 2, 3, 4, 5, 6])]);
        let mut config = EngineConfig::default();
        config.weights = ScoreWeights {
            hot: 0.0,
            neutral: 0.0,
            cold: 0.0,
            position: 0.0,
            waiting: 0.0,
            recent_repeat: 0.0,
            overheat: 0.0,
            pair_all_time: 1.0,
            pair_recent: 0.0,
            ..ScoreWeights::default()
        };
        let ctx = ScoringContext::build(&history, &config);
        assert!((ctx.score_candidate(&[6, 5, 4, 3, 2, 1]) - 15.0).abs() < 1e-9);
        assert!((ctx.score_candidate(&[1, 2, 3, 70, 80, 90]) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_parity_sequence_kept_slot_by_slot() {
        let history = make_test_history(80);
        let mut config = EngineConfig::default();
        config.generator.observed_only = false;
        let ctx = ScoringContext::build(&history, &config);

        let cases = [
            ("6", "odd,even,odd,even,odd,even"),
            ("6", "even,even,odd,odd,even,odd"),
            ("3-3", "even,even,even,odd,odd,odd"),
            ("2-2-2", "odd,odd,even,even,odd,even"),
        ];
        for (pattern, parity) in cases {
            let pattern: ShapePattern = pattern.parse().unwrap();
            let parity = sayisal_data::models::parse_parity_sequence(parity).unwrap();
            for seed in 0..50 {
                let mut generator = CandidateGenerator::new(&ctx, seed)
                    .with_parity(Some(parity.clone()))
                    .with_observed_only(false);
                for offset in [0, 1] {
                    let candidate = generator.generate(&pattern, offset);
                    let got: Vec<Parity> = candidate.numbers.iter().map(|&n| Parity::of(n)).collect();
                    assert_eq!(got, parity, "seed {} gave {:?}", seed, candidate.numbers);
                    assert_eq!(candidate.achieved, pattern);
                }
            }
        }
    }

    fn with_weights(history: &DrawHistory, tweak: impl Fn(&mut ScoreWeights)) -> ScoringContext {
        let mut config = EngineConfig::default();
        tweak(&mut config.weights);
        ScoringContext::build(history, &config)
    }

    /// `[1..6]` once, then `quiet` draws without any number below 10.
    fn one_old_draw(quiet: usize) -> DrawHistory {
        let mut draws = vec![Draw::new([1, 2, 3, 4, 5, 6])];
        draws.extend((0..quiet).map(|_| Draw::new([10, 20, 30, 40, 50, 60])));
        DrawHistory::from_chronological(draws)
    }

    #[test]
    fn test_waiting_ratio_and_cap() {
        let history = one_old_draw(15);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let idle = with_weights(&history, |w| w.waiting = 0.0);
        assert_eq!(ctx.gap(1), 15);
        // 0.3 × 15 / 15
        assert!((ctx.base_score(1, 0) - idle.base_score(1, 0) - 0.3).abs() < 1e-9);
        assert!((ctx.base_score(10, 0) - idle.base_score(10, 0)).abs() < 1e-9);

        let history = one_old_draw(80);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let idle = with_weights(&history, |w| w.waiting = 0.0);
        assert_eq!(ctx.gap(1), 80);
        assert_eq!(ctx.gap(90), 81);
        // 80 / 15 is capped at 3
        assert!((ctx.base_score(1, 0) - idle.base_score(1, 0) - 0.9).abs() < 1e-9);
        assert!((ctx.base_score(90, 0) - idle.base_score(90, 0) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_long_wait_pair_bonus() {
        let history = one_old_draw(12);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let plain = with_weights(&history, |w| w.long_wait_pair = 0.0);

        // 1 and 2 both waited 12 draws and were drawn together.
        assert!((ctx.score(2, 1, &[1]) - plain.score(2, 1, &[1]) - 2.0).abs() < 1e-9);
        // 7 waited as long but was never paired with 1.
        assert!((ctx.score(7, 1, &[1]) - plain.score(7, 1, &[1])).abs() < 1e-9);
        // 10 and 20 are paired but not waiting.
        assert!((ctx.score(20, 1, &[10]) - plain.score(20, 1, &[10])).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_saturation_penalty() {
        let history = DrawHistory::from_chronological(vec![
            Draw::new([1, 2, 3, 40, 50, 60]),
            Draw::new([4, 5, 6, 41, 51, 61]),
            Draw::new([7, 8, 9, 42, 52, 62]),
        ]);
        let ctx = ScoringContext::build(&history, &EngineConfig::default());
        let plain = with_weights(&history, |w| w.bucket_saturation = 0.0);

        // Bucket 0 held 9 numbers over the last 3 draws, and 1 is already picked.
        assert!((ctx.score(3, 1, &[1]) - plain.score(3, 1, &[1]) + 1.5).abs() < 1e-9);
        // First pick of bucket 0.
        assert!((ctx.score(3, 0, &[]) - plain.score(3, 0, &[])).abs() < 1e-9);
        // Bucket 4 held 3 numbers, below the threshold of 4.
        assert!((ctx.score(45, 1, &[40]) - plain.score(45, 1, &[40])).abs() < 1e-9);
    }
}
