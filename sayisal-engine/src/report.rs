use sayisal_data::models::{Draw, DrawHistory, PICK_COUNT};

use crate::bucket::{shape_pattern, ShapePattern};
use crate::config::EngineConfig;
use crate::frequency::{number_stats, NumberStats};
use crate::generator::{Candidate, CandidateGenerator, ScoringContext};
use crate::patterns::{normalized_counts, pattern_counts, pattern_scores, pattern_series, PatternScore};
use crate::transition::{PatternPrediction, TransitionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Primary,
    Alternative,
    /// Built for one of the best scored patterns.
    Scored,
}

#[derive(Debug, Clone)]
pub struct ReportCandidate {
    pub kind: CandidateKind,
    pub candidate: Candidate,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub draws: usize,
    pub latest: Draw,
    pub latest_pattern: ShapePattern,
    pub top_patterns: Vec<(ShapePattern, u32)>,
    pub top_normalized: Vec<(ShapePattern, u32)>,
    pub pattern_scores: Vec<PatternScore>,
    pub hot: Vec<u8>,
    pub neutral: Vec<u8>,
    pub cold: Vec<u8>,
    pub top_frequencies: Vec<(u8, u32)>,
    pub number_stats: Vec<NumberStats>,
    pub top_pairs: Vec<((u8, u8), u32)>,
    pub top_recent_pairs: Vec<((u8, u8), u32)>,
    pub pair_window: usize,
    /// One leaderboard per sorted slot.
    pub positions: Vec<Vec<(u8, u32)>>,
    pub prediction: PatternPrediction,
    pub candidates: Vec<ReportCandidate>,
}

#[derive(Debug, Clone)]
pub enum ReportResult {
    InsufficientData { draws: usize, required: usize },
    Ready(Box<Report>),
}

/// Every statistic of `history` plus the suggested combinations.
pub fn generate_report(history: &DrawHistory, config: &EngineConfig) -> ReportResult {
    let required = config.min_draws.max(1);
    let latest = match history.latest() {
        Some(draw) if history.len() >= required => draw.clone(),
        _ => {
            return ReportResult::InsufficientData {
                draws: history.len(),
                required,
            };
        }
    };
    let top_n = config.top_n;

    let series = pattern_series(history, config.bucket_convention);
    let latest_pattern = shape_pattern(&latest, config.bucket_convention);

    let mut top_patterns = pattern_counts(&series);
    top_patterns.truncate(top_n);
    let mut top_normalized = normalized_counts(&series);
    top_normalized.truncate(top_n);
    let scores = pattern_scores(&series, &config.patterns);

    let table = TransitionTable::build(&series, config.patterns.transition_order);
    let prediction = match table.predict(&series) {
        Some(p) => p,
        None => {
            return ReportResult::InsufficientData {
                draws: history.len(),
                required,
            };
        }
    };
    log::info!("Predicted next pattern {} ({:?})", prediction.pattern, prediction.source);

    let ctx = ScoringContext::build(history, config);
    let mut generator = CandidateGenerator::new(&ctx, config.seed)
        .with_parity(config.generator.parity.clone())
        .with_observed_only(config.generator.observed_only);

    let mut candidates = Vec::new();
    let pair = generator.generate_with_offsets(&prediction.pattern, &[0, config.generator.alternative_offset]);
    for (candidate, kind) in pair.into_iter().zip([CandidateKind::Primary, CandidateKind::Alternative]) {
        candidates.push(ReportCandidate { kind, candidate });
    }
    for score in scores.iter().take(config.patterns.scored_pattern_candidates) {
        candidates.push(ReportCandidate {
            kind: CandidateKind::Scored,
            candidate: generator.generate(&score.pattern, 0),
        });
    }

    let positions = (0..PICK_COUNT).map(|slot| ctx.positions.top(slot, top_n)).collect();

    ReportResult::Ready(Box::new(Report {
        draws: history.len(),
        latest,
        latest_pattern,
        top_patterns,
        top_normalized,
        pattern_scores: scores,
        hot: ctx.classification.hot(),
        neutral: ctx.classification.neutral(),
        cold: ctx.classification.cold(),
        top_frequencies: ctx.frequency.top(top_n),
        number_stats: number_stats(history),
        top_pairs: ctx.pairs.all_time.top_pairs(top_n),
        top_recent_pairs: ctx.pairs.recent.top_pairs(top_n),
        pair_window: ctx.pairs.window,
        positions,
        prediction,
        candidates,
    }))
}
