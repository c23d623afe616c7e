use std::collections::HashMap;

use crate::bucket::ShapePattern;
use crate::patterns::pattern_counts;

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionSource {
    /// Most frequent recorded successor of the context.
    Transition { support: u32, observations: u32 },
    /// Context never seen as a predecessor: globally most common pattern.
    GlobalFallback,
}

#[derive(Debug, Clone)]
pub struct PatternPrediction {
    pub context: Vec<ShapePattern>,
    pub pattern: ShapePattern,
    pub source: PredictionSource,
}

/// Order-k table: last k patterns -> successor counts.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    order: usize,
    // Successors kept in first-seen order for tie breaking.
    transitions: HashMap<Vec<ShapePattern>, Vec<(ShapePattern, u32)>>,
    global: Vec<(ShapePattern, u32)>,
}

impl TransitionTable {
    /// `series` oldest first.
    pub fn build(series: &[ShapePattern], order: usize) -> Self {
        let order = order.max(1);
        let mut transitions: HashMap<Vec<ShapePattern>, Vec<(ShapePattern, u32)>> = HashMap::new();

        for t in order..series.len() {
            let context = series[t - order..t].to_vec();
            let next = &series[t];
            let successors = transitions.entry(context).or_default();
            match successors.iter_mut().find(|(p, _)| p == next) {
                Some((_, count)) => *count += 1,
                None => successors.push((next.clone(), 1)),
            }
        }

        Self {
            order,
            transitions,
            global: pattern_counts(series),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn successors(&self, context: &[ShapePattern]) -> &[(ShapePattern, u32)] {
        self.transitions.get(context).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn most_common(&self) -> Option<&ShapePattern> {
        self.global.first().map(|(p, _)| p)
    }

    /// Arg-max successor of the latest context, falling back to the most common pattern.
    pub fn predict(&self, series: &[ShapePattern]) -> Option<PatternPrediction> {
        let fallback = self.most_common()?.clone();
        let context = series[series.len().saturating_sub(self.order)..].to_vec();

        let mut best: Option<&(ShapePattern, u32)> = None;
        for entry in self.successors(&context) {
            match best {
                Some(b) if entry.1 <= b.1 => {}
                _ => best = Some(entry),
            }
        }

        let prediction = match best {
            Some((pattern, support)) if context.len() == self.order => PatternPrediction {
                pattern: pattern.clone(),
                source: PredictionSource::Transition {
                    support: *support,
                    observations: self.successors(&context).iter().map(|(_, c)| c).sum(),
                },
                context,
            },
            _ => PatternPrediction {
                context,
                pattern: fallback,
                source: PredictionSource::GlobalFallback,
            },
        };
        Some(prediction)
    }
}
