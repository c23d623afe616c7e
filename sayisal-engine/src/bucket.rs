use std::ops::RangeInclusive;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use sayisal_data::models::{Draw, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};

pub const BUCKET_COUNT: u8 = 9;

/// How a number is mapped to one of the nine decades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BucketConvention {
    /// `n / 10`, 90 folded into the last bucket: 1-9, 10-19, ..., 80-90.
    #[default]
    Decimal,
    /// `(n - 1) / 10`: 1-10, 11-20, ..., 81-90.
    OneBased,
}

pub fn bucket(n: u8, convention: BucketConvention) -> u8 {
    match convention {
        BucketConvention::Decimal => (n / 10).min(BUCKET_COUNT - 1),
        BucketConvention::OneBased => n.saturating_sub(1) / 10,
    }
}

pub fn bucket_numbers(b: u8, convention: BucketConvention) -> RangeInclusive<u8> {
    let last = BUCKET_COUNT - 1;
    match convention {
        BucketConvention::Decimal => {
            let start = (b * 10).max(MIN_NUMBER);
            let end = if b >= last { MAX_NUMBER } else { b * 10 + 9 };
            start..=end
        }
        BucketConvention::OneBased => (b * 10 + 1)..=(b * 10 + 10).min(MAX_NUMBER),
    }
}

/// Run lengths of consecutive sorted numbers sharing a bucket, e.g. `2-1-1-1-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapePattern(Vec<u8>);

impl ShapePattern {
    pub fn new(runs: Vec<u8>) -> Result<Self> {
        if runs.is_empty() {
            bail!("Empty pattern");
        }
        if runs.iter().any(|&r| r == 0) {
            bail!("Pattern runs must be at least 1");
        }
        if runs.len() > BUCKET_COUNT as usize {
            bail!("Pattern has {} runs, at most {} buckets exist", runs.len(), BUCKET_COUNT);
        }
        let total: usize = runs.iter().map(|&r| r as usize).sum();
        if total != PICK_COUNT {
            bail!("Pattern runs sum to {}, expected {}", total, PICK_COUNT);
        }
        Ok(Self(runs))
    }

    pub fn runs(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Runs sorted descending. `1-2-3` and `3-2-1` share the same normalized shape.
    pub fn normalized(&self) -> ShapePattern {
        let mut runs = self.0.clone();
        runs.sort_by(|a, b| b.cmp(a));
        ShapePattern(runs)
    }
}

impl std::fmt::Display for ShapePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

impl std::str::FromStr for ShapePattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let runs = s
            .trim()
            .split('-')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .with_context(|| format!("Invalid pattern run '{}' in '{}'", part, s))
            })
            .collect::<Result<Vec<_>>>()?;
        ShapePattern::new(runs)
    }
}

pub fn shape_pattern(draw: &Draw, convention: BucketConvention) -> ShapePattern {
    ShapePattern(run_lengths(&draw.sorted(), convention))
}

/// Run-length encoding of the bucket sequence of already sorted numbers.
pub fn run_lengths(sorted: &[u8], convention: BucketConvention) -> Vec<u8> {
    let mut runs = Vec::new();
    let mut previous: Option<u8> = None;
    for &n in sorted {
        let b = bucket(n, convention);
        if previous == Some(b) {
            if let Some(count) = runs.last_mut() {
                *count += 1;
            }
        } else {
            runs.push(1);
        }
        previous = Some(b);
    }
    runs
}

/// Number of drawn numbers per bucket.
pub fn bucket_counts(draw: &Draw, convention: BucketConvention) -> [u8; BUCKET_COUNT as usize] {
    let mut counts = [0u8; BUCKET_COUNT as usize];
    for &n in &draw.numbers {
        counts[bucket(n, convention) as usize] += 1;
    }
    counts
}
