use serde::{Deserialize, Serialize};

use sayisal_data::models::{Draw, DrawHistory, MAX_NUMBER, MIN_NUMBER};

use crate::config::FrequencyConfig;

/// Occurrence count per number. Numbers never drawn read as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    counts: Vec<u32>,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: vec![0; MAX_NUMBER as usize + 1],
        }
    }
}

impl FrequencyTable {
    pub fn from_draws(draws: &[Draw]) -> Self {
        let mut table = Self::default();
        for draw in draws {
            for &n in &draw.numbers {
                table.add(n);
            }
        }
        table
    }

    pub fn add(&mut self, n: u8) {
        if let Some(count) = self.counts.get_mut(n as usize) {
            *count += 1;
        }
    }

    pub fn count(&self, n: u8) -> u32 {
        self.counts.get(n as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn distinct_observed(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Mean over the numbers actually observed.
    pub fn mean(&self) -> f64 {
        let distinct = self.distinct_observed();
        if distinct == 0 {
            return 0.0;
        }
        self.total() as f64 / distinct as f64
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (MIN_NUMBER..=MAX_NUMBER).map(move |n| (n, self.count(n)))
    }

    /// Observed numbers by count descending, then number ascending.
    pub fn top(&self, k: usize) -> Vec<(u8, u32)> {
        let mut entries: Vec<(u8, u32)> = self.iter().filter(|&(_, c)| c > 0).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(k);
        entries
    }
}

pub fn frequency_table(history: &DrawHistory, window: Option<usize>) -> FrequencyTable {
    match window {
        Some(w) => FrequencyTable::from_draws(history.recent(w)),
        None => FrequencyTable::from_draws(history.draws()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberTag {
    Hot,
    Neutral,
    Cold,
}

impl std::fmt::Display for NumberTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberTag::Hot => write!(f, "HOT"),
            NumberTag::Neutral => write!(f, "-"),
            NumberTag::Cold => write!(f, "COLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationRule {
    /// Count against the mean of observed numbers.
    #[default]
    MeanRatio,
    /// Appearances in the trailing recent window.
    RecentWindow,
}

/// Hot / neutral / cold tag for each of 1..=90.
#[derive(Debug, Clone)]
pub struct Classification {
    tags: Vec<NumberTag>,
}

impl Classification {
    fn from_fn(f: impl Fn(u8) -> NumberTag) -> Self {
        let mut tags = vec![NumberTag::Cold; MAX_NUMBER as usize + 1];
        for n in MIN_NUMBER..=MAX_NUMBER {
            tags[n as usize] = f(n);
        }
        Self { tags }
    }

    pub fn tag(&self, n: u8) -> NumberTag {
        self.tags.get(n as usize).copied().unwrap_or(NumberTag::Cold)
    }

    pub fn numbers(&self, tag: NumberTag) -> Vec<u8> {
        (MIN_NUMBER..=MAX_NUMBER).filter(|&n| self.tag(n) == tag).collect()
    }

    pub fn hot(&self) -> Vec<u8> {
        self.numbers(NumberTag::Hot)
    }

    pub fn neutral(&self) -> Vec<u8> {
        self.numbers(NumberTag::Neutral)
    }

    pub fn cold(&self) -> Vec<u8> {
        self.numbers(NumberTag::Cold)
    }
}

pub fn classify_mean_ratio(table: &FrequencyTable, hot_multiplier: f64, cold_multiplier: f64) -> Classification {
    let mean = table.mean();
    Classification::from_fn(|n| {
        let count = table.count(n) as f64;
        if count == 0.0 {
            NumberTag::Cold
        } else if count > mean * hot_multiplier {
            NumberTag::Hot
        } else if count < mean * cold_multiplier {
            NumberTag::Cold
        } else {
            NumberTag::Neutral
        }
    })
}

pub fn classify_recent_window(recent: &FrequencyTable, hot_min: u32) -> Classification {
    Classification::from_fn(|n| match recent.count(n) {
        0 => NumberTag::Cold,
        c if c >= hot_min => NumberTag::Hot,
        _ => NumberTag::Neutral,
    })
}

pub fn classify(history: &DrawHistory, config: &FrequencyConfig) -> Classification {
    match config.rule {
        ClassificationRule::MeanRatio => {
            let table = frequency_table(history, config.window);
            classify_mean_ratio(&table, config.hot_multiplier, config.cold_multiplier)
        }
        ClassificationRule::RecentWindow => {
            let recent = FrequencyTable::from_draws(history.recent(config.recent_window));
            classify_recent_window(&recent, config.recent_hot_min)
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    /// Draws since the last appearance: 0 = in the latest draw, history length = never drawn.
    pub gap: u32,
}

pub fn number_stats(history: &DrawHistory) -> Vec<NumberStats> {
    let mut stats: Vec<NumberStats> = (MIN_NUMBER..=MAX_NUMBER)
        .map(|n| NumberStats {
            number: n,
            frequency: 0,
            gap: history.len() as u32,
        })
        .collect();

    for (i, draw) in history.newest_first().enumerate() {
        for &n in &draw.numbers {
            if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
                continue;
            }
            if let Some(stat) = stats.get_mut((n - MIN_NUMBER) as usize) {
                if stat.frequency == 0 {
                    stat.gap = i as u32;
                }
                stat.frequency += 1;
            }
        }
    }

    stats
}
