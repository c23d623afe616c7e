use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use sayisal_data::models::{Orientation, Parity, PICK_COUNT};

use crate::bucket::BucketConvention;
use crate::frequency::ClassificationRule;
use crate::position::PositionConvention;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub bucket_convention: BucketConvention,
    pub position_convention: PositionConvention,
    pub orientation: Orientation,
    /// Below this many draws the report is `InsufficientData`.
    pub min_draws: usize,
    /// Length of every leaderboard in the report.
    pub top_n: usize,
    pub seed: u64,
    pub frequency: FrequencyConfig,
    /// Trailing window of the "recent" pair tally.
    pub pair_window: usize,
    pub patterns: PatternConfig,
    pub generator: GeneratorConfig,
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bucket_convention: BucketConvention::Decimal,
            position_convention: PositionConvention::Sorted,
            orientation: Orientation::Auto,
            min_draws: 1,
            top_n: 10,
            seed: 42,
            frequency: FrequencyConfig::default(),
            pair_window: 50,
            patterns: PatternConfig::default(),
            generator: GeneratorConfig::default(),
            weights: ScoreWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    pub rule: ClassificationRule,
    /// `None` = whole history.
    pub window: Option<usize>,
    pub hot_multiplier: f64,
    pub cold_multiplier: f64,
    pub recent_window: usize,
    pub recent_hot_min: u32,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            rule: ClassificationRule::MeanRatio,
            window: None,
            hot_multiplier: 1.3,
            cold_multiplier: 0.7,
            recent_window: 10,
            recent_hot_min: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub transition_order: usize,
    /// Window used by the "absent lately" term of pattern scores.
    pub window: usize,
    pub share_weight: f64,
    pub absence_weight: f64,
    pub streak_penalty: f64,
    /// How many top scored patterns get their own candidate in the report.
    pub scored_pattern_candidates: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            transition_order: 1,
            window: 20,
            share_weight: 0.5,
            absence_weight: 0.3,
            streak_penalty: 0.3,
            scored_pattern_candidates: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Prefer numbers seen at least once in the history.
    pub observed_only: bool,
    pub alternative_offset: usize,
    /// One parity per sorted slot.
    pub parity: Option<Vec<Parity>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            observed_only: true,
            alternative_offset: 1,
            parity: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub hot: f64,
    pub neutral: f64,
    pub cold: f64,
    pub position: f64,
    pub waiting: f64,
    pub pair_all_time: f64,
    pub pair_recent: f64,
    pub long_wait_pair: f64,
    pub long_wait_threshold: u32,
    pub recent_repeat: f64,
    pub repeat_window: usize,
    pub bucket_saturation: f64,
    pub saturation_window: usize,
    pub saturation_threshold: u32,
    pub overheat: f64,
    pub overheat_window: usize,
    pub overheat_threshold: u32,
    pub parity_match: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            hot: 2.0,
            neutral: 1.0,
            cold: 1.5,
            position: 0.45,
            waiting: 0.3,
            pair_all_time: 1.0,
            pair_recent: 3.0,
            long_wait_pair: 2.0,
            long_wait_threshold: 10,
            recent_repeat: 1.0,
            repeat_window: 2,
            bucket_saturation: 1.5,
            saturation_window: 3,
            saturation_threshold: 4,
            overheat: 10.0,
            overheat_window: 15,
            overheat_threshold: 3,
            parity_match: 0.5,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.patterns.transition_order == 0 {
            bail!("patterns.transition_order must be at least 1");
        }
        if let Some(parity) = &self.generator.parity {
            if parity.len() != PICK_COUNT {
                bail!("generator.parity needs {} entries, got {}", PICK_COUNT, parity.len());
            }
        }
        if self.frequency.hot_multiplier < self.frequency.cold_multiplier {
            bail!(
                "frequency.hot_multiplier ({}) below cold_multiplier ({})",
                self.frequency.hot_multiplier,
                self.frequency.cold_multiplier
            );
        }
        Ok(())
    }
}

pub fn save_config(config: &EngineConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).with_context(|| format!("Unable to write {:?}", path))?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {:?}", path))?;
    let config: EngineConfig = serde_json::from_str(&json)
        .with_context(|| format!("Invalid JSON in {:?}", path))?;
    config.validate()?;
    Ok(config)
}
