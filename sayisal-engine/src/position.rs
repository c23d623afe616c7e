use serde::{Deserialize, Serialize};

use sayisal_data::models::{Draw, DrawHistory, PICK_COUNT};

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PositionConvention {
    /// Slot i = i-th smallest number of the draw.
    #[default]
    Sorted,
    /// Slot i = i-th number column of the source file.
    Column,
}

pub fn slot_numbers(draw: &Draw, convention: PositionConvention) -> [u8; PICK_COUNT] {
    match convention {
        PositionConvention::Sorted => draw.sorted(),
        PositionConvention::Column => draw.numbers,
    }
}

#[derive(Debug, Clone)]
pub struct PositionTable {
    slots: Vec<FrequencyTable>,
    draws: usize,
}

impl PositionTable {
    pub fn build(history: &DrawHistory, convention: PositionConvention) -> Self {
        let mut slots = vec![FrequencyTable::default(); PICK_COUNT];
        for draw in history.iter() {
            for (slot, n) in slot_numbers(draw, convention).into_iter().enumerate() {
                slots[slot].add(n);
            }
        }
        Self { slots, draws: history.len() }
    }

    /// `slot` is 0-based.
    pub fn count(&self, slot: usize, n: u8) -> u32 {
        self.slots.get(slot).map(|t| t.count(n)).unwrap_or(0)
    }

    /// Percentage of draws with `n` in `slot`.
    pub fn share(&self, slot: usize, n: u8) -> f64 {
        if self.draws == 0 {
            return 0.0;
        }
        self.count(slot, n) as f64 * 100.0 / self.draws as f64
    }

    pub fn top(&self, slot: usize, k: usize) -> Vec<(u8, u32)> {
        self.slots.get(slot).map(|t| t.top(k)).unwrap_or_default()
    }

    pub fn slot(&self, slot: usize) -> Option<&FrequencyTable> {
        self.slots.get(slot)
    }
}
