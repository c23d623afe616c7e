use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 90;
pub const PICK_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    /// Source record number, 1 = first row after the header.
    pub line: usize,
    pub date: Option<NaiveDate>,
    /// Source column order.
    pub numbers: [u8; PICK_COUNT],
    pub bonus: Vec<u8>,
}

impl Draw {
    pub fn new(numbers: [u8; PICK_COUNT]) -> Self {
        Self {
            line: 0,
            date: None,
            numbers,
            bonus: Vec::new(),
        }
    }

    pub fn sorted(&self) -> [u8; PICK_COUNT] {
        let mut sorted = self.numbers;
        sorted.sort();
        sorted
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Dates first, then oldest-first.
    #[default]
    Auto,
    OldestFirst,
    NewestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(number: u8) -> Self {
        if number % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    pub fn matches(&self, number: u8) -> bool {
        Parity::of(number) == *self
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

impl std::str::FromStr for Parity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "odd" | "o" | "tek" | "t" => Ok(Parity::Odd),
            "even" | "e" | "çift" | "cift" | "c" | "ç" => Ok(Parity::Even),
            other => bail!("Unknown parity '{}' (expected odd/even or tek/çift)", other),
        }
    }
}

/// Parse a comma separated list of exactly six parities.
pub fn parse_parity_sequence(s: &str) -> Result<Vec<Parity>> {
    let parities = s
        .split(',')
        .map(|p| p.parse::<Parity>())
        .collect::<Result<Vec<_>>>()?;
    if parities.len() != PICK_COUNT {
        bail!("Expected {} parities, got {}", PICK_COUNT, parities.len());
    }
    Ok(parities)
}

/// Draws in chronological order, `draws[0]` = the oldest.
#[derive(Debug, Clone, Default)]
pub struct DrawHistory {
    draws: Vec<Draw>,
}

impl DrawHistory {
    pub fn from_chronological(draws: Vec<Draw>) -> Self {
        Self { draws }
    }

    pub fn from_newest_first(mut draws: Vec<Draw>) -> Self {
        draws.reverse();
        Self { draws }
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Draw> {
        self.draws.iter()
    }

    pub fn latest(&self) -> Option<&Draw> {
        self.draws.last()
    }

    /// The `window` newest draws, still oldest first.
    pub fn recent(&self, window: usize) -> &[Draw] {
        let start = self.draws.len().saturating_sub(window);
        &self.draws[start..]
    }

    /// Newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Draw> {
        self.draws.iter().rev()
    }
}

pub fn validate_draw(numbers: &[u8]) -> Result<()> {
    if numbers.len() != PICK_COUNT {
        bail!("Expected {} numbers, got {}", PICK_COUNT, numbers.len());
    }
    for &n in numbers {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            bail!("Number {} out of range ({}-{})", n, MIN_NUMBER, MAX_NUMBER);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Duplicate number: {}", numbers[i]);
            }
        }
    }
    Ok(())
}
