use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use crate::models::{Draw, DrawHistory, Orientation, PICK_COUNT, validate_draw};

const DATE_HEADERS: [&str; 2] = ["tarih", "date"];
const BONUS_HEADERS: [&str; 3] = ["joker", "super", "superstar"];
const DATE_FORMATS: [&str; 4] = ["%d.%m.%Y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    Header,
    Positional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub numbers: [usize; PICK_COUNT],
    pub date: Option<usize>,
    pub bonus: Vec<usize>,
    pub source: LayoutSource,
}

pub struct LoadResult {
    pub history: DrawHistory,
    pub total_records: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub layout: Option<ColumnLayout>,
    /// Orientation actually applied (never `Auto`).
    pub orientation: Orientation,
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .replace('İ', "I")
        .replace('ı', "i")
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect()
}

/// `T3` / `s3` -> ('t', 2)
fn number_slot(header: &str) -> Option<(char, usize)> {
    let mut chars = header.chars();
    let prefix = chars.next()?;
    if prefix != 't' && prefix != 's' {
        return None;
    }
    let rest: String = chars.collect();
    let slot = rest.parse::<usize>().ok()?;
    if (1..=PICK_COUNT).contains(&slot) {
        Some((prefix, slot - 1))
    } else {
        None
    }
}

pub fn detect_layout(headers: &csv::StringRecord) -> Option<ColumnLayout> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

    let from_headers = ['t', 's'].iter().find_map(|&prefix| {
        let mut slots = [None; PICK_COUNT];
        for (idx, h) in normalized.iter().enumerate() {
            if let Some((p, slot)) = number_slot(h) {
                if p == prefix && slots[slot].is_none() {
                    slots[slot] = Some(idx);
                }
            }
        }
        let mut numbers = [0usize; PICK_COUNT];
        for (slot, idx) in slots.iter().enumerate() {
            numbers[slot] = (*idx)?;
        }
        Some(numbers)
    });

    let (numbers, source) = match from_headers {
        Some(numbers) => (numbers, LayoutSource::Header),
        None if normalized.len() > PICK_COUNT => ([1, 2, 3, 4, 5, 6], LayoutSource::Positional),
        None if normalized.len() == PICK_COUNT => ([0, 1, 2, 3, 4, 5], LayoutSource::Positional),
        None => return None,
    };

    let date = normalized
        .iter()
        .position(|h| DATE_HEADERS.contains(&h.as_str()))
        .filter(|idx| !numbers.contains(idx));

    let bonus = normalized
        .iter()
        .enumerate()
        .filter(|(idx, h)| BONUS_HEADERS.contains(&h.as_str()) && !numbers.contains(idx))
        .map(|(idx, _)| idx)
        .collect();

    Some(ColumnLayout { numbers, date, bonus, source })
}

/// Accepts plain integers and integral floats (`"12.0"`).
pub fn parse_number(raw: &str) -> Result<u8> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<u8>() {
        return Ok(n);
    }
    let f = s
        .parse::<f64>()
        .with_context(|| format!("Unable to parse '{}'", s))?;
    if f.fract() != 0.0 || !(0.0..=255.0).contains(&f) {
        bail!("Not a draw number: '{}'", s);
    }
    Ok(f as u8)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn field(record: &csv::StringRecord, idx: usize) -> Result<&str> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .with_context(|| format!("Missing field at index {}", idx))
}

fn parse_record(record: &csv::StringRecord, layout: &ColumnLayout, line: usize) -> Result<Draw> {
    let get = |idx: usize| field(record, idx);

    let mut numbers = [0u8; PICK_COUNT];
    for (slot, &idx) in layout.numbers.iter().enumerate() {
        numbers[slot] = parse_number(get(idx)?)
            .with_context(|| format!("Column {}", idx + 1))?;
    }
    validate_draw(&numbers)?;

    let date = layout.date.and_then(|idx| get(idx).ok()).and_then(parse_date);

    let bonus = layout
        .bonus
        .iter()
        .filter_map(|&idx| get(idx).ok())
        .filter_map(|s| parse_number(s).ok())
        .filter(|&n| n >= 1)
        .collect();

    Ok(Draw { line, date, numbers, bonus })
}

fn resolve_orientation(requested: Orientation, draws: &[Draw]) -> Orientation {
    if requested != Orientation::Auto {
        return requested;
    }
    let first = draws.iter().find_map(|d| d.date);
    let last = draws.iter().rev().find_map(|d| d.date);
    match (first, last) {
        (Some(a), Some(b)) if a > b => Orientation::NewestFirst,
        (Some(a), Some(b)) if a < b => Orientation::OldestFirst,
        _ => {
            log::warn!("Dates do not determine row order, assuming oldest-first");
            Orientation::OldestFirst
        }
    }
}

fn load_records<R: Read>(mut reader: csv::Reader<R>, orientation: Orientation) -> Result<LoadResult> {
    let headers = reader.headers().context("Unable to read CSV header")?.clone();
    let layout = detect_layout(&headers);

    let mut result = LoadResult {
        history: DrawHistory::default(),
        total_records: 0,
        accepted: 0,
        rejected: 0,
        layout: layout.clone(),
        orientation: if orientation == Orientation::Auto { Orientation::OldestFirst } else { orientation },
    };

    let mut draws = Vec::new();

    for record_result in reader.records() {
        result.total_records += 1;
        let line = result.total_records as usize;
        let Some(layout) = &layout else {
            result.rejected += 1;
            continue;
        };
        match record_result {
            Ok(record) => match parse_record(&record, layout, line) {
                Ok(draw) => {
                    draws.push(draw);
                    result.accepted += 1;
                }
                Err(e) => {
                    log::warn!("Row {} rejected: {:#}", line, e);
                    result.rejected += 1;
                }
            },
            Err(e) => {
                log::warn!("Row {} unreadable: {}", line, e);
                result.rejected += 1;
            }
        }
    }

    if layout.is_none() {
        log::warn!(
            "Header has {} columns, need at least {}: no usable data",
            headers.len(),
            PICK_COUNT
        );
        return Ok(result);
    }

    result.orientation = resolve_orientation(orientation, &draws);
    result.history = match result.orientation {
        Orientation::NewestFirst => DrawHistory::from_newest_first(draws),
        _ => DrawHistory::from_chronological(draws),
    };

    log::info!(
        "{} rows read, {} accepted, {} rejected ({:?})",
        result.total_records,
        result.accepted,
        result.rejected,
        result.orientation
    );

    Ok(result)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true).trim(csv::Trim::All);
    builder
}

pub fn load_csv(path: &Path, orientation: Orientation) -> Result<LoadResult> {
    let reader = reader_builder()
        .from_path(path)
        .with_context(|| format!("Unable to open {:?}", path))?;
    load_records(reader, orientation)
}

pub fn load_from_reader<R: Read>(input: R, orientation: Orientation) -> Result<LoadResult> {
    load_records(reader_builder().from_reader(input), orientation)
}
