use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use sayisal_data::loader::{LayoutSource, LoadResult};
use sayisal_data::models::DrawHistory;
use sayisal_engine::bucket::{shape_pattern, BucketConvention, ShapePattern};
use sayisal_engine::frequency::{Classification, NumberStats, NumberTag};
use sayisal_engine::generator::Candidate;
use sayisal_engine::patterns::PatternScore;
use sayisal_engine::report::{CandidateKind, Report};
use sayisal_engine::transition::{PatternPrediction, PredictionSource};

const BAR_WIDTH: usize = 30;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn bar(value: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (value as usize * BAR_WIDTH + max as usize / 2) / max as usize;
    "█".repeat(len)
}

fn tag_color(tag: NumberTag) -> Color {
    match tag {
        NumberTag::Hot => Color::Green,
        NumberTag::Cold => Color::Red,
        NumberTag::Neutral => Color::White,
    }
}

pub fn display_load_summary(result: &LoadResult) {
    println!("Loaded:");
    println!("  Rows read      : {}", result.total_records);
    println!("  Accepted draws : {}", result.accepted);
    if result.rejected > 0 {
        println!("  Rejected rows  : {}", result.rejected);
    }
    if let Some(layout) = &result.layout {
        let source = match layout.source {
            LayoutSource::Header => "header",
            LayoutSource::Positional => "positional",
        };
        println!("  Columns        : {} ({:?})", source, layout.numbers);
    }
    println!("  Orientation    : {:?}", result.orientation);
}

pub fn display_draws(history: &DrawHistory, last: usize, convention: BucketConvention) {
    if history.is_empty() {
        println!("No draw to show.");
        return;
    }

    let mut table = new_table(vec!["Line", "Date", "Numbers", "Bonus", "Pattern"]);
    for draw in history.newest_first().take(last) {
        let date = draw
            .date
            .map(|d| d.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            draw.line.to_string(),
            date,
            format_numbers(&draw.sorted()),
            format_numbers(&draw.bonus),
            shape_pattern(draw, convention).to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_stats(stats: &[NumberStats], classification: &Classification, draws: usize) {
    println!("\nStatistics over {} draws\n", draws);

    let max = stats.iter().map(|s| s.frequency).max().unwrap_or(0);
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));

    let mut table = new_table(vec!["Number", "Frequency", "Gap", "Tag", ""]);
    for stat in &sorted {
        let tag = classification.tag(stat.number);
        table.add_row(vec![
            Cell::new(format!("{:2}", stat.number)),
            Cell::new(stat.frequency),
            Cell::new(stat.gap),
            Cell::new(tag.to_string()).fg(tag_color(tag)),
            Cell::new(bar(stat.frequency, max)),
        ]);
    }
    println!("{table}");

    display_classes(&classification.hot(), &classification.neutral(), &classification.cold());
}

fn display_classes(hot: &[u8], neutral: &[u8], cold: &[u8]) {
    let mut table = new_table(vec!["Tag", "Count", "Numbers"]);
    for (tag, numbers) in [
        (NumberTag::Hot, hot),
        (NumberTag::Neutral, neutral),
        (NumberTag::Cold, cold),
    ] {
        let list = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        table.add_row(vec![
            Cell::new(tag.to_string()).fg(tag_color(tag)),
            Cell::new(numbers.len()),
            Cell::new(list),
        ]);
    }
    println!("{table}");
}

fn pair_table(pairs: &[((u8, u8), u32)]) -> Table {
    let mut table = new_table(vec!["#", "Pair", "Together"]);
    for (i, ((a, b), count)) in pairs.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format!("{:2} - {:2}", a, b),
            count.to_string(),
        ]);
    }
    table
}

pub fn display_pairs(all_time: &[((u8, u8), u32)], recent: &[((u8, u8), u32)], window: usize) {
    println!("\n── Pairs (all draws) ──");
    println!("{}", pair_table(all_time));
    println!("\n── Pairs (last {} draws) ──", window);
    println!("{}", pair_table(recent));
}

pub fn display_positions(leaderboards: &[Vec<(u8, u32)>], draws: usize) {
    println!("\n── Positions ──");
    let mut table = new_table(vec!["Slot", "Leaders (number × count, share)"]);
    for (slot, leaders) in leaderboards.iter().enumerate() {
        let cells = leaders
            .iter()
            .map(|(n, c)| {
                let share = if draws > 0 { *c as f64 * 100.0 / draws as f64 } else { 0.0 };
                format!("{:2}×{} ({:.1}%)", n, c, share)
            })
            .collect::<Vec<_>>()
            .join("  ");
        table.add_row(vec![format!("{}", slot + 1), cells]);
    }
    println!("{table}");
}

fn count_table(counts: &[(ShapePattern, u32)], draws: usize) -> Table {
    let mut table = new_table(vec!["Pattern", "Count", "Share"]);
    for (pattern, count) in counts {
        let share = if draws > 0 { *count as f64 * 100.0 / draws as f64 } else { 0.0 };
        table.add_row(vec![pattern.to_string(), count.to_string(), format!("{:.1}%", share)]);
    }
    table
}

pub fn display_patterns(
    counts: &[(ShapePattern, u32)],
    normalized: &[(ShapePattern, u32)],
    scores: &[PatternScore],
    draws: usize,
) {
    println!("\n── Shape patterns ──");
    println!("{}", count_table(counts, draws));
    println!("\n── Shapes (run order ignored) ──");
    println!("{}", count_table(normalized, draws));

    println!("\n── Pattern scores ──");
    let mut table = new_table(vec!["Pattern", "Share", "Absent lately", "Streak", "Score"]);
    for score in scores {
        table.add_row(vec![
            Cell::new(score.pattern.to_string()),
            Cell::new(format!("{:.1}%", score.share * 100.0)),
            Cell::new(if score.absent_recently { "yes" } else { "" }),
            Cell::new(if score.streak { "yes" } else { "" }).fg(Color::Red),
            Cell::new(format!("{:.3}", score.score)),
        ]);
    }
    println!("{table}");
}

pub fn display_prediction(prediction: &PatternPrediction) {
    let context = prediction
        .context
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" → ");
    match &prediction.source {
        PredictionSource::Transition { support, observations } => println!(
            "\nNext pattern: {} (after {}: {} of {} transitions)",
            prediction.pattern, context, support, observations
        ),
        PredictionSource::GlobalFallback => println!(
            "\nNext pattern: {} (no transition recorded after {}, most common pattern used)",
            prediction.pattern, context
        ),
    }
}

pub fn display_candidates(candidates: &[(String, &Candidate)]) {
    println!("\n── Candidates ──");
    let mut table = new_table(vec!["", "Numbers", "Pattern", "Score"]);
    for (label, candidate) in candidates {
        let pattern = if candidate.achieved == candidate.target {
            candidate.target.to_string()
        } else {
            format!("{} (wanted {})", candidate.achieved, candidate.target)
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_numbers(&candidate.numbers)).fg(Color::Green),
            Cell::new(pattern),
            Cell::new(format!("{:.2}", candidate.score)),
        ]);
    }
    println!("{table}");
}

pub fn display_report(report: &Report) {
    println!(
        "\n{} draws, latest {} ({})",
        report.draws,
        format_numbers(&report.latest.sorted()),
        report.latest_pattern
    );

    display_patterns(&report.top_patterns, &report.top_normalized, &report.pattern_scores, report.draws);

    println!("\n── Most drawn numbers ──");
    let max = report.top_frequencies.first().map(|(_, c)| *c).unwrap_or(0);
    let mut table = new_table(vec!["Number", "Frequency", ""]);
    for (n, c) in &report.top_frequencies {
        table.add_row(vec![format!("{:2}", n), c.to_string(), bar(*c, max)]);
    }
    println!("{table}");
    display_classes(&report.hot, &report.neutral, &report.cold);

    display_pairs(&report.top_pairs, &report.top_recent_pairs, report.pair_window);
    display_positions(&report.positions, report.draws);
    display_prediction(&report.prediction);

    let mut scored = 0;
    let labelled: Vec<(String, &Candidate)> = report
        .candidates
        .iter()
        .map(|c| {
            let label = match c.kind {
                CandidateKind::Primary => "Primary".to_string(),
                CandidateKind::Alternative => "Alternative".to_string(),
                CandidateKind::Scored => {
                    scored += 1;
                    format!("Scored #{}", scored)
                }
            };
            (label, &c.candidate)
        })
        .collect();
    display_candidates(&labelled);
}
