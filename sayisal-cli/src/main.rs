mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use sayisal_data::loader::load_csv;
use sayisal_data::models::{parse_parity_sequence, DrawHistory, Orientation, PICK_COUNT};
use sayisal_engine::bucket::ShapePattern;
use sayisal_engine::config::{load_config, save_config, EngineConfig};
use sayisal_engine::frequency::{classify, number_stats};
use sayisal_engine::generator::{Candidate, CandidateGenerator, ScoringContext};
use sayisal_engine::pairs::CoOccurrence;
use sayisal_engine::patterns::{normalized_counts, pattern_counts, pattern_scores, pattern_series};
use sayisal_engine::position::PositionTable;
use sayisal_engine::report::{generate_report, ReportResult};
use sayisal_engine::transition::TransitionTable;

use crate::display::{
    display_candidates, display_draws, display_load_summary, display_pairs, display_patterns,
    display_positions, display_prediction, display_report, display_stats,
};

#[derive(Parser)]
#[command(name = "sayisal", about = "Sayısal Loto draw-history statistics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Source {
    /// CSV file of past draws
    #[arg(short, long)]
    file: PathBuf,

    /// JSON engine configuration (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Row order of the file
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Seed for reproducible candidates
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Full report: statistics, predicted pattern and candidates
    Report {
        #[command(flatten)]
        source: Source,
    },

    /// List the latest draws with their shape pattern
    List {
        #[command(flatten)]
        source: Source,

        /// Number of draws to show
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Frequencies, gaps and hot/neutral/cold tags
    Stats {
        #[command(flatten)]
        source: Source,

        /// Only the latest W draws
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Most frequent pairs, all-time and recent
    Pairs {
        #[command(flatten)]
        source: Source,

        #[arg(short, long, default_value = "15")]
        top: usize,
    },

    /// Leaderboard of each sorted position
    Positions {
        #[command(flatten)]
        source: Source,

        #[arg(short, long, default_value = "5")]
        top: usize,
    },

    /// Shape pattern counts, scores and next-pattern prediction
    Patterns {
        #[command(flatten)]
        source: Source,

        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Generate combinations for a given shape pattern
    Generate {
        #[command(flatten)]
        source: Source,

        /// Shape pattern, e.g. 2-1-1-1-1
        #[arg(short, long)]
        pattern: String,

        /// Six parities, e.g. odd,even,odd,odd,even,even
        #[arg(long)]
        parity: Option<String>,

        /// Number of combinations (rank offsets 0..N)
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },

    /// Write the default configuration as JSON
    Config {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Report { source } => cmd_report(&source),
        Command::List { source, last } => cmd_list(&source, last),
        Command::Stats { source, window } => cmd_stats(&source, window),
        Command::Pairs { source, top } => cmd_pairs(&source, top),
        Command::Positions { source, top } => cmd_positions(&source, top),
        Command::Patterns { source, top } => cmd_patterns(&source, top),
        Command::Generate {
            source,
            pattern,
            parity,
            count,
        } => cmd_generate(&source, &pattern, parity.as_deref(), count),
        Command::Config { output } => cmd_config(output.as_deref()),
    }
}

fn engine_config(source: &Source) -> Result<EngineConfig> {
    let mut config = match &source.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(orientation) = source.orientation {
        config.orientation = orientation;
    }
    if let Some(seed) = source.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// `None` once the "no usable data" message has been printed.
fn load(source: &Source) -> Result<Option<(DrawHistory, EngineConfig)>> {
    let config = engine_config(source)?;
    let result = load_csv(&source.file, config.orientation)
        .with_context(|| format!("Unable to load {}", source.file.display()))?;
    display_load_summary(&result);

    if result.history.is_empty() {
        println!("No usable data: no valid draw in {}", source.file.display());
        return Ok(None);
    }
    Ok(Some((result.history, config)))
}

fn cmd_report(source: &Source) -> Result<()> {
    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    match generate_report(&history, &config) {
        ReportResult::Ready(report) => display_report(&report),
        ReportResult::InsufficientData { draws, required } => {
            println!("Not enough data: {} draws, at least {} required.", draws, required);
        }
    }
    Ok(())
}

fn cmd_list(source: &Source, last: usize) -> Result<()> {
    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    display_draws(&history, last, config.bucket_convention);
    Ok(())
}

fn cmd_stats(source: &Source, window: Option<usize>) -> Result<()> {
    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    let history = match window {
        Some(w) => DrawHistory::from_chronological(history.recent(w).to_vec()),
        None => history,
    };
    let stats = number_stats(&history);
    let classification = classify(&history, &config.frequency);
    display_stats(&stats, &classification, history.len());
    Ok(())
}

fn cmd_pairs(source: &Source, top: usize) -> Result<()> {
    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    let pairs = CoOccurrence::build(&history, config.pair_window);
    display_pairs(&pairs.all_time.top_pairs(top), &pairs.recent.top_pairs(top), pairs.window);
    Ok(())
}

fn cmd_positions(source: &Source, top: usize) -> Result<()> {
    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    let table = PositionTable::build(&history, config.position_convention);
    let leaderboards: Vec<Vec<(u8, u32)>> = (0..PICK_COUNT).map(|slot| table.top(slot, top)).collect();
    display_positions(&leaderboards, history.len());
    Ok(())
}

fn cmd_patterns(source: &Source, top: usize) -> Result<()> {
    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    let series = pattern_series(&history, config.bucket_convention);

    let mut counts = pattern_counts(&series);
    counts.truncate(top);
    let mut normalized = normalized_counts(&series);
    normalized.truncate(top);
    let mut scores = pattern_scores(&series, &config.patterns);
    scores.truncate(top);
    display_patterns(&counts, &normalized, &scores, history.len());

    let table = TransitionTable::build(&series, config.patterns.transition_order);
    if let Some(prediction) = table.predict(&series) {
        display_prediction(&prediction);
    }
    Ok(())
}

fn cmd_generate(source: &Source, pattern: &str, parity: Option<&str>, count: usize) -> Result<()> {
    let pattern: ShapePattern = pattern
        .parse()
        .with_context(|| format!("Invalid pattern '{}'", pattern))?;
    let parity = match parity {
        Some(raw) => Some(parse_parity_sequence(raw).context("Invalid --parity")?),
        None => None,
    };

    let Some((history, config)) = load(source)? else {
        return Ok(());
    };
    let ctx = ScoringContext::build(&history, &config);
    let mut generator = CandidateGenerator::new(&ctx, config.seed)
        .with_parity(parity.or(config.generator.parity.clone()))
        .with_observed_only(config.generator.observed_only);

    let offsets: Vec<usize> = (0..count.max(1)).collect();
    let candidates = generator.generate_with_offsets(&pattern, &offsets);
    let labelled: Vec<(String, &Candidate)> = candidates
        .iter()
        .map(|c| (format!("offset {}", c.offset), c))
        .collect();
    display_candidates(&labelled);
    Ok(())
}

fn cmd_config(output: Option<&Path>) -> Result<()> {
    let config = EngineConfig::default();
    match output {
        Some(path) => {
            save_config(&config, path)?;
            println!("Default configuration written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
