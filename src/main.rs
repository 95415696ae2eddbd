//! Cyclelog CLI
//!
//! Command-line interface over a local journal file:
//! - Pattern insights, symptom correlations and trends
//! - Cycle statistics and outlook
//! - CSV import into a JSON journal

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use cyclelog::analytics::{
    analyze_patterns, compute_cycle_stats, symptom_correlations, trends, CycleStats,
};
use cyclelog::api::dto::{CorrelationsResponse, CyclesResponse, InsightsResponse, TrendsResponse};
use cyclelog::config::{generate_default_config, Config, LoggingConfig};
use cyclelog::journal::{periods_from_flow, CsvLogImporter, DateRange, Journal, JournalSource};

#[derive(Parser)]
#[command(name = "cyclelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pattern, correlation and trend analysis for your cycle journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Journal file (default: from config)
    #[arg(short, long, global = true)]
    pub journal: Option<PathBuf>,

    /// Config file (default: ~/.config/cyclelog/config.toml or ./cyclelog.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date as YYYY-MM-DD (default: today, UTC)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show pattern insights
    Insights {
        /// Days of logs to analyze, ending today
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(7..=365))]
        days: Option<i64>,
    },

    /// Show symptoms that tend to occur together
    Correlations {
        /// Days of logs to analyze, ending today
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(7..=365))]
        days: Option<i64>,
    },

    /// Compare the earlier and later half of the window
    Trends {
        /// Days of logs to analyze, ending today
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(7..=365))]
        days: Option<i64>,
    },

    /// Show cycle statistics and outlook
    Cycles,

    /// Convert a CSV export into a JSON journal
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Date format (strftime format)
        #[arg(long, default_value = "%Y-%m-%d")]
        date_format: String,
        /// Dry run (don't write the journal)
        #[arg(long)]
        dry_run: bool,
        /// Overwrite an existing journal file
        #[arg(long)]
        force: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    cli_logging(&config.logging, cli.verbose).init()?;

    let journal_path = cli
        .journal
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.journal.path));
    let today = cli.today.unwrap_or_else(|| Utc::now().date_naive());
    let default_days = config.analysis.default_range_days;
    let window = config.analysis.cycle_window;

    match cli.command {
        Commands::Insights { days } => {
            let journal = load_journal(&journal_path)?;
            let range = analysis_range(days.unwrap_or(default_days), today)?;
            let logs = journal.daily_logs(range)?;
            let stats = compute_cycle_stats(&journal.cycle_periods()?, window);
            let report = analyze_patterns(&logs, &stats);

            let response = InsightsResponse {
                insights: report.insights,
                range,
                log_count: logs.len(),
            };

            match cli.format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => {
                    print_range_header("Insights", &response.range, response.log_count);
                    for insight in &response.insights {
                        println!("  [{}] {}", insight.icon, insight.text);
                    }
                }
            }
        }

        Commands::Correlations { days } => {
            let journal = load_journal(&journal_path)?;
            let range = analysis_range(days.unwrap_or(default_days), today)?;
            let logs = journal.daily_logs(range)?;

            let response = CorrelationsResponse {
                correlations: symptom_correlations(&logs),
                range,
                log_count: logs.len(),
            };

            match cli.format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => {
                    print_range_header("Correlations", &response.range, response.log_count);
                    if response.correlations.is_empty() {
                        println!("No symptom pairs occur together often enough yet.");
                    } else {
                        println!("{:<20} {:<20} {:>8} {:>9}", "Symptom", "Symptom", "Strength", "Together");
                        println!("{}", "-".repeat(60));
                        for c in &response.correlations {
                            println!(
                                "{:<20} {:<20} {:>7.0}% {:>9}",
                                c.symptom_a,
                                c.symptom_b,
                                c.correlation * 100.0,
                                c.co_occurrence_count
                            );
                        }
                    }
                }
            }
        }

        Commands::Trends { days } => {
            let journal = load_journal(&journal_path)?;
            let range = analysis_range(days.unwrap_or(default_days), today)?;
            let logs = journal.daily_logs(range)?;

            let response = TrendsResponse {
                trend: trends(&logs),
                range,
                log_count: logs.len(),
            };

            match cli.format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => {
                    print_range_header("Trends", &response.range, response.log_count);
                    match &response.trend {
                        None => println!("Log at least a week of entries to see trends."),
                        Some(trend) => {
                            println!("  Mood:     {}", format_delta(trend.mood_trend));
                            println!("  Energy:   {}", format_delta(trend.energy_trend));
                            println!("  Symptoms: {}", format_delta(Some(trend.symptom_trend)));
                        }
                    }
                }
            }
        }

        Commands::Cycles => {
            let journal = load_journal(&journal_path)?;
            let stats = compute_cycle_stats(&journal.cycle_periods()?, window);
            let response = cycles_response(stats, today);

            match cli.format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => print_cycles(&response),
            }
        }

        Commands::Import {
            path,
            date_format,
            dry_run,
            force,
        } => {
            if !path.exists() {
                bail!("File not found: {}", path.display());
            }

            let result = CsvLogImporter::new()
                .with_date_format(&date_format)
                .import(&path)?;

            println!("Import results:");
            println!("  Rows processed: {}", result.rows_processed);
            println!("  Rows failed: {}", result.rows_failed);
            println!("  Daily logs: {}", result.logs.len());

            if !result.errors.is_empty() {
                println!();
                println!("Errors (first 10):");
                for error in result.errors.iter().take(10) {
                    println!("  {}", error);
                }
            }

            let periods = periods_from_flow(&result.logs, today);
            println!("  Periods derived from flow: {}", periods.len());

            let journal = Journal::new(result.logs, periods)?;

            if dry_run {
                println!();
                println!("(Dry run - no journal was written)");
            } else {
                if journal_path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        journal_path.display()
                    );
                }
                if let Some(parent) = journal_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                journal.save(&journal_path)?;
                println!();
                println!("Journal written to {}", journal_path.display());
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {}", path.display());
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn load_journal(path: &Path) -> anyhow::Result<Journal> {
    Journal::load(path).with_context(|| {
        format!(
            "Cannot read journal {} (create one with `cyclelog import <csv>`)",
            path.display()
        )
    })
}

/// Configured logging, raised to debug by `--verbose`
fn cli_logging(logging: &LoggingConfig, verbose: bool) -> LoggingConfig {
    let mut logging = logging.clone();
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}

fn analysis_range(days: i64, today: NaiveDate) -> anyhow::Result<DateRange> {
    match DateRange::last_days(days, today) {
        Some(range) => Ok(range),
        None => bail!("{} days before {} is out of range", days, today),
    }
}

fn cycles_response(stats: CycleStats, today: NaiveDate) -> CyclesResponse {
    CyclesResponse {
        today,
        current_cycle_day: stats.current_cycle_day(today),
        current_phase: stats.current_phase(today),
        predicted_next_start: stats.predicted_next_start(),
        shortest_cycle: stats.shortest_cycle(),
        longest_cycle: stats.longest_cycle(),
        stats,
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_range_header(title: &str, range: &DateRange, log_count: usize) {
    println!(
        "{} for {} to {} ({} logs)",
        title, range.start, range.end, log_count
    );
    println!();
}

fn print_cycles(response: &CyclesResponse) {
    let stats = &response.stats;
    if stats.cycles.is_empty() {
        println!("No periods recorded yet.");
        return;
    }

    println!("Cycles analyzed: {}", stats.cycles.len());
    println!("  Average cycle length:  {}", format_days(stats.average_cycle_length));
    println!("  Average period length: {}", format_days(stats.average_period_length));
    println!("  Shortest cycle:        {}", format_days(response.shortest_cycle));
    println!("  Longest cycle:         {}", format_days(response.longest_cycle));
    println!();
    println!("As of {}:", response.today);
    match (response.current_cycle_day, response.current_phase) {
        (Some(day), Some(phase)) => println!("  Cycle day {} ({} phase)", day, phase),
        (Some(day), None) => println!("  Cycle day {}", day),
        _ => println!("  Cycle day: -"),
    }
    match response.predicted_next_start {
        Some(date) => println!("  Next period expected around {}", date),
        None => println!("  Next period: not enough cycles to predict"),
    }
}

fn format_days(days: Option<i64>) -> String {
    days.map(|d| format!("{} days", d))
        .unwrap_or_else(|| "-".to_string())
}

fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) if d > 0.0 => format!("+{:.2}", d),
        Some(d) => format!("{:.2}", d),
        None => "-".to_string(),
    }
}
