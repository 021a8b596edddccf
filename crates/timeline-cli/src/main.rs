//! `timeline` CLI: lay out form-submitted events on the schedule grid.
//!
//! ## Usage
//!
//! ```sh
//! # Full layout (columns and grid positions) from an export on stdin
//! curl -s "$EVENTS_URL" | timeline layout
//!
//! # Narrow-viewport column metrics, custom grid from a TOML file
//! timeline --compact --config grid.toml layout -i export.json -o layout.json
//!
//! # Events grouped by day, for jump links
//! timeline days -i export.json
//!
//! # Row of the "now" indicator
//! timeline now --at 2025-06-10T14:20
//! ```
//!
//! Logs go to stderr; `TIMELINE_LOG` overrides the `-v` level.

use std::io::{self, IsTerminal, Read};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use timeline_engine::event::sort_by_submission_time;
use timeline_engine::intake::parse_export;
use timeline_engine::{
    group_by_date, layout, now_position, split_events, CivilDate, CivilDateTime, Event,
    GridConfig, TimelineEntry,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TIMELINE_LOG";

#[derive(Parser)]
#[command(
    name = "timeline",
    version,
    about = "Lay out multi-day events on a fixed civil-time grid"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with grid settings (range, hours, chunk and column sizes)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Use narrow-viewport column width and gap
    #[arg(long, global = true)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Split, assign columns and place every event on the grid
    Layout {
        /// Submission export (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Group event days by date for jump navigation
    ///
    /// Times are the grid's day segments, so a day without a stated window
    /// reads 06:00-23:59, the same span `layout` places.
    Days {
        /// Submission export (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show where the "now" indicator sits on the grid
    Now {
        /// Timestamp to use instead of the current time
        #[arg(long)]
        at: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Serialize)]
struct LayoutReport {
    entries: Vec<TimelineEntry>,
    max_column: usize,
    total_width: i64,
    total_days: i64,
    skipped: Vec<Skipped>,
}

#[derive(Serialize)]
struct Skipped {
    submission_id: String,
    reason: String,
}

#[derive(Serialize)]
struct DayGroup {
    date: CivilDate,
    anchor: String,
    heading: String,
    events: Vec<String>,
}

#[derive(Serialize)]
struct NowReport {
    now: CivilDateTime,
    top: Option<i64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let config = load_config(cli.config.as_deref(), cli.compact)?;

    match cli.command {
        Commands::Layout { input, output } => {
            let (events, skipped) = read_events(input.as_deref())?;
            let timeline = layout(&events, &config).context("Failed to lay out events")?;
            let report = LayoutReport {
                entries: timeline.entries(&config),
                max_column: timeline.max_column,
                total_width: timeline.total_width,
                total_days: timeline.total_days,
                skipped,
            };
            write_json(output.as_deref(), &report)?;
        }
        Commands::Days { input, output } => {
            let (events, _) = read_events(input.as_deref())?;
            let segments = split_events(&events).context("Failed to split events")?;
            let groups: Vec<DayGroup> = group_by_date(&segments)
                .into_iter()
                .map(|(date, day)| {
                    let heading = CivilDateTime::from_date(date);
                    DayGroup {
                        date,
                        anchor: timeline_engine::civil::anchor_id(date),
                        heading: heading.long_heading(),
                        events: day
                            .iter()
                            .map(|s| format!("{} {}-{}", s.title(), s.start_time, s.end_time))
                            .collect(),
                    }
                })
                .collect();
            write_json(output.as_deref(), &groups)?;
        }
        Commands::Now { at, output } => {
            let now = match at.as_deref() {
                Some(raw) => CivilDateTime::parse(raw)
                    .with_context(|| format!("Invalid --at timestamp: {raw}"))?,
                None => CivilDateTime::now(),
            };
            let report = NowReport {
                now,
                top: now_position(&now, &config),
            };
            write_json(output.as_deref(), &report)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid {LOG_ENV_VAR} filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Defaults, overlaid by the TOML file if given, then the `--compact` metrics.
fn load_config(path: Option<&str>, compact: bool) -> Result<GridConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            toml::from_str::<GridConfig>(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => GridConfig::default(),
    };
    if compact {
        config = config.with_compact_columns();
    }
    config.validate().context("Invalid grid configuration")?;
    tracing::debug!(?config, "grid configuration");
    Ok(config)
}

/// Read an export and keep the submissions that normalize cleanly, oldest first.
fn read_events(path: Option<&str>) -> Result<(Vec<Event>, Vec<Skipped>)> {
    let raw = read_input(path)?;
    let intakes = parse_export(&raw).context("Failed to parse submission export")?;

    let mut events = Vec::with_capacity(intakes.len());
    let mut skipped = Vec::new();
    for intake in intakes {
        match intake.event {
            Ok(event) => events.push(event),
            Err(err) => {
                tracing::warn!(submission = %intake.submission_id, error = %err, "skipping submission");
                skipped.push(Skipped {
                    submission_id: intake.submission_id,
                    reason: err.to_string(),
                });
            }
        }
    }
    sort_by_submission_time(&mut events);
    tracing::info!(events = events.len(), skipped = skipped.len(), "loaded events");
    Ok((events, skipped))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, content + "\n")
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
