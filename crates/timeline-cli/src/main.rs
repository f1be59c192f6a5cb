//! timeline-viz CLI - Timeline chart pipeline
//!
//! Command-line interface for turning dashboard query results into timeline
//! chart options and inspecting the records they contain.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use timeline_core::{build_display_records, compute_extents, find_label_collisions, Renderer};
use timeline_render::{QueryResponse, TableRenderer, TimelineChart, VisConfig, DEFAULT_COLOR_RANGE};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "timeline-viz")]
#[command(author, version, about = "Timeline chart pipeline for dashboard query results", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build chart options JSON from a query result
    Chart {
        /// Query result file ({"fields": ..., "data": [...]})
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Visualization config (TOML, or JSON by extension)
        #[arg(short, long, env = "TIMELINE_VIZ_CONFIG")]
        config: Option<PathBuf>,

        /// Container width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Container height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Smallest row height before the chart scrolls
        #[arg(long, default_value_t = 30)]
        min_item_height: u32,

        /// Date of the reference line (defaults to now)
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the display records a query result produces
    Records {
        /// Query result file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Visualization config (TOML, or JSON by extension)
        #[arg(short, long, env = "TIMELINE_VIZ_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the default color palette
    Palette,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Chart {
            file,
            config,
            width,
            height,
            min_item_height,
            today,
            output,
        } => {
            let response = load_query(&file)?;
            let config = load_config(config.as_deref())?;
            let rows = response.to_rows().context("failed to read query rows")?;
            info!(rows = rows.len(), file = %file.display(), "loaded query result");

            let mut chart = TimelineChart::new()
                .container(width, height)
                .min_item_height(min_item_height);
            if let Some(date) = today {
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .context("invalid --today date")?
                    .and_utc();
                chart = chart.today(midnight);
            }

            let options = chart.build(&rows, &config)?;
            let json = options.to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(output = %path.display(), "wrote chart options");
                }
                None => println!("{}", json),
            }
        }
        Commands::Records {
            file,
            config,
            format,
        } => {
            let response = load_query(&file)?;
            let config = load_config(config.as_deref())?;
            let rows = response.to_rows().context("failed to read query rows")?;
            let records = build_display_records(&rows, &config.color_range)
                .context("cannot color rows without a palette")?;

            let collisions = find_label_collisions(&records);
            if !collisions.is_empty() {
                warn!(labels = ?collisions, "deduplicated labels collide with raw labels");
            }

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Text => {
                    let table = TableRenderer::new()
                        .with_extents()
                        .render(&records, compute_extents(&rows))?;
                    print!("{}", table);
                }
            }
        }
        Commands::Palette => {
            for color in DEFAULT_COLOR_RANGE {
                println!("{}", color);
            }
        }
    }

    Ok(())
}

fn load_query(path: &Path) -> Result<QueryResponse> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    QueryResponse::from_json_str(&source)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<VisConfig> {
    match path {
        Some(path) => VisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(VisConfig::default()),
    }
}
