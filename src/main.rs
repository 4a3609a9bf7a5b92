//! CLI entry point for station_rank.
//!
//! Provides subcommands for ranking stations by propagated importance,
//! normalizing edge lists, and turning exported ridership tables into route
//! weights.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use station_rank::{
    config::RouteWeights,
    fetch::load_source,
    normalize_graph,
    output::{RankRecord, append_ranking, print_json, write_edge_list},
    parser::parse_edge_list,
    pipeline::{RankOptions, Selection, rank_stations},
    ridership::{ReportingPeriod, RidershipTable, line_shares, route_weights_from_shares},
    rlp::RlpConfig,
};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "station_rank")]
#[command(about = "Rank metro stations by propagated importance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank stations relative to a route or a set of target stations
    Rank {
        /// Edge list CSV (source,target,weight); path or URL, optionally .gz
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Use every station of this route as a target
        #[arg(short, long, required_unless_present = "stations", conflicts_with = "stations")]
        route: Option<String>,

        /// Comma-separated target station ids
        #[arg(short, long, value_delimiter = ',')]
        stations: Vec<String>,

        /// Decay applied per additional hop
        #[arg(short, long, default_value_t = RlpConfig::default().epsilon)]
        epsilon: f64,

        /// Longest path length to propagate over
        #[arg(short = 'l', long, default_value_t = RlpConfig::default().max_hops)]
        max_hops: usize,

        /// Normalize edge weights to mean 1, standard deviation 0.2 first
        #[arg(short, long, default_value_t = false)]
        normalize: bool,

        /// JSON file of route weight multipliers
        #[arg(short = 'w', long)]
        route_weights: Option<String>,

        /// Only report the first N stations
        #[arg(short, long)]
        top: Option<usize>,

        /// CSV file to append the ranking to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Normalize the edge weights of an edge list
    Normalize {
        /// Edge list CSV (source,target,weight); path or URL, optionally .gz
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to write the normalized edge list to
        #[arg(short, long)]
        output: String,
    },
    /// Compute line shares of system boardings from exported ridership tables
    Ridership {
        /// Directory holding the exported tables
        #[arg(short, long, default_value = ".")]
        dir: String,

        /// Reporting month, e.g. "March"
        #[arg(short, long)]
        month: String,

        /// Reporting year
        #[arg(short, long)]
        year: i32,

        /// Name of the system-wide table
        #[arg(long, default_value = "gvRailSYS")]
        system: String,

        /// Line table and its route number, e.g. gvRailRed=2
        #[arg(long = "line", value_name = "NAME=ROUTE", value_parser = parse_line_route, required = true)]
        lines: Vec<(String, String)>,

        /// Write route weights built from the latest shares to this JSON file
        #[arg(long)]
        weights_out: Option<String>,
    },
}

fn parse_line_route(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((line, route)) if !line.is_empty() && !route.is_empty() => {
            Ok((line.to_string(), route.to_string()))
        }
        _ => Err(format!("expected NAME=ROUTE, got {value:?}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/station_rank.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("station_rank.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!(error = format!("{e:#}"), "Command failed");
        return Err(e);
    }
    Ok(())
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Rank {
            source,
            route,
            stations,
            epsilon,
            max_hops,
            normalize,
            route_weights,
            top,
            output,
        } => {
            let graph = parse_edge_list(&load_source(&source).await?)
                .with_context(|| format!("Failed to parse edge list {source}"))?;
            info!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "Graph loaded"
            );

            let selection = match route {
                Some(route) => Selection::Route(route),
                None => Selection::Stations(stations.into_iter().map(Into::into).collect()),
            };
            let options = RankOptions {
                rlp: RlpConfig { epsilon, max_hops },
                normalize,
                route_weights: route_weights
                    .as_deref()
                    .map(RouteWeights::load)
                    .transpose()?,
            };

            let mut ranked = rank_stations(&graph, &selection, &options)
                .with_context(|| format!("Ranking failed for {}", selection.label()))?;
            if let Some(top) = top {
                ranked.truncate(top);
            }

            for (i, r) in ranked.iter().enumerate() {
                info!(rank = i + 1, station = %r.station, score = r.score, "Ranked station");
            }

            if let Some(output) = output {
                let records = RankRecord::from_ranking(&selection.label(), &ranked);
                append_ranking(&output, &records)?;
                info!(output, rows = records.len(), "Ranking appended");
            }
        }
        Commands::Normalize { source, output } => {
            let graph = parse_edge_list(&load_source(&source).await?)
                .with_context(|| format!("Failed to parse edge list {source}"))?;
            let normalized = normalize_graph(&graph)
                .with_context(|| format!("Failed to normalize {source}"))?;

            write_edge_list(&output, &normalized)?;
            info!(output, edges = normalized.edge_count(), "Normalized edge list written");
        }
        Commands::Ridership {
            dir,
            month,
            year,
            system,
            lines,
            weights_out,
        } => {
            let period = ReportingPeriod::new(&month, year)?;
            info!(period = %period, lines = lines.len(), "Loading ridership tables");

            let system_table = load_table(&dir, &period, &system)?;
            let line_tables = lines
                .iter()
                .map(|(line, _)| load_table(&dir, &period, line))
                .collect::<Result<Vec<_>>>()?;

            let shares = line_shares(&system_table, &line_tables)
                .with_context(|| format!("No ridership data for {period}"))?;
            print_json(&shares)?;

            if let Some(path) = weights_out {
                let weights = route_weights_from_shares(&shares, &lines);
                weights.save(&path)?;
                info!(path, routes = weights.iter().count(), "Route weights written");
            }
        }
    }

    Ok(())
}

/// Opens `{dir}/{line}{Month}{year}.csv` and parses it.
#[tracing::instrument(skip(period), fields(period = %period))]
fn load_table(dir: &str, period: &ReportingPeriod, line: &str) -> Result<RidershipTable> {
    let path = Path::new(dir).join(period.table_file_name(line));
    let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(RidershipTable::from_reader(line, file)?)
}
