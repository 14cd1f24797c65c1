use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, ensure};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use metro_router::domain::StationCode;
use metro_router::network::{InterchangePolicy, LoaderConfig, load_from_path};
use metro_router::planner::{PathError, Planner, RouteDto};

/// Exit status when the source station is not in the network.
const EXIT_UNKNOWN_SOURCE: u8 = 2;

/// Exit status when the destination station is not in the network.
const EXIT_UNKNOWN_DESTINATION: u8 = 3;

/// Exit status when the destination cannot be reached from the source.
const EXIT_UNREACHABLE: u8 = 4;

/// Find the route with the fewest stops between two metro stations.
#[derive(Parser)]
#[command(name = "metro-router")]
#[command(version)]
struct Cli {
    /// Station file with code, name, line and num columns
    #[arg(short, long, env = "METRO_STATIONS")]
    stations: PathBuf,

    /// Station code to start from (e.g. NS10)
    from: String,

    /// Station code to route to (e.g. CC17)
    to: String,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Which same-named stations count as interchanges
    #[arg(long, value_enum, default_value_t = Interchanges::All)]
    interchanges: Interchanges,

    /// Field delimiter of the station file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// The station file has no header row
    #[arg(long)]
    no_headers: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Interchanges {
    /// Every pair of stations sharing a name
    All,
    /// Only same-named stations on different lines
    DistinctLines,
}

impl From<Interchanges> for InterchangePolicy {
    fn from(value: Interchanges) -> Self {
        match value {
            Interchanges::All => InterchangePolicy::AllSameName,
            Interchanges::DistinctLines => InterchangePolicy::DistinctLinesOnly,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    ensure!(
        cli.delimiter.is_ascii(),
        "delimiter must be a single ASCII character, got {:?}",
        cli.delimiter
    );

    let config = LoaderConfig::default()
        .with_delimiter(cli.delimiter as u8)
        .with_headers(!cli.no_headers)
        .with_interchanges(cli.interchanges.into());

    let network = load_from_path(&cli.stations, &config)
        .with_context(|| format!("failed to load stations from {}", cli.stations.display()))?;
    info!(
        stations = network.len(),
        connections = network.connection_count(),
        "Network loaded"
    );

    let Ok(from) = StationCode::parse(&cli.from) else {
        eprintln!("error: unknown source station: {:?}", cli.from);
        return Ok(ExitCode::from(EXIT_UNKNOWN_SOURCE));
    };
    let Ok(to) = StationCode::parse(&cli.to) else {
        eprintln!("error: unknown destination station: {:?}", cli.to);
        return Ok(ExitCode::from(EXIT_UNKNOWN_DESTINATION));
    };

    let mut planner = Planner::new(&network);
    if let Err(e) = planner.run(&from) {
        eprintln!("error: {e}");
        return Ok(ExitCode::from(EXIT_UNKNOWN_SOURCE));
    }

    match planner.shortest_path(&to) {
        Ok(route) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&RouteDto::from(&route))?);
            } else {
                println!("{route}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ PathError::Unreachable { .. }) => {
            println!("{e}");
            Ok(ExitCode::from(EXIT_UNREACHABLE))
        }
        Err(e @ PathError::UnknownStation(_)) => {
            eprintln!("error: {e}");
            Ok(ExitCode::from(EXIT_UNKNOWN_DESTINATION))
        }
        Err(e @ PathError::NotRun) => Err(e.into()),
    }
}
