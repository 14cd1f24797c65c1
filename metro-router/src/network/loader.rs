//! Building a network from station records.
//!
//! Each record places one station code at a position on a line. Stations
//! next to each other on a line are connected, and stations that share a
//! display name are connected to each other as interchanges.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::config::{InterchangePolicy, LoaderConfig};
use super::graph::MetroNetwork;
use crate::domain::{ConnectError, InvalidStationCode, StationCode};

/// One row of the station file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationRecord {
    /// Unique station code.
    pub code: String,
    /// Display name, shared by interchange platforms.
    pub name: String,
    /// Line identifier, used only for grouping.
    pub line: String,
    /// Position on the line, used only for ordering.
    pub num: i64,
}

impl StationRecord {
    /// Create a record.
    pub fn new(code: &str, name: &str, line: &str, num: i64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            line: line.to_string(),
            num,
        }
    }
}

/// Errors that abort a network load.
///
/// Any of these means no network is produced: a partial network would
/// silently report wrong distances.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Station file could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record could not be read, including a non-numeric position
    #[error("malformed station record: {0}")]
    Csv(#[from] csv::Error),

    /// A record carries an unusable station code
    #[error("invalid station code {code:?}: {source}")]
    InvalidCode {
        code: String,
        source: InvalidStationCode,
    },

    /// Connecting two loaded stations failed
    #[error("failed to connect stations: {0}")]
    Connect(#[from] ConnectError),
}

/// Read station records from a delimited source.
pub fn read_records<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> Result<Vec<StationRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }

    Ok(records)
}

/// Read a station file and build the network from it.
pub fn load_from_path(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<MetroNetwork, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file, config)?;
    debug!(path = %path.display(), records = records.len(), "Read station records");

    build_network(&records, config)
}

/// Stations of one line as `(position, code)` pairs, in record order.
struct LineGroup<'a> {
    line: &'a str,
    stops: Vec<(i64, StationCode)>,
}

/// Build a network from station records.
///
/// Lines are processed in order of first appearance and interchanges in
/// station insertion order. Connection order decides which of several
/// equally short routes a search reports, so both orders are part of the
/// loader's contract.
pub fn build_network(
    records: &[StationRecord],
    config: &LoaderConfig,
) -> Result<MetroNetwork, LoadError> {
    let mut network = MetroNetwork::new();
    let mut lines: Vec<LineGroup<'_>> = Vec::new();
    let mut line_index: HashMap<&str, usize> = HashMap::new();
    let mut lines_of: HashMap<StationCode, Vec<&str>> = HashMap::new();

    for record in records {
        let code = StationCode::parse(&record.code).map_err(|source| LoadError::InvalidCode {
            code: record.code.clone(),
            source,
        })?;

        if let Some(station) = network.insert(code.clone()) {
            station.name = Some(record.name.clone());
        }

        let idx = *line_index.entry(record.line.as_str()).or_insert_with(|| {
            lines.push(LineGroup {
                line: record.line.as_str(),
                stops: Vec::new(),
            });
            lines.len() - 1
        });
        lines[idx].stops.push((record.num, code.clone()));
        lines_of.entry(code).or_default().push(record.line.as_str());
    }

    let mut line_connections = 0;
    for group in &mut lines {
        group.stops.sort();

        for pair in group.stops.windows(2) {
            let (from, to) = (&pair[0].1, &pair[1].1);
            if from == to {
                warn!(line = group.line, station = %from, "Station listed twice in a row, skipping");
                continue;
            }
            network.connect(from, to)?;
            line_connections += 1;
        }
    }

    let interchanges = interchange_groups(&network);
    let mut interchange_connections = 0;
    for (name, codes) in &interchanges {
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                if share_line(&lines_of, a, b) {
                    match config.interchanges {
                        InterchangePolicy::AllSameName => {
                            warn!(name = name.as_str(), a = %a, b = %b, "Same-named stations on one line connected as interchange");
                        }
                        InterchangePolicy::DistinctLinesOnly => {
                            debug!(name = name.as_str(), a = %a, b = %b, "Skipping same-line interchange");
                            continue;
                        }
                    }
                }
                network.connect(a, b)?;
                interchange_connections += 1;
            }
        }
    }

    debug!(
        stations = network.len(),
        lines = lines.len(),
        line_connections,
        interchange_connections,
        "Network built"
    );

    Ok(network)
}

/// Group station codes by display name, keeping names with more than one
/// station. Names and codes keep station insertion order.
fn interchange_groups(network: &MetroNetwork) -> Vec<(String, Vec<StationCode>)> {
    let mut groups: Vec<(String, Vec<StationCode>)> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for (_, station) in network.stations() {
        let name = station.display_name();
        match by_name.get(name) {
            Some(&idx) => groups[idx].1.push(station.code().clone()),
            None => {
                by_name.insert(name, groups.len());
                groups.push((name.to_string(), vec![station.code().clone()]));
            }
        }
    }

    groups.retain(|(_, codes)| codes.len() > 1);
    groups
}

fn share_line(lines_of: &HashMap<StationCode, Vec<&str>>, a: &StationCode, b: &StationCode) -> bool {
    match (lines_of.get(a), lines_of.get(b)) {
        (Some(a_lines), Some(b_lines)) => a_lines.iter().any(|line| b_lines.contains(line)),
        _ => false,
    }
}
