//! Output formatting and persistence for rankings and graphs.
//!
//! Supports JSON logging, CSV append of ranking runs, and edge-list export.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::graph::{StationGraph, StationId};
use crate::parser::EdgeRecord;
use crate::ranking::RankedStation;

/// One ranked station of one run, as written to CSV.
#[derive(Debug, Clone, Serialize)]
pub struct RankRecord {
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub rank: usize,
    pub station: StationId,
    pub score: f64,
}

impl RankRecord {
    /// Numbers `ranked` from 1 under a shared run label and timestamp.
    pub fn from_ranking(label: &str, ranked: &[RankedStation]) -> Vec<Self> {
        let timestamp = Utc::now();
        ranked
            .iter()
            .enumerate()
            .map(|(i, r)| RankRecord {
                timestamp,
                label: label.to_string(),
                rank: i + 1,
                station: r.station.clone(),
                score: r.score,
            })
            .collect()
    }
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends [`RankRecord`] rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_ranking(path: &str, records: &[RankRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending ranking");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes `graph` as a `source,target,weight` CSV, replacing `path`.
pub fn write_edge_list(path: &str, graph: &StationGraph) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    let nodes = graph.nodes();

    for (key, weight) in graph.edges() {
        let (i, j) = key.endpoints();
        let (Some(source), Some(target)) = (nodes.get(i), nodes.get(j)) else {
            continue;
        };
        writer.serialize(EdgeRecord {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        })?;
    }
    writer.flush()?;

    debug!(path, edges = graph.edge_count(), "Edge list written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_edge_list;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn ranked() -> Vec<RankedStation> {
        vec![
            RankedStation {
                station: "801101".into(),
                score: 2.5,
            },
            RankedStation {
                station: "801102".into(),
                score: 1.0,
            },
        ]
    }

    #[test]
    fn test_from_ranking_numbers_from_one() {
        let records = RankRecord::from_ranking("route 1", &ranked());
        let ranks: Vec<usize> = records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert_eq!(records[0].timestamp, records[1].timestamp);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&ranked()).unwrap();
    }

    #[test]
    fn test_append_ranking_writes_header_once() {
        let path = temp_path("station_rank_test_header.csv");
        let _ = fs::remove_file(&path);

        let records = RankRecord::from_ranking("run", &ranked());
        append_ranking(&path, &records).unwrap();
        append_ranking(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("timestamp")).count();
        assert_eq!(header_count, 1);
        // 1 header + 2 runs of 2 rows
        assert_eq!(content.lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_edge_list_reloads() {
        let path = temp_path("station_rank_test_edges_out.csv");
        let mut graph = StationGraph::new();
        graph.add_edge("b", "a", 0.75).unwrap();
        graph.add_edge("a", "c", 1.25).unwrap();

        write_edge_list(&path, &graph).unwrap();
        let reloaded = parse_edge_list(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(reloaded, graph);

        fs::remove_file(&path).unwrap();
    }
}
