//! CSV edge-list parser for station graphs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::StationGraph;

/// One row of an edge list: `source,target,weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Decodes a headered `source,target,weight` CSV into a [`StationGraph`].
///
/// Stations are indexed in order of first appearance.
///
/// # Errors
///
/// Returns an error naming the offending line if a row cannot be decoded or
/// carries a non-finite weight.
pub fn parse_edge_list(bytes: &[u8]) -> Result<StationGraph> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let mut graph = StationGraph::new();

    for result in rdr.deserialize() {
        let record: EdgeRecord = result.context("Malformed edge list row")?;
        graph
            .add_edge(record.source.as_str(), record.target.as_str(), record.weight)
            .with_context(|| {
                format!(
                    "Invalid edge {} - {} in edge list",
                    record.source, record.target
                )
            })?;
    }

    Ok(graph)
}
