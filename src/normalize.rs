//! Z-score rescaling of edge weights.
//!
//! Edge weights are moved onto a distribution with mean [`TARGET_MEAN`] and
//! standard deviation `1 / SPREAD_DIVISOR`, so graphs weighted by trip
//! counts, frequencies or ridership shares propagate on a comparable scale.
//! The transform is not idempotent: weights clamped to zero move the mean
//! and deviation, so normalizing a normalized graph shifts it again.

use tracing::debug;

use crate::error::{RankError, Result};
use crate::graph::StationGraph;
use crate::stats::{mean, sample_stddev};

pub const TARGET_MEAN: f64 = 1.0;
pub const SPREAD_DIVISOR: f64 = 5.0;

/// Returns a copy of `graph` with every edge weight rescaled to
/// `max(0, (w - mean) / stddev / 5 + 1)`. Node order and topology are kept.
///
/// # Errors
///
/// [`RankError::InsufficientData`] when the graph has fewer than two edges
/// or all weights are equal. [`RankError::NonFiniteStatistic`] when the
/// weights overflow the mean, deviation or a rescaled weight.
#[tracing::instrument(skip(graph), fields(edges = graph.edge_count()))]
pub fn normalize_graph(graph: &StationGraph) -> Result<StationGraph> {
    let weights = graph.weights();
    if weights.len() < 2 {
        return Err(RankError::InsufficientData(format!(
            "normalization needs at least 2 edges, graph has {}",
            weights.len()
        )));
    }

    // rounding leaves a tiny non-zero deviation for equal weights like 0.1
    if weights.iter().all(|w| *w == weights[0]) {
        return Err(RankError::InsufficientData(format!(
            "all {} edge weights equal {}; standard deviation is zero",
            weights.len(),
            weights[0]
        )));
    }

    let mu = mean(&weights);
    if !mu.is_finite() {
        return Err(RankError::NonFiniteStatistic {
            what: "mean",
            value: mu,
        });
    }
    let sigma = sample_stddev(&weights, mu)?;
    if !sigma.is_finite() {
        return Err(RankError::NonFiniteStatistic {
            what: "standard deviation",
            value: sigma,
        });
    }
    if sigma == 0.0 {
        return Err(RankError::InsufficientData(
            "standard deviation of edge weights is zero".to_string(),
        ));
    }
    debug!(mean = mu, stddev = sigma, "Edge weight statistics");

    let mut normalized = StationGraph::with_nodes(graph.nodes().clone());
    let mut clamped = 0usize;
    for (key, w) in graph.edges() {
        let z = (w - mu) / sigma;
        let mut rescaled = z / SPREAD_DIVISOR + TARGET_MEAN;
        if !rescaled.is_finite() {
            return Err(RankError::NonFiniteStatistic {
                what: "rescaled weight",
                value: rescaled,
            });
        }
        if rescaled < 0.0 {
            rescaled = 0.0;
            clamped += 1;
        }
        normalized.set_weight(key, rescaled);
    }
    debug!(clamped, "Edge weights normalized");

    Ok(normalized)
}
