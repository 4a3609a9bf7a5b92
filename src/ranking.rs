//! Turning score vectors into ordered station lists.

use ndarray::Array1;
use serde::Serialize;

use crate::error::{RankError, Result};
use crate::graph::{NodeList, StationId};

/// A station paired with its propagated score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    pub station: StationId,
    pub score: f64,
}

/// Stations with a non-zero score, highest first. Equal scores keep their
/// node-list order.
///
/// # Errors
///
/// [`RankError::DimensionMismatch`] when `scores` and `node_list` differ in
/// length.
pub fn ranked_scores(scores: &Array1<f64>, node_list: &NodeList) -> Result<Vec<RankedStation>> {
    if scores.len() != node_list.len() {
        return Err(RankError::DimensionMismatch {
            what: "score vector length",
            expected: node_list.len(),
            found: scores.len(),
        });
    }

    let mut ranked: Vec<RankedStation> = scores
        .iter()
        .zip(node_list.iter())
        .filter(|(score, _)| **score != 0.0)
        .map(|(&score, station)| RankedStation {
            station: station.clone(),
            score,
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

/// Station ids of [`ranked_scores`], without the scores.
pub fn get_ranked_stations(scores: &Array1<f64>, node_list: &NodeList) -> Result<Vec<StationId>> {
    Ok(ranked_scores(scores, node_list)?
        .into_iter()
        .map(|r| r.station)
        .collect())
}
