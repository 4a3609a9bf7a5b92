//! End-to-end ranking: graph and target selection in, ranked stations out.

use tracing::info;

use crate::config::RouteWeights;
use crate::error::{RankError, Result};
use crate::graph::{StationGraph, StationId};
use crate::index::{indicator_vector, route_id};
use crate::normalize::normalize_graph;
use crate::ranking::{RankedStation, ranked_scores};
use crate::rlp::RlpConfig;

/// Which stations act as propagation sources.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Every station on a route, by the `"80" + route` id prefix.
    Route(String),
    /// An explicit list of stations.
    Stations(Vec<StationId>),
}

impl Selection {
    pub fn targets(&self, graph: &StationGraph) -> Vec<StationId> {
        match self {
            Selection::Route(route) => route_id(route, graph.nodes()),
            Selection::Stations(ids) => ids.clone(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Selection::Route(route) => format!("route {route}"),
            Selection::Stations(ids) => {
                let ids: Vec<&str> = ids.iter().map(StationId::as_str).collect();
                format!("stations {}", ids.join(" "))
            }
        }
    }
}

/// Options applied between loading a graph and propagating over it.
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    pub rlp: RlpConfig,
    pub normalize: bool,
    pub route_weights: Option<RouteWeights>,
}

/// Weights, optionally normalizes, propagates from `selection` and ranks.
///
/// # Errors
///
/// Any [`RankError`] from the stages; an empty target set is
/// [`RankError::InsufficientData`].
#[tracing::instrument(skip_all, fields(selection = %selection.label()))]
pub fn rank_stations(
    graph: &StationGraph,
    selection: &Selection,
    options: &RankOptions,
) -> Result<Vec<RankedStation>> {
    let targets = selection.targets(graph);
    if targets.is_empty() {
        return Err(RankError::InsufficientData(format!(
            "{} matches no station",
            selection.label()
        )));
    }

    let weighted = match &options.route_weights {
        Some(weights) => weights.apply(graph),
        None => graph.clone(),
    };
    let prepared = if options.normalize {
        normalize_graph(&weighted)?
    } else {
        weighted
    };

    let f = indicator_vector(&targets, prepared.nodes())?;
    let scores = options.rlp.run(&f, &prepared.adjacency_matrix())?;
    let ranked = ranked_scores(&scores, prepared.nodes())?;

    info!(
        targets = targets.len(),
        ranked = ranked.len(),
        nodes = prepared.node_count(),
        "Stations ranked"
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> StationGraph {
        let mut g = StationGraph::new();
        g.add_edge("801001", "801002", 1.0).unwrap();
        g.add_edge("801002", "802001", 1.0).unwrap();
        g.add_edge("802001", "802002", 1.0).unwrap();
        g
    }

    #[test]
    fn test_route_selection() {
        let ranked = rank_stations(
            &line(),
            &Selection::Route("1".into()),
            &RankOptions::default(),
        )
        .unwrap();
        assert_eq!(ranked[0].station, StationId::from("801002"));
        assert!(ranked.iter().all(|r| r.score > 0.0));
    }

    #[test]
    fn test_unknown_station() {
        let err = rank_stations(
            &line(),
            &Selection::Stations(vec!["809999".into()]),
            &RankOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RankError::NotFound {
                station: "809999".into()
            }
        );
    }

    #[test]
    fn test_empty_route() {
        let err = rank_stations(
            &line(),
            &Selection::Route("9".into()),
            &RankOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RankError::InsufficientData(_)));
    }

    #[test]
    fn test_normalize_needs_varied_weights() {
        let options = RankOptions {
            normalize: true,
            ..Default::default()
        };
        let err = rank_stations(&line(), &Selection::Route("1".into()), &options).unwrap_err();
        assert!(matches!(err, RankError::InsufficientData(_)));
    }

    #[test]
    fn test_label() {
        let selection = Selection::Stations(vec!["a".into(), "b".into()]);
        assert_eq!(selection.label(), "stations a b");
        assert_eq!(Selection::Route("3".into()).label(), "route 3");
    }
}
