//! Route weighting configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::graph::StationGraph;
use crate::index::route_id;

/// Maps route numbers to multipliers applied to edges inside that route.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "1": 0.21,
///   "2": 0.34
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteWeights {
    entries: BTreeMap<String, f64>,
}

impl RouteWeights {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
        let weights: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid route weights in {path}"))?;
        if let Some((route, w)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            anyhow::bail!("Route {route} in {path} has non-finite weight {w}");
        }
        Ok(weights)
    }

    /// Writes the config as pretty JSON.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {path}"))?;
        Ok(())
    }

    pub fn insert(&mut self, route: impl Into<String>, weight: f64) {
        self.entries.insert(route.into(), weight);
    }

    /// Returns the multiplier for `route`, if one is configured.
    pub fn get(&self, route: &str) -> Option<f64> {
        self.entries.get(route).copied()
    }

    /// Iterates over all `(route, multiplier)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of `graph` whose intra-route edges are scaled by their
    /// route's multiplier. When both endpoints match several routes the
    /// longest route number wins; edges crossing routes are left alone.
    pub fn apply(&self, graph: &StationGraph) -> StationGraph {
        let nodes = graph.nodes();
        let members: Vec<(&str, f64, HashSet<usize>)> = self
            .iter()
            .map(|(route, w)| {
                let positions: HashSet<usize> = route_id(route, nodes)
                    .iter()
                    .filter_map(|id| nodes.position(id))
                    .collect();
                (route, w, positions)
            })
            .collect();

        let mut weighted = graph.clone();
        let mut scaled = 0usize;
        for (key, w) in graph.edges() {
            let (i, j) = key.endpoints();
            let multiplier = members
                .iter()
                .filter(|(_, _, set)| set.contains(&i) && set.contains(&j))
                .max_by_key(|(route, _, _)| route.len())
                .map(|(_, m, _)| *m);
            if let Some(m) = multiplier {
                weighted.set_weight(key, w * m);
                scaled += 1;
            }
        }
        debug!(routes = members.len(), scaled, "Route weights applied");

        weighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StationId;

    fn two_route_graph() -> StationGraph {
        let mut g = StationGraph::new();
        g.add_edge("801001", "801002", 2.0).unwrap();
        g.add_edge("801002", "802001", 2.0).unwrap();
        g.add_edge("802001", "802002", 2.0).unwrap();
        g
    }

    fn w(g: &StationGraph, a: &str, b: &str) -> f64 {
        g.weight(&StationId::from(a), &StationId::from(b)).unwrap()
    }

    #[test]
    fn test_apply_scales_only_intra_route_edges() {
        let mut weights = RouteWeights::default();
        weights.insert("1", 0.5);

        let g = weights.apply(&two_route_graph());
        assert_eq!(w(&g, "801001", "801002"), 1.0);
        assert_eq!(w(&g, "801002", "802001"), 2.0);
        assert_eq!(w(&g, "802001", "802002"), 2.0);
    }

    #[test]
    fn test_longest_route_wins() {
        let mut g = StationGraph::new();
        g.add_edge("801201", "801202", 1.0).unwrap();
        let mut weights = RouteWeights::default();
        weights.insert("1", 3.0);
        weights.insert("12", 5.0);

        assert_eq!(w(&weights.apply(&g), "801201", "801202"), 5.0);
    }

    #[test]
    fn test_load_and_save() {
        let path = format!(
            "{}/station_rank_test_weights.json",
            std::env::temp_dir().display()
        );
        let mut weights = RouteWeights::default();
        weights.insert("2", 0.25);
        weights.save(&path).unwrap();

        let loaded = RouteWeights::load(&path).unwrap();
        assert_eq!(loaded.get("2"), Some(0.25));
        assert_eq!(loaded, weights);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_non_numeric() {
        let path = format!(
            "{}/station_rank_test_bad_weights.json",
            std::env::temp_dir().display()
        );
        std::fs::write(&path, r#"{"1": "heavy"}"#).unwrap();
        assert!(RouteWeights::load(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
