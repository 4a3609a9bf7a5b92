//! Translation between station ids and dense node-list positions.

use ndarray::Array1;
use std::fmt::Display;

use crate::error::{RankError, Result};
use crate::graph::{NodeList, StationId};

/// Looks up the position of every station in `node_list`.
///
/// # Errors
///
/// Returns [`RankError::NotFound`] for the first station that is not in the
/// node list.
pub fn station_id_to_index(
    station_ids: &[StationId],
    node_list: &NodeList,
) -> Result<Vec<(StationId, usize)>> {
    station_ids
        .iter()
        .map(|id| {
            node_list
                .position(id)
                .map(|pos| (id.clone(), pos))
                .ok_or_else(|| RankError::NotFound {
                    station: id.clone(),
                })
        })
        .collect()
}

/// Inverse of [`station_id_to_index`].
///
/// # Errors
///
/// Returns [`RankError::IndexOutOfRange`] for an index past the end of the
/// node list.
pub fn index_to_station_id(indices: &[usize], node_list: &NodeList) -> Result<Vec<StationId>> {
    indices
        .iter()
        .map(|&index| {
            node_list
                .get(index)
                .cloned()
                .ok_or(RankError::IndexOutOfRange {
                    index,
                    len: node_list.len(),
                })
        })
        .collect()
}

/// Stations on `route`: ids whose string form starts with `"80"` followed by
/// the route number. An empty route, or one that matches nothing, yields an
/// empty list.
pub fn route_id(route: impl Display, node_list: &NodeList) -> Vec<StationId> {
    let route = route.to_string();
    if route.is_empty() {
        return Vec::new();
    }
    let prefix = format!("80{route}");
    node_list
        .iter()
        .filter(|id| id.as_str().starts_with(&prefix))
        .cloned()
        .collect()
}

/// Target vector with 1.0 at each station's position and 0.0 elsewhere.
pub fn indicator_vector(station_ids: &[StationId], node_list: &NodeList) -> Result<Array1<f64>> {
    let mut f = Array1::zeros(node_list.len());
    for (_, pos) in station_id_to_index(station_ids, node_list)? {
        f[pos] = 1.0;
    }
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> NodeList {
        ["801001", "802001", "803001", "801002"].into_iter().collect()
    }

    #[test]
    fn test_station_id_to_index() {
        let ids = vec![StationId::from("803001"), StationId::from("801001")];
        let mapped = station_id_to_index(&ids, &nodes()).unwrap();
        assert_eq!(
            mapped,
            vec![(StationId::from("803001"), 2), (StationId::from("801001"), 0)]
        );
    }

    #[test]
    fn test_station_id_to_index_missing_station() {
        let ids = vec![StationId::from("801001"), StationId::from("809999")];
        let err = station_id_to_index(&ids, &nodes()).unwrap_err();
        assert_eq!(
            err,
            RankError::NotFound {
                station: "809999".into()
            }
        );
    }

    #[test]
    fn test_index_round_trip() {
        let list = nodes();
        for id in list.iter() {
            let mapped = station_id_to_index(std::slice::from_ref(id), &list).unwrap();
            let indices: Vec<usize> = mapped.iter().map(|(_, i)| *i).collect();
            assert_eq!(index_to_station_id(&indices, &list).unwrap(), vec![id.clone()]);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let err = index_to_station_id(&[0, 4], &nodes()).unwrap_err();
        assert_eq!(err, RankError::IndexOutOfRange { index: 4, len: 4 });
    }

    #[test]
    fn test_route_id() {
        let list: NodeList = ["801001", "802001", "803001"].into_iter().collect();
        assert_eq!(route_id(1, &list), vec![StationId::from("801001")]);
    }

    #[test]
    fn test_route_id_keeps_node_order() {
        assert_eq!(
            route_id("1", &nodes()),
            vec![StationId::from("801001"), StationId::from("801002")]
        );
    }

    #[test]
    fn test_route_id_malformed_route_is_empty() {
        assert!(route_id("x", &nodes()).is_empty());
        assert!(route_id(7, &nodes()).is_empty());
        assert!(route_id("", &nodes()).is_empty());
    }

    #[test]
    fn test_indicator_vector() {
        let f = indicator_vector(&route_id(1, &nodes()), &nodes()).unwrap();
        assert_eq!(f.to_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    }
}
