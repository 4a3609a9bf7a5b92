use station_rank::config::RouteWeights;
use station_rank::normalize_graph;
use station_rank::parser::parse_edge_list;
use station_rank::pipeline::{RankOptions, Selection, rank_stations};
use station_rank::ridership::{
    ReportingPeriod, RidershipTable, line_shares, route_weights_from_shares,
};
use station_rank::stats::{mean, sample_stddev};
use station_rank::{StationId, get_ranked_stations, indicator_vector, rlp};

fn station_ids(ids: &[StationId]) -> Vec<&str> {
    ids.iter().map(StationId::as_str).collect()
}

fn ridership_table(period: &ReportingPeriod, line: &str) -> RidershipTable {
    let path = format!(
        "{}/tests/fixtures/ridership/{}",
        env!("CARGO_MANIFEST_DIR"),
        period.table_file_name(line)
    );
    let file = std::fs::File::open(path).expect("Missing ridership fixture");
    RidershipTable::from_reader(line, file).expect("Failed to parse ridership fixture")
}

#[test]
fn test_four_cycle_pipeline() {
    let graph = parse_edge_list(include_bytes!("fixtures/cycle4.csv")).expect("Failed to parse");
    let nodes = graph.nodes();

    let f = indicator_vector(&[StationId::from("801001")], nodes).unwrap();
    let scores = rlp(&f, &graph.adjacency_matrix(), 0.5, 2).unwrap();
    // one hop reaches both neighbours, the second returns to the source and
    // the opposite corner with twice the mass, halved by the decay
    assert_eq!(scores.to_vec(), vec![1.0, 1.0, 1.0, 1.0]);

    let ranked = get_ranked_stations(&scores, nodes).unwrap();
    assert_eq!(
        station_ids(&ranked),
        vec!["801001", "801002", "801003", "801004"]
    );
}

#[test]
fn test_normalized_route_ranking() {
    let graph = parse_edge_list(include_bytes!("fixtures/metro_edges.csv")).unwrap();
    let options = RankOptions {
        normalize: true,
        ..Default::default()
    };

    let ranked = rank_stations(&graph, &Selection::Route("2".into()), &options).unwrap();
    let order: Vec<&str> = ranked.iter().map(|r| r.station.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "802102", "802103", "802101", "802104", "801102", "801104", "801103", "801101"
        ]
    );
    assert!((ranked[0].score - 7.957087005083128).abs() < 1e-9);
}

#[test]
fn test_normalized_edge_weights() {
    let graph = parse_edge_list(include_bytes!("fixtures/metro_edges.csv")).unwrap();
    let normalized = normalize_graph(&graph).unwrap();

    let weights = normalized.weights();
    let mu = mean(&weights);
    assert!((mu - 1.0).abs() < 1e-12);
    assert!((sample_stddev(&weights, mu).unwrap() - 0.2).abs() < 1e-12);
    assert_eq!(normalized.nodes(), graph.nodes());
}

#[test]
fn test_ridership_route_weights() {
    let period = ReportingPeriod::new("March", 2023).unwrap();
    let system = ridership_table(&period, "gvRailSYS");
    let lines = vec![
        ridership_table(&period, "gvRailBlue"),
        ridership_table(&period, "gvRailRed"),
    ];

    let shares = line_shares(&system, &lines).unwrap();
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].shares, vec![Some(0.25), Some(0.225), Some(0.25)]);

    let routes = vec![
        ("gvRailBlue".to_string(), "1".to_string()),
        ("gvRailRed".to_string(), "2".to_string()),
    ];
    let weights = route_weights_from_shares(&shares, &routes);
    assert_eq!(weights.get("1"), Some(0.25));
    assert_eq!(weights.get("2"), Some(0.4));
}

#[test]
fn test_route_weights_shift_ranking() {
    let graph = parse_edge_list(include_bytes!("fixtures/metro_edges.csv")).unwrap();
    let selection = Selection::Stations(vec!["801102".into()]);

    let plain = rank_stations(&graph, &selection, &RankOptions::default()).unwrap();

    let mut weights = RouteWeights::default();
    weights.insert("1", 10.0);
    let options = RankOptions {
        route_weights: Some(weights),
        ..Default::default()
    };
    let boosted = rank_stations(&graph, &selection, &options).unwrap();

    let score = |ranked: &[station_rank::RankedStation], id: &str| {
        ranked
            .iter()
            .find(|r| r.station.as_str() == id)
            .map(|r| r.score)
            .unwrap()
    };
    assert!(score(&boosted, "801103") > score(&plain, "801103"));
    assert_eq!(plain.len(), boosted.len());
}
