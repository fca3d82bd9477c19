use indexmap::IndexMap;

use influence_graph::cluster::custom::CustomClusters;
use influence_graph::cluster::{RESEARCH_FOCUS, UNCATEGORIZED_ID};
use influence_graph::layout::bands::BandLayout;
use influence_graph::{
    AccumulatedGraph, Category, ClusterLookup, ClusterMode, Edge, FetchResult, GraphCommand,
    GraphStore, IngestionMerger, Item, LayoutConfig, LayoutEngine, LayoutRequest, Node, Relation,
};

fn fetch(focal: &str, neighbors: &[(&str, Option<i32>, &str)]) -> FetchResult {
    let main = Item::new(focal, focal);
    let relations = neighbors
        .iter()
        .map(|(id, year, category)| {
            let mut item = Item::new(*id, *id);
            item.year = *year;
            Relation::new(item, main.clone(), 0.5, *category)
        })
        .collect();
    FetchResult::incoming(main, relations)
}

fn sample_graph() -> AccumulatedGraph {
    let merger = IngestionMerger::default();
    AccumulatedGraph::default()
        .ingest(
            &merger,
            &fetch("m1", &[("a1", Some(1959), "Cinema"), ("b1", Some(1967), "Music"), ("c1", None, "Music")]),
        )
        .ingest(&merger, &fetch("b1", &[("d1", Some(1940), "Jazz"), ("e1", None, "")]))
}

fn sample_nodes() -> Vec<Node> {
    sample_graph().nodes().values().cloned().collect()
}

#[test]
fn add_nodes_and_edges_is_idempotent() {
    let nodes = vec![
        Node::new("m", "M", Category::Main),
        Node::new("a", "A", Category::Influence).with_year(1960),
    ];
    let edges = vec![Edge::new("a", "m", 0.3)];

    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 3);
    let once = AccumulatedGraph::default()
        .add_nodes_and_edges(nodes.clone(), edges.clone())
        .laid_out(&mut engine, 800.0, 600.0, false, false);
    let twice = once.add_nodes_and_edges(nodes, edges);

    assert_eq!(once, twice);
}

#[test]
fn replayed_fetch_is_idempotent() {
    let merger = IngestionMerger::default();
    let f = fetch("m1", &[("a1", Some(1959), "Cinema")]);
    let once = AccumulatedGraph::default().ingest(&merger, &f);
    assert_eq!(once.ingest(&merger, &f), once);
}

#[test]
fn growth_is_monotonic_until_remove() {
    let merger = IngestionMerger::default();
    let mut graph = AccumulatedGraph::default();
    let fetches = [
        fetch("m1", &[("a1", None, "X"), ("b1", None, "Y")]),
        fetch("a1", &[("b1", None, "Y")]),
        fetch("m1", &[("a1", None, "X")]),
        fetch("z", &[]),
    ];

    for f in &fetches {
        let next = graph.ingest(&merger, f);
        assert!(next.node_count() >= graph.node_count());
        assert!(next.edge_count() >= graph.edge_count());
        graph = next;
    }
}

#[test]
fn remove_cascades_for_every_node() {
    let graph = sample_graph();
    for id in graph.nodes().keys() {
        let selected = graph.select(Some(id.as_str()));
        let removed = selected.remove_node(id);

        assert!(removed.edges().keys().all(|key| !key.touches(id)));
        assert!(removed.edges().values().all(|e| e.source != *id && e.target != *id));
        assert_eq!(removed.selected(), None);
        assert!(removed.highlight().is_empty());
        assert!(!removed.contains_node(id));
    }
}

#[test]
fn custom_clusters_stay_disjoint() {
    let mut store = GraphStore::default();
    store.apply(GraphCommand::Ingest(fetch("m1", &[("a1", None, "X"), ("b1", None, "Y")]))).unwrap();
    store.apply(GraphCommand::SetClusterMode(ClusterMode::Custom)).unwrap();

    let check = |store: &GraphStore| {
        let graph = store.state();
        let custom = graph.custom_clusters().unwrap();
        for id in graph.nodes().keys() {
            let count = custom.iter().filter(|cluster| cluster.contains(id)).count();
            assert_eq!(count, 1, "{id} must be in exactly one cluster");
        }
        let members: usize = custom.iter().map(|cluster| cluster.members.len()).sum();
        assert_eq!(members, graph.node_count());
    };
    check(&store);

    store.apply(GraphCommand::CreateCluster("One".into())).unwrap();
    store.apply(GraphCommand::CreateCluster("Two".into())).unwrap();
    let ids: Vec<String> = store
        .state()
        .custom_clusters()
        .unwrap()
        .iter()
        .map(|cluster| cluster.id.clone())
        .collect();
    check(&store);

    let commands = vec![
        GraphCommand::MoveNode { node: "a1".into(), cluster: ids[2].clone() },
        GraphCommand::MoveNode { node: "m1".into(), cluster: ids[3].clone() },
        GraphCommand::MoveNode { node: "a1".into(), cluster: ids[3].clone() },
        GraphCommand::Ingest(fetch("a1", &[("c1", None, "Z")])),
        GraphCommand::DeleteCluster(ids[3].clone()),
        GraphCommand::RemoveNode("b1".into()),
        GraphCommand::SetClusterMode(ClusterMode::Automatic),
        GraphCommand::Ingest(fetch("c1", &[("d1", None, "Z")])),
        GraphCommand::SetClusterMode(ClusterMode::Custom),
        GraphCommand::RenameCluster { cluster: ids[2].clone(), name: "Renamed".into() },
    ];
    for command in commands {
        store.apply(command).unwrap();
        if store.state().clusters().is_custom() {
            check(&store);
        }
    }

    assert!(store.apply(GraphCommand::DeleteCluster(UNCATEGORIZED_ID.into())).is_err());
    check(&store);
}

#[test]
fn every_strategy_places_every_node() {
    let graph = sample_graph();
    let custom_graph = graph.set_cluster_mode(ClusterMode::Custom);

    for (width, height) in [(800.0, 600.0), (1.0, 1.0), (50.0, 2000.0)] {
        for clustering in [false, true] {
            for chronological in [false, true] {
                for state in [&graph, &custom_graph] {
                    let mut engine = LayoutEngine::seeded(LayoutConfig::default(), 99);
                    let laid = state.laid_out(&mut engine, width, height, clustering, chronological);
                    for node in laid.nodes().values() {
                        let position = node.position.expect("every node is placed");
                        assert!(position.is_finite(), "{} at {:?}", node.id, position);
                    }
                }
            }
        }
    }
}

#[test]
fn single_node_layouts_do_not_divide_by_zero() {
    let nodes = vec![Node::new("solo", "Solo", Category::Main).with_year(2001).with_clusters([RESEARCH_FOCUS])];
    for clustering in [false, true] {
        for chronological in [false, true] {
            let mut laid = nodes.clone();
            let request = LayoutRequest::new(640.0, 480.0)
                .clustered(clustering)
                .chronological(chronological);
            LayoutEngine::seeded(LayoutConfig::default(), 0).position_nodes(&mut laid, &request);
            assert!(laid[0].position.unwrap().is_finite());
        }
    }
}

#[test]
fn clustered_nodes_stay_in_their_band() {
    let nodes = sample_nodes();
    let map: IndexMap<String, Node> = nodes.iter().map(|n| (n.id.clone(), n.clone())).collect();
    let custom = CustomClusters::initialize(&map, Some("b1"));

    for lookup in [ClusterLookup::Tags, ClusterLookup::Custom(&custom)] {
        for chronological in [false, true] {
            let request = LayoutRequest::new(1000.0, 700.0)
                .clustered(true)
                .chronological(chronological)
                .with_clusters(lookup);
            let mut laid = nodes.clone();
            LayoutEngine::seeded(LayoutConfig::default(), 17).position_nodes(&mut laid, &request);

            let bands = BandLayout::new(&laid, &request);
            for node in &laid {
                let band = bands.iter().nth(bands.index_of(node, &request.clusters)).unwrap();
                let x = node.position.unwrap().x;
                assert!(band.contains(x), "{} at x={} outside {:?}", node.id, x, band);
            }
        }
    }
}

#[test]
fn years_order_strictly_on_a_600px_canvas() {
    let nodes: Vec<Node> = [("a", 1971), ("b", 1995), ("c", 2010)]
        .iter()
        .map(|(id, year)| Node::new(*id, *id, Category::Influence).with_year(*year).with_clusters(["Music"]))
        .collect();
    let request = LayoutRequest::new(800.0, 600.0).clustered(true).chronological(true);

    let mut laid = nodes.clone();
    LayoutEngine::seeded(LayoutConfig::default(), 0).position_nodes(&mut laid, &request);

    let y = |i: usize| laid[i].position.unwrap().y;
    assert!(y(0) > y(1));
    assert!(y(1) > y(2));
}

#[test]
fn seeded_layouts_are_reproducible() {
    let graph = sample_graph();
    for (clustering, chronological) in [(false, false), (false, true), (true, false), (true, true)] {
        let first = graph.laid_out(&mut LayoutEngine::seeded(LayoutConfig::default(), 5), 800.0, 600.0, clustering, chronological);
        let second = graph.laid_out(&mut LayoutEngine::seeded(LayoutConfig::default(), 5), 800.0, 600.0, clustering, chronological);
        assert_eq!(first, second);
    }
}
