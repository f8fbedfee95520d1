use elisp_deps::core::{
    graph::{DependencyEdge, GraphBuilder, NodeOrigin, PackageNode},
    PackageInfo,
};

fn make_node(name: &str, origin: NodeOrigin) -> PackageNode {
    PackageNode::new(name.to_string(), PackageInfo::unknown(), origin)
}

#[test]
fn graph_builder_adds_nodes_and_edges() {
    let mut gb = GraphBuilder::new();

    gb.add_node(make_node("citar", NodeOrigin::Scanned));
    gb.add_node(make_node("parsebib", NodeOrigin::Referenced));
    gb.add_node(make_node("emacs", NodeOrigin::Referenced));

    assert!(gb
        .add_edge(DependencyEdge::new("citar".into(), "parsebib".into()))
        .is_some());
    assert!(gb
        .add_edge(DependencyEdge::new("citar".into(), "emacs".into()))
        .is_some());

    let graph = gb.build();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.package_count(), 1);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn add_node_is_idempotent_per_name() {
    let mut gb = GraphBuilder::new();
    let first = gb.add_node(make_node("org", NodeOrigin::Scanned));
    let second = gb.add_node(make_node("org", NodeOrigin::Referenced));
    assert_eq!(first, second);

    let graph = gb.build();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.node("org").unwrap().origin, NodeOrigin::Scanned);
}

#[test]
fn add_edge_returns_none_when_missing_nodes() {
    let mut gb = GraphBuilder::new();
    gb.add_node(make_node("a", NodeOrigin::Scanned));

    let e = DependencyEdge::new("a".into(), "missing".into());
    assert!(gb.add_edge(e).is_none());
}
