use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::Serialize;
use std::collections::HashMap;

use super::analyzer::Analysis;
use super::metadata::{MetadataResolver, PackageInfo};

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, Copy)]
pub enum NodeOrigin {
    /// Found as a package directory during the scan.
    Scanned,
    /// Only known as the target of a dependency.
    Referenced,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackageNode {
    pub name: String,
    pub info: PackageInfo,
    pub origin: NodeOrigin,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

pub type DependencyGraph = Graph<PackageNode, DependencyEdge, Directed>;

impl PackageNode {
    pub fn new(name: String, info: PackageInfo, origin: NodeOrigin) -> Self {
        Self { name, info, origin }
    }

    pub fn is_scanned(&self) -> bool {
        self.origin == NodeOrigin::Scanned
    }
}

impl DependencyEdge {
    pub fn new(source: String, target: String) -> Self {
        Self { source, target }
    }
}

/// Package dependency graph, built once per invocation.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    pub graph: DependencyGraph,
}

impl PackageGraph {
    /// Packages that came from the scanned directory.
    pub fn package_count(&self) -> usize {
        self.nodes().filter(|node| node.is_scanned()).count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.graph.raw_nodes().iter().map(|node| &node.weight)
    }

    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.graph.raw_edges().iter().map(|edge| &edge.weight)
    }

    pub fn node(&self, name: &str) -> Option<&PackageNode> {
        self.nodes().find(|node| node.name == name)
    }
}

pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Scanned packages become nodes first, then each dependency adds an edge
    /// and, when its target was never scanned, a referenced node.
    pub fn from_analysis(analysis: &Analysis, resolver: &MetadataResolver) -> PackageGraph {
        let mut builder = Self::new();

        for package in &analysis.packages {
            builder.add_node(PackageNode::new(
                package.name.clone(),
                resolver.resolve(&package.name),
                NodeOrigin::Scanned,
            ));
        }

        for package in &analysis.packages {
            for dep in package.dependencies.iter() {
                if builder.get_node_index(dep).is_none() {
                    builder.add_node(PackageNode::new(
                        dep.to_string(),
                        resolver.resolve(dep),
                        NodeOrigin::Referenced,
                    ));
                }
                builder.add_edge(DependencyEdge::new(package.name.clone(), dep.to_string()));
            }
        }

        builder.build()
    }

    /// Adds `node` unless a node with the same name exists; returns its index.
    pub fn add_node(&mut self, node: PackageNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.name) {
            return index;
        }
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(name, index);
        index
    }

    pub fn add_edge(&mut self, edge: DependencyEdge) -> Option<petgraph::graph::EdgeIndex> {
        let source_idx = self.node_map.get(&edge.source)?;
        let target_idx = self.node_map.get(&edge.target)?;
        Some(self.graph.add_edge(*source_idx, *target_idx, edge))
    }

    pub fn build(self) -> PackageGraph {
        PackageGraph { graph: self.graph }
    }

    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
