use std::collections::BTreeMap;

use crate::core::{PackageGraph, PackageNode};

/// Generates a GraphViz DOT description, one nested cluster per category level.
pub struct DotFormatter {
    title: Option<String>,
    show_descriptions: bool,
}

#[derive(Default)]
struct Cluster<'a> {
    nodes: Vec<&'a PackageNode>,
    children: BTreeMap<&'a str, Cluster<'a>>,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            title: None,
            show_descriptions: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_descriptions(mut self, show_descriptions: bool) -> Self {
        self.show_descriptions = show_descriptions;
        self
    }

    pub fn format(&self, graph: &PackageGraph) -> String {
        let mut out = String::new();
        out.push_str("digraph emacs_dependencies {\n");
        out.push_str("  rankdir=LR;\n");
        out.push_str("  compound=true;\n");
        if let Some(title) = &self.title {
            out.push_str(&format!(
                "  label=\"{}\";\n  labelloc=t;\n  fontsize=20;\n",
                escape(title)
            ));
        }
        out.push_str("  node [shape=box, style=rounded, fontname=\"Helvetica\"];\n\n");

        let mut root = Cluster::default();
        for node in graph.nodes() {
            let path = if node.info.is_uncategorized() {
                Vec::new()
            } else {
                node.info.category_path()
            };
            let mut cluster = &mut root;
            for segment in path {
                cluster = cluster.children.entry(segment).or_default();
            }
            cluster.nodes.push(node);
        }

        let mut next_id = 0usize;
        for (label, child) in &root.children {
            self.write_cluster(&mut out, label, child, 1, &mut next_id);
        }
        for node in &root.nodes {
            self.write_node(&mut out, node, 1);
        }
        out.push('\n');

        for edge in graph.edges() {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                escape(&edge.source),
                escape(&edge.target)
            ));
        }

        out.push_str("}\n");
        out
    }

    fn write_cluster(
        &self,
        out: &mut String,
        label: &str,
        cluster: &Cluster,
        depth: usize,
        next_id: &mut usize,
    ) {
        let indent = "  ".repeat(depth);
        out.push_str(&format!("{indent}subgraph cluster_{} {{\n", *next_id));
        *next_id += 1;
        out.push_str(&format!("{indent}  label=\"{}\";\n", escape(label)));
        out.push_str(&format!("{indent}  style=rounded;\n"));
        out.push_str(&format!("{indent}  color=\"#7f8c8d\";\n"));

        for (child_label, child) in &cluster.children {
            self.write_cluster(out, child_label, child, depth + 1, next_id);
        }
        for node in &cluster.nodes {
            self.write_node(out, node, depth + 1);
        }
        out.push_str(&format!("{indent}}}\n"));
    }

    fn write_node(&self, out: &mut String, node: &PackageNode, depth: usize) {
        let mut label = node.name.clone();
        if self.show_descriptions {
            if let Some(description) = &node.info.description {
                label.push('\n');
                label.push_str(description);
            }
        }

        let mut styles = vec!["rounded"];
        if node.info.builtin {
            styles.push("filled");
        }
        if !node.is_scanned() {
            styles.push("dashed");
        }

        let mut attrs = vec![
            format!("label=\"{}\"", escape(&label)),
            format!("style=\"{}\"", styles.join(",")),
        ];
        if node.info.builtin {
            attrs.push("fillcolor=\"#dddddd\"".to_string());
        }

        out.push_str(&format!(
            "{}\"{}\" [{}];\n",
            "  ".repeat(depth),
            escape(&node.name),
            attrs.join(", ")
        ));
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

