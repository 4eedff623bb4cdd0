//! JSON loading and writing for node and edge documents.
//!
//! Nodes are `[{"id": .., "x": .., "y": ..}]`, edges are `[[source, target]]`. Output keeps the
//! node order and shape of the input.

use crate::error::Result;
use crate::graph::{Edge, Graph, Node};
use std::path::Path;

pub fn parse_graph(nodes_json: &str, edges_json: &str) -> Result<Graph> {
    let nodes: Vec<Node> = serde_json::from_str(nodes_json)?;
    let edges: Vec<Edge> = serde_json::from_str(edges_json)?;
    Ok(Graph::new(nodes, edges))
}

pub fn load_graph(nodes_path: impl AsRef<Path>, edges_path: impl AsRef<Path>) -> Result<Graph> {
    let nodes_json = std::fs::read_to_string(nodes_path)?;
    let edges_json = std::fs::read_to_string(edges_path)?;
    parse_graph(&nodes_json, &edges_json)
}

/// Pretty-printed (2-space indent) node document.
pub fn nodes_to_json_pretty(nodes: &[Node]) -> Result<String> {
    Ok(serde_json::to_string_pretty(nodes)?)
}

pub fn write_nodes(path: impl AsRef<Path>, nodes: &[Node]) -> Result<()> {
    std::fs::write(path, nodes_to_json_pretty(nodes)?)?;
    Ok(())
}
