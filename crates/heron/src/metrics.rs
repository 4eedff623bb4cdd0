//! Aggregate edge-length statistics.

use crate::error::{Error, Result};
use crate::geom::{EPSILON, Point, distance};
use crate::graph::{Graph, NodeIndex};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMetrics {
    pub average_edge_length: f64,
    pub total_edge_length: f64,
}

impl EdgeMetrics {
    /// Computes metrics for `graph` with the default epsilon.
    ///
    /// Fails with [`Error::NoEdges`] instead of producing a `NaN` average.
    pub fn of_graph(graph: &Graph) -> Result<Self> {
        let index = NodeIndex::build(graph)?;
        Self::compute(&graph.positions(), index.edges(), EPSILON)
    }

    /// Computes metrics from positions aligned with `edges` slots.
    ///
    /// `edges` must come from a [`NodeIndex`] built on the same graph `positions` was taken
    /// from; a slot outside `positions` panics.
    pub fn compute(positions: &[Point], edges: &[(usize, usize)], epsilon: f64) -> Result<Self> {
        if edges.is_empty() {
            return Err(Error::NoEdges);
        }
        let total: f64 = edges
            .iter()
            .map(|&(s, t)| distance(positions[s], positions[t], epsilon))
            .sum();
        Ok(Self {
            average_edge_length: total / edges.len() as f64,
            total_edge_length: total,
        })
    }

    /// Console report: a title line followed by both values with 4 decimals.
    pub fn report(&self, title: &str) -> String {
        format!(
            "{title}\n- Average edge length: {:.4}\n- Total edge length: {:.4}\n",
            self.average_edge_length, self.total_edge_length
        )
    }
}
