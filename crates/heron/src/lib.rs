#![forbid(unsafe_code)]

//! Headless Fruchterman-Reingold graph layout.
//!
//! `heron` takes nodes with initial positions and an undirected edge list, relaxes the
//! positions with an annealed force simulation confined to the unit square, and reports edge
//! length metrics. `heron-cli` wraps it for JSON files on disk.

pub mod algo;
pub mod error;
pub mod geom;
pub mod graph;
pub mod io;
pub mod metrics;

pub use algo::FruchtermanReingoldOptions;
pub use algo::fruchterman_reingold::{Simulation, SimulationStats, StepReport};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node, NodeId, NodeIndex};
pub use metrics::EdgeMetrics;

/// Headless layout entry point; mutates node positions in place.
pub fn layout(graph: &mut Graph, opts: &FruchtermanReingoldOptions) -> Result<SimulationStats> {
    algo::fruchterman_reingold::layout(graph, opts)
}
