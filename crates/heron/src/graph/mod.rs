use crate::error::{Error, Result};
use crate::geom::{Point, point};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Node identity as it appears in the input document.
///
/// Integer and string ids are distinct: `0` and `"0"` never resolve to each other.
/// Integers up to `u64::MAX` are accepted; fractional numbers (`1.5`) are not valid ids
/// and fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    /// Only used for values above `i64::MAX`.
    UInt(u64),
    Str(String),
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Int(v) => write!(f, "{v}"),
            NodeId::UInt(v) => write!(f, "{v}"),
            NodeId::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point {
        point(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }
}

/// Unordered pair of node ids; serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge(pub NodeId, pub NodeId);

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self(source.into(), target.into())
    }

    pub fn source(&self) -> &NodeId {
        &self.0
    }

    pub fn target(&self) -> &NodeId {
        &self.1
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn validate(&self) -> Result<()> {
        NodeIndex::build(self).map(|_| ())
    }

    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(Node::position).collect()
    }
}

/// Read-only id index for one run.
///
/// Maps every node id to its slot in `Graph::nodes` and resolves every edge into a pair of
/// slots, so the hot loops never hash.
#[derive(Debug, Clone)]
pub struct NodeIndex {
    by_id: FxHashMap<NodeId, usize>,
    edges: Vec<(usize, usize)>,
}

impl NodeIndex {
    /// Builds the index, rejecting duplicate ids, non-finite positions and dangling edges.
    pub fn build(graph: &Graph) -> Result<Self> {
        let mut by_id: FxHashMap<NodeId, usize> = FxHashMap::default();
        by_id.reserve(graph.nodes.len());

        for (idx, n) in graph.nodes.iter().enumerate() {
            if !(n.x.is_finite() && n.y.is_finite()) {
                return Err(Error::NonFinitePosition { id: n.id.clone() });
            }
            if by_id.insert(n.id.clone(), idx).is_some() {
                return Err(Error::DuplicateNode { id: n.id.clone() });
            }
        }

        let mut edges = Vec::with_capacity(graph.edges.len());
        for (edge_index, e) in graph.edges.iter().enumerate() {
            let resolve = |id: &NodeId| {
                by_id
                    .get(id)
                    .copied()
                    .ok_or_else(|| Error::MissingEndpoint {
                        edge_index,
                        id: id.clone(),
                    })
            };
            edges.push((resolve(e.source())?, resolve(e.target())?));
        }

        Ok(Self { by_id, edges })
    }

    pub fn get(&self, id: &NodeId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.by_id.len()
    }

    /// Edges as `(source, target)` slots, in input order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}
