use crate::graph::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains a duplicate node id: {id}")]
    DuplicateNode { id: NodeId },

    #[error("edge #{edge_index} references a missing node: {id}")]
    MissingEndpoint { edge_index: usize, id: NodeId },

    #[error("node {id} has a non-finite position")]
    NonFinitePosition { id: NodeId },

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("graph has no edges")]
    NoEdges,

    #[error("invalid layout option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
