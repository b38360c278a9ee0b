use std::fmt;

use thiserror::Error;

/// Which endpoint of an edge failed to resolve to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEndpoint::Source => write!(f, "source"),
            EdgeEndpoint::Target => write!(f, "target"),
        }
    }
}

/// Structural defects in a submitted pipeline graph.
///
/// Every variant is a client input error: the graph as submitted is
/// malformed and the request is rejected before any analysis runs.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("duplicate node id '{0}'")]
    DuplicateNodeId(String),

    #[error("duplicate edge id '{0}'")]
    DuplicateEdgeId(String),

    #[error("edge '{edge_id}': {endpoint} '{node_id}' references a non-existent node")]
    DanglingEdgeReference {
        edge_id: String,
        endpoint: EdgeEndpoint,
        node_id: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
