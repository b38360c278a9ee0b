//! Wire-level data model for pipeline graphs
//!
//! These types mirror the JSON shape produced by the visual pipeline
//! editor: nodes carry an editor position and an opaque `data` payload,
//! edges carry optional port-handle labels. The core never inspects the
//! opaque parts; it only stores them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// 2-D editor position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single node in a submitted pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineNode {
    /// Unique identifier within the request.
    pub id: String,
    /// Node type tag (e.g. "customInput", "llm", "text"). Not interpreted.
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    /// Opaque node payload, stored but never inspected.
    #[serde(default)]
    pub data: Map<String, JsonValue>,
}

/// A directed edge between two nodes of a submitted pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEdge {
    /// Unique identifier within the request.
    pub id: String,
    /// Id of the node this edge leaves.
    pub source: String,
    /// Id of the node this edge enters.
    pub target: String,
    /// Optional source port label, opaque.
    #[serde(rename = "sourceHandle", default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    /// Optional target port label, opaque.
    #[serde(rename = "targetHandle", default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// One complete pipeline graph, submitted atomically per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub nodes: Vec<PipelineNode>,
    pub edges: Vec<PipelineEdge>,
}

/// Result of analyzing a pipeline graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineAnalysis {
    /// Number of nodes in the pipeline.
    pub num_nodes: usize,
    /// Number of edges in the pipeline.
    pub num_edges: usize,
    /// Whether the pipeline forms a directed acyclic graph.
    pub is_dag: bool,
}
