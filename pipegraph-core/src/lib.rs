//! pipegraph-core: structural analysis of visual pipeline graphs
//!
//! This crate holds the computational core of the pipegraph service:
//! the wire-level data model for pipeline graphs, structural validation
//! (duplicate ids, dangling edge references), and acyclicity analysis
//! via Kahn's algorithm. Every entry point is a pure function of its
//! input; the HTTP surface lives in `pipegraph-server`.

pub mod error;
pub mod graph;
pub mod topology;
pub mod validation;

// Re-export core types
pub use error::{EdgeEndpoint, PipelineError, Result};
pub use graph::{Pipeline, PipelineAnalysis, PipelineEdge, PipelineNode, Position};
pub use topology::{analyze, is_directed_acyclic_graph};
pub use validation::validate_pipeline;
