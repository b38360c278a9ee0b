//! Structural validation of submitted pipeline graphs

use std::collections::HashSet;

use crate::error::{EdgeEndpoint, PipelineError, Result};
use crate::graph::Pipeline;

/// Validate the structure of a submitted pipeline.
///
/// Fails on the first defect found, checked in this order:
/// duplicate node ids, duplicate edge ids, edges whose source or target
/// does not name an existing node. The rejected graph never reaches the
/// acyclicity checker.
pub fn validate_pipeline(pipeline: &Pipeline) -> Result<()> {
    let mut node_ids: HashSet<&str> = HashSet::with_capacity(pipeline.nodes.len());
    for node in &pipeline.nodes {
        if !node_ids.insert(node.id.as_str()) {
            tracing::warn!(node = %node.id, "rejecting pipeline: duplicate node id");
            return Err(PipelineError::DuplicateNodeId(node.id.clone()));
        }
    }

    let mut edge_ids: HashSet<&str> = HashSet::with_capacity(pipeline.edges.len());
    for edge in &pipeline.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            tracing::warn!(edge = %edge.id, "rejecting pipeline: duplicate edge id");
            return Err(PipelineError::DuplicateEdgeId(edge.id.clone()));
        }
    }

    for edge in &pipeline.edges {
        if !node_ids.contains(edge.source.as_str()) {
            tracing::warn!(
                edge = %edge.id,
                node = %edge.source,
                "rejecting pipeline: edge source references a non-existent node"
            );
            return Err(PipelineError::DanglingEdgeReference {
                edge_id: edge.id.clone(),
                endpoint: EdgeEndpoint::Source,
                node_id: edge.source.clone(),
            });
        }
        if !node_ids.contains(edge.target.as_str()) {
            tracing::warn!(
                edge = %edge.id,
                node = %edge.target,
                "rejecting pipeline: edge target references a non-existent node"
            );
            return Err(PipelineError::DanglingEdgeReference {
                edge_id: edge.id.clone(),
                endpoint: EdgeEndpoint::Target,
                node_id: edge.target.clone(),
            });
        }
    }

    tracing::debug!(
        num_nodes = pipeline.nodes.len(),
        num_edges = pipeline.edges.len(),
        "pipeline structure validated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PipelineEdge, PipelineNode, Position};

    fn node(id: &str) -> PipelineNode {
        PipelineNode {
            id: id.to_string(),
            node_type: "custom".to_string(),
            position: Position { x: 0.0, y: 0.0 },
            data: Default::default(),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> PipelineEdge {
        PipelineEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
            target_handle: None,
        }
    }

    fn pipeline(nodes: Vec<PipelineNode>, edges: Vec<PipelineEdge>) -> Pipeline {
        Pipeline { nodes, edges }
    }

    #[test]
    fn accepts_well_formed_pipeline() {
        let p = pipeline(
            vec![node("A"), node("B"), node("C")],
            vec![edge("e1", "A", "B"), edge("e2", "B", "C")],
        );
        assert!(validate_pipeline(&p).is_ok());
    }

    #[test]
    fn accepts_empty_pipeline() {
        assert!(validate_pipeline(&pipeline(vec![], vec![])).is_ok());
    }

    #[test]
    fn rejects_duplicate_node_id() {
        let p = pipeline(vec![node("A"), node("A")], vec![]);
        match validate_pipeline(&p) {
            Err(PipelineError::DuplicateNodeId(id)) => assert_eq!(id, "A"),
            other => panic!("expected DuplicateNodeId, got {:?}", other),
        }
    }

    #[test]
    fn rejects_duplicate_edge_id() {
        let p = pipeline(
            vec![node("A"), node("B")],
            vec![edge("e1", "A", "B"), edge("e1", "B", "A")],
        );
        match validate_pipeline(&p) {
            Err(PipelineError::DuplicateEdgeId(id)) => assert_eq!(id, "e1"),
            other => panic!("expected DuplicateEdgeId, got {:?}", other),
        }
    }

    #[test]
    fn accepts_parallel_edges_with_distinct_ids() {
        let p = pipeline(
            vec![node("A"), node("B")],
            vec![edge("e1", "A", "B"), edge("e2", "A", "B")],
        );
        assert!(validate_pipeline(&p).is_ok());
    }

    #[test]
    fn rejects_dangling_source() {
        let p = pipeline(vec![node("A")], vec![edge("e1", "X", "A")]);
        match validate_pipeline(&p) {
            Err(PipelineError::DanglingEdgeReference {
                edge_id,
                endpoint,
                node_id,
            }) => {
                assert_eq!(edge_id, "e1");
                assert_eq!(endpoint, EdgeEndpoint::Source);
                assert_eq!(node_id, "X");
            }
            other => panic!("expected DanglingEdgeReference, got {:?}", other),
        }
    }

    #[test]
    fn rejects_dangling_target() {
        let p = pipeline(vec![node("A")], vec![edge("e1", "A", "X")]);
        match validate_pipeline(&p) {
            Err(PipelineError::DanglingEdgeReference { endpoint, node_id, .. }) => {
                assert_eq!(endpoint, EdgeEndpoint::Target);
                assert_eq!(node_id, "X");
            }
            other => panic!("expected DanglingEdgeReference, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_node_id_takes_precedence_over_dangling_edge() {
        let p = pipeline(
            vec![node("A"), node("A")],
            vec![edge("e1", "A", "missing")],
        );
        assert!(matches!(
            validate_pipeline(&p),
            Err(PipelineError::DuplicateNodeId(_))
        ));
    }

    #[test]
    fn duplicate_edge_id_takes_precedence_over_dangling_edge() {
        let p = pipeline(
            vec![node("A")],
            vec![edge("e1", "A", "missing"), edge("e1", "A", "A")],
        );
        assert!(matches!(
            validate_pipeline(&p),
            Err(PipelineError::DuplicateEdgeId(_))
        ));
    }

    #[test]
    fn error_messages_name_the_violation() {
        let dup = PipelineError::DuplicateNodeId("A".to_string());
        assert_eq!(dup.to_string(), "duplicate node id 'A'");

        let dangling = PipelineError::DanglingEdgeReference {
            edge_id: "e1".to_string(),
            endpoint: EdgeEndpoint::Source,
            node_id: "X".to_string(),
        };
        assert_eq!(
            dangling.to_string(),
            "edge 'e1': source 'X' references a non-existent node"
        );
    }
}
