//! Acyclicity analysis for pipeline graphs
//!
//! Builds a directed graph from the submitted pipeline and runs Kahn's
//! algorithm over it: repeatedly remove zero-in-degree nodes; the graph
//! is acyclic iff every node gets processed. The boolean result does
//! not depend on visitation order, only on the processed count.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::graph::{Pipeline, PipelineAnalysis};

/// Analyze a validated pipeline: node count, edge count, acyclicity.
pub fn analyze(pipeline: &Pipeline) -> PipelineAnalysis {
    let analysis = PipelineAnalysis {
        num_nodes: pipeline.nodes.len(),
        num_edges: pipeline.edges.len(),
        is_dag: is_directed_acyclic_graph(pipeline),
    };

    let mut node_types: HashMap<&str, usize> = HashMap::new();
    for node in &pipeline.nodes {
        *node_types.entry(node.node_type.as_str()).or_default() += 1;
    }
    tracing::info!(
        num_nodes = analysis.num_nodes,
        num_edges = analysis.num_edges,
        is_dag = analysis.is_dag,
        ?node_types,
        "pipeline analyzed"
    );

    analysis
}

/// Check whether the pipeline forms a directed acyclic graph.
///
/// Edges whose source or target does not name a known node are skipped
/// with a warning rather than failing the computation; the validator
/// rejects such graphs before they get here, so this path only fires
/// when the checker is called on an unvalidated pipeline. Any internal
/// inconsistency detected mid-computation is logged and reported as
/// "not a DAG" rather than propagated.
pub fn is_directed_acyclic_graph(pipeline: &Pipeline) -> bool {
    let mut graph: DiGraph<&str, ()> =
        DiGraph::with_capacity(pipeline.nodes.len(), pipeline.edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(pipeline.nodes.len());

    for node in &pipeline.nodes {
        index
            .entry(node.id.as_str())
            .or_insert_with(|| graph.add_node(node.id.as_str()));
    }

    for edge in &pipeline.edges {
        let (source, target) = match (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) {
            (Some(&source), Some(&target)) => (source, target),
            _ => {
                tracing::warn!(
                    edge = %edge.id,
                    source = %edge.source,
                    target = %edge.target,
                    "edge references a non-existent node, skipping"
                );
                continue;
            }
        };
        graph.add_edge(source, target, ());
    }

    // Kahn's algorithm: node indices are contiguous (no removals), so
    // in-degrees live in a plain vector indexed by NodeIndex.
    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
        .collect();

    let mut worklist: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();

    let mut processed = 0usize;
    while let Some(current) = worklist.pop_front() {
        processed += 1;
        for neighbor in graph.neighbors_directed(current, Direction::Outgoing) {
            match in_degree[neighbor.index()].checked_sub(1) {
                Some(remaining) => {
                    in_degree[neighbor.index()] = remaining;
                    if remaining == 0 {
                        worklist.push_back(neighbor);
                    }
                }
                None => {
                    // Conservative default: a malformed computation must
                    // never report an actually-cyclic graph as acyclic.
                    tracing::error!(
                        node = graph[neighbor],
                        "in-degree underflow during topological sort, reporting graph as cyclic"
                    );
                    return false;
                }
            }
        }
    }

    let is_dag = processed == graph.node_count();
    tracing::debug!(
        processed,
        total = graph.node_count(),
        is_dag,
        "topological sort finished"
    );
    is_dag
}
