// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Singleton builder: the initial one-cluster-per-node partition.

use crate::{ClusterArena, ClusterError, ClusterId};
use graph_ir::{OpGraph, Validated};

/// Creates one cluster per graph node and wires cluster parent/child
/// links from the node input edges.
///
/// Returns the live cluster list in node-creation order. Fails with
/// [`ClusterError::UnplacedNode`] if any node still carries the
/// `DEFAULT` placement sentinel.
pub fn build_singletons(
    arena: &mut ClusterArena,
    graph: &OpGraph<Validated>,
) -> Result<Vec<ClusterId>, ClusterError> {
    // One cluster per node; node id n maps to clusters[n].
    let mut clusters = Vec::with_capacity(graph.num_nodes());
    for (id, node) in graph.iter_nodes() {
        let cluster = arena.alloc();
        arena[cluster].insert_node(id, node.placement)?;
        clusters.push(cluster);
    }

    // A node edge src -> dst becomes a cluster edge.
    for (id, node) in graph.iter_nodes() {
        let child = clusters[id.index()];
        for &input in &node.inputs {
            let parent = clusters[input.index()];
            arena.link(parent, child);
        }
    }

    tracing::debug!(
        "built {} singleton clusters for graph '{}'",
        clusters.len(),
        graph.name,
    );
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_ir::{GraphBuilder, NodeId, Placement};

    #[test]
    fn test_one_cluster_per_node() {
        let mut b = GraphBuilder::new();
        let p = b.node("p", Placement::Cpu, &[]);
        let q = b.node("q", Placement::Gpu, &[p]);
        b.node("r", Placement::Cpu, &[q]);
        let graph = b.finish("chain").validate().unwrap();

        let mut arena = ClusterArena::new();
        let clusters = build_singletons(&mut arena, &graph).unwrap();

        assert_eq!(clusters.len(), 3);
        for (i, &c) in clusters.iter().enumerate() {
            assert_eq!(arena[c].size(), 1);
            assert!(arena[c].nodes().contains(&NodeId(i)));
        }
        assert_eq!(arena[clusters[0]].placement(), Placement::Cpu);
        assert_eq!(arena[clusters[1]].placement(), Placement::Gpu);
    }

    #[test]
    fn test_links_follow_node_edges() {
        let mut b = GraphBuilder::new();
        let x = b.node("x", Placement::Cpu, &[]);
        let y = b.node("y", Placement::Cpu, &[x]);
        b.node("z", Placement::Cpu, &[x, y]);
        let graph = b.finish("diamondish").validate().unwrap();

        let mut arena = ClusterArena::new();
        let c = build_singletons(&mut arena, &graph).unwrap();

        assert!(arena[c[0]].has_child(c[1]));
        assert!(arena[c[0]].has_child(c[2]));
        assert!(arena[c[1]].has_child(c[2]));
        assert!(arena[c[2]].has_parent(c[0]));
        assert!(arena[c[2]].has_parent(c[1]));
        assert!(arena[c[0]].parents().is_empty());
    }

    #[test]
    fn test_unplaced_node_rejected() {
        let mut b = GraphBuilder::new();
        let p = b.node("p", Placement::Cpu, &[]);
        b.node("q", Placement::Default, &[p]);
        let graph = b.finish("unplaced").validate().unwrap();

        let mut arena = ClusterArena::new();
        let err = build_singletons(&mut arena, &graph).unwrap_err();
        assert!(matches!(err, ClusterError::UnplacedNode { node: NodeId(1) }));
    }
}
