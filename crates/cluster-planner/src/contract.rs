// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Edge contraction: deciding whether a parent→child cluster edge can be
//! merged without creating a cycle, and performing the merge.

use crate::{reach, ClusterArena, ClusterError, ClusterId};
use std::collections::BTreeSet;

/// Returns `true` if the edge `src -> dst` can be contracted without
/// introducing a cycle into the cluster graph.
///
/// Clusters with different placements are never contractible.
/// Otherwise: contracting `src -> dst` in a DAG forms a cycle iff, after
/// removing that edge, `dst` is still reachable from `src` — any
/// surviving path `src -> ... -> dst` would close into a cycle once the
/// two endpoints become one cluster. The edge is removed for the probe
/// and restored before returning, regardless of the outcome.
///
/// `dst` must currently be a child of `src`.
pub fn is_contractible(
    arena: &mut ClusterArena,
    src: ClusterId,
    dst: ClusterId,
) -> Result<bool, ClusterError> {
    if arena[src].placement() != arena[dst].placement() {
        return Ok(false);
    }

    arena[src].remove_child(dst)?;
    let still_reachable = reach::is_reachable(arena, src, dst);
    arena[src].insert_child(dst);

    Ok(!still_reachable)
}

/// Merges `src` and `dst` into a freshly allocated cluster and returns
/// its id.
///
/// The new cluster takes the union of both node sets and inherits every
/// external relation: parents and children of either input — minus the
/// pair itself — are rewired to point at the merge result, keeping the
/// link sets symmetric on both sides. `src` and `dst` are retired
/// (cleared) before returning.
pub fn merge(
    arena: &mut ClusterArena,
    src: ClusterId,
    dst: ClusterId,
) -> Result<ClusterId, ClusterError> {
    let src_placement = arena[src].placement();
    let dst_placement = arena[dst].placement();
    if src_placement != dst_placement {
        return Err(ClusterError::PlacementConflict {
            src: src_placement,
            dst: dst_placement,
        });
    }

    let merged = arena.alloc();

    // Union of both node sets; insert_node re-checks placement
    // consistency on every node.
    let nodes: Vec<_> = arena[src]
        .nodes()
        .iter()
        .chain(arena[dst].nodes().iter())
        .copied()
        .collect();
    for node in nodes {
        arena[merged].insert_node(node, src_placement)?;
    }

    // Parents of src and dst now parent the merge result instead.
    let mut all_parents: BTreeSet<ClusterId> = arena[src]
        .parents()
        .iter()
        .chain(arena[dst].parents().iter())
        .copied()
        .collect();
    all_parents.remove(&src);
    all_parents.remove(&dst);
    for parent in all_parents {
        arena[parent].remove_child_if_exists(src);
        arena[parent].remove_child_if_exists(dst);
        arena.link(parent, merged);
    }

    // Children of src and dst now hang off the merge result instead.
    let mut all_children: BTreeSet<ClusterId> = arena[src]
        .children()
        .iter()
        .chain(arena[dst].children().iter())
        .copied()
        .collect();
    all_children.remove(&src);
    all_children.remove(&dst);
    for child in all_children {
        arena[child].remove_parent_if_exists(src);
        arena[child].remove_parent_if_exists(dst);
        arena.link(merged, child);
    }

    arena[src].clear();
    arena[dst].clear();

    tracing::trace!(
        "merged {src} + {dst} -> {merged} ({} nodes, {})",
        arena[merged].size(),
        arena[merged].placement(),
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_ir::{NodeId, Placement};

    fn cluster_with(
        arena: &mut ClusterArena,
        node: usize,
        placement: Placement,
    ) -> ClusterId {
        let id = arena.alloc();
        arena[id].insert_node(NodeId(node), placement).unwrap();
        id
    }

    #[test]
    fn test_contractible_simple_edge() {
        let mut arena = ClusterArena::new();
        let a = cluster_with(&mut arena, 0, Placement::Cpu);
        let b = cluster_with(&mut arena, 1, Placement::Cpu);
        arena.link(a, b);

        assert!(is_contractible(&mut arena, a, b).unwrap());
        // The probe must leave the edge in place.
        assert!(arena[a].has_child(b));
        assert!(arena[b].has_parent(a));
    }

    #[test]
    fn test_not_contractible_different_placement() {
        let mut arena = ClusterArena::new();
        let a = cluster_with(&mut arena, 0, Placement::Cpu);
        let b = cluster_with(&mut arena, 1, Placement::Gpu);
        arena.link(a, b);

        assert!(!is_contractible(&mut arena, a, b).unwrap());
    }

    #[test]
    fn test_not_contractible_indirect_path() {
        // a -> b -> c and a -> c: contracting a -> c would trap the
        // path through b inside a cycle.
        let mut arena = ClusterArena::new();
        let a = cluster_with(&mut arena, 0, Placement::Cpu);
        let b = cluster_with(&mut arena, 1, Placement::Cpu);
        let c = cluster_with(&mut arena, 2, Placement::Cpu);
        arena.link(a, b);
        arena.link(b, c);
        arena.link(a, c);

        assert!(!is_contractible(&mut arena, a, c).unwrap());
        // a -> b has no alternative path, so it stays contractible.
        assert!(is_contractible(&mut arena, a, b).unwrap());
    }

    #[test]
    fn test_contractible_requires_edge() {
        let mut arena = ClusterArena::new();
        let a = cluster_with(&mut arena, 0, Placement::Cpu);
        let b = cluster_with(&mut arena, 1, Placement::Cpu);
        // No a -> b edge: the probe's unconditional remove must fail.
        let err = is_contractible(&mut arena, a, b).unwrap_err();
        assert!(matches!(err, ClusterError::MissingRelation { .. }));
    }

    #[test]
    fn test_merge_unions_nodes_and_rewires() {
        // p -> a -> b -> c becomes p -> merged -> c.
        let mut arena = ClusterArena::new();
        let p = cluster_with(&mut arena, 0, Placement::Cpu);
        let a = cluster_with(&mut arena, 1, Placement::Cpu);
        let b = cluster_with(&mut arena, 2, Placement::Cpu);
        let c = cluster_with(&mut arena, 3, Placement::Cpu);
        arena.link(p, a);
        arena.link(a, b);
        arena.link(b, c);

        let merged = merge(&mut arena, a, b).unwrap();

        assert_eq!(
            arena[merged].nodes().iter().copied().collect::<Vec<_>>(),
            vec![NodeId(1), NodeId(2)],
        );
        assert!(arena[p].has_child(merged));
        assert!(arena[merged].has_parent(p));
        assert!(arena[merged].has_child(c));
        assert!(arena[c].has_parent(merged));
        // No stale links to the retired pair.
        assert!(!arena[p].has_child(a));
        assert!(!arena[c].has_parent(b));
        assert!(arena[a].is_empty());
        assert!(arena[b].is_empty());
    }

    #[test]
    fn test_merge_placement_conflict() {
        let mut arena = ClusterArena::new();
        let a = cluster_with(&mut arena, 0, Placement::Cpu);
        let b = cluster_with(&mut arena, 1, Placement::Accelerator);
        arena.link(a, b);

        let err = merge(&mut arena, a, b).unwrap_err();
        assert!(matches!(err, ClusterError::PlacementConflict { .. }));
    }

    #[test]
    fn test_merge_disjoint_pair() {
        // No edge between a and b; merge still unions relations.
        let mut arena = ClusterArena::new();
        let a = cluster_with(&mut arena, 0, Placement::Gpu);
        let b = cluster_with(&mut arena, 1, Placement::Gpu);
        let c = cluster_with(&mut arena, 2, Placement::Gpu);
        arena.link(a, c);
        arena.link(b, c);

        let merged = merge(&mut arena, a, b).unwrap();
        assert_eq!(arena[merged].size(), 2);
        assert!(arena[merged].has_child(c));
        assert_eq!(arena[c].parents().len(), 1);
    }

    #[test]
    fn test_merge_keeps_sets_symmetric() {
        let mut arena = ClusterArena::new();
        let p = cluster_with(&mut arena, 0, Placement::Cpu);
        let a = cluster_with(&mut arena, 1, Placement::Cpu);
        let b = cluster_with(&mut arena, 2, Placement::Cpu);
        arena.link(p, a);
        arena.link(p, b);
        arena.link(a, b);

        let merged = merge(&mut arena, a, b).unwrap();
        for &parent in arena[merged].parents().iter() {
            assert!(arena[parent].has_child(merged));
        }
        for &child in arena[merged].children().iter() {
            assert!(arena[child].has_parent(merged));
        }
        // p's duplicate edges to a and b collapse into one.
        assert_eq!(arena[p].children().len(), 1);
    }
}
