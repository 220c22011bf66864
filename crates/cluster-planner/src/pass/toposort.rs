// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Topological ordering of the final cluster list (Kahn's algorithm).

use crate::{ClusterArena, ClusterError, ClusterId};
use std::collections::{HashMap, VecDeque};

/// Reorders `clusters` so that every parent precedes its children.
///
/// Kahn's algorithm: seed with zero-parent clusters, repeatedly pop one,
/// append it to the output, and release its children. Failing to order
/// the full list means the cluster graph holds a cycle — a fatal
/// internal-consistency failure, since every merge is guarded by the
/// contraction-safety probe.
pub fn sort_clusters(
    arena: &ClusterArena,
    clusters: &mut Vec<ClusterId>,
) -> Result<(), ClusterError> {
    let mut pending_parents: HashMap<ClusterId, usize> = clusters
        .iter()
        .map(|&c| (c, arena[c].parents().len()))
        .collect();

    let mut ready: VecDeque<ClusterId> = clusters
        .iter()
        .copied()
        .filter(|&c| arena[c].parents().is_empty())
        .collect();

    let mut sorted = Vec::with_capacity(clusters.len());
    while let Some(cluster) = ready.pop_front() {
        sorted.push(cluster);
        for &child in arena[cluster].children() {
            let remaining = pending_parents
                .get_mut(&child)
                .expect("child link points at a cluster outside the live list");
            *remaining -= 1;
            if *remaining == 0 {
                ready.push_back(child);
            }
        }
    }

    if sorted.len() != clusters.len() {
        return Err(ClusterError::Cycle {
            sorted: sorted.len(),
            total: clusters.len(),
        });
    }

    *clusters = sorted;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_chain() {
        let mut arena = ClusterArena::new();
        let a = arena.alloc();
        let b = arena.alloc();
        let c = arena.alloc();
        arena.link(a, b);
        arena.link(b, c);

        // Deliberately scrambled input order.
        let mut clusters = vec![c, a, b];
        sort_clusters(&arena, &mut clusters).unwrap();
        assert_eq!(clusters, vec![a, b, c]);
    }

    #[test]
    fn test_parents_precede_children_in_dag() {
        let mut arena = ClusterArena::new();
        let ids: Vec<ClusterId> = (0..5).map(|_| arena.alloc()).collect();
        arena.link(ids[0], ids[1]);
        arena.link(ids[0], ids[2]);
        arena.link(ids[1], ids[3]);
        arena.link(ids[2], ids[3]);
        arena.link(ids[3], ids[4]);

        let mut clusters = vec![ids[4], ids[3], ids[2], ids[1], ids[0]];
        sort_clusters(&arena, &mut clusters).unwrap();

        let position: HashMap<ClusterId, usize> = clusters
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();
        for &cluster in &clusters {
            for &child in arena[cluster].children() {
                assert!(position[&cluster] < position[&child]);
            }
        }
    }

    #[test]
    fn test_cycle_detected() {
        let mut arena = ClusterArena::new();
        let a = arena.alloc();
        let b = arena.alloc();
        arena.link(a, b);
        arena.link(b, a);

        let mut clusters = vec![a, b];
        let err = sort_clusters(&arena, &mut clusters).unwrap_err();
        assert!(matches!(err, ClusterError::Cycle { sorted: 0, total: 2 }));
    }

    #[test]
    fn test_independent_clusters_keep_seed_order() {
        let mut arena = ClusterArena::new();
        let a = arena.alloc();
        let b = arena.alloc();
        let c = arena.alloc();

        let mut clusters = vec![b, c, a];
        sort_clusters(&arena, &mut clusters).unwrap();
        // No edges: the seed (input) order is preserved.
        assert_eq!(clusters, vec![b, c, a]);
    }
}
