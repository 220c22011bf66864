// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Disjoint merger: coalesces same-placement clusters with no directed
//! path between them.
//!
//! The adjacent merger only joins clusters that share an edge; two CPU
//! fragments separated by a GPU region (or entirely unconnected) stay
//! apart. This pass sweeps each placement group and merges any pair that
//! is provably unordered — neither reachable from the other — which can
//! never create a cycle. The cost is O(n²) reachability queries per
//! placement group; accepted, not a liveness concern.

use crate::{contract, reach, ClusterArena, ClusterError, ClusterId};
use graph_ir::Placement;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Merges unordered same-placement cluster pairs until none remain.
///
/// On return `clusters` holds the surviving clusters grouped by
/// placement; final ordering is left to the topological sort pass.
pub fn merge_disjoint(
    arena: &mut ClusterArena,
    clusters: &mut Vec<ClusterId>,
) -> Result<(), ClusterError> {
    let before = clusters.len();

    // Stable placement grouping; worklists inherit creation order.
    let mut groups: BTreeMap<Placement, Vec<ClusterId>> = BTreeMap::new();
    for &cluster in clusters.iter() {
        groups.entry(arena[cluster].placement()).or_default().push(cluster);
    }

    let mut result = Vec::new();
    for (placement, members) in groups {
        let mut worklist: VecDeque<ClusterId> = members.iter().copied().collect();
        let mut unvisited: BTreeSet<ClusterId> = members.iter().copied().collect();
        let mut live: BTreeSet<ClusterId> = unvisited.clone();

        while let Some(src) = worklist.pop_front() {
            if !unvisited.remove(&src) {
                continue;
            }

            let candidates: Vec<ClusterId> = unvisited.iter().copied().collect();
            for dst in candidates {
                if !reach::is_reachable(arena, src, dst)
                    && !reach::is_reachable(arena, dst, src)
                {
                    let merged = contract::merge(arena, src, dst)?;
                    unvisited.remove(&dst);
                    unvisited.insert(merged);
                    worklist.push_back(merged);
                    live.remove(&src);
                    live.remove(&dst);
                    live.insert(merged);
                    break;
                }
            }
        }

        tracing::trace!(
            "disjoint merge on {placement}: {} -> {}",
            members.len(),
            live.len(),
        );
        result.extend(live);
    }

    *clusters = result;
    tracing::debug!("disjoint merge: {before} clusters -> {}", clusters.len());
    Ok(())
}
