// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Adjacent merger: contracts safely-contractible parent→child edges
//! until none remain.

use crate::{contract, ClusterArena, ClusterError, ClusterId};
use std::collections::{BTreeSet, VecDeque};

/// Repeatedly contracts contractible edges to a local fixpoint.
///
/// A FIFO worklist is seeded with the live clusters in creation order,
/// so the resulting partition shape is reproducible run to run. Each
/// worklist entry is scanned against its current children; the first
/// contractible edge is merged, the merge result re-enters the worklist,
/// and the retired pair is dropped. When the worklist drains, no two
/// adjacent same-placement clusters are contractible.
///
/// On return `clusters` holds the surviving clusters; relative order is
/// by cluster id (re-established topologically by the final sort pass).
pub fn merge_adjacent(
    arena: &mut ClusterArena,
    clusters: &mut Vec<ClusterId>,
) -> Result<(), ClusterError> {
    let before = clusters.len();

    let mut worklist: VecDeque<ClusterId> = clusters.iter().copied().collect();
    let mut unvisited: BTreeSet<ClusterId> = clusters.iter().copied().collect();
    let mut live: BTreeSet<ClusterId> = unvisited.clone();

    while let Some(src) = worklist.pop_front() {
        // Skip entries retired by an earlier merge.
        if !unvisited.remove(&src) {
            continue;
        }

        let children: Vec<ClusterId> = arena[src].children().iter().copied().collect();
        for dst in children {
            if contract::is_contractible(arena, src, dst)? {
                let merged = contract::merge(arena, src, dst)?;
                unvisited.remove(&dst);
                unvisited.insert(merged);
                worklist.push_back(merged);
                live.remove(&src);
                live.remove(&dst);
                live.insert(merged);
                // src is retired; stop scanning its stale child list.
                break;
            }
        }
    }

    clusters.clear();
    clusters.extend(live);

    tracing::debug!(
        "adjacent merge: {before} clusters -> {}",
        clusters.len(),
    );
    Ok(())
}
