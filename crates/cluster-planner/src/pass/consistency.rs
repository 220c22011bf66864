// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Consistency checker: independent re-derivation of the partition
//! invariants.
//!
//! Runs after every pass and performs no mutation. The checks, against
//! the live cluster list and the original node graph:
//!
//! 1. every cluster is non-empty;
//! 2. every cluster is placement-homogeneous and its placement field
//!    matches its nodes;
//! 3. the cluster node sets partition the graph's node set exactly;
//! 4. a cross-cluster node edge exists iff the corresponding
//!    cluster-level link exists (no missing and no excess links);
//! 5. parent and child sets are symmetric, and no link points at a
//!    retired cluster;
//! 6. the cluster graph is acyclic.
//!
//! Any violation is reported as [`ClusterError::Inconsistent`] and is a
//! bug in the pipeline, never a property of user input.

use crate::{ClusterArena, ClusterError, ClusterId};
use graph_ir::{NodeId, OpGraph, Validated};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

fn violation(detail: impl Into<String>) -> ClusterError {
    ClusterError::Inconsistent {
        detail: detail.into(),
    }
}

/// Verifies all partition invariants; read-only.
pub fn check_partition(
    arena: &ClusterArena,
    clusters: &[ClusterId],
    graph: &OpGraph<Validated>,
) -> Result<(), ClusterError> {
    let live: HashSet<ClusterId> = clusters.iter().copied().collect();
    if live.len() != clusters.len() {
        return Err(violation("live cluster list contains duplicates"));
    }

    // 1. No empty clusters.
    for &cluster in clusters {
        if arena[cluster].is_empty() {
            return Err(violation(format!("{cluster} is empty")));
        }
    }

    // 2. Placement homogeneity, re-derived from the graph.
    for &cluster in clusters {
        let placement = arena[cluster].placement();
        if !placement.is_assigned() {
            return Err(violation(format!("{cluster} has no placement")));
        }
        for &node in arena[cluster].nodes() {
            let node_placement = graph.node(node).placement;
            if node_placement != placement {
                return Err(violation(format!(
                    "node {node} has placement {node_placement} inside {cluster} ({placement})",
                )));
            }
        }
    }

    // 3. Exact partition: each graph node in exactly one cluster.
    let mut owner: HashMap<NodeId, ClusterId> = HashMap::new();
    for &cluster in clusters {
        for &node in arena[cluster].nodes() {
            if let Some(previous) = owner.insert(node, cluster) {
                return Err(violation(format!(
                    "node {node} appears in both {previous} and {cluster}",
                )));
            }
        }
    }
    for id in graph.node_ids() {
        if !owner.contains_key(&id) {
            return Err(violation(format!(
                "node {id} ('{}') is not covered by any cluster",
                graph.node(id).name,
            )));
        }
    }
    if owner.len() != graph.num_nodes() {
        return Err(violation(format!(
            "clusters cover {} nodes but the graph has {}",
            owner.len(),
            graph.num_nodes(),
        )));
    }

    // 4. Edge fidelity, both directions.
    let mut node_derived_links: BTreeSet<(ClusterId, ClusterId)> = BTreeSet::new();
    for (id, node) in graph.iter_nodes() {
        let dst_cluster = owner[&id];
        for &input in &node.inputs {
            let src_cluster = owner[&input];
            if src_cluster == dst_cluster {
                continue;
            }
            if !arena[src_cluster].has_child(dst_cluster) {
                return Err(violation(format!(
                    "node edge {input} -> {id} exists but link {} -> {} does not",
                    arena[src_cluster].debug_node_names(graph),
                    arena[dst_cluster].debug_node_names(graph),
                )));
            }
            node_derived_links.insert((src_cluster, dst_cluster));
        }
    }
    for &cluster in clusters {
        for &child in arena[cluster].children() {
            if !node_derived_links.contains(&(cluster, child)) {
                return Err(violation(format!(
                    "excess cluster link {cluster} -> {child} with no backing node edge",
                )));
            }
        }
    }

    // 5. Link symmetry; links must stay inside the live list.
    for &cluster in clusters {
        for &child in arena[cluster].children() {
            if !live.contains(&child) {
                return Err(violation(format!(
                    "{cluster} holds a child link to retired {child}",
                )));
            }
            if !arena[child].has_parent(cluster) {
                return Err(violation(format!(
                    "{child} is a child of {cluster}, but {cluster} is not a parent of {child}",
                )));
            }
        }
        for &parent in arena[cluster].parents() {
            if !live.contains(&parent) {
                return Err(violation(format!(
                    "{cluster} holds a parent link to retired {parent}",
                )));
            }
            if !arena[parent].has_child(cluster) {
                return Err(violation(format!(
                    "{parent} is a parent of {cluster}, but {cluster} is not a child of {parent}",
                )));
            }
        }
    }

    // 6. Acyclicity (Kahn count, no mutation).
    let mut pending_parents: HashMap<ClusterId, usize> = clusters
        .iter()
        .map(|&c| (c, arena[c].parents().len()))
        .collect();
    let mut ready: VecDeque<ClusterId> = clusters
        .iter()
        .copied()
        .filter(|&c| arena[c].parents().is_empty())
        .collect();
    let mut freed = 0;
    while let Some(cluster) = ready.pop_front() {
        freed += 1;
        for &child in arena[cluster].children() {
            let remaining = pending_parents.get_mut(&child).expect("checked above");
            *remaining -= 1;
            if *remaining == 0 {
                ready.push_back(child);
            }
        }
    }
    if freed != clusters.len() {
        return Err(violation(format!(
            "cluster graph contains a cycle: only {freed} of {} clusters can be ordered",
            clusters.len(),
        )));
    }

    Ok(())
}
