// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The partitioning pipeline: build → merge adjacent → merge disjoint →
//! topological sort, with consistency checks between passes.

use crate::pass::{adjacent, consistency, disjoint, singleton, toposort};
use crate::{ClusterArena, ClusterError, DevicePartition, PartitionOptions};
use graph_ir::{OpGraph, Validated};

/// Partitions `graph` into an ordered list of placement-homogeneous
/// clusters, using default [`PartitionOptions`].
pub fn partition(graph: &OpGraph<Validated>) -> Result<DevicePartition, ClusterError> {
    partition_with(graph, &PartitionOptions::default())
}

/// Partitions `graph` with explicit options.
///
/// Pipeline order is fixed: singleton build, adjacent merge, disjoint
/// merge (optional), topological sort. With
/// [`PartitionOptions::validate_each_pass`] the consistency checker runs
/// after every pass; the final check before returning always runs.
pub fn partition_with(
    graph: &OpGraph<Validated>,
    options: &PartitionOptions,
) -> Result<DevicePartition, ClusterError> {
    let mut arena = ClusterArena::new();

    let mut clusters = singleton::build_singletons(&mut arena, graph)?;
    if options.validate_each_pass {
        consistency::check_partition(&arena, &clusters, graph)?;
    }

    adjacent::merge_adjacent(&mut arena, &mut clusters)?;
    if options.validate_each_pass {
        consistency::check_partition(&arena, &clusters, graph)?;
    }

    if options.coalesce_disjoint {
        disjoint::merge_disjoint(&mut arena, &mut clusters)?;
        if options.validate_each_pass {
            consistency::check_partition(&arena, &clusters, graph)?;
        }
    }

    toposort::sort_clusters(&arena, &mut clusters)?;
    consistency::check_partition(&arena, &clusters, graph)?;

    tracing::info!(
        "partitioned graph '{}': {} nodes -> {} clusters",
        graph.name,
        graph.num_nodes(),
        clusters.len(),
    );
    Ok(DevicePartition::new(arena, clusters))
}
