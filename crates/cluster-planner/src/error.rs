// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the cluster planner.
//!
//! Every variant here is a contract violation, not a recoverable runtime
//! condition: the caller is expected to treat any of these as an upstream
//! bug (typically a broken placement-assignment pass) and abort. No
//! partial recovery is attempted.

use crate::ClusterId;
use graph_ir::{NodeId, Placement};

/// Errors that can occur during cluster construction and partitioning.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// A node with the `DEFAULT` sentinel placement was handed to a
    /// cluster.
    #[error("node {node} has DEFAULT placement; a node must have a device placement to join a cluster")]
    UnplacedNode { node: NodeId },

    /// A node's placement differs from the placement of the cluster it
    /// was inserted into.
    #[error("node {node} has placement {node_placement} but cluster {cluster} has placement {cluster_placement}")]
    PlacementMismatch {
        node: NodeId,
        node_placement: Placement,
        cluster: ClusterId,
        cluster_placement: Placement,
    },

    /// An unconditional remove of a parent/child link that does not
    /// exist.
    #[error("cluster {cluster} has no {kind} link to {other}")]
    MissingRelation {
        cluster: ClusterId,
        other: ClusterId,
        kind: &'static str,
    },

    /// Attempted to merge two clusters with different placements.
    #[error("cannot merge clusters of different placements: {src} and {dst}")]
    PlacementConflict { src: Placement, dst: Placement },

    /// The consistency checker detected a violated invariant.
    #[error("partition consistency check failed: {detail}")]
    Inconsistent { detail: String },

    /// The topological sorter could not fully order the clusters.
    #[error("topological sort ordered {sorted} of {total} clusters; the cluster graph contains a cycle")]
    Cycle { sorted: usize, total: usize },

    /// A partition options file could not be read or parsed.
    #[error("invalid partition options: {0}")]
    ConfigError(String),
}
