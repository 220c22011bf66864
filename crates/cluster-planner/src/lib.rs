// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cluster-planner
//!
//! Partitions a placed computation graph into maximal,
//! placement-homogeneous, cycle-free clusters, topologically ordered for
//! downstream per-device compilation.
//!
//! # Pipeline
//!
//! ```text
//! OpGraph<Validated>
//!    │  pass::singleton      — one cluster per node
//!    ▼
//!    │  pass::adjacent       — contract safe parent→child edges
//!    ▼
//!    │  pass::disjoint       — coalesce unordered same-device clusters
//!    ▼
//!    │  pass::toposort       — Kahn ordering (cycle ⇒ fatal error)
//!    ▼
//! DevicePartition
//! ```
//!
//! The consistency checker re-derives every invariant (non-empty,
//! homogeneous, exact node partition, edge fidelity, link symmetry,
//! acyclicity) between passes. All failures are contract violations
//! surfaced as [`ClusterError`] — a greedy, safe partition is computed,
//! never a globally optimal one.
//!
//! # Example
//! ```
//! use cluster_planner::partition;
//! use graph_ir::{GraphBuilder, Placement};
//!
//! let mut b = GraphBuilder::new();
//! let p = b.node("p", Placement::Cpu, &[]);
//! let q = b.node("q", Placement::Cpu, &[p]);
//! b.node("r", Placement::Cpu, &[q]);
//! let graph = b.finish("chain").validate().unwrap();
//!
//! let partition = partition(&graph).unwrap();
//! assert_eq!(partition.num_clusters(), 1);
//! ```

mod cluster;
mod config;
pub mod contract;
mod error;
pub mod pass;
mod partition;
mod pipeline;
pub mod reach;

pub use cluster::{Cluster, ClusterArena, ClusterId};
pub use config::PartitionOptions;
pub use error::ClusterError;
pub use partition::{ClusterEntry, DevicePartition, PartitionManifest};
pub use pipeline::{partition, partition_with};
