// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-ir
//!
//! A lightweight intermediate representation for placed computation
//! graphs.
//!
//! Rather than depending on a full compiler framework, this crate defines
//! the minimal IR the clustering pipeline needs:
//!
//! - [`Placement`] — the device target assigned to each node.
//! - [`NodeDef`] / [`NodeId`] — a single operation and its input edges.
//! - [`OpGraph`] — the full graph as a DAG of nodes, with a
//!   **type-state pattern** (`Loaded` → `Validated`).
//! - [`GraphBuilder`] — programmatic graph construction.
//! - [`GraphManifest`] — JSON graph descriptor with name-based edges.
//!
//! Placement *assignment* is out of scope: nodes arrive here with their
//! placements already decided by an external pass. This crate only
//! carries them; the cluster planner enforces the "no `DEFAULT` sentinel"
//! contract when clusters are formed.
//!
//! # Example
//! ```
//! use graph_ir::{GraphBuilder, Placement};
//!
//! let mut b = GraphBuilder::new();
//! let x = b.node("x", Placement::Cpu, &[]);
//! let y = b.node("y", Placement::Gpu, &[x]);
//! b.node("z", Placement::Cpu, &[x, y]);
//! let graph = b.finish("example").validate().unwrap();
//! println!("{}", graph.summary());
//! ```

mod error;
pub mod graph;
mod manifest;
mod node;
mod placement;

pub use error::GraphError;
pub use graph::{GraphBuilder, Loaded, OpGraph, Validated};
pub use manifest::{GraphManifest, ManifestNode};
pub use node::{NodeDef, NodeId};
pub use placement::Placement;
