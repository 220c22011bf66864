// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The cluster entity and its arena.
//!
//! A [`Cluster`] is a mutable group of graph nodes sharing one placement,
//! linked to neighbouring clusters through parent/child relations. The
//! relations are bidirectional, which in a naive shared-ownership model
//! would create reference cycles; instead, all clusters live in a central
//! [`ClusterArena`] and the parent/child sets store plain [`ClusterId`]s.
//! Structural cycles in the relation graph remain possible — they are
//! exactly what the acyclicity invariant guards against — but they carry
//! no memory-management risk.
//!
//! Node and id sets are `BTreeSet`s, so all iteration downstream happens
//! in a stable order and the resulting partition is reproducible run to
//! run.

use crate::ClusterError;
use graph_ir::{NodeId, OpGraph, Placement, Validated};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Index of a cluster in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub usize);

impl ClusterId {
    /// Returns the underlying arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster_{}", self.0)
    }
}

/// A placement-homogeneous group of graph nodes.
///
/// Clusters never own their nodes — node ids reference entries in the
/// externally owned source graph. A merge retires both of its inputs by
/// clearing their state; retired clusters stay in the arena (their id is
/// never reused) but drop out of every live cluster list.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: ClusterId,
    placement: Placement,
    nodes: BTreeSet<NodeId>,
    parents: BTreeSet<ClusterId>,
    children: BTreeSet<ClusterId>,
}

impl Cluster {
    fn new(id: ClusterId) -> Self {
        Self {
            id,
            placement: Placement::Default,
            nodes: BTreeSet::new(),
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    /// This cluster's arena id.
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// The placement shared by every node in this cluster.
    ///
    /// `DEFAULT` only while the cluster is still empty.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The nodes grouped in this cluster.
    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    /// Number of nodes in this cluster.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// `true` once the cluster has been retired (or not yet populated).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a node carrying the given placement.
    ///
    /// The first insertion fixes the cluster's placement; every later
    /// insertion must match it. A `DEFAULT` placement is rejected
    /// outright — placement assignment happens before clustering.
    pub fn insert_node(
        &mut self,
        node: NodeId,
        placement: Placement,
    ) -> Result<(), ClusterError> {
        if !placement.is_assigned() {
            return Err(ClusterError::UnplacedNode { node });
        }
        if self.nodes.is_empty() {
            self.placement = placement;
        } else if self.placement != placement {
            return Err(ClusterError::PlacementMismatch {
                node,
                node_placement: placement,
                cluster: self.id,
                cluster_placement: self.placement,
            });
        }
        self.nodes.insert(node);
        Ok(())
    }

    // ── Children ───────────────────────────────────────────────────

    /// Clusters that consume this cluster's outputs.
    pub fn children(&self) -> &BTreeSet<ClusterId> {
        &self.children
    }

    pub fn insert_child(&mut self, child: ClusterId) {
        self.children.insert(child);
    }

    /// Removes a child link. The link must exist.
    pub fn remove_child(&mut self, child: ClusterId) -> Result<(), ClusterError> {
        if !self.children.remove(&child) {
            return Err(ClusterError::MissingRelation {
                cluster: self.id,
                other: child,
                kind: "child",
            });
        }
        Ok(())
    }

    /// Removes a child link if present; no-op otherwise.
    pub fn remove_child_if_exists(&mut self, child: ClusterId) {
        self.children.remove(&child);
    }

    pub fn has_child(&self, child: ClusterId) -> bool {
        self.children.contains(&child)
    }

    // ── Parents ────────────────────────────────────────────────────

    /// Clusters whose outputs this cluster consumes.
    pub fn parents(&self) -> &BTreeSet<ClusterId> {
        &self.parents
    }

    pub fn insert_parent(&mut self, parent: ClusterId) {
        self.parents.insert(parent);
    }

    /// Removes a parent link. The link must exist.
    pub fn remove_parent(&mut self, parent: ClusterId) -> Result<(), ClusterError> {
        if !self.parents.remove(&parent) {
            return Err(ClusterError::MissingRelation {
                cluster: self.id,
                other: parent,
                kind: "parent",
            });
        }
        Ok(())
    }

    /// Removes a parent link if present; no-op otherwise.
    pub fn remove_parent_if_exists(&mut self, parent: ClusterId) {
        self.parents.remove(&parent);
    }

    pub fn has_parent(&self, parent: ClusterId) -> bool {
        self.parents.contains(&parent)
    }

    // ── Lifecycle & debugging ──────────────────────────────────────

    /// Clears all state. Called when a merge retires this cluster.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.parents.clear();
        self.children.clear();
        self.placement = Placement::Default;
    }

    /// Stable name for logs and error messages.
    pub fn debug_name(&self) -> String {
        self.id.to_string()
    }

    /// Renders the cluster with its node names, for diagnostics.
    pub fn debug_node_names(&self, graph: &OpGraph<Validated>) -> String {
        let names: Vec<&str> = self
            .nodes
            .iter()
            .map(|&n| graph.node(n).name.as_str())
            .collect();
        format!("[{}({})]{{{}}}", self.id, self.placement, names.join(", "))
    }
}

/// Central store for all clusters created during one partitioning run.
///
/// Ids are assigned sequentially and never reused, so a cluster's id also
/// records its creation order. The pipeline is single-threaded, which is
/// why a plain counter suffices here.
#[derive(Debug, Clone, Default)]
pub struct ClusterArena {
    clusters: Vec<Cluster>,
}

impl ClusterArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty cluster and returns its id.
    pub fn alloc(&mut self) -> ClusterId {
        let id = ClusterId(self.clusters.len());
        self.clusters.push(Cluster::new(id));
        id
    }

    /// Total clusters ever created, including retired ones.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Wires `parent -> child` in both directions.
    pub fn link(&mut self, parent: ClusterId, child: ClusterId) {
        self.clusters[parent.index()].insert_child(child);
        self.clusters[child.index()].insert_parent(parent);
    }
}

impl Index<ClusterId> for ClusterArena {
    type Output = Cluster;

    fn index(&self, id: ClusterId) -> &Cluster {
        &self.clusters[id.index()]
    }
}

impl IndexMut<ClusterId> for ClusterArena {
    fn index_mut(&mut self, id: ClusterId) -> &mut Cluster {
        &mut self.clusters[id.index()]
    }
}
