// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Computation graph: operations with placements, wired by input edges.
//!
//! # Type-State Pattern
//!
//! The graph transitions through states enforced at compile time:
//!
//! ```text
//! OpGraph<Loaded>     — nodes collected, not yet checked.
//!       │  .validate()
//!       ▼
//! OpGraph<Validated>  — edges verified acyclic, ready for clustering.
//! ```
//!
//! This prevents the cluster planner from ever receiving a malformed
//! graph. The transition consumes the old state and returns the new one,
//! so there is zero runtime cost — the marker types are `PhantomData`
//! (ZST).
//!
//! The graph is read-only once validated: the clustering pipeline never
//! mutates nodes or their placements.

use crate::{GraphError, NodeDef, NodeId, Placement};
use std::collections::{HashMap, VecDeque};
use std::fmt;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: graph has been built but not validated.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: graph has been validated and is ready for clustering.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for graph states.
pub trait GraphState: fmt::Debug + Clone {}
impl GraphState for Loaded {}
impl GraphState for Validated {}

// ── OpGraph ────────────────────────────────────────────────────────

/// The computation graph as an ordered table of nodes.
///
/// Node ids are indices into the table; input edges reference other
/// entries by id. The generic parameter `S` encodes the validation
/// state at compile time.
#[derive(Debug, Clone)]
pub struct OpGraph<S: GraphState = Loaded> {
    /// Human-readable graph name (e.g., `"resnet-block"`).
    pub name: String,
    /// Node table in creation order.
    nodes: Vec<NodeDef>,
    /// State marker (zero-sized, compile-time only).
    _state: std::marker::PhantomData<S>,
}

// ── Loaded state ───────────────────────────────────────────────────

impl OpGraph<Loaded> {
    /// Creates a new graph in the `Loaded` state.
    pub fn new(name: String, nodes: Vec<NodeDef>) -> Self {
        Self {
            name,
            nodes,
            _state: std::marker::PhantomData,
        }
    }

    /// Validates the graph and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - The graph is non-empty.
    /// - Node names are unique.
    /// - Every input id refers to a node in the table.
    /// - No node lists itself as an input.
    /// - The input edges form a DAG (Kahn count over in-degrees).
    ///
    /// Placements are *not* checked here: rejecting the `DEFAULT`
    /// sentinel is the partitioner's contract, surfaced when a node is
    /// first inserted into a cluster.
    pub fn validate(self) -> Result<OpGraph<Validated>, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut seen_names = std::collections::HashSet::new();
        for node in &self.nodes {
            if !seen_names.insert(node.name.as_str()) {
                return Err(GraphError::DuplicateNode {
                    name: node.name.clone(),
                });
            }
        }

        for (i, node) in self.nodes.iter().enumerate() {
            for &input in &node.inputs {
                if input.index() >= self.nodes.len() {
                    return Err(GraphError::InvalidNode {
                        node: node.name.clone(),
                        detail: format!("input {input} is out of range"),
                    });
                }
                if input.index() == i {
                    return Err(GraphError::InvalidNode {
                        node: node.name.clone(),
                        detail: "node lists itself as an input".into(),
                    });
                }
            }
        }

        self.check_acyclic()?;

        Ok(OpGraph {
            name: self.name,
            nodes: self.nodes,
            _state: std::marker::PhantomData,
        })
    }

    /// Kahn count over the node graph; errs if some nodes are never freed.
    fn check_acyclic(&self) -> Result<(), GraphError> {
        let mut in_degree: Vec<usize> = self.nodes.iter().map(|n| n.inputs.len()).collect();
        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            for &input in &node.inputs {
                out_edges[input.index()].push(i);
            }
        }

        let mut ready: VecDeque<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(i, _)| i)
            .collect();
        let mut freed = 0;
        while let Some(i) = ready.pop_front() {
            freed += 1;
            for &next in &out_edges[i] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push_back(next);
                }
            }
        }

        if freed != self.nodes.len() {
            return Err(GraphError::CyclicGraph {
                ordered: freed,
                total: self.nodes.len(),
            });
        }
        Ok(())
    }
}

// ── Validated state ────────────────────────────────────────────────

impl OpGraph<Validated> {
    /// Returns the total number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a node by id.
    ///
    /// # Panics
    /// Ids handed out by this graph are always in range; an out-of-range
    /// id is a caller bug.
    pub fn node(&self, id: NodeId) -> &NodeDef {
        &self.nodes[id.index()]
    }

    /// Iterates over `(id, node)` pairs in creation order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeDef)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Returns all node ids in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Counts nodes per placement, used by `inspect` and summaries.
    pub fn placement_counts(&self) -> Vec<(Placement, usize)> {
        let mut counts: std::collections::BTreeMap<Placement, usize> =
            std::collections::BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.placement).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    /// Returns a summary string describing the graph.
    pub fn summary(&self) -> String {
        let breakdown: Vec<String> = self
            .placement_counts()
            .iter()
            .map(|(p, c)| format!("{p}: {c}"))
            .collect();
        format!(
            "Graph '{}': {} nodes ({})",
            self.name,
            self.num_nodes(),
            breakdown.join(", "),
        )
    }
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: GraphState> fmt::Display for OpGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OpGraph '{}' ({} nodes):", self.name, self.nodes.len())?;
        for node in &self.nodes {
            writeln!(f, "  {}", node.summary())?;
        }
        Ok(())
    }
}

// ── GraphBuilder ───────────────────────────────────────────────────

/// Incremental construction helper for [`OpGraph`].
///
/// ```
/// use graph_ir::{GraphBuilder, Placement};
///
/// let mut b = GraphBuilder::new();
/// let p = b.node("p", Placement::Cpu, &[]);
/// let q = b.node("q", Placement::Cpu, &[p]);
/// b.node("r", Placement::Gpu, &[p, q]);
/// let graph = b.finish("demo").validate().unwrap();
/// assert_eq!(graph.num_nodes(), 3);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeDef>,
    names: HashMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with an opaque `"Op"` operation label.
    pub fn node(&mut self, name: &str, placement: Placement, inputs: &[NodeId]) -> NodeId {
        self.op_node(name, "Op", placement, inputs)
    }

    /// Adds a node with an explicit operation label.
    pub fn op_node(
        &mut self,
        name: &str,
        op: &str,
        placement: Placement,
        inputs: &[NodeId],
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeDef {
            name: name.to_string(),
            op: op.to_string(),
            placement,
            inputs: inputs.to_vec(),
        });
        self.names.insert(name.to_string(), id);
        id
    }

    /// Looks up a previously added node by name.
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Consumes the builder and returns the graph in the `Loaded` state.
    pub fn finish(self, name: &str) -> OpGraph<Loaded> {
        OpGraph::new(name.to_string(), self.nodes)
    }
}
