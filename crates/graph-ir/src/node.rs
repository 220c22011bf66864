// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Node definitions: one entry per operation in the computation graph.

use crate::Placement;
use std::fmt;

/// Index of a node in its graph's node table.
///
/// Node ids are dense and follow creation order, so they double as a
/// stable iteration order for the deterministic worklists downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the underlying table index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A single operation node.
///
/// The operation type system is external to this subsystem: `op` is an
/// opaque label carried through for debugging and manifests only.
#[derive(Debug, Clone)]
pub struct NodeDef {
    /// Unique node name (e.g., `"conv1"`, `"add_3"`).
    pub name: String,
    /// Operation label (e.g., `"MatMul"`). Opaque to the partitioner.
    pub op: String,
    /// Device placement assigned by an external placement pass.
    pub placement: Placement,
    /// Data-dependency inputs: the nodes whose outputs this node consumes.
    pub inputs: Vec<NodeId>,
}

impl NodeDef {
    /// One-line description used by `inspect` output and logs.
    pub fn summary(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(ToString::to_string).collect();
        format!(
            "{} [{}] on {} <- [{}]",
            self.name,
            self.op,
            self.placement,
            inputs.join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "n7");
        assert_eq!(NodeId(7).index(), 7);
    }

    #[test]
    fn test_summary() {
        let node = NodeDef {
            name: "add_0".into(),
            op: "Add".into(),
            placement: Placement::Cpu,
            inputs: vec![NodeId(0), NodeId(1)],
        };
        let s = node.summary();
        assert!(s.contains("add_0"));
        assert!(s.contains("CPU"));
        assert!(s.contains("n0, n1"));
    }
}
