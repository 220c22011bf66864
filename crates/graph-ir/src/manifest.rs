// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON graph manifest parsing.
//!
//! The manifest describes a placed computation graph with inputs
//! referenced by node name. It is the on-disk interchange format used by
//! the CLI; programmatic callers usually go through
//! [`crate::GraphBuilder`] instead.
//!
//! # Format
//! ```json
//! {
//!   "name": "resnet-block",
//!   "nodes": [
//!     { "name": "input",  "op": "Parameter", "placement": "cpu", "inputs": [] },
//!     { "name": "conv1",  "op": "Convolution", "placement": "gpu", "inputs": ["input"] },
//!     { "name": "relu1",  "op": "Relu", "placement": "gpu", "inputs": ["conv1"] },
//!     { "name": "result", "op": "Add", "placement": "cpu", "inputs": ["input", "relu1"] }
//!   ]
//! }
//! ```

use crate::{GraphError, Loaded, NodeDef, OpGraph, Placement};
use std::collections::HashMap;
use std::path::Path;

/// Top-level graph manifest, deserialized from JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GraphManifest {
    /// Human-readable graph name.
    pub name: String,
    /// Node entries in topological (creation) order.
    pub nodes: Vec<ManifestNode>,
}

/// A single node entry in the manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ManifestNode {
    /// Unique node name.
    pub name: String,
    /// Operation label (opaque to the partitioner).
    #[serde(default = "default_op")]
    pub op: String,
    /// Placement string (e.g., `"cpu"`, `"gpu"`).
    pub placement: String,
    /// Names of the nodes whose outputs this node consumes.
    #[serde(default)]
    pub inputs: Vec<String>,
}

fn default_op() -> String {
    "Op".to_string()
}

impl GraphManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Resolves name references and produces a graph in the `Loaded`
    /// state.
    ///
    /// # Checks
    /// - Placement strings are recognised.
    /// - No duplicate node names.
    /// - Every input name refers to an earlier entry (the manifest is
    ///   required to list nodes in topological order, which also rules
    ///   out input cycles at this level).
    pub fn into_graph(self) -> Result<OpGraph<Loaded>, GraphError> {
        let mut ids: HashMap<String, crate::NodeId> = HashMap::new();
        let mut nodes: Vec<NodeDef> = Vec::with_capacity(self.nodes.len());

        for entry in &self.nodes {
            let placement = Placement::from_str_loose(&entry.placement).ok_or_else(|| {
                GraphError::InvalidNode {
                    node: entry.name.clone(),
                    detail: format!("unrecognised placement '{}'", entry.placement),
                }
            })?;

            let mut inputs = Vec::with_capacity(entry.inputs.len());
            for input in &entry.inputs {
                let id = ids.get(input.as_str()).copied().ok_or_else(|| {
                    GraphError::UnknownInput {
                        node: entry.name.clone(),
                        input: input.clone(),
                    }
                })?;
                inputs.push(id);
            }

            let id = crate::NodeId(nodes.len());
            if ids.insert(entry.name.clone(), id).is_some() {
                return Err(GraphError::DuplicateNode {
                    name: entry.name.clone(),
                });
            }
            nodes.push(NodeDef {
                name: entry.name.clone(),
                op: entry.op.clone(),
                placement,
                inputs,
            });
        }

        Ok(OpGraph::new(self.name, nodes))
    }

    /// Convenience: load, resolve, and validate in one step.
    pub fn load(path: &Path) -> Result<OpGraph<crate::Validated>, GraphError> {
        let graph = Self::from_file(path)?.into_graph()?.validate()?;
        tracing::debug!("loaded graph '{}' ({} nodes)", graph.name, graph.num_nodes());
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest_json() -> &'static str {
        r#"{
            "name": "resnet-block",
            "nodes": [
                { "name": "input",  "op": "Parameter",   "placement": "cpu", "inputs": [] },
                { "name": "conv1",  "op": "Convolution", "placement": "gpu", "inputs": ["input"] },
                { "name": "relu1",  "op": "Relu",        "placement": "gpu", "inputs": ["conv1"] },
                { "name": "result", "op": "Add",         "placement": "cpu", "inputs": ["input", "relu1"] }
            ]
        }"#
    }

    #[test]
    fn test_parse_manifest() {
        let m = GraphManifest::from_json(sample_manifest_json()).unwrap();
        assert_eq!(m.name, "resnet-block");
        assert_eq!(m.nodes.len(), 4);
        assert_eq!(m.nodes[1].op, "Convolution");
    }

    #[test]
    fn test_into_graph() {
        let graph = GraphManifest::from_json(sample_manifest_json())
            .unwrap()
            .into_graph()
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(graph.num_nodes(), 4);
        // "result" consumes "input" (n0) and "relu1" (n2).
        let result = graph.node(crate::NodeId(3));
        assert_eq!(result.inputs, vec![crate::NodeId(0), crate::NodeId(2)]);
        assert_eq!(result.placement, Placement::Cpu);
    }

    #[test]
    fn test_unknown_input() {
        let json = r#"{
            "name": "bad",
            "nodes": [
                { "name": "a", "placement": "cpu", "inputs": ["ghost"] }
            ]
        }"#;
        let err = GraphManifest::from_json(json)
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownInput { .. }));
    }

    #[test]
    fn test_forward_reference_rejected() {
        // Inputs may only name earlier entries.
        let json = r#"{
            "name": "fwd",
            "nodes": [
                { "name": "a", "placement": "cpu", "inputs": ["b"] },
                { "name": "b", "placement": "cpu", "inputs": [] }
            ]
        }"#;
        let err = GraphManifest::from_json(json)
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownInput { .. }));
    }

    #[test]
    fn test_duplicate_node_name() {
        let json = r#"{
            "name": "dup",
            "nodes": [
                { "name": "a", "placement": "cpu", "inputs": [] },
                { "name": "a", "placement": "cpu", "inputs": [] }
            ]
        }"#;
        let err = GraphManifest::from_json(json)
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode { .. }));
    }

    #[test]
    fn test_bad_placement_string() {
        let json = r#"{
            "name": "bad",
            "nodes": [
                { "name": "a", "placement": "quantum", "inputs": [] }
            ]
        }"#;
        let err = GraphManifest::from_json(json)
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidNode { .. }));
    }

    #[test]
    fn test_default_op_label() {
        let json = r#"{
            "name": "min",
            "nodes": [ { "name": "a", "placement": "cpu" } ]
        }"#;
        let m = GraphManifest::from_json(json).unwrap();
        assert_eq!(m.nodes[0].op, "Op");
        assert!(m.nodes[0].inputs.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = GraphManifest::from_json(sample_manifest_json()).unwrap();
        let json = serde_json::to_string_pretty(&m).unwrap();
        let back = GraphManifest::from_json(&json).unwrap();
        assert_eq!(back.name, m.name);
        assert_eq!(back.nodes.len(), m.nodes.len());
    }
}
