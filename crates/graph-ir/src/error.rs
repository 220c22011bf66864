// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for graph construction and manifest loading.

/// Errors that can occur when building or loading a computation graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The graph manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestReadError(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// Two nodes share the same name.
    #[error("duplicate node name: {name}")]
    DuplicateNode { name: String },

    /// A node references an input that does not exist.
    #[error("node '{node}' references unknown input '{input}'")]
    UnknownInput { node: String, input: String },

    /// A node definition is invalid (bad edge, self-reference, ...).
    #[error("invalid node '{node}': {detail}")]
    InvalidNode { node: String, detail: String },

    /// The graph contains no nodes.
    #[error("graph contains no nodes")]
    EmptyGraph,

    /// The node input edges contain a cycle.
    #[error("graph is not a DAG: only {ordered} of {total} nodes could be ordered")]
    CyclicGraph { ordered: usize, total: usize },
}
