// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device placement domain.
//!
//! Every node carries a [`Placement`] assigned by an external pass before
//! the graph reaches the clustering pipeline. [`Placement::Default`] is a
//! sentinel meaning "not yet assigned" and is rejected as soon as a node
//! is handed to the partitioner.

use std::fmt;

/// The execution target assigned to a node (and, after clustering, to a
/// whole cluster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Unassigned sentinel. Never valid inside a cluster.
    Default,
    /// Reference interpreter backend.
    Interpreter,
    /// Host CPU backend.
    Cpu,
    /// GPU backend.
    Gpu,
    /// Dedicated accelerator backend.
    Accelerator,
}

impl Placement {
    /// Returns `true` if this is a real device placement (not the
    /// [`Placement::Default`] sentinel).
    pub fn is_assigned(self) -> bool {
        self != Placement::Default
    }

    /// Upper-case name used in logs and debug output.
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Default => "DEFAULT",
            Placement::Interpreter => "INTERPRETER",
            Placement::Cpu => "CPU",
            Placement::Gpu => "GPU",
            Placement::Accelerator => "ACCELERATOR",
        }
    }

    /// Parses a placement from a loosely formatted string.
    ///
    /// Accepts upper- or lower-case names (`"CPU"`, `"cpu"`, ...).
    /// Returns `None` for unrecognised strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Placement::Default),
            "interpreter" => Some(Placement::Interpreter),
            "cpu" => Some(Placement::Cpu),
            "gpu" => Some(Placement::Gpu),
            "accelerator" => Some(Placement::Accelerator),
            _ => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
