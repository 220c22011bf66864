// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitioning options loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! validate_each_pass = true
//! coalesce_disjoint = true
//! ```

use crate::ClusterError;
use std::path::Path;

/// Tuning knobs for the partitioning pipeline.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PartitionOptions {
    /// Run the consistency checker after every pass, not only at the
    /// end. A failed check aborts partitioning either way; the per-pass
    /// checks pinpoint which pass broke an invariant at the cost of
    /// extra O(V+E) sweeps.
    #[serde(default = "default_true")]
    pub validate_each_pass: bool,

    /// Run the disjoint-merge pass. Disabling it keeps unconnected
    /// same-placement fragments separate and skips that pass's O(n²)
    /// reachability queries.
    #[serde(default = "default_true")]
    pub coalesce_disjoint: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            validate_each_pass: true,
            coalesce_disjoint: true,
        }
    }
}

impl PartitionOptions {
    /// Loads options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ClusterError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClusterError::ConfigError(format!("cannot read options '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses options from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ClusterError> {
        toml::from_str(toml_str)
            .map_err(|e| ClusterError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises options to TOML.
    pub fn to_toml(&self) -> Result<String, ClusterError> {
        toml::to_string_pretty(self)
            .map_err(|e| ClusterError::ConfigError(format!("TOML serialise error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let o = PartitionOptions::default();
        assert!(o.validate_each_pass);
        assert!(o.coalesce_disjoint);
    }

    #[test]
    fn test_from_toml() {
        let o = PartitionOptions::from_toml("coalesce_disjoint = false\n").unwrap();
        assert!(o.validate_each_pass);
        assert!(!o.coalesce_disjoint);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = PartitionOptions::from_toml("coalesce_disjoint = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, ClusterError::ConfigError(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let o = PartitionOptions {
            validate_each_pass: false,
            coalesce_disjoint: true,
        };
        let toml_str = o.to_toml().unwrap();
        let back = PartitionOptions::from_toml(&toml_str).unwrap();
        assert!(!back.validate_each_pass);
        assert!(back.coalesce_disjoint);
    }
}
