// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device partition: the output of the clustering pipeline.
//!
//! A [`DevicePartition`] is an immutable, topologically ordered list of
//! clusters. Downstream compilation consumes it to emit one executable
//! unit per cluster and to sequence cluster dispatch at runtime; the
//! dispatch protocol itself is out of scope here.

use crate::{Cluster, ClusterArena, ClusterId};
use graph_ir::{OpGraph, Placement, Validated};

/// The finished partition. Clusters appear in topological order: every
/// parent precedes its children.
#[derive(Debug)]
pub struct DevicePartition {
    arena: ClusterArena,
    order: Vec<ClusterId>,
}

impl DevicePartition {
    pub(crate) fn new(arena: ClusterArena, order: Vec<ClusterId>) -> Self {
        Self { arena, order }
    }

    /// Number of clusters in the partition.
    pub fn num_clusters(&self) -> usize {
        self.order.len()
    }

    /// Total nodes across all clusters (equals the source graph's node
    /// count).
    pub fn num_nodes(&self) -> usize {
        self.order.iter().map(|&c| self.arena[c].size()).sum()
    }

    /// Iterates over clusters in topological order.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.order.iter().map(|&c| &self.arena[c])
    }

    /// Resolves a cluster id taken from another cluster's parent/child
    /// set.
    pub fn cluster(&self, id: ClusterId) -> &Cluster {
        &self.arena[id]
    }

    /// Counts clusters per placement.
    pub fn placement_counts(&self) -> Vec<(Placement, usize)> {
        let mut counts: std::collections::BTreeMap<Placement, usize> =
            std::collections::BTreeMap::new();
        for cluster in self.clusters() {
            *counts.entry(cluster.placement()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    /// Returns a human-readable summary of the partition.
    pub fn summary(&self) -> String {
        let breakdown: Vec<String> = self
            .placement_counts()
            .iter()
            .map(|(p, c)| format!("{p}: {c}"))
            .collect();
        let sizes: Vec<usize> = self.clusters().map(Cluster::size).collect();
        format!(
            "Partition: {} clusters over {} nodes ({}), cluster sizes: {:?}",
            self.num_clusters(),
            self.num_nodes(),
            breakdown.join(", "),
            sizes,
        )
    }

    /// Renders the partition as a serializable manifest, resolving node
    /// ids back to names through the source graph.
    pub fn to_manifest(&self, graph: &OpGraph<Validated>) -> PartitionManifest {
        let clusters = self
            .clusters()
            .map(|cluster| ClusterEntry {
                name: cluster.debug_name(),
                placement: cluster.placement(),
                nodes: cluster
                    .nodes()
                    .iter()
                    .map(|&n| graph.node(n).name.clone())
                    .collect(),
                parents: cluster
                    .parents()
                    .iter()
                    .map(|&p| self.arena[p].debug_name())
                    .collect(),
                children: cluster
                    .children()
                    .iter()
                    .map(|&c| self.arena[c].debug_name())
                    .collect(),
            })
            .collect();
        PartitionManifest {
            graph: graph.name.clone(),
            clusters,
        }
    }
}

/// Serializable rendering of a partition, in topological order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PartitionManifest {
    /// Name of the source graph.
    pub graph: String,
    /// Cluster entries, parents before children.
    pub clusters: Vec<ClusterEntry>,
}

/// One cluster in a [`PartitionManifest`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClusterEntry {
    /// Stable cluster name (`"cluster_<id>"`).
    pub name: String,
    /// Device placement of every node in this cluster.
    pub placement: Placement,
    /// Node names grouped in this cluster.
    pub nodes: Vec<String>,
    /// Names of upstream clusters.
    pub parents: Vec<String>,
    /// Names of downstream clusters.
    pub children: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::partition;
    use graph_ir::GraphBuilder;

    fn sandwich() -> OpGraph<Validated> {
        let mut b = GraphBuilder::new();
        let head = b.node("head", Placement::Cpu, &[]);
        let mid = b.node("mid", Placement::Gpu, &[head]);
        b.node("tail", Placement::Cpu, &[mid]);
        b.finish("sandwich").validate().unwrap()
    }

    #[test]
    fn test_accessors() {
        let graph = sandwich();
        let p = partition(&graph).unwrap();

        assert_eq!(p.num_clusters(), 3);
        assert_eq!(p.num_nodes(), 3);
        assert_eq!(
            p.placement_counts(),
            vec![(Placement::Cpu, 2), (Placement::Gpu, 1)],
        );
    }

    #[test]
    fn test_links_resolve_through_partition() {
        let graph = sandwich();
        let p = partition(&graph).unwrap();

        for cluster in p.clusters() {
            for &child in cluster.children() {
                assert!(p.cluster(child).has_parent(cluster.id()));
            }
        }
    }

    #[test]
    fn test_manifest_is_topologically_ordered() {
        let graph = sandwich();
        let p = partition(&graph).unwrap();
        let manifest = p.to_manifest(&graph);

        assert_eq!(manifest.graph, "sandwich");
        assert_eq!(manifest.clusters.len(), 3);
        assert_eq!(manifest.clusters[0].nodes, vec!["head"]);
        assert_eq!(manifest.clusters[1].nodes, vec!["mid"]);
        assert_eq!(manifest.clusters[2].nodes, vec!["tail"]);
        assert_eq!(manifest.clusters[1].placement, Placement::Gpu);
    }

    #[test]
    fn test_manifest_serde_roundtrip() {
        let graph = sandwich();
        let manifest = partition(&graph).unwrap().to_manifest(&graph);
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: PartitionManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.clusters.len(), manifest.clusters.len());
        assert_eq!(back.graph, manifest.graph);
    }

    #[test]
    fn test_summary() {
        let graph = sandwich();
        let p = partition(&graph).unwrap();
        let s = p.summary();
        assert!(s.contains("3 clusters"));
        assert!(s.contains("3 nodes"));
    }
}
