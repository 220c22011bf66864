// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cluster-rt partition` command: run the full clustering pipeline on a
//! graph manifest and print the result.

use anyhow::Context;
use cluster_planner::{partition_with, PartitionOptions};
use graph_ir::GraphManifest;
use std::path::PathBuf;

pub fn execute(
    graph_path: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    no_coalesce: bool,
) -> anyhow::Result<()> {
    let graph = GraphManifest::load(&graph_path)
        .with_context(|| format!("failed to load graph '{}'", graph_path.display()))?;

    let mut options = match config {
        Some(path) => PartitionOptions::from_file(&path)
            .with_context(|| format!("failed to load options '{}'", path.display()))?,
        None => PartitionOptions::default(),
    };
    if no_coalesce {
        options.coalesce_disjoint = false;
    }

    let partition = partition_with(&graph, &options)
        .with_context(|| format!("failed to partition graph '{}'", graph.name))?;

    if json {
        let manifest = partition.to_manifest(&graph);
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    println!("{}", graph.summary());
    println!("{}", partition.summary());
    println!();
    println!(
        "  {:<4} {:<14} {:<12} {:>6}  {}",
        "Ord", "Cluster", "Placement", "Nodes", "Members",
    );
    println!("  {}", "-".repeat(72));

    for (i, cluster) in partition.clusters().enumerate() {
        let members: Vec<&str> = cluster
            .nodes()
            .iter()
            .map(|&n| graph.node(n).name.as_str())
            .collect();
        println!(
            "  {:<4} {:<14} {:<12} {:>6}  {}",
            i,
            cluster.debug_name(),
            cluster.placement().to_string(),
            cluster.size(),
            members.join(", "),
        );
    }

    Ok(())
}
