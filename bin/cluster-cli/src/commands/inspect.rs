// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cluster-rt inspect` command: display graph structure and placement
//! breakdown without partitioning.

use anyhow::Context;
use graph_ir::GraphManifest;
use std::path::PathBuf;

pub fn execute(graph_path: PathBuf) -> anyhow::Result<()> {
    let graph = GraphManifest::load(&graph_path)
        .with_context(|| format!("failed to load graph '{}'", graph_path.display()))?;

    println!("{}", graph.summary());
    println!();
    println!(
        "  {:<4} {:<24} {:<16} {:<12} {}",
        "Id", "Name", "Op", "Placement", "Inputs",
    );
    println!("  {}", "-".repeat(76));

    for (id, node) in graph.iter_nodes() {
        let inputs: Vec<&str> = node
            .inputs
            .iter()
            .map(|&i| graph.node(i).name.as_str())
            .collect();
        println!(
            "  {:<4} {:<24} {:<16} {:<12} {}",
            id.index(),
            truncate(&node.name, 24),
            truncate(&node.op, 16),
            node.placement.to_string(),
            inputs.join(", "),
        );
    }

    println!();
    println!("  Placement breakdown:");
    for (placement, count) in graph.placement_counts() {
        println!("   {placement:<12} {count} nodes");
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        &s[..max]
    }
}
