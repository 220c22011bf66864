// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: partition a mixed CPU/GPU graph and print the clusters.
//!
//! Demonstrates the full pipeline on a small hybrid graph: same-device
//! regions collapse, cross-device boundaries survive, and the output
//! arrives topologically ordered.
//!
//! ```bash
//! cargo run -p cluster-planner --example partition_demo
//! ```

use cluster_planner::{partition_with, PartitionOptions};
use graph_ir::{GraphBuilder, Placement};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    // A small hybrid graph: a CPU preamble, a GPU middle section with
    // two branches, and a CPU epilogue.
    let mut b = GraphBuilder::new();
    let input = b.op_node("input", "Parameter", Placement::Cpu, &[]);
    let scale = b.op_node("scale", "Multiply", Placement::Cpu, &[input]);
    let conv_a = b.op_node("conv_a", "Convolution", Placement::Gpu, &[scale]);
    let conv_b = b.op_node("conv_b", "Convolution", Placement::Gpu, &[scale]);
    let join = b.op_node("join", "Add", Placement::Gpu, &[conv_a, conv_b]);
    let norm = b.op_node("norm", "BatchNorm", Placement::Gpu, &[join]);
    let gather = b.op_node("gather", "Concat", Placement::Cpu, &[norm, scale]);
    b.op_node("result", "Softmax", Placement::Cpu, &[gather]);
    let graph = b.finish("hybrid-demo").validate()?;

    println!("{}", graph.summary());
    println!();

    let partition = partition_with(&graph, &PartitionOptions::default())?;
    println!("{}", partition.summary());
    println!();

    for (i, cluster) in partition.clusters().enumerate() {
        let members: Vec<&str> = cluster
            .nodes()
            .iter()
            .map(|&n| graph.node(n).name.as_str())
            .collect();
        println!(
            "  {i}: {} on {} -> {{{}}}",
            cluster.debug_name(),
            cluster.placement(),
            members.join(", "),
        );
    }

    Ok(())
}
