// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cluster-rt
//!
//! Command-line interface for the placement clustering pipeline.
//!
//! ## Usage
//! ```bash
//! # Partition a placed graph into device clusters
//! cluster-rt partition --graph ./graphs/resnet-block.json
//!
//! # Emit the partition as JSON
//! cluster-rt partition --graph ./graphs/resnet-block.json --json
//!
//! # Inspect a graph manifest
//! cluster-rt inspect --graph ./graphs/resnet-block.json
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cluster-rt",
    about = "Partitions placed computation graphs into ordered device clusters",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a graph into topologically ordered device clusters.
    Partition {
        /// Path to the graph manifest (JSON).
        #[arg(short, long)]
        graph: std::path::PathBuf,

        /// Path to a TOML options file.
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Print the partition manifest as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Skip coalescing of unconnected same-device clusters.
        #[arg(long)]
        no_coalesce: bool,
    },

    /// Inspect a graph: print the node table and placement breakdown.
    Inspect {
        /// Path to the graph manifest (JSON).
        #[arg(short, long)]
        graph: std::path::PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Partition {
            graph,
            config,
            json,
            no_coalesce,
        } => commands::partition::execute(graph, config, json, no_coalesce),
        Commands::Inspect { graph } => commands::inspect::execute(graph),
    }
}
