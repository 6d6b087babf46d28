//! Shortest-path and connectivity commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{format_distance, print_json, OutputFormat};
use crate::AppContext;
use dwgraph_core::{GraphAlgorithms, GraphModel, GraphPath, NodeKey};
use dwgraph_storage::GraphStore;

#[derive(Args)]
pub struct PathArgs {
    #[command(subcommand)]
    pub command: PathCommands,
}

#[derive(Subcommand)]
pub enum PathCommands {
    /// Length of the shortest path between two nodes
    Distance {
        /// Starting node
        #[arg(allow_hyphen_values = true)]
        src: NodeKey,
        /// Target node
        #[arg(allow_hyphen_values = true)]
        dest: NodeKey,
    },
    /// Shortest path between two nodes
    Find {
        /// Starting node
        #[arg(allow_hyphen_values = true)]
        src: NodeKey,
        /// Target node
        #[arg(allow_hyphen_values = true)]
        dest: NodeKey,
    },
    /// Check whether every node reaches every other node
    Connected,
}

#[derive(Serialize)]
struct DistanceView {
    src: NodeKey,
    dest: NodeKey,
    distance: Option<f64>,
}

#[derive(Serialize)]
struct PathView {
    src: NodeKey,
    dest: NodeKey,
    path: Option<GraphPath>,
}

#[derive(Serialize)]
struct ConnectivityView<'a> {
    graph: &'a str,
    nodes: usize,
    strongly_connected: bool,
}

pub fn run(args: &PathArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graph = ctx.store.load_or_default(&ctx.graph)?;
    let node_count = graph.node_count();
    let mut algo = GraphAlgorithms::with_graph(graph);

    match &args.command {
        PathCommands::Distance { src, dest } => {
            let distance = algo.shortest_distance(*src, *dest);
            tracing::info!("Distance {} -> {}: {:?}", src, dest, distance);

            match ctx.format {
                OutputFormat::Json => print_json(&DistanceView {
                    src: *src,
                    dest: *dest,
                    distance,
                })?,
                OutputFormat::Table => println!("{}", format_distance(distance)),
            }
        }
        PathCommands::Find { src, dest } => {
            let path = algo.shortest_path(*src, *dest);
            let stats = algo.last_stats().clone();

            match ctx.format {
                OutputFormat::Json => print_json(&PathView {
                    src: *src,
                    dest: *dest,
                    path,
                })?,
                OutputFormat::Table => match path {
                    None => {
                        println!("no path");
                        println!(
                            "  (settled {} nodes, relaxed {} edges)",
                            stats.nodes_settled, stats.edges_relaxed
                        );
                    }
                    Some(path) => {
                        println!("{}", path);
                        println!(
                            "  {} hops, total weight: {:.2}",
                            path.length, path.total_weight
                        );
                        for edge in &path.edges {
                            println!("    {} -> {} (weight: {:.2})", edge.src, edge.dest, edge.weight);
                        }
                    }
                },
            }
        }
        PathCommands::Connected => {
            let strongly_connected = algo.is_strongly_connected();

            match ctx.format {
                OutputFormat::Json => print_json(&ConnectivityView {
                    graph: &ctx.graph,
                    nodes: node_count,
                    strongly_connected,
                })?,
                OutputFormat::Table => println!("strongly connected: {}", strongly_connected),
            }
        }
    }

    Ok(())
}
