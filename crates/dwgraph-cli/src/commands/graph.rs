//! Graph management commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use dwgraph_core::{GraphAlgorithms, GraphModel};
use dwgraph_storage::GraphStore;

#[derive(Args)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: GraphCommands,
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Show graph statistics
    Info,
    /// List stored graphs
    List,
    /// Copy the current graph under a new name
    Copy {
        /// Name of the copy
        target: String,
        /// Overwrite an existing graph
        #[arg(long)]
        force: bool,
    },
    /// Delete a stored graph
    Delete {
        /// Graph name
        name: String,
    },
}

#[derive(Serialize)]
struct GraphInfo<'a> {
    name: &'a str,
    nodes: usize,
    edges: usize,
    mode_count: u64,
    strongly_connected: bool,
}

pub fn run(args: &GraphArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::debug!("Running graph command");

    match &args.command {
        GraphCommands::Info => {
            let graph = ctx.store.load_or_default(&ctx.graph)?;
            let (nodes, edges, mode_count) =
                (graph.node_count(), graph.edge_count(), graph.mode_count());
            let strongly_connected = GraphAlgorithms::with_graph(graph).is_strongly_connected();
            let info = GraphInfo {
                name: &ctx.graph,
                nodes,
                edges,
                mode_count,
                strongly_connected,
            };

            match ctx.format {
                OutputFormat::Json => print_json(&info)?,
                OutputFormat::Table => {
                    println!("Graph '{}':", info.name);
                    println!("  nodes: {}", info.nodes);
                    println!("  edges: {}", info.edges);
                    println!("  modifications: {}", info.mode_count);
                    println!("  strongly connected: {}", info.strongly_connected);
                }
            }
        }
        GraphCommands::List => {
            let names = ctx.store.list_graphs()?;
            tracing::info!("Found {} graphs", names.len());

            match ctx.format {
                OutputFormat::Json => print_json(&names)?,
                OutputFormat::Table if names.is_empty() => {
                    println!("No graphs found. Add a node with 'dwgraph node add <key>'");
                }
                OutputFormat::Table => {
                    println!("Graphs ({} found):", names.len());
                    for name in &names {
                        let current = if *name == ctx.graph { " (current)" } else { "" };
                        println!("  {}{}", name, current);
                    }
                }
            }
        }
        GraphCommands::Copy { target, force } => {
            if ctx.store.contains(target)? && !force {
                anyhow::bail!(
                    "Graph '{}' already exists. Use --force to overwrite.",
                    target
                );
            }

            let Some(source) = ctx.store.load_graph(&ctx.graph)? else {
                println!("Graph '{}' not found", ctx.graph);
                return Ok(());
            };
            let algo = GraphAlgorithms::with_graph(source);
            let Some(copy) = algo.copy() else {
                anyhow::bail!("No graph bound for '{}'", ctx.graph);
            };

            ctx.store.save_graph(target, &copy)?;
            tracing::info!("Copied graph '{}' to '{}'", ctx.graph, target);
            println!(
                "Copied graph '{}' to '{}' ({} nodes, {} edges)",
                ctx.graph,
                target,
                copy.node_count(),
                copy.edge_count()
            );
        }
        GraphCommands::Delete { name } => {
            ctx.store.delete_graph(name)?;
            println!("Deleted graph '{}'", name);
        }
    }

    Ok(())
}
