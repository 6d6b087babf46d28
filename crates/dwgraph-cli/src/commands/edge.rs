//! Edge commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use dwgraph_core::{GraphModel, NodeKey};
use dwgraph_storage::GraphStore;

#[derive(Args)]
pub struct EdgeArgs {
    #[command(subcommand)]
    pub command: EdgeCommands,
}

#[derive(Subcommand)]
pub enum EdgeCommands {
    /// Connect two nodes (replaces the weight of an existing edge)
    Add {
        /// Source node
        #[arg(allow_hyphen_values = true)]
        src: NodeKey,
        /// Destination node
        #[arg(allow_hyphen_values = true)]
        dest: NodeKey,
        /// Edge weight (>= 0)
        #[arg(allow_hyphen_values = true)]
        weight: f64,
    },
    /// Remove an edge
    Remove {
        /// Source node
        #[arg(allow_hyphen_values = true)]
        src: NodeKey,
        /// Destination node
        #[arg(allow_hyphen_values = true)]
        dest: NodeKey,
    },
    /// List edges
    List {
        /// Only edges leaving this node
        #[arg(long, allow_hyphen_values = true)]
        from: Option<NodeKey>,
    },
}

#[derive(Serialize)]
struct EdgeView {
    src: NodeKey,
    dest: NodeKey,
    weight: f64,
}

pub fn run(args: &EdgeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::debug!("Running edge command for graph: {}", ctx.graph);
    let mut graph = ctx.store.load_or_default(&ctx.graph)?;

    match &args.command {
        EdgeCommands::Add { src, dest, weight } => {
            // Check if both nodes exist
            if !graph.contains(*src) {
                println!("Source node {} not found in graph '{}'", src, ctx.graph);
                return Ok(());
            }
            if !graph.contains(*dest) {
                println!("Destination node {} not found in graph '{}'", dest, ctx.graph);
                return Ok(());
            }

            graph.connect(*src, *dest, *weight)?;
            ctx.store.save_graph(&ctx.graph, &graph)?;
            tracing::info!("Connected {} -> {} (weight: {})", src, dest, weight);
            println!("Connected {} -> {} (weight: {})", src, dest, weight);
        }
        EdgeCommands::Remove { src, dest } => {
            if graph.remove_edge(*src, *dest).is_none() {
                println!("Edge {} -> {} not found in graph '{}'", src, dest, ctx.graph);
                return Ok(());
            }
            ctx.store.save_graph(&ctx.graph, &graph)?;
            println!("Removed edge {} -> {}", src, dest);
        }
        EdgeCommands::List { from } => {
            let edges = match from {
                Some(key) => graph.out_edges(*key),
                None => graph.edges(),
            };
            let views: Vec<EdgeView> = edges
                .into_iter()
                .map(|edge| EdgeView {
                    src: edge.src(),
                    dest: edge.dest(),
                    weight: edge.weight(),
                })
                .collect();

            tracing::info!("Found {} edges", views.len());

            match ctx.format {
                OutputFormat::Json => print_json(&views)?,
                OutputFormat::Table if views.is_empty() => {
                    println!("No edges found in graph '{}'", ctx.graph);
                }
                OutputFormat::Table => {
                    println!("Edges in graph '{}' ({} found):", ctx.graph, views.len());
                    for view in &views {
                        println!("  {} -> {} (weight: {:.2})", view.src, view.dest, view.weight);
                    }
                }
            }
        }
    }

    Ok(())
}
