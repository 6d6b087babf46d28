//! Node commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use dwgraph_core::{GeoLocation, GraphModel, Node, NodeKey};
use dwgraph_storage::GraphStore;

#[derive(Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommands,
}

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Add a new node
    Add {
        /// Node key
        #[arg(allow_hyphen_values = true)]
        key: NodeKey,
        /// X coordinate
        #[arg(long)]
        x: Option<f64>,
        /// Y coordinate
        #[arg(long)]
        y: Option<f64>,
        /// Z coordinate
        #[arg(long)]
        z: Option<f64>,
        /// Free-form info
        #[arg(short, long)]
        info: Option<String>,
    },
    /// Remove a node and every edge touching it
    Remove {
        /// Node key
        #[arg(allow_hyphen_values = true)]
        key: NodeKey,
    },
    /// List nodes
    List,
}

#[derive(Serialize)]
struct NodeView {
    key: NodeKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<GeoLocation>,
    info: String,
    out_degree: usize,
    in_degree: usize,
}

pub fn run(args: &NodeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::debug!("Running node command for graph: {}", ctx.graph);
    let mut graph = ctx.store.load_or_default(&ctx.graph)?;

    match &args.command {
        NodeCommands::Add { key, x, y, z, info } => {
            if graph.contains(*key) {
                println!("Node {} already exists in graph '{}'", key, ctx.graph);
                return Ok(());
            }

            let mut node = Node::new(*key);
            if x.is_some() || y.is_some() || z.is_some() {
                node = node.with_location(GeoLocation::new(
                    x.unwrap_or_default(),
                    y.unwrap_or_default(),
                    z.unwrap_or_default(),
                ));
            }
            if let Some(info) = info {
                node = node.with_info(info);
            }

            graph.add_node(node)?;
            ctx.store.save_graph(&ctx.graph, &graph)?;
            tracing::info!("Added node {} to graph '{}'", key, ctx.graph);
            println!("Added node {}", key);
        }
        NodeCommands::Remove { key } => {
            if graph.remove_node(*key).is_none() {
                println!("Node {} not found in graph '{}'", key, ctx.graph);
                return Ok(());
            }
            ctx.store.save_graph(&ctx.graph, &graph)?;
            println!("Removed node {} ({} edges remain)", key, graph.edge_count());
        }
        NodeCommands::List => {
            let views: Vec<NodeView> = graph
                .nodes()
                .into_iter()
                .map(|node| NodeView {
                    key: node.key(),
                    location: node.location(),
                    info: node.info().to_string(),
                    out_degree: graph.out_degree(node.key()),
                    in_degree: graph.in_degree(node.key()),
                })
                .collect();

            match ctx.format {
                OutputFormat::Json => print_json(&views)?,
                OutputFormat::Table if views.is_empty() => {
                    println!("No nodes in graph '{}'", ctx.graph);
                }
                OutputFormat::Table => {
                    println!("Nodes in graph '{}' ({} found):", ctx.graph, views.len());
                    for view in &views {
                        let location = view
                            .location
                            .map(|l| format!(" @ {}", l))
                            .unwrap_or_default();
                        let info = if view.info.is_empty() {
                            String::new()
                        } else {
                            format!(" - {}", view.info)
                        };
                        println!(
                            "  {}{}{} (out: {}, in: {})",
                            view.key, location, info, view.out_degree, view.in_degree
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
