//! Import/Export commands

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::AppContext;
use dwgraph_core::{GraphAlgorithms, GraphModel};
use dwgraph_storage::GraphStore;

#[derive(Args)]
pub struct ImportArgs {
    /// Input file (JSON graph document)
    pub file: PathBuf,

    /// Replace a non-empty graph of the same name
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run_import(args: &ImportArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!("Importing from {:?}", args.file);

    if !args.force {
        if let Some(existing) = ctx.store.load_graph(&ctx.graph)? {
            if !existing.is_empty() {
                anyhow::bail!(
                    "Graph '{}' already has {} nodes. Use --force to replace it.",
                    ctx.graph,
                    existing.node_count()
                );
            }
        }
    }

    let mut algo = GraphAlgorithms::new();
    algo.load(&args.file)
        .with_context(|| format!("Failed to import {:?}", args.file))?;
    let Some(graph) = algo.graph() else {
        anyhow::bail!("Nothing was loaded from {:?}", args.file);
    };

    ctx.store.save_graph(&ctx.graph, graph)?;
    println!(
        "Imported {} nodes and {} edges into graph '{}'",
        graph.node_count(),
        graph.edge_count(),
        ctx.graph
    );

    Ok(())
}

pub fn run_export(args: &ExportArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!("Exporting graph '{}'", ctx.graph);

    let graph = ctx.store.load_or_default(&ctx.graph)?;
    tracing::debug!(
        "Exporting graph '{}': {} nodes, {} edges",
        ctx.graph,
        graph.node_count(),
        graph.edge_count()
    );
    let algo = GraphAlgorithms::with_graph(graph);

    match &args.output {
        Some(path) => {
            algo.save(path)
                .with_context(|| format!("Failed to export to {:?}", path))?;
            println!("Exported to {:?}", path);
        }
        None => {
            let graph = algo.graph().context("No graph bound")?;
            println!("{}", algo.codec().encode(&**graph)?);
        }
    }

    Ok(())
}
