//! dwgraph CLI - Command line interface for the shortest-path engine

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, edge, graph, io, node, path};
use config::Config;
use dwgraph_storage::FileStore;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "dwgraph")]
#[command(author, version, about = "Shortest paths and connectivity over directed weighted graphs")]
pub struct Cli {
    /// Graph name
    #[arg(short, long, global = true)]
    pub graph: Option<String>,

    /// Data directory
    #[arg(short, long, global = true, env = "DWGRAPH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage nodes
    Node(node::NodeArgs),
    /// Manage edges
    Edge(edge::EdgeArgs),
    /// Shortest distances, paths and connectivity
    Path(path::PathArgs),
    /// Manage stored graphs
    Graph(graph::GraphArgs),
    /// Import a graph from a JSON file
    Import(io::ImportArgs),
    /// Export a graph as JSON
    Export(io::ExportArgs),
    /// Manage CLI configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with storage backend and resolved settings
pub struct AppContext {
    pub store: FileStore,
    pub graph: String,
    pub format: OutputFormat,
}

impl AppContext {
    /// Resolve settings (flags first, then config file) and open storage
    pub fn new(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.data_dir.clone());
        tracing::debug!("Using data directory: {:?}", data_dir);

        let store = FileStore::open(&data_dir)?;
        let graph = cli
            .graph
            .clone()
            .unwrap_or_else(|| config.default_graph.clone());
        let format = OutputFormat::from(cli.format.as_deref().unwrap_or(&config.format));

        Ok(Self {
            store,
            graph,
            format,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting dwgraph CLI");

    // Config and completions run without opening storage
    let context = || AppContext::new(&cli, &Config::load());

    match &cli.command {
        Commands::Node(args) => node::run(args, &context()?)?,
        Commands::Edge(args) => edge::run(args, &context()?)?,
        Commands::Path(args) => path::run(args, &context()?)?,
        Commands::Graph(args) => graph::run(args, &context()?)?,
        Commands::Import(args) => io::run_import(args, &context()?)?,
        Commands::Export(args) => io::run_export(args, &context()?)?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
