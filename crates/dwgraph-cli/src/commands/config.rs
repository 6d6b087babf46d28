//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one config value
    Get {
        /// Key: data_dir, default_graph or format
        key: String,
    },
    /// Change one config value
    Set {
        key: String,
        value: String,
    },
    /// Restore a key to its default value
    Unset {
        key: String,
    },
    /// Print every config value
    List,
    /// Print the config file location
    Path,
    /// Write a config file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();

    match &args.command {
        ConfigCommands::Get { key } => {
            let value = Config::load().get(key).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::keys().join(", ")
                )
            })?;
            println!("{}", value);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }
        ConfigCommands::Unset { key } => {
            let defaults = Config::default();
            let value = defaults
                .get(key)
                .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
            let mut config = Config::load();
            config.set(key, &value)?;
            config.save()?;
            println!("{} = {} (default)", key, value);
        }
        ConfigCommands::List => {
            let config = Config::load();
            println!("# {}", path.display());
            for key in Config::keys() {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Created config file at {}", path.display());
        }
    }

    Ok(())
}
