use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use s11nsha_cli::commands;
use s11nsha_cli::config::{AppConfig, ConfigManager, get_config};
use s11nsha_core::SnapshotEncoding;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "s11nsha")]
#[command(author, version, about = "Resumable SHA-1 hashing with serializable state", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA-1 digest of each file ("-" reads standard input)
    Hash {
        /// Files to hash
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print digests in uppercase hex
        #[arg(short, long)]
        uppercase: bool,
    },

    /// Hash the start of a file and save the in-progress state
    Snapshot {
        /// File to hash
        file: PathBuf,

        /// Where to write the snapshot
        #[arg(short, long)]
        output: PathBuf,

        /// Stop after this many bytes (default: whole file)
        #[arg(short, long)]
        limit: Option<u64>,

        /// Snapshot encoding (default from configuration)
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,
    },

    /// Restore a snapshot and finish hashing the file it was taken from
    Resume {
        /// Snapshot file
        snapshot: PathBuf,

        /// File being hashed
        file: PathBuf,

        /// Snapshot encoding (default: detected from the snapshot)
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,

        /// Print the digest in uppercase hex
        #[arg(short, long)]
        uppercase: bool,
    },

    /// Print the state stored in a snapshot
    Dump {
        /// Snapshot file
        snapshot: PathBuf,

        /// Snapshot encoding (default: detected from the snapshot)
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hasher.read_buffer_size)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., hasher.snapshot_encoding)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Show the configuration file path
    Path,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum EncodingArg {
    Text,
    Compact,
}

impl From<EncodingArg> for SnapshotEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Text => SnapshotEncoding::Text,
            EncodingArg::Compact => SnapshotEncoding::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("s11nsha_core", log::LevelFilter::Debug)
            .filter_module("s11nsha_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Hash { paths, uppercase } => {
            let config = load_config()?;
            commands::hash_paths(
                &config,
                &paths,
                uppercase || config.output.uppercase,
                &mut stdout,
            )?;
        }
        Commands::Snapshot {
            file,
            output,
            limit,
            encoding,
        } => {
            let config = load_config()?;
            commands::snapshot(
                &config,
                &file,
                &output,
                limit,
                encoding.map(Into::into),
                &mut stdout,
            )?;
        }
        Commands::Resume {
            snapshot,
            file,
            encoding,
            uppercase,
        } => {
            let config = load_config()?;
            commands::resume(
                &config,
                &snapshot,
                &file,
                encoding.map(Into::into),
                uppercase || config.output.uppercase,
                &mut stdout,
            )?;
        }
        Commands::Dump { snapshot, encoding } => {
            let config = load_config()?;
            commands::dump(&config, &snapshot, encoding.map(Into::into), &mut stdout)?;
        }
        Commands::Config { command } => {
            config_command(command)?;
        }
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    get_config().context("Failed to load configuration")
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            println!("Set {key} = {value}");
        }
        ConfigCommand::List => {
            for (key, value) in manager.list()? {
                println!("{key} = {value}");
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}
