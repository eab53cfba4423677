//! KMQC Command-Line Interface
//!
//! Builds one of the reference programs and either prints its payload or runs
//! it on the configured QVM endpoint.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::RunOptions;
use commands::{bell, hash};

/// KMQC - build and run qubit and qudit programs on a remote QVM
#[derive(Parser)]
#[command(name = "kmqc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every program command.
#[derive(Args)]
struct ConnectionArgs {
    /// Print the payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// YAML file with connection sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Section of the config file to use
    #[arg(short, long, default_value = kmqc_adapter_qvm::DEFAULT_SECTION)]
    section: String,
}

impl From<ConnectionArgs> for RunOptions {
    fn from(args: ConnectionArgs) -> Self {
        RunOptions {
            dry_run: args.dry_run,
            config: args.config,
            section: args.section,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the two-qubit Bell-style program
    Bell {
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Run the qudit hash and reverse-test program
    Hash {
        /// Levels per qudit
        #[arg(long, default_value = "200")]
        dim: usize,

        /// Word encoded by the hash layer
        #[arg(long, default_value = "15")]
        word: i64,

        /// Word checked by the reverse test (defaults to --word)
        #[arg(long)]
        reverse_word: Option<i64>,

        /// Register size dividing every phase
        #[arg(short, long, default_value = "8")]
        n: u64,

        #[command(flatten)]
        conn: ConnectionArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Bell { conn } => bell::execute(&conn.into()).await,

        Commands::Hash {
            dim,
            word,
            reverse_word,
            n,
            conn,
        } => {
            let params = hash::HashParams {
                dim,
                word,
                reverse_word: reverse_word.unwrap_or(word),
                n,
            };
            hash::execute(&params, &conn.into()).await
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
