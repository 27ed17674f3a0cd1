mod cli;

use std::{fs::File, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::cli::{BstArgs, TrieArgs};

/// Drive the DSAForge tree visualizers from the terminal.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Binary search tree and trie playground from DSAForge."
)]
struct Cli {
    /// Where to write logs.
    #[arg(long, global = true, default_value = "dsaforge.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert, delete, search, traverse and lay out a binary search tree.
    Bst(BstArgs),
    /// Insert, search, delete and autocomplete words in a trie, plus a
    /// key-value map, persisted to a JSON file.
    Trie(TrieArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();

    info!("Command: {:?}", cli.command);

    match cli.command {
        Commands::Bst(args) => cli::execute_bst(args).await,
        Commands::Trie(args) => cli::execute_trie(args).await,
    }
}
