use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Args;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use dsaforge::command::{self, BstCommand, OutputFormat, TrieCommand};
use dsaforge::{
    BstSettings, BstVisualizer, DuplicatePolicy, JsonFileStore, LayoutConfig, Point,
    TrieVisualizer,
};

#[derive(Args, Debug)]
pub struct BstArgs {
    /// What to do with a value that is already in the tree.
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Ignore)]
    duplicates: DuplicatePolicy,
    /// Horizontal offset of the root's children.
    #[arg(long, default_value_t = 200.0)]
    spacing: f64,
    /// Vertical distance between levels.
    #[arg(long, default_value_t = 80.0)]
    level_height: f64,
    #[arg(long, default_value_t = 400.0)]
    origin_x: f64,
    #[arg(long, default_value_t = 50.0)]
    origin_y: f64,
    /// Print layouts as JSON.
    #[arg(long)]
    json: bool,
    /// Commands such as "insert 50" or "traverse inorder". Read from stdin
    /// when none are given.
    #[arg(name = "COMMAND")]
    commands: Vec<String>,
}

impl BstArgs {
    fn settings(&self) -> BstSettings {
        BstSettings {
            duplicates: self.duplicates,
            layout: LayoutConfig {
                origin: Point::new(self.origin_x, self.origin_y),
                spacing: self.spacing,
                level_height: self.level_height,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct TrieArgs {
    /// JSON file holding the word list and map between runs.
    #[arg(short, long, default_value = "maps_and_tries.json")]
    store: PathBuf,
    /// Do not write the store back after running.
    #[arg(long)]
    no_save: bool,
    /// Commands such as "insert cat" or "suggest ca". Read from stdin when
    /// none are given.
    #[arg(name = "COMMAND")]
    commands: Vec<String>,
}

pub async fn execute_bst(args: BstArgs) -> anyhow::Result<()> {
    let lines = read_commands(&args.commands).await?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut vis = BstVisualizer::new(args.settings());
    debug!("BST settings: {:?}", vis.settings());

    for line in &lines {
        let command = match line.parse::<BstCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping {:?}: {}", line, e);
                eprintln!("{}", e);
                continue;
            }
        };
        println!("{}", command::execute_bst(&mut vis, command, format)?);
    }

    Ok(())
}

pub async fn execute_trie(args: TrieArgs) -> anyhow::Result<()> {
    let lines = read_commands(&args.commands).await?;
    let store = JsonFileStore::new(&args.store);
    let mut vis = TrieVisualizer::load(store).await?;

    for line in &lines {
        let command = match line.parse::<TrieCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping {:?}: {}", line, e);
                eprintln!("{}", e);
                continue;
            }
        };
        println!("{}", command::execute_trie(&mut vis, command).await?);
    }

    if args.no_save {
        info!("Not saving {}", args.store.display());
    } else {
        vis.save().await?;
    }

    Ok(())
}

/// Commands from the arguments, or from piped stdin when there are none.
async fn read_commands(args: &[String]) -> anyhow::Result<Vec<String>> {
    let script = if !args.is_empty() {
        args.join("\n")
    } else if std::io::stdin().is_terminal() {
        anyhow::bail!("no commands given; pass them as arguments or pipe them on stdin");
    } else {
        let mut buf = Vec::with_capacity(256);
        tokio::io::stdin().read_to_end(&mut buf).await?;
        String::from_utf8_lossy(&buf).to_string()
    };

    let lines: Vec<String> = command::script_lines(&script).map(String::from).collect();
    debug!("Read {} commands", lines.len());
    Ok(lines)
}
