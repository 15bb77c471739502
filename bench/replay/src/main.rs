use std::path::PathBuf;

use anyhow::Context;
use avl::{load_operations, replay, ReplayConfig, TreeReport};
use clap::Parser;
use env_logger::{Builder, Env};
use log::info;

/// Replay an operation file into an AVL tree and print the structural dump as JSON.
#[derive(Parser, Debug)]
#[command(name = "replay", version)]
struct Options {
    /// The JSON operation file to replay.
    file: PathBuf,
    /// Apply `Delete` and `DeleteMin` records too, not only `Insert`.
    #[arg(long)]
    apply_deletes: bool,
    /// Verify every tree invariant after each applied record.
    #[arg(long)]
    check: bool,
    /// Print the report on a single line.
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    // The log level can be chosen with RUST_LOG, "info" otherwise.
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    let config = ReplayConfig::default()
        .apply_deletes(options.apply_deletes)
        .check_invariants(options.check)
        .pretty(!options.compact);

    let operations = load_operations(&options.file)?;
    info!(
        "loaded {} records from {}",
        operations.len(),
        options.file.display()
    );

    let tree = replay(&operations, &config)?;
    let report = TreeReport::from_tree(&tree)
        .to_json(config.is_pretty())
        .context("cannot render the tree report")?;
    println!("{}", report);
    Ok(())
}
