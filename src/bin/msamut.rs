//! Command-line interface for the `msamut` crate.
//!
//! Subcommands are implemented in separate files under `src/bin/msamut/`:
//! - `call_cmd.rs`
//! - `annotate_cmd.rs`
//! - `lengths_cmd.rs`
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name="msamut", version=env!("CARGO_PKG_VERSION"), about="Call mutations of homologous proteins from multiple sequence alignments", disable_help_subcommand=true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Call deletions, insertions and substitutions for a directory of alignments.
    Call(call_cmd::CallCmd),
    /// Add reference and hit definitions to a mutation summary.
    Annotate(annotate_cmd::AnnotateCmd),
    /// Tabulate protein length against mutation status.
    Lengths(lengths_cmd::LengthsCmd),
}

#[path = "msamut/call_cmd.rs"] mod call_cmd;
#[path = "msamut/annotate_cmd.rs"] mod annotate_cmd;
#[path = "msamut/lengths_cmd.rs"] mod lengths_cmd;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Call(cmd) => call_cmd::run(cmd),
        Command::Annotate(cmd) => annotate_cmd::run(cmd),
        Command::Lengths(cmd) => lengths_cmd::run(cmd),
    }
}
