//! CLI for `msamut call` (mutation calling over a directory of alignments).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::warn;
use msamut::PipelineConfig;

#[derive(Debug, Args)]
pub struct CallCmd {
    /// Directory with one aligned FASTA file per protein (query first).
    #[arg(long, value_name="DIR")]
    pub input: PathBuf,
    /// Output directory for `mutations/` and `mutation_summary.csv`.
    #[arg(long, value_name="DIR")]
    pub output: PathBuf,
    /// Extension of the alignment files.
    #[arg(long, default_value=msamut::pipeline::DEFAULT_EXTENSION)]
    pub extension: String,
    /// Number of worker threads (default: all cores).
    #[arg(long)]
    pub threads: Option<usize>,
}

pub fn run(cmd: CallCmd) -> Result<()> {
    let config = PipelineConfig {
        input_dir: cmd.input,
        output_dir: cmd.output,
        extension: cmd.extension,
        threads: cmd.threads,
    };
    let outcome = msamut::run(&config)
        .with_context(|| format!("call mutations in {}", config.input_dir.display()))?;
    if !outcome.failures.is_empty() {
        warn!("{} alignment(s) could not be processed:", outcome.failures.len());
        for failure in &outcome.failures {
            warn!("  {}", failure.path.display());
        }
    }
    Ok(())
}
