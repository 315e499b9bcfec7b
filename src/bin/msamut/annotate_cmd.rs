//! CLI for `msamut annotate` (summary joined with reference and hit definitions).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use msamut::annotate::{annotate_summary, write_annotated_summary, ReferenceProteins};
use msamut::table::read_summary_table_from_path;

#[derive(Debug, Args)]
pub struct AnnotateCmd {
    /// Mutation summary written by `msamut call`.
    #[arg(long, value_name="FILE")]
    pub summary: PathBuf,
    /// Directory with `<protein>_hit_defs.csv` tables.
    #[arg(long, value_name="DIR")]
    pub hit_defs: PathBuf,
    /// FASTA file with the reference (query) proteins.
    #[arg(long, value_name="FILE")]
    pub reference: PathBuf,
    /// Output directory.
    #[arg(long, value_name="DIR")]
    pub output: PathBuf,
}

pub fn run(cmd: AnnotateCmd) -> Result<()> {
    let summary = read_summary_table_from_path(&cmd.summary)
        .with_context(|| format!("read summary: {}", cmd.summary.display()))?;
    let reference = ReferenceProteins::from_file(&cmd.reference)
        .with_context(|| format!("read reference proteins: {}", cmd.reference.display()))?;
    let annotated = annotate_summary(&summary, &cmd.hit_defs, &reference)
        .with_context(|| format!("read hit definitions in {}", cmd.hit_defs.display()))?;
    let (mutated, not_mutated) = write_annotated_summary(&annotated, &cmd.output)
        .with_context(|| format!("write annotated tables to {}", cmd.output.display()))?;
    info!("  -> {} ({} rows)", mutated.display(), annotated.mutated.len());
    info!("  -> {} ({} rows)", not_mutated.display(), annotated.not_mutated.len());
    Ok(())
}
