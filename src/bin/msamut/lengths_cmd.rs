//! CLI for `msamut lengths` (protein length vs. mutation status table).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::{info, warn};
use msamut::annotate::{length_distribution, write_length_table_to_path, ReferenceProteins};
use msamut::table::read_summary_table_from_path;

#[derive(Debug, Args)]
pub struct LengthsCmd {
    /// Mutation summary written by `msamut call`.
    #[arg(long, value_name="FILE")]
    pub summary: PathBuf,
    /// FASTA file with the reference (query) proteins.
    #[arg(long, value_name="FILE")]
    pub reference: PathBuf,
    /// Output CSV.
    #[arg(long, default_value="length_distribution.csv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: LengthsCmd) -> Result<()> {
    let summary = read_summary_table_from_path(&cmd.summary)
        .with_context(|| format!("read summary: {}", cmd.summary.display()))?;
    let reference = ReferenceProteins::from_file(&cmd.reference)
        .with_context(|| format!("read reference proteins: {}", cmd.reference.display()))?;
    let rows = length_distribution(&summary, &reference);
    let missing = rows.iter().filter(|r| r.length.is_none()).count();
    if missing > 0 {
        warn!("{} protein(s) not found in {}", missing, cmd.reference.display());
    }
    write_length_table_to_path(&rows, &cmd.outfile)
        .with_context(|| format!("write {}", cmd.outfile.display()))?;
    info!("  -> {} ({} rows)", cmd.outfile.display(), rows.len());
    Ok(())
}
