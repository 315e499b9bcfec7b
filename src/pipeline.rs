//! Batch processing of a directory of alignments.
//!
//! Every alignment file is an independent task. Tasks run on a rayon pool,
//! each one writing its own mutation table. The summary is assembled in file
//! name order once all tasks are done and written in a single step.
//!
//! A table left over from an earlier run is removed when its alignment no
//! longer has mutations or cannot be processed.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::alignment::{list_alignment_files, read_alignment_from_file};
use crate::error::{FileError, MsamutError};
use crate::report::{build_report, RunSummary, SummaryRow};
use crate::table::{write_mutation_table_to_path, write_summary_table_to_path};

pub const MUTATIONS_SUBDIR: &str = "mutations";
pub const SUMMARY_FILE_NAME: &str = "mutation_summary.csv";
pub const DEFAULT_EXTENSION: &str = "faa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding one aligned FASTA file per protein family
    pub input_dir: PathBuf,
    /// Receives `mutations/` and the summary table
    pub output_dir: PathBuf,
    /// Extension of the alignment files, without the dot
    pub extension: String,
    /// Worker threads. `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            threads: None,
        }
    }
}

impl PipelineConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, output_dir: Q) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn mutation_dir(&self) -> PathBuf {
        self.output_dir.join(MUTATIONS_SUBDIR)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE_NAME)
    }

    /// Where the mutation table of an alignment file ends up
    pub fn mutation_table_path(&self, alignment_path: &Path) -> PathBuf {
        let stem = alignment_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.mutation_dir().join(format!("{}.csv", stem))
    }
}

/// An alignment that could not be processed
#[derive(Debug)]
pub struct AlignmentFailure {
    pub path: PathBuf,
    pub error: MsamutError,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub failures: Vec<AlignmentFailure>,
}

/// Call mutations for every alignment in `config.input_dir`
///
/// Problems with individual alignments are logged and collected in
/// `RunOutcome::failures`; they do not stop the run. Errors are only returned
/// when the directories themselves cannot be used.
pub fn run(config: &PipelineConfig) -> Result<RunOutcome, MsamutError> {
    let files = list_alignment_files(&config.input_dir, &config.extension)?;
    info!(
        "Found {} alignment file(s) in {}",
        files.len(),
        config.input_dir.display()
    );
    let mutation_dir = config.mutation_dir();
    std::fs::create_dir_all(&mutation_dir).map_err(|e| FileError::io(Some(&mutation_dir), e))?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let results: Vec<Result<SummaryRow, MsamutError>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| process_alignment(path, &config.mutation_table_path(path)))
            .collect()
    });

    let mut summary = RunSummary::new();
    let mut failures = Vec::new();
    for (path, result) in files.into_iter().zip(results) {
        match result {
            Ok(row) => summary.push(row),
            Err(error) => {
                error!("Skipping {}: {}", path.display(), error_chain(&error));
                failures.push(AlignmentFailure { path, error });
            }
        }
    }

    let summary_path = config.summary_path();
    write_summary_table_to_path(&summary, &summary_path)?;
    let tally = summary.tally();
    info!(
        "Mutation summary written to {} ({} alignment(s), {} failed)",
        summary_path.display(),
        summary.len(),
        failures.len()
    );
    info!(
        "Mutated: {} | Non-Mutated: {} ({:.1}% mutated)",
        tally.mutated,
        tally.not_mutated,
        tally.mutated_percentage()
    );
    Ok(RunOutcome { summary, failures })
}

fn process_alignment(path: &Path, table_path: &Path) -> Result<SummaryRow, MsamutError> {
    let outcome = call_mutations(path, table_path);
    let has_table = matches!(&outcome, Ok(row) if row.status.is_mutated());
    if !has_table {
        if let Err(e) = remove_stale_table(table_path) {
            match outcome {
                Ok(_) => return Err(e.into()),
                Err(_) => warn!("{}", error_chain(&e)),
            }
        }
    }
    outcome
}

fn remove_stale_table(table_path: &Path) -> Result<(), FileError> {
    match std::fs::remove_file(table_path) {
        Ok(()) => {
            debug!("Removed stale mutation table {}", table_path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FileError::io(Some(table_path), e)),
    }
}

fn call_mutations(path: &Path, table_path: &Path) -> Result<SummaryRow, MsamutError> {
    let alignment = read_alignment_from_file(path)?;
    debug!(
        "Loaded {}: {} row(s), {} column(s)",
        alignment.name(),
        alignment.row_count(),
        alignment.width()
    );
    if alignment.total_hits() == 0 {
        warn!("{} contains only the query sequence", alignment.name());
    }
    let report = build_report(&alignment);
    if !report.mutations.is_empty() {
        write_mutation_table_to_path(&report, table_path)?;
        info!(
            "Processed: {} -> {} mutation(s)",
            report.name,
            report.mutation_count()
        );
    } else {
        debug!("Processed: {} -> no mutations", report.name);
    }
    Ok(report.summary_row())
}

/// Render an error together with all of its sources
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
