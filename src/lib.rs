//! Call mutations of homologous proteins from multiple sequence alignments.
//!
//! Every alignment holds a query sequence in its first row and the hits of a
//! similarity search below it. For every alignment column the residues of all
//! rows are counted and each deviation from the query is reported as a
//! deletion, an insertion or a (conservative or non-conservative)
//! substitution, together with its position in the ungapped query.
//!
//! ```
//! use msamut::{build_report, Alignment, Status};
//!
//! let alignment = Alignment::from_strs("MSA_example.faa", &["ACDG", "AC-G"]).unwrap();
//! let report = build_report(&alignment);
//! assert_eq!(report.status(), Status::MutationsFound);
//! assert_eq!(report.mutations[0].kind.to_string(), "deletion");
//! ```
mod alignment;
mod alphabet;
mod amino_acid;
pub mod annotate;
pub mod error;
mod frequency;
mod mutation;
mod mutation_classifier;
pub mod pipeline;
mod position;
mod report;
pub mod table;

use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::alignment::{
    alignment_name, list_alignment_files, parse_alignment, read_alignment_from_file,
    AlignedSequence, Alignment,
};
pub use crate::alphabet::{Symbol, ALPHABET_SIZE};
pub use crate::amino_acid::{classify_substitution, AminoAcid, Conservativeness, ResidueGroup};
use crate::error::ParseError;
pub use crate::frequency::{build_frequencies, ColumnCounts, ShapeError};
pub use crate::mutation::{format_percentage, percentage, MutationKind, MutationRecord};
pub use crate::mutation_classifier::ColumnClassifier;
pub use crate::pipeline::{run, AlignmentFailure, PipelineConfig, RunOutcome};
pub use crate::position::{map_positions, UngappedPositions};
pub use crate::report::{
    build_report, build_summary, AlignmentReport, RunSummary, StatusTally, SummaryRow,
};

/// Label of a mutation record in the mutation table
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Classification {
    Deletion,
    Insertion,
    Conservative,
    #[serde(rename = "Non-Conservative")]
    NonConservative,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deletion => "Deletion",
            Self::Insertion => "Insertion",
            Self::Conservative => "Conservative",
            Self::NonConservative => "Non-Conservative",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Conservativeness> for Classification {
    fn from(c: Conservativeness) -> Self {
        match c {
            Conservativeness::Conservative => Self::Conservative,
            Conservativeness::NonConservative => Self::NonConservative,
        }
    }
}

impl TryFrom<&str> for Classification {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(match s.to_lowercase().as_str() {
            "deletion" => Self::Deletion,
            "insertion" => Self::Insertion,
            "conservative" => Self::Conservative,
            "non-conservative" | "nonconservative" | "non_conservative" => Self::NonConservative,
            _ => {
                return Err(ParseError::somewhere(
                    "name of mutation classification",
                    s.to_string(),
                ))
            }
        })
    }
}

/// Outcome of one alignment in the run summary.
///
/// The serialized strings are matched literally by downstream tools.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Mutations found")]
    MutationsFound,
    #[serde(rename = "No mutations found")]
    NoMutationsFound,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MutationsFound => "Mutations found",
            Self::NoMutationsFound => "No mutations found",
        }
    }

    pub fn is_mutated(&self) -> bool {
        *self == Self::MutationsFound
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Status {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Mutations found" => Ok(Self::MutationsFound),
            "No mutations found" => Ok(Self::NoMutationsFound),
            _ => Err(ParseError::somewhere(
                "'Mutations found' or 'No mutations found'",
                s.to_string(),
            )),
        }
    }
}
