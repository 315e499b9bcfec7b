use std::fmt;

use crate::alphabet::Symbol;
use crate::amino_acid::Conservativeness;
use crate::Classification;

/// What a column of hits does differently from the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Hits carry a gap where the query has a residue
    Deletion,
    /// Hits carry this residue where the query has a gap
    Insertion(Symbol),
    /// Hits carry this residue instead of the query residue
    Substitution(Symbol, Conservativeness),
}

impl MutationKind {
    pub fn classification(&self) -> Classification {
        match self {
            Self::Deletion => Classification::Deletion,
            Self::Insertion(_) => Classification::Insertion,
            Self::Substitution(_, conservativeness) => (*conservativeness).into(),
        }
    }
}

/// Renders the descriptor column of a mutation table: `deletion`,
/// `insertion: X` or the substituting residue.
impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deletion => write!(f, "deletion"),
            Self::Insertion(symbol) => write!(f, "insertion: {}", symbol),
            Self::Substitution(symbol, _) => write!(f, "{}", symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub aligned_position: usize,          // 1-based column
    pub original_position: Option<usize>, // 1-based, None at query gaps
    pub query_residue: Symbol,
    pub kind: MutationKind,
    pub count: usize,
    pub total_hits: usize,
    pub percentage: f64,
}

impl MutationRecord {
    pub fn new(
        aligned_position: usize,
        original_position: Option<usize>,
        query_residue: Symbol,
        kind: MutationKind,
        count: usize,
        total_hits: usize,
    ) -> Self {
        Self {
            aligned_position,
            original_position,
            query_residue,
            kind,
            count,
            total_hits,
            percentage: percentage(count, total_hits),
        }
    }

    pub fn classification(&self) -> Classification {
        self.kind.classification()
    }
}

/// `count` as a percentage of `total_hits`, rounded to two decimals.
///
/// An alignment without hits has nothing to compare against, so the
/// percentage is 0 instead of a division by zero.
pub fn percentage(count: usize, total_hits: usize) -> f64 {
    if total_hits == 0 {
        return 0.0;
    }
    let raw = count as f64 / total_hits as f64 * 100.0;
    round_to_hundredths(raw)
}

/// Round a non-negative value to two decimals according to its exact binary
/// value. Exact ties go to the even neighbour, so `3.125` becomes `3.12`.
fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    let rounded = if scaled.fract() == 0.5 {
        // `scaled` itself may have been rounded onto the tie
        let residual = value.mul_add(100.0, -scaled);
        if residual > 0.0 {
            scaled.ceil()
        } else if residual < 0.0 {
            scaled.floor()
        } else if scaled.floor() % 2.0 == 0.0 {
            scaled.floor()
        } else {
            scaled.ceil()
        }
    } else {
        scaled.round()
    };
    rounded / 100.0
}

/// Render a percentage with at least one decimal and a trailing `%`,
/// e.g. `100.0%`, `33.33%` or `12.5%`.
pub fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value)
    }
}
