use crate::alphabet::Symbol;
use crate::amino_acid::classify_substitution;
use crate::frequency::ColumnCounts;
use crate::mutation::{MutationKind, MutationRecord};

/// Turns the symbol counts of alignment columns into mutation records
///
/// The query row is always counted in the column, so a column that agrees
/// with the query everywhere only holds the query residue.
pub struct ColumnClassifier {
    total_hits: usize,
}

impl ColumnClassifier {
    pub fn new(total_hits: usize) -> Self {
        Self { total_hits }
    }

    pub fn total_hits(&self) -> usize {
        self.total_hits
    }

    /// Classify the deviations from the query in one column
    ///
    /// Parameters:
    /// `column`: zero-based column index
    /// `query_residue`: the query symbol in this column
    /// `original_position`: ungapped query position of this column, if any
    /// `counts`: symbol counts of this column over all rows
    ///
    /// Returns the records in the order deletion, insertions, substitutions.
    /// Insertions and substitutions follow the order in which their symbols
    /// first appear in the column.
    /// A gap in the query only allows insertions; a residue in the query
    /// allows a deletion and substitutions.
    pub fn classify_column(
        &self,
        column: usize,
        query_residue: Symbol,
        original_position: Option<usize>,
        counts: &ColumnCounts,
    ) -> Vec<MutationRecord> {
        let mut result = Vec::new();
        let aligned_position = column + 1;
        if query_residue.is_gap() {
            self.insertions(aligned_position, counts, &mut result);
        } else {
            self.deletion(
                aligned_position,
                original_position,
                query_residue,
                counts,
                &mut result,
            );
            self.substitutions(
                aligned_position,
                original_position,
                query_residue,
                counts,
                &mut result,
            );
        }
        result
    }

    fn deletion(
        &self,
        aligned_position: usize,
        original_position: Option<usize>,
        query_residue: Symbol,
        counts: &ColumnCounts,
        result: &mut Vec<MutationRecord>,
    ) {
        let gaps = counts.gaps();
        if gaps > 0 {
            result.push(MutationRecord::new(
                aligned_position,
                original_position,
                query_residue,
                MutationKind::Deletion,
                gaps,
                self.total_hits,
            ));
        }
    }

    fn insertions(
        &self,
        aligned_position: usize,
        counts: &ColumnCounts,
        result: &mut Vec<MutationRecord>,
    ) {
        for (symbol, count) in counts.residues() {
            result.push(MutationRecord::new(
                aligned_position,
                None,
                Symbol::GAP,
                MutationKind::Insertion(symbol),
                count,
                self.total_hits,
            ));
        }
    }

    fn substitutions(
        &self,
        aligned_position: usize,
        original_position: Option<usize>,
        query_residue: Symbol,
        counts: &ColumnCounts,
        result: &mut Vec<MutationRecord>,
    ) {
        for (symbol, count) in counts.residues() {
            if symbol == query_residue {
                continue;
            }
            let conservativeness = classify_substitution(query_residue, symbol);
            result.push(MutationRecord::new(
                aligned_position,
                original_position,
                query_residue,
                MutationKind::Substitution(symbol, conservativeness),
                count,
                self.total_hits,
            ));
        }
    }
}
