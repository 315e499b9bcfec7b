use thiserror::Error;

use crate::alphabet::{Symbol, ALPHABET_SIZE};

/// A row does not have the same length as the first row of its alignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row} has {observed} columns but the query has {expected}")]
pub struct ShapeError {
    pub row: usize,
    pub expected: usize,
    pub observed: usize,
}

/// Occurrence counts of every symbol (gap included) in one alignment column
///
/// Symbols are remembered in the order they were first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCounts {
    counts: [usize; ALPHABET_SIZE],
    order: Vec<Symbol>,
}

impl Default for ColumnCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnCounts {
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            order: Vec::new(),
        }
    }

    pub fn add(&mut self, symbol: Symbol) {
        let count = &mut self.counts[symbol.index()];
        if *count == 0 {
            self.order.push(symbol);
        }
        *count += 1;
    }

    pub fn get(&self, symbol: Symbol) -> usize {
        self.counts[symbol.index()]
    }

    pub fn gaps(&self) -> usize {
        self.get(Symbol::GAP)
    }

    /// Sum over all symbols. Equals the number of rows of the alignment.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Symbols with a non-zero count, in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.order
            .iter()
            .map(move |&symbol| (symbol, self.counts[symbol.index()]))
    }

    /// Non-gap symbols with a non-zero count, in order of first appearance
    pub fn residues(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.iter().filter(|(symbol, _)| !symbol.is_gap())
    }
}

/// Count the symbols of every column across all `rows`
///
/// All rows must have the length of the first row. The first row (the query)
/// is counted like any other row.
pub fn build_frequencies<R: AsRef<[Symbol]>>(
    rows: &[R],
) -> Result<Vec<ColumnCounts>, ShapeError> {
    check_shape(rows)?;
    Ok(count_columns(rows))
}

pub(crate) fn check_shape<R: AsRef<[Symbol]>>(rows: &[R]) -> Result<(), ShapeError> {
    let expected = match rows.first() {
        Some(row) => row.as_ref().len(),
        None => return Ok(()),
    };
    for (i, row) in rows.iter().enumerate().skip(1) {
        let observed = row.as_ref().len();
        if observed != expected {
            return Err(ShapeError {
                row: i,
                expected,
                observed,
            });
        }
    }
    Ok(())
}

/// Rows must already have passed `check_shape`
pub(crate) fn count_columns<R: AsRef<[Symbol]>>(rows: &[R]) -> Vec<ColumnCounts> {
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    let mut columns = vec![ColumnCounts::new(); width];
    for row in rows {
        for (column, &symbol) in columns.iter_mut().zip(row.as_ref()) {
            column.add(symbol);
        }
    }
    columns
}
