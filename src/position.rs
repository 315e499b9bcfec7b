use std::iter::{IntoIterator, Iterator};

use crate::alphabet::Symbol;

/// Walks an aligned query row and yields, for every column, the 1-based
/// position of the residue in the ungapped query, or `None` at gap columns.
pub struct UngappedPositions<'a> {
    row: &'a [Symbol],
    offset: usize,
    residues_seen: usize,
}

impl<'a> UngappedPositions<'a> {
    pub fn new(row: &'a [Symbol]) -> Self {
        Self {
            row,
            offset: 0,
            residues_seen: 0,
        }
    }
}

pub struct UngappedPositionsIterator<'a> {
    positions: UngappedPositions<'a>,
}

impl<'a> IntoIterator for UngappedPositions<'a> {
    type Item = Option<usize>;
    type IntoIter = UngappedPositionsIterator<'a>;
    fn into_iter(self) -> Self::IntoIter {
        UngappedPositionsIterator { positions: self }
    }
}

impl<'a> Iterator for UngappedPositionsIterator<'a> {
    type Item = Option<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let positions = &mut self.positions;
        let symbol = *positions.row.get(positions.offset)?;
        positions.offset += 1;
        if symbol.is_gap() {
            Some(None)
        } else {
            positions.residues_seen += 1;
            Some(Some(positions.residues_seen))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.positions.row.len() - self.positions.offset;
        (remaining, Some(remaining))
    }
}

/// Map every alignment column of the query row to its original position
pub fn map_positions(query_row: &[Symbol]) -> Vec<Option<usize>> {
    UngappedPositions::new(query_row).into_iter().collect()
}
