use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use bio::io::fasta;

use crate::alphabet::{parse_symbols, Symbol};
use crate::error::{AlignmentError, FileError, MsamutError, ParseError};
use crate::frequency::{check_shape, count_columns, ColumnCounts};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub header: String,
    pub symbols: Vec<Symbol>,
}

impl AsRef<[Symbol]> for AlignedSequence {
    fn as_ref(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// A query sequence and its aligned hits
///
/// Invariants: there is at least one row, the first row is the query and all
/// rows have the same non-zero length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    name: String,
    rows: Vec<AlignedSequence>,
}

impl Alignment {
    pub fn new(name: String, rows: Vec<AlignedSequence>) -> Result<Self, AlignmentError> {
        match rows.first() {
            None => return Err(AlignmentError::Empty { name }),
            Some(query) if query.symbols.is_empty() => {
                return Err(AlignmentError::NoColumns { name })
            }
            Some(_) => {}
        }
        if let Err(source) = check_shape(&rows) {
            return Err(AlignmentError::Shape { name, source });
        }
        Ok(Self { name, rows })
    }

    /// Build an alignment from plain strings. Rows are named `row0`, `row1`, ...
    pub fn from_strs(name: &str, rows: &[&str]) -> Result<Self, MsamutError> {
        let mut sequences = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let header = format!("row{}", i);
            let symbols = to_symbols(row.as_bytes(), i)?;
            sequences.push(AlignedSequence { header, symbols });
        }
        Ok(Self::new(name.to_string(), sequences)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &AlignedSequence {
        &self.rows[0]
    }

    pub fn hits(&self) -> &[AlignedSequence] {
        &self.rows[1..]
    }

    pub fn rows(&self) -> &[AlignedSequence] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_hits(&self) -> usize {
        self.rows.len() - 1
    }

    /// Number of aligned columns
    pub fn width(&self) -> usize {
        self.query().symbols.len()
    }

    pub fn column_counts(&self) -> Vec<ColumnCounts> {
        count_columns(&self.rows)
    }
}

fn to_symbols(seq: &[u8], row: usize) -> Result<Vec<Symbol>, ParseError> {
    parse_symbols(seq).map_err(|(column, byte)| {
        ParseError::item(
            "sequence",
            row,
            "amino-acid letter, '*' or '-'",
            format!("{:?} in column {}", byte as char, column + 1),
        )
    })
}

/// Read an aligned FASTA stream. The first record is the query.
pub fn parse_alignment<R: Read>(name: &str, reader: R) -> Result<Alignment, MsamutError> {
    read_records(name, reader, None)
}

/// Read an aligned FASTA file. The alignment is named after the file name.
pub fn read_alignment_from_file<P: AsRef<Path>>(path: P) -> Result<Alignment, MsamutError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(Some(path), e))?;
    read_records(&alignment_name(path), file, Some(path))
}

fn read_records<R: Read>(
    name: &str,
    reader: R,
    path: Option<&Path>,
) -> Result<Alignment, MsamutError> {
    let mut rows = Vec::new();
    for (i, record_result) in fasta::Reader::new(reader).records().enumerate() {
        let record = record_result.map_err(|e| FileError::io(path, e))?;
        let header = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };
        let symbols = match (to_symbols(record.seq(), i), path) {
            (Ok(symbols), _) => symbols,
            (Err(e), Some(path)) => return Err(FileError::parse(Some(path), e).into()),
            (Err(e), None) => return Err(e.into()),
        };
        rows.push(AlignedSequence { header, symbols });
    }
    Ok(Alignment::new(name.to_string(), rows)?)
}

/// The identity under which an alignment file is reported: its file name
pub fn alignment_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List the alignment files with the given extension in `dir`, sorted by name
pub fn list_alignment_files<P: AsRef<Path>>(
    dir: P,
    extension: &str,
) -> Result<Vec<PathBuf>, FileError> {
    let dir = dir.as_ref();
    let extension = extension.trim_start_matches('.');
    let mut result = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| FileError::io(Some(dir), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FileError::io(Some(dir), e))?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
            result.push(path);
        }
    }
    result.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(result)
}
