//! Cross-reference a run summary with the reference proteins and the hit
//! definitions of the similarity search.
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use bio::io::fasta;
use serde::Serialize;

use crate::error::FileError;
use crate::report::{RunSummary, SummaryRow};

pub const UNKNOWN: &str = "Unknown";
pub const MUTATED_TABLE_NAME: &str = "mutation_summary_with_hit_defs.csv";
pub const NOT_MUTATED_TABLE_NAME: &str = "non_mutation_summary_with_hit_defs.csv";

const ALIGNMENT_PREFIX: &str = "MSA_";
const HIT_DEFS_SUFFIX: &str = "_hit_defs.csv";

/// Description and length of a reference (query) protein
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceProtein {
    pub description: String,
    pub length: usize,
}

/// The query proteins, indexed by FASTA id
#[derive(Debug, Clone, Default)]
pub struct ReferenceProteins {
    proteins: HashMap<String, ReferenceProtein>,
}

impl ReferenceProteins {
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut proteins = HashMap::new();
        for record_result in fasta::Reader::new(reader).records() {
            let record = record_result?;
            let description = record.desc().unwrap_or(UNKNOWN).to_string();
            proteins.insert(
                record.id().to_string(),
                ReferenceProtein {
                    description,
                    length: record.seq().len(),
                },
            );
        }
        Ok(Self { proteins })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let file = File::open(&path).map_err(|e| FileError::io(Some(&path), e))?;
        Self::from_reader(file).map_err(|e| FileError::io(Some(&path), e))
    }

    pub fn get(&self, protein_id: &str) -> Option<&ReferenceProtein> {
        self.proteins.get(protein_id)
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }
}

/// Recover the protein id from an alignment identity such as `MSA_WP_001.1.faa`
pub fn protein_id(alignment_name: &str) -> &str {
    let name = alignment_name
        .strip_prefix(ALIGNMENT_PREFIX)
        .unwrap_or(alignment_name);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// The per-protein hit definition table written by the hit filtering step
pub fn hit_definition_path(hit_def_dir: &Path, protein_id: &str) -> PathBuf {
    hit_def_dir.join(format!("{}{}", protein_id, HIT_DEFS_SUFFIX))
}

/// First column of the first data row of a hit definition table
pub fn read_hit_definition<R: Read>(reader: R) -> Result<Option<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    match reader.records().next() {
        Some(record) => Ok(record?.get(0).map(|field| field.to_string())),
        None => Ok(None),
    }
}

/// Hit definition of a protein, `None` if there is no table or it has no rows
pub fn find_hit_definition(
    hit_def_dir: &Path,
    protein_id: &str,
) -> Result<Option<String>, FileError> {
    let path = hit_definition_path(hit_def_dir, protein_id);
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(&path).map_err(|e| FileError::io(Some(&path), e))?;
    read_hit_definition(file).map_err(|e| FileError::csv(Some(&path), e))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRow {
    #[serde(rename = "Protein_Id")]
    pub protein_id: String,
    #[serde(rename = "Reference_Def")]
    pub reference_def: String,
    #[serde(rename = "Hit Def")]
    pub hit_def: String,
    #[serde(rename = "Status")]
    pub status: &'static str,
    #[serde(rename = "Number of Mutations")]
    pub mutation_count: usize,
    #[serde(rename = "Length")]
    pub length: String,
}

/// Summary rows split by status and decorated with descriptions and lengths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedSummary {
    pub mutated: Vec<AnnotatedRow>,
    pub not_mutated: Vec<AnnotatedRow>,
}

pub fn annotate_summary(
    summary: &RunSummary,
    hit_def_dir: &Path,
    reference: &ReferenceProteins,
) -> Result<AnnotatedSummary, FileError> {
    let mut result = AnnotatedSummary::default();
    for row in summary.rows() {
        let annotated = annotate_row(row, hit_def_dir, reference)?;
        if row.status.is_mutated() {
            result.mutated.push(annotated);
        } else {
            result.not_mutated.push(annotated);
        }
    }
    Ok(result)
}

fn annotate_row(
    row: &SummaryRow,
    hit_def_dir: &Path,
    reference: &ReferenceProteins,
) -> Result<AnnotatedRow, FileError> {
    let id = protein_id(&row.name);
    let hit_def = find_hit_definition(hit_def_dir, id)?.unwrap_or_else(|| UNKNOWN.to_string());
    let protein = reference.get(id);
    Ok(AnnotatedRow {
        protein_id: id.to_string(),
        reference_def: protein.map_or_else(|| UNKNOWN.to_string(), |p| p.description.clone()),
        hit_def,
        status: if row.status.is_mutated() {
            "Mutated"
        } else {
            "Not Mutated"
        },
        mutation_count: row.mutation_count,
        length: protein.map_or_else(|| UNKNOWN.to_string(), |p| p.length.to_string()),
    })
}

pub fn write_annotated_table<W: Write>(
    rows: &[AnnotatedRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record([
        "Protein_Id",
        "Reference_Def",
        "Hit Def",
        "Status",
        "Number of Mutations",
        "Length",
    ])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write both annotated tables into `output_dir`; returns their paths
pub fn write_annotated_summary<P: AsRef<Path>>(
    annotated: &AnnotatedSummary,
    output_dir: P,
) -> Result<(PathBuf, PathBuf), FileError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|e| FileError::io(Some(output_dir), e))?;
    let mutated_path = output_dir.join(MUTATED_TABLE_NAME);
    let not_mutated_path = output_dir.join(NOT_MUTATED_TABLE_NAME);
    for (rows, path) in &[
        (&annotated.mutated, &mutated_path),
        (&annotated.not_mutated, &not_mutated_path),
    ] {
        let file = File::create(path).map_err(|e| FileError::io(Some(path), e))?;
        write_annotated_table(rows, file).map_err(|e| FileError::csv(Some(path), e))?;
    }
    Ok((mutated_path, not_mutated_path))
}

/// Protein length and mutation status, the input of length distribution plots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthRow {
    pub id: String,
    pub length: Option<usize>,
    pub mutation_status: &'static str,
}

pub fn length_distribution(
    summary: &RunSummary,
    reference: &ReferenceProteins,
) -> Vec<LengthRow> {
    summary
        .rows()
        .iter()
        .map(|row| {
            let id = protein_id(&row.name);
            LengthRow {
                id: id.to_string(),
                length: reference.get(id).map(|p| p.length),
                mutation_status: if row.mutation_count == 0 {
                    "no mutation"
                } else {
                    "mutation"
                },
            }
        })
        .collect()
}

pub fn write_length_table<W: Write>(rows: &[LengthRow], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(["id", "length", "mutation_status"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_length_table_to_path<P: AsRef<Path>>(
    rows: &[LengthRow],
    path: P,
) -> Result<(), FileError> {
    let file = File::create(&path).map_err(|e| FileError::io(Some(&path), e))?;
    write_length_table(rows, file).map_err(|e| FileError::csv(Some(&path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    const REFERENCE: &[u8] =
        b">WP_001.1 DNA gyrase subunit A [Escherichia coli]\nMKVLAG\n>WP_002.1\nMKK\n";

    fn summary() -> RunSummary {
        vec![
            SummaryRow {
                name: "MSA_WP_001.1.faa".to_string(),
                status: Status::MutationsFound,
                mutation_count: 4,
                total_hits: 9,
            },
            SummaryRow {
                name: "MSA_WP_002.1.faa".to_string(),
                status: Status::NoMutationsFound,
                mutation_count: 0,
                total_hits: 3,
            },
            SummaryRow {
                name: "MSA_WP_003.1.faa".to_string(),
                status: Status::NoMutationsFound,
                mutation_count: 0,
                total_hits: 0,
            },
        ]
        .into()
    }

    #[test]
    fn test_protein_id() {
        assert_eq!(protein_id("MSA_WP_001.1.faa"), "WP_001.1");
        assert_eq!(protein_id("MSA_P12345.faa"), "P12345");
        assert_eq!(protein_id("query7.fasta"), "query7");
        assert_eq!(protein_id("plain"), "plain");
    }

    #[test]
    fn test_reference_proteins() {
        let reference = ReferenceProteins::from_reader(REFERENCE).unwrap();
        assert_eq!(reference.len(), 2);
        assert_eq!(
            reference.get("WP_001.1"),
            Some(&ReferenceProtein {
                description: "DNA gyrase subunit A [Escherichia coli]".to_string(),
                length: 6,
            })
        );
        assert_eq!(reference.get("WP_002.1").unwrap().description, "Unknown");
        assert!(reference.get("WP_003.1").is_none());
    }

    #[test]
    fn test_read_hit_definition() {
        let table = "Hit_Def,Identity,Coverage,E-value\n\"gyrA, partial [E. coli]\",0.9500,1.0000,1.00e-50\nother,0.9100,0.8000,1.00e-20\n";
        assert_eq!(
            read_hit_definition(table.as_bytes()).unwrap(),
            Some("gyrA, partial [E. coli]".to_string())
        );
        let empty = "Hit_Def,Identity,Coverage,E-value\n";
        assert_eq!(read_hit_definition(empty.as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_annotate_summary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            hit_definition_path(dir.path(), "WP_001.1"),
            "Hit_Def,Identity,Coverage,E-value\nhit one,0.9900,1.0000,1.00e-90\n",
        )
        .unwrap();
        let reference = ReferenceProteins::from_reader(REFERENCE).unwrap();
        let annotated = annotate_summary(&summary(), dir.path(), &reference).unwrap();

        assert_eq!(annotated.mutated.len(), 1);
        assert_eq!(
            annotated.mutated[0],
            AnnotatedRow {
                protein_id: "WP_001.1".to_string(),
                reference_def: "DNA gyrase subunit A [Escherichia coli]".to_string(),
                hit_def: "hit one".to_string(),
                status: "Mutated",
                mutation_count: 4,
                length: "6".to_string(),
            }
        );
        assert_eq!(annotated.not_mutated.len(), 2);
        assert_eq!(annotated.not_mutated[0].status, "Not Mutated");
        assert_eq!(annotated.not_mutated[0].hit_def, "Unknown");
        assert_eq!(annotated.not_mutated[0].length, "3");
        assert_eq!(annotated.not_mutated[1].reference_def, "Unknown");
        assert_eq!(annotated.not_mutated[1].length, "Unknown");

        let (mutated_path, not_mutated_path) =
            write_annotated_summary(&annotated, dir.path().join("out")).unwrap();
        let mutated = std::fs::read_to_string(mutated_path).unwrap();
        assert_eq!(
            mutated,
            "Protein_Id,Reference_Def,Hit Def,Status,Number of Mutations,Length\n\
             WP_001.1,DNA gyrase subunit A [Escherichia coli],hit one,Mutated,4,6\n"
        );
        let not_mutated = std::fs::read_to_string(not_mutated_path).unwrap();
        assert_eq!(not_mutated.lines().count(), 3);
    }

    #[test]
    fn test_length_distribution() {
        let reference = ReferenceProteins::from_reader(REFERENCE).unwrap();
        let rows = length_distribution(&summary(), &reference);
        let mut out = Vec::new();
        write_length_table(&rows, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,length,mutation_status\n\
             WP_001.1,6,mutation\n\
             WP_002.1,3,no mutation\n\
             WP_003.1,,no mutation\n"
        );
    }
}
