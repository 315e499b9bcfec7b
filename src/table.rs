//! CSV tables written and read by the pipeline.
//!
//! Column names are part of the contract with downstream tools and are
//! written explicitly, so that even an empty table carries its header.
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::FileError;
use crate::mutation::{format_percentage, MutationRecord};
use crate::report::{AlignmentReport, RunSummary, SummaryRow};
use crate::Classification;

pub const MUTATION_TABLE_HEADER: [&str; 8] = [
    "Aligned Position",
    "Original Position",
    "Query Residue",
    "Mutation Type / Mutated Residue",
    "Count",
    "Total Sequences",
    "Percentage",
    "Substitution Type",
];

pub const SUMMARY_TABLE_HEADER: [&str; 4] =
    ["MSA File", "Status", "Number of Mutations", "Total_hits"];

/// Placeholder for positions that do not exist in the ungapped query
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize)]
struct MutationRow {
    aligned_position: usize,
    original_position: String,
    query_residue: char,
    descriptor: String,
    count: usize,
    total_hits: usize,
    percentage: String,
    classification: Classification,
}

impl From<&MutationRecord> for MutationRow {
    fn from(record: &MutationRecord) -> Self {
        Self {
            aligned_position: record.aligned_position,
            original_position: match record.original_position {
                Some(position) => position.to_string(),
                None => NOT_AVAILABLE.to_string(),
            },
            query_residue: record.query_residue.as_char(),
            descriptor: record.kind.to_string(),
            count: record.count,
            total_hits: record.total_hits,
            percentage: format_percentage(record.percentage),
            classification: record.classification(),
        }
    }
}

pub fn write_mutation_table<W: Write>(
    report: &AlignmentReport,
    writer: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(MUTATION_TABLE_HEADER)?;
    for record in &report.mutations {
        writer.serialize(MutationRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_mutation_table_to_path<P: AsRef<Path>>(
    report: &AlignmentReport,
    path: P,
) -> Result<(), FileError> {
    let file = std::fs::File::create(&path).map_err(|e| FileError::io(Some(&path), e))?;
    write_mutation_table(report, file).map_err(|e| FileError::csv(Some(&path), e))
}

pub fn write_summary_table<W: Write>(summary: &RunSummary, writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(SUMMARY_TABLE_HEADER)?;
    for row in summary.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary_table_to_path<P: AsRef<Path>>(
    summary: &RunSummary,
    path: P,
) -> Result<(), FileError> {
    let file = std::fs::File::create(&path).map_err(|e| FileError::io(Some(&path), e))?;
    write_summary_table(summary, file).map_err(|e| FileError::csv(Some(&path), e))
}

/// Read a summary table back, e.g. one written by an earlier run
pub fn read_summary_table<R: Read>(reader: R) -> Result<RunSummary, csv::Error> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut summary = RunSummary::new();
    for row in reader.deserialize::<SummaryRow>() {
        summary.push(row?);
    }
    Ok(summary)
}

pub fn read_summary_table_from_path<P: AsRef<Path>>(path: P) -> Result<RunSummary, FileError> {
    let file = std::fs::File::open(&path).map_err(|e| FileError::io(Some(&path), e))?;
    read_summary_table(file).map_err(|e| FileError::csv(Some(&path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_report, build_summary};
    use crate::{Alignment, Status};

    fn render_mutations(rows: &[&str]) -> String {
        let report = build_report(&Alignment::from_strs("t.faa", rows).unwrap());
        let mut out = Vec::new();
        write_mutation_table(&report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_mutation_table() {
        let table = render_mutations(&["A-CDG", "AXCDG", "AVC-G", "SVCEG"]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "Aligned Position,Original Position,Query Residue,Mutation Type / Mutated Residue,Count,Total Sequences,Percentage,Substitution Type"
        );
        assert_eq!(lines[1], "1,1,A,S,1,3,33.33%,Non-Conservative");
        assert_eq!(lines[2], "2,N/A,-,insertion: X,1,3,33.33%,Insertion");
        assert_eq!(lines[3], "2,N/A,-,insertion: V,2,3,66.67%,Insertion");
        assert_eq!(lines[4], "4,3,D,deletion,1,3,33.33%,Deletion");
        assert_eq!(lines[5], "4,3,D,E,1,3,33.33%,Conservative");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_non_conservative_rendering() {
        let table = render_mutations(&["AK", "AW"]);
        assert_eq!(
            table.lines().nth(1),
            Some("2,2,K,W,1,1,100.0%,Non-Conservative")
        );
    }

    #[test]
    fn test_half_percentages_round_to_even() {
        let mut rows = vec!["K"; 33];
        rows[7] = "R";
        let table = render_mutations(&rows);
        assert_eq!(table.lines().nth(1), Some("1,1,K,R,1,32,3.12%,Conservative"));
    }

    #[test]
    fn test_summary_roundtrip() {
        let reports = vec![
            build_report(&Alignment::from_strs("MSA_b.faa", &["AK", "AR"]).unwrap()),
            build_report(&Alignment::from_strs("MSA_a.faa", &["AK", "AK"]).unwrap()),
        ];
        let summary = build_summary(&reports);
        let mut out = Vec::new();
        write_summary_table(&summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "MSA File,Status,Number of Mutations,Total_hits\n\
             MSA_b.faa,Mutations found,1,1\n\
             MSA_a.faa,No mutations found,0,1\n"
        );

        let parsed = read_summary_table(text.as_bytes()).unwrap();
        assert_eq!(parsed, summary);
        assert_eq!(parsed.rows()[1].status, Status::NoMutationsFound);
    }

    #[test]
    fn test_empty_summary_has_header() {
        let mut out = Vec::new();
        write_summary_table(&RunSummary::new(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "MSA File,Status,Number of Mutations,Total_hits\n"
        );
    }

    #[test]
    fn test_bad_status_is_rejected() {
        let text = "MSA File,Status,Number of Mutations,Total_hits\nx.faa,Maybe,0,1\n";
        assert!(read_summary_table(text.as_bytes()).is_err());
    }
}
