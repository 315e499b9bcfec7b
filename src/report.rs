use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;
use crate::mutation::MutationRecord;
use crate::mutation_classifier::ColumnClassifier;
use crate::position::map_positions;
use crate::{Classification, Status};

/// All mutations of one alignment, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentReport {
    pub name: String,
    pub total_hits: usize,
    pub mutations: Vec<MutationRecord>,
}

impl AlignmentReport {
    pub fn status(&self) -> Status {
        if self.mutations.is_empty() {
            Status::NoMutationsFound
        } else {
            Status::MutationsFound
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.len()
    }

    /// Number of records per classification
    pub fn count_by_classification(&self, classification: Classification) -> usize {
        self.mutations
            .iter()
            .filter(|m| m.classification() == classification)
            .count()
    }

    pub fn summary_row(&self) -> SummaryRow {
        SummaryRow {
            name: self.name.clone(),
            status: self.status(),
            mutation_count: self.mutation_count(),
            total_hits: self.total_hits,
        }
    }
}

/// Compare every hit of `alignment` against its query
pub fn build_report(alignment: &Alignment) -> AlignmentReport {
    let query = &alignment.query().symbols;
    let original_positions = map_positions(query);
    let columns = alignment.column_counts();
    let classifier = ColumnClassifier::new(alignment.total_hits());

    let mut mutations = Vec::new();
    for (i, counts) in columns.iter().enumerate() {
        mutations.extend(classifier.classify_column(
            i,
            query[i],
            original_positions[i],
            counts,
        ));
    }
    AlignmentReport {
        name: alignment.name().to_string(),
        total_hits: classifier.total_hits(),
        mutations,
    }
}

/// One line of the run summary. Serialized with the column names that
/// downstream tools expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "MSA File")]
    pub name: String,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Number of Mutations")]
    pub mutation_count: usize,
    #[serde(rename = "Total_hits")]
    pub total_hits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    rows: Vec<SummaryRow>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: SummaryRow) {
        self.rows.push(row)
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn tally(&self) -> StatusTally {
        let mutated = self.rows.iter().filter(|r| r.status.is_mutated()).count();
        StatusTally {
            mutated,
            not_mutated: self.rows.len() - mutated,
        }
    }
}

impl From<Vec<SummaryRow>> for RunSummary {
    fn from(rows: Vec<SummaryRow>) -> Self {
        Self { rows }
    }
}

/// Fold reports into a summary, keeping their order
pub fn build_summary<'a, I>(reports: I) -> RunSummary
where
    I: IntoIterator<Item = &'a AlignmentReport>,
{
    reports.into_iter().map(AlignmentReport::summary_row).collect::<Vec<_>>().into()
}

/// How many alignments did and did not show mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTally {
    pub mutated: usize,
    pub not_mutated: usize,
}

impl StatusTally {
    pub fn total(&self) -> usize {
        self.mutated + self.not_mutated
    }

    /// Share of mutated alignments in percent, 0 for an empty run
    pub fn mutated_percentage(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.mutated as f64 / self.total() as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationKind;
    use crate::Symbol;

    fn report(rows: &[&str]) -> AlignmentReport {
        build_report(&Alignment::from_strs("test.faa", rows).unwrap())
    }

    #[test]
    fn test_identical_hit() {
        let report = report(&["AC-G", "AC-G"]);
        assert!(report.mutations.is_empty());
        assert_eq!(report.status(), Status::NoMutationsFound);
        assert_eq!(report.total_hits, 1);
    }

    #[test]
    fn test_deletion() {
        let report = report(&["ACDG", "AC-G"]);
        assert_eq!(report.mutations.len(), 1);
        let record = &report.mutations[0];
        assert_eq!(record.aligned_position, 3);
        assert_eq!(record.original_position, Some(3));
        assert_eq!(record.kind, MutationKind::Deletion);
        assert_eq!(record.count, 1);
        assert_eq!(record.total_hits, 1);
        assert_eq!(record.percentage, 100.0);
        assert_eq!(report.status(), Status::MutationsFound);
    }

    #[test]
    fn test_insertion() {
        let report = report(&["A-CG", "AXCG"]);
        assert_eq!(report.mutations.len(), 1);
        let record = &report.mutations[0];
        assert_eq!(record.aligned_position, 2);
        assert_eq!(record.original_position, None);
        assert_eq!(record.kind.to_string(), "insertion: X");
        assert_eq!(record.query_residue, Symbol::GAP);
        assert_eq!(record.classification(), Classification::Insertion);
    }

    #[test]
    fn test_column_order() {
        let report = report(&["MA-KL", "MV-R-", "MK-KL", "-AWKL"]);
        let rendered: Vec<(usize, Option<usize>, String)> = report
            .mutations
            .iter()
            .map(|m| (m.aligned_position, m.original_position, m.kind.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                (1, Some(1), "deletion".to_string()),
                (2, Some(2), "V".to_string()),
                (2, Some(2), "K".to_string()),
                (3, None, "insertion: W".to_string()),
                (4, Some(3), "R".to_string()),
                (5, Some(4), "deletion".to_string()),
            ]
        );
        assert_eq!(report.count_by_classification(Classification::Conservative), 2);
        assert_eq!(report.count_by_classification(Classification::NonConservative), 1);
        assert_eq!(report.count_by_classification(Classification::Deletion), 2);
        assert_eq!(report.count_by_classification(Classification::Insertion), 1);
    }

    #[test]
    fn test_lower_case_hit() {
        let report = report(&["MA", "Ma"]);
        assert_eq!(report.mutations.len(), 1);
        assert_eq!(report.mutations[0].kind.to_string(), "a");
        assert_eq!(
            report.mutations[0].classification(),
            Classification::NonConservative
        );
    }

    #[test]
    fn test_query_only() {
        let report = report(&["MKV"]);
        assert_eq!(report.total_hits, 0);
        assert_eq!(report.status(), Status::NoMutationsFound);
    }

    #[test]
    fn test_idempotent() {
        let alignment = Alignment::from_strs("again.faa", &["MKV-L", "MRVAL", "M--AL"]).unwrap();
        assert_eq!(build_report(&alignment), build_report(&alignment));
    }

    #[test]
    fn test_status_matches_mutations() {
        for rows in &[
            vec!["AAAA", "AAAA"],
            vec!["AAAA", "AAAV"],
            vec!["A-AA", "A-AA", "A-AA"],
            vec!["A-AA", "AYAA", "A-AA"],
            vec!["W"],
        ] {
            let report = report(rows);
            assert_eq!(
                !report.mutations.is_empty(),
                report.status() == Status::MutationsFound
            );
        }
    }

    #[test]
    fn test_build_summary() {
        let reports = vec![
            build_report(&Alignment::from_strs("b.faa", &["AK", "AR"]).unwrap()),
            build_report(&Alignment::from_strs("a.faa", &["AK", "AK", "AK"]).unwrap()),
            build_report(&Alignment::from_strs("c.faa", &["AK"]).unwrap()),
        ];
        let summary = build_summary(&reports);
        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary.rows()[0],
            SummaryRow {
                name: "b.faa".to_string(),
                status: Status::MutationsFound,
                mutation_count: 1,
                total_hits: 1,
            }
        );
        assert_eq!(summary.rows()[1].name, "a.faa");
        assert_eq!(summary.rows()[1].status, Status::NoMutationsFound);
        assert_eq!(summary.rows()[1].mutation_count, 0);
        assert_eq!(summary.rows()[1].total_hits, 2);
        assert_eq!(summary.rows()[2].total_hits, 0);

        let tally = summary.tally();
        assert_eq!(tally, StatusTally { mutated: 1, not_mutated: 2 });
        assert_eq!(tally.total(), 3);
        assert!((tally.mutated_percentage() - 33.333).abs() < 0.001);
        assert_eq!(StatusTally::default().mutated_percentage(), 0.0);
    }
}
