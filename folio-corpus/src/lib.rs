//! FILENAME: folio-corpus/src/lib.rs
//! FOLIO Corpus Module
//!
//! Loads FOLIO dataset records from JSONL files and validates their
//! first-order formulas with the parser crate. This crate is a caller of
//! the parser's public contract: it hands the core plain formula strings
//! and receives syntax trees or structured errors back. Archive download
//! and verification are not handled here.

mod error;

pub use error::CorpusError;

use parser::{parse, parse_many, Formula, FormulaError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// ============================================================================
// RECORDS
// ============================================================================

/// One FOLIO story as stored in the dataset JSONL files.
///
/// `premises_fol` holds one formula per line; `conclusion_fol` is a single
/// formula. Both use the educational FOL notation the parser understands.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoryRecord {
    pub story_id: u64,
    #[serde(rename = "premises-FOL")]
    pub premises_fol: String,
    #[serde(rename = "conclusion-FOL")]
    pub conclusion_fol: String,
    pub label: String,
}

impl StoryRecord {
    /// Splits the premises block into individual formula strings,
    /// trimming surrounding whitespace and skipping blank lines.
    pub fn premises(&self) -> Vec<&str> {
        self.premises_fol
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Reads FOLIO records from a JSONL file, one JSON object per line.
///
/// Blank lines are skipped. A malformed line aborts the load and reports
/// its 1-based line number; parse failures of the formulas inside a record
/// are NOT detected here — use [`parse_story`] for that.
pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Vec<StoryRecord>, CorpusError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| CorpusError::Json {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// VALIDATION REPORTS
// ============================================================================

/// Parse results for one story: one result per premise, in premise order,
/// plus the conclusion.
#[derive(Debug)]
pub struct StoryReport {
    pub story_id: u64,
    pub label: String,
    pub premises: Vec<Result<Formula, FormulaError>>,
    pub conclusion: Result<Formula, FormulaError>,
}

impl StoryReport {
    pub fn premises_ok(&self) -> usize {
        self.premises.iter().filter(|r| r.is_ok()).count()
    }

    pub fn premises_failed(&self) -> usize {
        self.premises.len() - self.premises_ok()
    }

    /// True when every premise and the conclusion parsed.
    pub fn is_fully_parsed(&self) -> bool {
        self.premises_failed() == 0 && self.conclusion.is_ok()
    }
}

/// Parses every formula in a story. Individual failures never abort the
/// story: each premise keeps its own result slot, so callers can report
/// "N premises OK, M failed" per story.
pub fn parse_story(record: &StoryRecord) -> StoryReport {
    StoryReport {
        story_id: record.story_id,
        label: record.label.clone(),
        premises: parse_many(record.premises()),
        conclusion: parse(record.conclusion_fol.trim()),
    }
}

/// Corpus-wide formula counts across a batch of stories.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub stories: usize,
    pub formulas_ok: usize,
    pub formulas_failed: usize,
}

/// Parses every formula in every record and tallies the outcomes.
pub fn summarize(records: &[StoryRecord]) -> CorpusSummary {
    let mut summary = CorpusSummary::default();

    for record in records {
        let report = parse_story(record);
        summary.stories += 1;
        summary.formulas_ok += report.premises_ok();
        summary.formulas_failed += report.premises_failed();
        if report.conclusion.is_ok() {
            summary.formulas_ok += 1;
        } else {
            summary.formulas_failed += 1;
        }
    }

    summary
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_record() -> StoryRecord {
        StoryRecord {
            story_id: 7,
            premises_fol: "∀x (Student(x) → Smart(x))\nStudent(rina)\n".to_string(),
            conclusion_fol: "Smart(rina)".to_string(),
            label: "True".to_string(),
        }
    }

    #[test]
    fn premises_splits_lines_and_skips_blanks() {
        let record = StoryRecord {
            premises_fol: "Student(rina)\n\n  Smart(rina)  \n".to_string(),
            ..sample_record()
        };
        assert_eq!(record.premises(), vec!["Student(rina)", "Smart(rina)"]);
    }

    #[test]
    fn parse_story_reports_per_premise_results() {
        let report = parse_story(&sample_record());
        assert_eq!(report.story_id, 7);
        assert_eq!(report.premises_ok(), 2);
        assert_eq!(report.premises_failed(), 0);
        assert!(report.conclusion.is_ok());
        assert!(report.is_fully_parsed());
    }

    #[test]
    fn parse_story_isolates_premise_failures() {
        let record = StoryRecord {
            premises_fol: "Student(rina\nSmart(rina)".to_string(),
            ..sample_record()
        };
        let report = parse_story(&record);

        // The broken first premise does not affect the second.
        assert_eq!(report.premises_ok(), 1);
        assert_eq!(report.premises_failed(), 1);
        assert!(matches!(
            report.premises[0],
            Err(FormulaError::Parse { .. })
        ));
        assert!(report.premises[1].is_ok());
        assert!(!report.is_fully_parsed());
    }

    #[test]
    fn load_jsonl_reads_records_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"story_id": 1, "premises-FOL": "Student(rina)", "conclusion-FOL": "Student(rina)", "label": "True"}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"story_id": 2, "premises-FOL": "Raining", "conclusion-FOL": "Raining", "label": "Uncertain"}}"#
        )
        .unwrap();

        let records = load_jsonl(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].story_id, 1);
        assert_eq!(records[1].story_id, 2);
        assert_eq!(records[1].label, "Uncertain");
    }

    #[test]
    fn load_jsonl_reports_line_number_of_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"story_id": 1, "premises-FOL": "Raining", "conclusion-FOL": "Raining", "label": "True"}}"#
        )
        .unwrap();
        writeln!(file, "not json").unwrap();

        let err = load_jsonl(file.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Json { line: 2, .. }));
    }

    #[test]
    fn parsed_trees_export_as_json() {
        let report = parse_story(&sample_record());
        let tree = report.conclusion.as_ref().unwrap();
        let json = serde_json::to_string(tree).unwrap();
        assert!(json.contains("Predicate"));
        assert!(json.contains("Smart"));
    }

    #[test]
    fn summarize_tallies_across_stories() {
        let good = sample_record();
        let broken = StoryRecord {
            story_id: 8,
            premises_fol: "Student(rina\nSmart(rina)".to_string(),
            conclusion_fol: "Smart(rina)".to_string(),
            label: "False".to_string(),
        };

        let summary = summarize(&[good, broken]);
        assert_eq!(
            summary,
            CorpusSummary {
                stories: 2,
                // 2 premises + conclusion from the good story, plus one
                // premise and the conclusion from the broken one.
                formulas_ok: 5,
                formulas_failed: 1,
            }
        );
    }
}
