use thiserror::Error;

use super::{ColumnMapping, DecimalSeparator, parse_numeric};

/// One import problem. `Display` is the message shown to the user; row numbers
/// are 1-based over data rows (the header is not counted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportIssue {
    #[error("no column is mapped to the label")]
    LabelUnmapped,
    #[error("no column is mapped to the value")]
    ValueUnmapped,
    #[error("there are no data rows to import")]
    NoRows,
    #[error("row {row}: label is empty")]
    BlankLabel { row: usize },
    #[error("row {row}: value `{cell}` is not a number")]
    InvalidValue { row: usize, cell: String },
    #[error("row {row}: error `{cell}` is not a number")]
    InvalidError { row: usize, cell: String },
}

/// Outcome of validating the importable rows of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub issues: Vec<ImportIssue>,
    /// Data rows in the source.
    pub total_rows: usize,
    /// Rows that would be imported (at most the row cap).
    pub importable_rows: usize,
    /// Rows past the cap; previewed but never imported.
    pub ignored_rows: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        !self.issues.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Validates the first `row_cap` rows against `mapping`.
///
/// A blank error cell counts as zero; only non-blank unparsable error cells are flagged.
#[must_use]
pub fn validate_rows(
    rows: &[Vec<String>],
    mapping: ColumnMapping,
    separator: DecimalSeparator,
    row_cap: usize,
) -> ValidationReport {
    let importable = rows.len().min(row_cap);
    let mut report = ValidationReport {
        issues: Vec::new(),
        total_rows: rows.len(),
        importable_rows: importable,
        ignored_rows: rows.len() - importable,
    };

    if mapping.label.is_none() {
        report.issues.push(ImportIssue::LabelUnmapped);
    }
    if mapping.value.is_none() {
        report.issues.push(ImportIssue::ValueUnmapped);
    }
    if rows.is_empty() {
        report.issues.push(ImportIssue::NoRows);
    }

    for (index, row) in rows.iter().take(importable).enumerate() {
        let row_number = index + 1;
        if let Some(column) = mapping.label {
            if cell(row, column).trim().is_empty() {
                report
                    .issues
                    .push(ImportIssue::BlankLabel { row: row_number });
            }
        }
        if let Some(column) = mapping.value {
            let raw = cell(row, column);
            if parse_numeric(raw, separator).is_none() {
                report.issues.push(ImportIssue::InvalidValue {
                    row: row_number,
                    cell: raw.trim().to_owned(),
                });
            }
        }
        if let Some(column) = mapping.error {
            let raw = cell(row, column);
            if !raw.trim().is_empty() && parse_numeric(raw, separator).is_none() {
                report.issues.push(ImportIssue::InvalidError {
                    row: row_number,
                    cell: raw.trim().to_owned(),
                });
            }
        }
    }

    report
}

pub(super) fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map_or("", String::as_str)
}
