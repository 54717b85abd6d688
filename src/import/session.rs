use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::validation::cell;
use super::{
    ColumnMapping, ColumnRole, DecimalSeparator, Delimiter, ParsedTable, ValidationReport,
    parse_numeric, validate_rows,
};

/// Rows past this count are previewed but never imported.
pub const MAX_IMPORT_ROWS: usize = 30;

/// One normalized row ready to become a chart item.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRecord {
    pub label: String,
    pub value: f64,
    /// Absolute error, `0` when blank or unmapped.
    pub error: f64,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub records: Vec<ImportedRecord>,
    pub ignored_rows: usize,
}

/// Editable import state: source text and parse options, the derived table,
/// the column mapping and the latest validation report.
///
/// Changing the text, delimiter or header flag rebuilds the table and
/// re-guesses the mapping. Changing the mapping or decimal separator only
/// re-validates.
#[derive(Debug, Clone)]
pub struct ImportSession {
    text: String,
    delimiter: Delimiter,
    has_header: bool,
    decimal_separator: DecimalSeparator,
    table: ParsedTable,
    mapping: ColumnMapping,
    report: ValidationReport,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new("", Delimiter::Comma)
    }
}

impl ImportSession {
    #[must_use]
    pub fn new(text: impl Into<String>, delimiter: Delimiter) -> Self {
        let mut session = Self {
            text: text.into(),
            delimiter,
            has_header: true,
            decimal_separator: DecimalSeparator::Dot,
            table: ParsedTable::default(),
            mapping: ColumnMapping::default(),
            report: ValidationReport::default(),
        };
        session.regenerate();
        session
    }

    /// Builds a session with the delimiter sniffed from `text`.
    #[must_use]
    pub fn sniffed(text: impl Into<String>) -> Self {
        let text = text.into();
        let delimiter = Delimiter::sniff(&text);
        Self::new(text, delimiter)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.regenerate();
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) {
        if self.delimiter != delimiter {
            self.delimiter = delimiter;
            self.regenerate();
        }
    }

    pub fn set_has_header(&mut self, has_header: bool) {
        if self.has_header != has_header {
            self.has_header = has_header;
            self.regenerate();
        }
    }

    pub fn set_decimal_separator(&mut self, separator: DecimalSeparator) {
        self.decimal_separator = separator;
        self.revalidate();
    }

    pub fn set_mapping(&mut self, mapping: ColumnMapping) {
        self.mapping = mapping.clamped(self.table.column_count);
        self.revalidate();
    }

    pub fn set_role(&mut self, role: ColumnRole, column: Option<usize>) {
        let mut mapping = self.mapping;
        mapping.set(role, column);
        self.set_mapping(mapping);
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    #[must_use]
    pub fn decimal_separator(&self) -> DecimalSeparator {
        self.decimal_separator
    }

    #[must_use]
    pub fn table(&self) -> &ParsedTable {
        &self.table
    }

    #[must_use]
    pub fn mapping(&self) -> ColumnMapping {
        self.mapping
    }

    #[must_use]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    #[must_use]
    pub fn header_names(&self) -> Vec<String> {
        self.table.header_names()
    }

    /// Every data row, including the ones past [`MAX_IMPORT_ROWS`].
    #[must_use]
    pub fn preview_rows(&self) -> &[Vec<String>] {
        &self.table.rows
    }

    /// Normalizes the importable rows, or rejects with every validation message.
    pub fn import(&self) -> ChartResult<ImportOutcome> {
        if self.report.is_blocking() {
            return Err(ChartError::ImportRejected {
                messages: self.report.messages(),
            });
        }
        let (Some(label_column), Some(value_column)) = (self.mapping.label, self.mapping.value)
        else {
            return Err(ChartError::ImportRejected {
                messages: vec!["label and value columns must be mapped".to_owned()],
            });
        };

        let separator = self.decimal_separator;
        let mut records = Vec::with_capacity(self.report.importable_rows);
        for row in self.table.rows.iter().take(self.report.importable_rows) {
            let value = parse_numeric(cell(row, value_column), separator).ok_or_else(|| {
                ChartError::InvalidData("value cell changed after validation".to_owned())
            })?;
            let error = self
                .mapping
                .error
                .and_then(|column| parse_numeric(cell(row, column), separator))
                .map_or(0.0, f64::abs);
            let group = self
                .mapping
                .group
                .map(|column| cell(row, column).trim())
                .filter(|group| !group.is_empty())
                .map(str::to_owned);
            records.push(ImportedRecord {
                label: cell(row, label_column).trim().to_owned(),
                value,
                error,
                group,
            });
        }

        debug!(
            imported = records.len(),
            ignored = self.report.ignored_rows,
            "import accepted"
        );
        Ok(ImportOutcome {
            records,
            ignored_rows: self.report.ignored_rows,
        })
    }

    fn regenerate(&mut self) {
        self.table = ParsedTable::parse(&self.text, &self.delimiter, self.has_header);
        self.mapping =
            ColumnMapping::infer(&self.table.header_names()).clamped(self.table.column_count);
        debug!(
            rows = self.table.rows.len(),
            columns = self.table.column_count,
            delimiter = ?self.delimiter,
            "import table regenerated"
        );
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.report = validate_rows(
            &self.table.rows,
            self.mapping,
            self.decimal_separator,
            MAX_IMPORT_ROWS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_text_is_mapped_and_imported() {
        let session = ImportSession::new("Name,Score,Error\nA,10,1\nB,-2.5,", Delimiter::Comma);
        let outcome = session.import().expect("valid import");
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].label, "A");
        assert_eq!(outcome.records[0].error, 1.0);
        assert_eq!(outcome.records[1].value, -2.5);
        assert_eq!(outcome.records[1].error, 0.0);
    }

    #[test]
    fn decimal_separator_change_revalidates() {
        let mut session = ImportSession::new("Name;Value\nA;1.234,5", Delimiter::Semicolon);
        let dotted = session.import().expect("dot decimals");
        assert_eq!(dotted.records[0].value, 1.2345);
        session.set_decimal_separator(DecimalSeparator::Comma);
        let outcome = session.import().expect("comma decimals");
        assert_eq!(outcome.records[0].value, 1234.5);
    }

    #[test]
    fn negative_errors_become_magnitudes() {
        let session = ImportSession::new("label,value,sd\nA,1,-0.5", Delimiter::Comma);
        let outcome = session.import().expect("valid import");
        assert_eq!(outcome.records[0].error, 0.5);
    }

    #[test]
    fn unmapped_value_rejects_import() {
        let mut session = ImportSession::new("Name,Score\nA,1", Delimiter::Comma);
        session.set_role(ColumnRole::Value, None);
        match session.import() {
            Err(ChartError::ImportRejected { messages }) => {
                assert_eq!(messages, vec!["no column is mapped to the value"]);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rows_past_the_cap_are_ignored() {
        let mut text = String::from("name,value\n");
        for index in 0..35 {
            text.push_str(&format!("item {index},{index}\n"));
        }
        let session = ImportSession::new(text, Delimiter::Comma);
        assert_eq!(session.preview_rows().len(), 35);
        let outcome = session.import().expect("valid import");
        assert_eq!(outcome.records.len(), MAX_IMPORT_ROWS);
        assert_eq!(outcome.ignored_rows, 5);
    }

    #[test]
    fn delimiter_change_rebuilds_and_reclamps() {
        let mut session = ImportSession::new("a;b;c\n1;2;3", Delimiter::Semicolon);
        session.set_role(ColumnRole::Error, Some(2));
        session.set_delimiter(Delimiter::Comma);
        assert_eq!(session.table().column_count, 1);
        let mapping = session.mapping();
        assert_eq!(mapping.label, Some(0));
        assert_eq!(mapping.value, None);
        assert_eq!(mapping.error, None);
    }

    #[test]
    fn sniffing_picks_the_dominant_delimiter() {
        let session = ImportSession::sniffed("label\tvalue\nA\t3");
        assert_eq!(session.delimiter(), &Delimiter::Tab);
        assert_eq!(session.import().expect("tab import").records[0].value, 3.0);
    }
}
