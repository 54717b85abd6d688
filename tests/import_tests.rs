use bar_chart_rs::ChartError;
use bar_chart_rs::import::{
    ColumnMapping, ColumnRole, DecimalSeparator, Delimiter, ImportIssue, ImportSession,
    MAX_IMPORT_ROWS, parse_delimited, parse_numeric,
};

fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
    cells
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
        .collect()
}

#[test]
fn tokenizer_reference_cases() {
    assert_eq!(parse_delimited("a,\"b,c\",d", ","), rows(&[&["a", "b,c", "d"]]));
    assert_eq!(parse_delimited("a,,b", ","), rows(&[&["a", "", "b"]]));
    assert!(parse_delimited("", ",").is_empty());
    assert_eq!(parse_delimited("a,b\nc", ","), rows(&[&["a", "b"], &["c", ""]]));
}

#[test]
fn tokenizer_handles_tabs_pipes_and_crlf() {
    assert_eq!(
        parse_delimited("x\ty\r\n1\t2\r\n", "\t"),
        rows(&[&["x", "y"], &["1", "2"]])
    );
    assert_eq!(parse_delimited("x|\"|\"|z", "|"), rows(&[&["x", "|", "z"]]));
}

#[test]
fn role_inference_reference_case() {
    let headers: Vec<String> = ["Name", "Score", "Error"]
        .iter()
        .map(|h| (*h).to_owned())
        .collect();
    let mapping = ColumnMapping::infer(&headers);
    assert_eq!(
        mapping,
        ColumnMapping {
            label: Some(0),
            value: Some(1),
            error: Some(2),
            group: None,
        }
    );
}

#[test]
fn numeric_parsing_reference_cases() {
    assert_eq!(parse_numeric("1.234,5", DecimalSeparator::Comma), Some(1234.5));
    assert_eq!(parse_numeric("1,234.5", DecimalSeparator::Dot), Some(1234.5));
}

#[test]
fn import_blocks_while_value_is_unmapped() {
    let mut session = ImportSession::new("Name,Score\nA,1\nB,2", Delimiter::Comma);
    session.set_role(ColumnRole::Value, None);
    assert!(session.report().is_blocking());
    assert!(session.report().issues.contains(&ImportIssue::ValueUnmapped));
    assert!(matches!(
        session.import(),
        Err(ChartError::ImportRejected { .. })
    ));
}

#[test]
fn category_and_value_headers_import_without_remapping() {
    let session = ImportSession::new("Category,Value\nA,1\nB,2", Delimiter::Comma);
    let mapping = session.mapping();
    assert_eq!(mapping.get(ColumnRole::Label), Some(0));
    assert_eq!(mapping.get(ColumnRole::Group), None);

    let outcome = session.import().expect("label falls back to the category column");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].label, "A");
    assert_eq!(outcome.records[1].value, 2.0);
    assert_eq!(outcome.records[1].group, None);
}

#[test]
fn validation_messages_reference_rows() {
    let session = ImportSession::new("label,value\nA,1\n,x\nC,3", Delimiter::Comma);
    let messages = session.report().messages();
    assert_eq!(
        messages,
        vec!["row 2: label is empty", "row 2: value `x` is not a number"]
    );
    let err = session.import().expect_err("blocked import");
    assert!(err.to_string().contains("row 2: label is empty"));
}

#[test]
fn row_cap_only_validates_imported_rows() {
    let mut text = String::from("name;value\n");
    for index in 0..MAX_IMPORT_ROWS {
        text.push_str(&format!("row {index};{index},5\n"));
    }
    text.push_str("broken;not-a-number\n");
    let mut session = ImportSession::sniffed(text);
    assert_eq!(session.delimiter(), &Delimiter::Semicolon);
    session.set_decimal_separator(DecimalSeparator::Comma);

    let outcome = session.import().expect("overflow row is ignored, not validated");
    assert_eq!(outcome.records.len(), MAX_IMPORT_ROWS);
    assert_eq!(outcome.ignored_rows, 1);
    assert_eq!(outcome.records[3].value, 3.5);
}

#[test]
fn headerless_tables_use_column_numbers() {
    let mut session = ImportSession::new("A,1\nB,2", Delimiter::Comma);
    session.set_has_header(false);
    assert_eq!(session.header_names(), vec!["Column 1", "Column 2"]);
    let outcome = session.import().expect("positional mapping");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[1].label, "B");
}

#[test]
fn group_column_is_carried_through() {
    let session = ImportSession::new(
        "name,value,group\nA,1,north\nB,2,\nC,3,south",
        Delimiter::Comma,
    );
    let outcome = session.import().expect("valid import");
    let groups: Vec<Option<&str>> = outcome
        .records
        .iter()
        .map(|record| record.group.as_deref())
        .collect();
    assert_eq!(groups, vec![Some("north"), None, Some("south")]);
}
