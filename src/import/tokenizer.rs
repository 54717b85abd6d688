use super::Delimiter;

/// Rectangular table parsed from delimited text.
///
/// Every row, header included, has exactly `column_count` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTable {
    /// First row when the source has a header; empty otherwise.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub column_count: usize,
}

impl ParsedTable {
    #[must_use]
    pub fn parse(text: &str, delimiter: &Delimiter, has_header: bool) -> Self {
        let mut rows = parse_delimited(text, delimiter.as_str());
        let column_count = rows.first().map_or(0, Vec::len);
        let header = if has_header && !rows.is_empty() {
            rows.remove(0)
        } else {
            Vec::new()
        };
        Self {
            header,
            rows,
            column_count,
        }
    }

    /// Display names: trimmed header cells, or `Column N` where missing.
    #[must_use]
    pub fn header_names(&self) -> Vec<String> {
        (0..self.column_count)
            .map(|index| {
                self.header
                    .get(index)
                    .map(|cell| cell.trim())
                    .filter(|cell| !cell.is_empty())
                    .map_or_else(|| format!("Column {}", index + 1), str::to_owned)
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Splits `text` into rows of fields.
///
/// Quotes toggle quoted mode and `""` inside quotes is a literal quote. Outside
/// quotes `\r` is dropped, `\n` ends the row and `delimiter` ends the field.
/// Rows made only of empty fields are dropped, except the first one. Every row is
/// padded to the widest row.
#[must_use]
pub fn parse_delimited(text: &str, delimiter: &str) -> Vec<Vec<String>> {
    if text.is_empty() || delimiter.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut index = 0;

    while let Some(c) = text[index..].chars().next() {
        let rest = &text[index..];
        if in_quotes {
            if c == '"' {
                if rest[1..].starts_with('"') {
                    field.push('"');
                    index += 2;
                } else {
                    in_quotes = false;
                    index += 1;
                }
            } else {
                field.push(c);
                index += c.len_utf8();
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                index += 1;
            }
            '\r' => index += 1,
            '\n' => {
                row.push(std::mem::take(&mut field));
                finish_row(&mut rows, &mut row);
                index += 1;
            }
            _ if rest.starts_with(delimiter) => {
                row.push(std::mem::take(&mut field));
                index += delimiter.len();
            }
            _ => {
                field.push(c);
                index += c.len_utf8();
            }
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        finish_row(&mut rows, &mut row);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

fn finish_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    let row = std::mem::take(row);
    if rows.is_empty() || row.iter().any(|cell| !cell.is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
            .collect()
    }

    #[test]
    fn quoted_fields_keep_delimiters_and_escaped_quotes() {
        assert_eq!(parse_delimited("a,\"b,c\",d", ","), rows(&[&["a", "b,c", "d"]]));
        assert_eq!(
            parse_delimited("\"say \"\"hi\"\"\",x", ","),
            rows(&[&["say \"hi\"", "x"]])
        );
        assert_eq!(
            parse_delimited("\"line\nbreak\",y", ","),
            rows(&[&["line\nbreak", "y"]])
        );
    }

    #[test]
    fn empty_fields_and_ragged_rows_are_normalized() {
        assert_eq!(parse_delimited("a,,b", ","), rows(&[&["a", "", "b"]]));
        assert_eq!(parse_delimited("a,b\nc", ","), rows(&[&["a", "b"], &["c", ""]]));
        assert_eq!(parse_delimited("a,b\r\n\r\n,\nc,d\n", ","), rows(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn empty_input_or_delimiter_yields_nothing() {
        assert!(parse_delimited("", ",").is_empty());
        assert!(parse_delimited("a,b", "").is_empty());
    }

    #[test]
    fn first_row_is_kept_even_when_blank() {
        assert_eq!(parse_delimited("\na,b", ","), rows(&[&["", ""], &["a", "b"]]));
    }

    #[test]
    fn multi_character_delimiters_match_exactly() {
        assert_eq!(parse_delimited("a::b:c", "::"), rows(&[&["a", "b:c"]]));
    }

    #[test]
    fn header_names_fall_back_to_column_numbers() {
        let table = ParsedTable::parse("Name,,Score\nA,1,2", &Delimiter::Comma, true);
        assert_eq!(table.header_names(), vec!["Name", "Column 2", "Score"]);
        assert_eq!(table.rows.len(), 1);

        let headless = ParsedTable::parse("A,1", &Delimiter::Comma, false);
        assert_eq!(headless.header_names(), vec!["Column 1", "Column 2"]);
    }
}
