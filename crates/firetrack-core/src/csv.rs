//! CSV ingest for office spreadsheets
//!
//! Material lists and inventory sheets arrive as comma-separated text
//! exported from spreadsheets. [`parse`] turns that text into a header list
//! and one [`CsvRow`] per data line.
//!
//! The parser is a total function: every `&str`, including empty text and
//! text with unbalanced quotes, yields a well-formed [`CsvTable`]. Rows with
//! too few fields are padded with empty strings and extra fields are
//! discarded.
//!
//! # Quoting rules
//!
//! - A field wrapped in `"` may contain commas and line breaks.
//! - Inside quotes, `""` stands for one literal `"`.
//! - `\r\n`, `\n` and a lone `\r` all end a line; blank lines are skipped.
//! - Header names and values are trimmed of surrounding whitespace.
//!
//! # Examples
//!
//! ```
//! use firetrack_core::csv::parse;
//!
//! let table = parse("Qty,Description\n2,\"Horn, strobe\"\n");
//! assert_eq!(table.headers, vec!["Qty", "Description"]);
//! assert_eq!(table.rows[0].get("Description"), "Horn, strobe");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

/// One data row, keyed by header name
///
/// When the header line repeats a name, the right-most column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvRow(HashMap<String, String>);

impl CsvRow {
    /// Value of a column; unknown columns read as an empty string
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or("")
    }

    /// Value of a column, or `None` when the cell is empty or unknown
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        Some(self.get(column)).filter(|v| !v.is_empty())
    }

    /// Number of distinct columns in the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the row carries the given column
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Column/value pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parsed CSV document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    /// Trimmed header names in file order
    pub headers: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `limit` rows, for previews before an import
    pub fn preview(&self, limit: usize) -> &[CsvRow] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Cell values of a row in header order
    ///
    /// Duplicate headers repeat the value stored under that name.
    pub fn ordered_values<'a>(&'a self, row: &'a CsvRow) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.iter().map(move |h| row.get(h))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InQuotes,
}

/// Splits text into raw records of untrimmed fields
struct RecordScanner<'a> {
    chars: Peekable<Chars<'a>>,
    state: ScanState,
    field: String,
    record: Vec<String>,
    records: Vec<Vec<String>>,
}

impl<'a> RecordScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            state: ScanState::Normal,
            field: String::new(),
            record: Vec::new(),
            records: Vec::new(),
        }
    }

    fn close_field(&mut self) {
        self.record.push(std::mem::take(&mut self.field));
    }

    /// Close the pending record unless nothing has been read since the last one
    fn close_record(&mut self) {
        if !self.field.is_empty() || !self.record.is_empty() {
            self.close_field();
            self.records.push(std::mem::take(&mut self.record));
        }
    }

    fn run(mut self) -> Vec<Vec<String>> {
        while let Some(ch) = self.chars.next() {
            match (self.state, ch) {
                (ScanState::InQuotes, '"') if self.chars.peek() == Some(&'"') => {
                    self.chars.next();
                    self.field.push('"');
                }
                (ScanState::InQuotes, '"') => self.state = ScanState::Normal,
                (ScanState::Normal, '"') => self.state = ScanState::InQuotes,
                (ScanState::Normal, ',') => self.close_field(),
                // CR of a CRLF pair; the LF ends the line
                (ScanState::Normal, '\r') if self.chars.peek() == Some(&'\n') => {}
                (ScanState::Normal, '\n' | '\r') => self.close_record(),
                (_, other) => self.field.push(other),
            }
        }
        self.close_record();

        let mut records = self.records;
        if records
            .last()
            .is_some_and(|last| last.len() == 1 && last[0].is_empty())
        {
            records.pop();
        }
        records
    }
}

/// Parse CSV text into headers and keyed rows
///
/// Never fails; see the module documentation for the quoting rules.
pub fn parse(text: &str) -> CsvTable {
    let mut records = RecordScanner::new(text).run().into_iter();

    let Some(header_record) = records.next() else {
        return CsvTable::default();
    };

    let headers: Vec<String> = header_record
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let rows: Vec<CsvRow> = records
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = record.get(i).map(|v| v.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect::<CsvRow>()
        })
        .collect();

    CsvTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_document() {
        let table = parse("a,b\n1,2\n3,4\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(
            table.rows,
            vec![row(&[("a", "1"), ("b", "2")]), row(&[("a", "3"), ("b", "4")])]
        );
    }

    #[test]
    fn test_empty_text() {
        let table = parse("");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_quoted_comma_is_literal() {
        let table = parse("a,b\n\"x,y\",2\n");
        assert_eq!(table.rows, vec![row(&[("a", "x,y"), ("b", "2")])]);
    }

    #[test]
    fn test_doubled_quote_is_unescaped() {
        let table = parse("a,b\n\"he said \"\"hi\"\"\",2\n");
        assert_eq!(table.rows[0].get("a"), "he said \"hi\"");
        assert_eq!(table.rows[0].get("b"), "2");
    }

    #[test]
    fn test_crlf_matches_lf() {
        assert_eq!(parse("a,b\r\n1,2\r\n"), parse("a,b\n1,2\n"));
    }

    #[test]
    fn test_lone_cr_ends_line() {
        let table = parse("a,b\r1,2");
        assert_eq!(table.rows, vec![row(&[("a", "1"), ("b", "2")])]);
    }

    #[test]
    fn test_quoted_newline_is_kept() {
        let table = parse("note,qty\n\"line one\nline two\",3\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("note"), "line one\nline two");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let table = parse("a\n\n\n1\n\r\n2\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("a"), "2");
    }

    #[test]
    fn test_no_trailing_newline() {
        let table = parse("a,b\n1,2");
        assert_eq!(table.rows, vec![row(&[("a", "1"), ("b", "2")])]);
    }

    #[test]
    fn test_short_rows_are_padded_and_long_rows_truncated() {
        let table = parse("a,b,c\n1\n1,2,3,4,5\n");
        assert_eq!(table.rows[0], row(&[("a", "1"), ("b", ""), ("c", "")]));
        assert_eq!(table.rows[1], row(&[("a", "1"), ("b", "2"), ("c", "3")]));
    }

    #[test]
    fn test_trailing_empty_field_still_counts() {
        let table = parse("a,b\n1,\n");
        assert_eq!(table.rows, vec![row(&[("a", "1"), ("b", "")])]);
    }

    #[test]
    fn test_values_and_headers_are_trimmed() {
        let table = parse(" Qty , Unit Price \n 4 , $12.00 \n");
        assert_eq!(table.headers, vec!["Qty", "Unit Price"]);
        assert_eq!(table.rows[0].get("Unit Price"), "$12.00");
    }

    #[test]
    fn test_duplicate_header_takes_last_column() {
        let table = parse("a,a,b\n1,2,3\n");
        assert_eq!(table.headers, vec!["a", "a", "b"]);
        assert_eq!(table.rows[0], row(&[("a", "2"), ("b", "3")]));
    }

    #[test]
    fn test_unbalanced_quote_consumes_rest() {
        let table = parse("a,b\n\"open,1\n2,3\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("a"), "open,1\n2,3");
        assert_eq!(table.rows[0].get("b"), "");
    }

    #[test]
    fn test_header_only() {
        let table = parse("a,b\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_whitespace_only_line_becomes_row() {
        let table = parse("a\n   \n");
        assert_eq!(table.rows, vec![row(&[("a", "")])]);
    }

    #[test]
    fn test_preview_and_ordered_values() {
        let table = parse("b,a\n1,2\n3,4\n5,6\n");
        assert_eq!(table.preview(2).len(), 2);
        assert_eq!(table.preview(10).len(), 3);
        let values: Vec<&str> = table.ordered_values(&table.rows[0]).collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_row_accessors() {
        let r = row(&[("Qty", "2"), ("Price", "")]);
        assert_eq!(r.get("Missing"), "");
        assert_eq!(r.non_empty("Price"), None);
        assert_eq!(r.non_empty("Qty"), Some("2"));
        assert!(r.contains("Price"));
        assert_eq!(r.len(), 2);
    }

    mod prop {
        use super::super::parse;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_parse_never_panics(text in "\\PC{0,200}") {
                let table = parse(&text);
                prop_assert!(table.headers.iter().all(|h| h.trim() == h.as_str()));
            }

            #[test]
            fn test_unquoted_cells_are_trimmed(cells in prop::collection::vec("[a-z ]{1,8}", 1..6)) {
                let headers: Vec<String> = (0..cells.len()).map(|i| format!("h{i}")).collect();
                let table = parse(&format!("{}\n{}\n", headers.join(","), cells.join(",")));

                prop_assert_eq!(table.rows.len(), 1);
                for (header, cell) in headers.iter().zip(&cells) {
                    prop_assert_eq!(table.rows[0].get(header), cell.trim());
                }
            }
        }
    }
}
