//! Conversion between persisted CSV text and the grid widget's sparse rows.
//!
//! The legacy dialect is deliberately narrow: every field is quote-wrapped on
//! output, only the first `"` of a field is backslash-escaped, one layer of
//! quotes is stripped on input, and embedded commas or newlines are not
//! supported. Saving always writes [`SAVE_COLUMNS`] columns per row, so
//! `encode(&decode(x))` is not `x` in general.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::file_io;

/// Number of columns the legacy encoder writes for every row.
pub const SAVE_COLUMNS: usize = 30;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub text: String,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub cells: BTreeMap<usize, Cell>,
}

impl Row {
    pub fn text(&self, col: usize) -> &str {
        self.cells.get(&col).map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Sparse row/column table. A missing row or cell reads as empty text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    pub rows: BTreeMap<usize, Row>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, row: usize, col: usize) -> &str {
        self.rows.get(&row).map(|r| r.text(col)).unwrap_or("")
    }

    pub fn set_text(&mut self, row: usize, col: usize, text: impl Into<String>) {
        self.rows
            .entry(row)
            .or_default()
            .cells
            .insert(col, Cell::new(text));
    }

    /// (last row index, last column index) over cells with non-empty text.
    pub fn used_bounds(&self) -> Option<(usize, usize)> {
        let mut bounds: Option<(usize, usize)> = None;
        for (&row_idx, row) in &self.rows {
            for (&col_idx, cell) in &row.cells {
                if cell.text.is_empty() {
                    continue;
                }
                bounds = Some(match bounds {
                    Some((r, c)) => (r.max(row_idx), c.max(col_idx)),
                    None => (row_idx, col_idx),
                });
            }
        }
        bounds
    }
}

/// Shape exchanged with the grid widget on load and on every change event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPayload {
    pub rows: Grid,
}

impl GridPayload {
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Grid> for GridPayload {
    fn from(rows: Grid) -> Self {
        Self { rows }
    }
}

/// Decode CSV text line by line. Never fails: an empty line is a row with one
/// empty cell, so `decode("")` has exactly one row.
pub fn decode(text: &str) -> Grid {
    let mut grid = Grid::new();
    for (row_idx, line) in text.split('\n').enumerate() {
        let row = grid.rows.entry(row_idx).or_default();
        for (col_idx, field) in line.split(',').enumerate() {
            row.cells.insert(col_idx, Cell::new(decode_field(field)));
        }
    }
    grid
}

fn decode_field(field: &str) -> String {
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);
    field.replacen("\\\"", "\"", 1)
}

/// Decode a dynamically typed value coming from the host. Only strings are
/// accepted.
pub fn decode_value(value: &serde_json::Value) -> Result<Grid, FormatError> {
    use serde_json::Value;

    match value {
        Value::String(text) => Ok(decode(text)),
        Value::Null => Err(FormatError::NotText { found: "null" }),
        Value::Bool(_) => Err(FormatError::NotText { found: "boolean" }),
        Value::Number(_) => Err(FormatError::NotText { found: "number" }),
        Value::Array(_) => Err(FormatError::NotText { found: "array" }),
        Value::Object(_) => Err(FormatError::NotText { found: "object" }),
    }
}

/// Encode with the fixed [`SAVE_COLUMNS`] width.
pub fn encode(grid: &Grid) -> String {
    encode_columns(grid, SAVE_COLUMNS)
}

pub fn encode_columns(grid: &Grid, columns: usize) -> String {
    let mut out = String::new();
    for row in grid.rows.values() {
        let line = (0..columns)
            .map(|col| encode_field(row.text(col)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn encode_field(text: &str) -> String {
    format!("\"{}\"", text.replacen('"', "\\\"", 1))
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Quote-everything format with single backslash escaping.
    #[default]
    Legacy,
    /// Standard CSV quoting via the `csv` crate.
    Rfc4180,
}

/// Dialect-aware decode/encode pair used by views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transcoder {
    pub dialect: Dialect,
    pub columns: usize,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self {
            dialect: Dialect::Legacy,
            columns: SAVE_COLUMNS,
        }
    }
}

impl Transcoder {
    pub fn new(dialect: Dialect, columns: usize) -> Self {
        Self {
            dialect,
            columns: columns.max(1),
        }
    }

    pub fn decode(&self, text: &str) -> Result<Grid, FormatError> {
        match self.dialect {
            Dialect::Legacy => Ok(decode(text)),
            Dialect::Rfc4180 => file_io::read_csv(text),
        }
    }

    pub fn encode(&self, grid: &Grid) -> Result<String, FormatError> {
        match self.dialect {
            Dialect::Legacy => Ok(encode_columns(grid, self.columns)),
            Dialect::Rfc4180 => file_io::write_csv(grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_fields(n: usize) -> String {
        vec!["\"\""; n].join(",")
    }

    #[test]
    fn decode_splits_lines_and_fields() {
        let grid = decode("a,b\nc,d");

        let mut expected = Grid::new();
        expected.set_text(0, 0, "a");
        expected.set_text(0, 1, "b");
        expected.set_text(1, 0, "c");
        expected.set_text(1, 1, "d");
        assert_eq!(grid, expected);
    }

    #[test]
    fn decode_empty_text_is_one_row_with_one_empty_cell() {
        let grid = decode("");
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[&0].cells.len(), 1);
        assert_eq!(grid.rows[&0].cells[&0].text, "");
    }

    #[test]
    fn decode_keeps_trailing_newline_row() {
        let grid = decode("\"a\"\n");
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.text(0, 0), "a");
        assert_eq!(grid.rows[&1].cells.len(), 1);
    }

    #[test]
    fn decode_strips_one_quote_layer_and_one_escape() {
        let grid = decode("\"\"x\"\",\"say \\\"a\\\" b\",\"");
        assert_eq!(grid.text(0, 0), "\"x\"");
        assert_eq!(grid.text(0, 1), "say \"a\\\" b");
        assert_eq!(grid.text(0, 2), "");
    }

    #[test]
    fn decode_does_not_treat_crlf_specially() {
        let grid = decode("a\r\nb");
        assert_eq!(grid.text(0, 0), "a\r");
        assert_eq!(grid.text(1, 0), "b");
    }

    #[test]
    fn encode_writes_thirty_quoted_columns_per_row() {
        let mut grid = Grid::new();
        grid.set_text(0, 0, "x");
        grid.set_text(0, 2, "z");

        let expected = format!("\"x\",\"\",\"z\",{}\n", empty_fields(27));
        assert_eq!(encode(&grid), expected);
    }

    #[test]
    fn encode_escapes_only_first_quote() {
        let mut grid = Grid::new();
        grid.set_text(0, 0, "He said \"hi\"");

        let expected = format!("\"He said \\\"hi\"\",{}\n", empty_fields(29));
        assert_eq!(encode(&grid), expected);
    }

    #[test]
    fn encode_follows_row_order_and_terminates_every_row() {
        let mut grid = Grid::new();
        grid.set_text(5, 0, "later");
        grid.set_text(1, 0, "earlier");

        let text = encode(&grid);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"earlier\","));
        assert!(lines[1].starts_with("\"later\","));
        assert_eq!(lines[2], "");
    }

    #[test]
    fn encode_empty_grid_is_empty_text() {
        assert_eq!(encode(&Grid::new()), "");
    }

    #[test]
    fn round_trip_is_not_identity() {
        let original = "\"a\",\"b\"";
        let saved = encode(&decode(original));
        assert_ne!(saved, original);
        assert_eq!(saved, format!("\"a\",\"b\",{}\n", empty_fields(28)));

        let wide = (0..31).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        let saved = encode(&decode(&wide));
        assert!(!saved.contains("\"30\""));

        let quoted = "\"1\"2\"3\"";
        let saved = encode(&decode(quoted));
        assert_eq!(saved, format!("\"1\\\"2\"3\",{}\n", empty_fields(29)));
        assert_ne!(saved.trim_end(), quoted);
    }

    #[test]
    fn decode_value_rejects_non_text() {
        let grid = decode_value(&serde_json::json!("a,b")).unwrap();
        assert_eq!(grid.text(0, 1), "b");

        let err = decode_value(&serde_json::json!(42)).unwrap_err();
        assert!(matches!(err, FormatError::NotText { found: "number" }));
        assert!(decode_value(&serde_json::Value::Null).is_err());
    }

    #[test]
    fn payload_uses_widget_shape() {
        let json = r#"{"rows":{"0":{"cells":{"0":{"text":"a"},"3":{"text":"d"}}},"2":{"cells":{}}}}"#;
        let payload = GridPayload::from_json(json).unwrap();
        assert_eq!(payload.rows.text(0, 0), "a");
        assert_eq!(payload.rows.text(0, 3), "d");
        assert_eq!(payload.rows.text(2, 0), "");

        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["rows"]["0"]["cells"]["3"]["text"], "d");
    }

    #[test]
    fn payload_rejects_wrong_shape() {
        let err = GridPayload::from_json(r#"{"rows":{"0":{"cells":{"0":{"text":1}}}}}"#);
        assert!(matches!(err, Err(FormatError::Payload(_))));
    }

    #[test]
    fn used_bounds_ignores_empty_cells() {
        let mut grid = Grid::new();
        assert_eq!(grid.used_bounds(), None);
        grid.set_text(4, 7, "");
        grid.set_text(2, 1, "x");
        grid.set_text(0, 3, "y");
        assert_eq!(grid.used_bounds(), Some((2, 3)));
    }

    #[test]
    fn transcoder_clamps_columns() {
        let transcoder = Transcoder::new(Dialect::Legacy, 0);
        let mut grid = Grid::new();
        grid.set_text(0, 0, "only");
        assert_eq!(transcoder.encode(&grid).unwrap(), "\"only\"\n");
    }
}
