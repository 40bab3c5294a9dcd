//! In-memory sheet model: typed cells, column metadata and highlights.
//!
//! Building a [`SheetData`] is pure; rendering it to a workbook lives in
//! [`crate::io::writers`].

use crate::config::is_numeric_format_column;
use crate::core::{FieldValue, Record};
use crate::report::highlight::CellRef;
use crate::report::ordering::OrderedRecords;
use serde_json::Value;
use std::collections::BTreeSet;

pub const SUMMARY_SHEET: &str = "summary";
pub const RAW_SHEET: &str = "raw";

/// Display format applied to numeric cells of numeric columns.
pub const DECIMAL_FORMAT: &str = "0.0000";
/// Width of numeric columns, wide enough that values never render as `####`.
pub const NUMERIC_COLUMN_WIDTH: f64 = 14.0;
/// Most characters a worksheet cell can hold.
pub const MAX_CELL_TEXT_CHARS: usize = 32_767;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    /// May be NaN or infinite; the workbook writer spells those out as text.
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayHint {
    #[default]
    General,
    Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub hint: DisplayHint,
}

impl Cell {
    pub fn general(value: CellValue) -> Self {
        Self {
            value,
            hint: DisplayHint::General,
        }
    }
}

/// A field as a cell, without any coercion. Arrays and objects are kept as
/// their JSON text.
pub fn cell_value(value: Option<&FieldValue>) -> CellValue {
    match value {
        None => CellValue::Empty,
        Some(FieldValue::NonFinite(x)) => CellValue::Number(*x),
        Some(FieldValue::Json(json)) => json_cell_value(json),
    }
}

fn json_cell_value(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| CellValue::Text(n.to_string()), CellValue::Number),
        Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Best-effort numeric coercion for metric columns.
///
/// Numbers are widened to float, numeric-looking strings are parsed, and
/// everything else (null, `"inf"`, free text) passes through untouched.
/// Only numeric results get the decimal display hint.
pub fn coerce_numeric(value: Option<&FieldValue>) -> (CellValue, DisplayHint) {
    let cell = match value {
        Some(FieldValue::Json(Value::String(s))) => parse_finite(s).map_or_else(
            || CellValue::Text(s.clone()),
            CellValue::Number,
        ),
        other => cell_value(other),
    };
    let hint = match cell {
        CellValue::Number(_) => DisplayHint::Decimal,
        _ => DisplayHint::General,
    };
    (cell, hint)
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `text` cut to [`MAX_CELL_TEXT_CHARS`], or `None` when it already fits.
pub fn truncate_cell_text(text: &str) -> Option<String> {
    text.char_indices()
        .nth(MAX_CELL_TEXT_CHARS)
        .map(|(end, _)| text[..end].to_string())
}

/// Oversized text costs the cell its tail, never the report.
fn fit_cell(mut cell: Cell, record: &Record, column: &str) -> Cell {
    let truncated = match &cell.value {
        CellValue::Text(text) => truncate_cell_text(text),
        _ => None,
    };
    if let Some(text) = truncated {
        log::warn!(
            "Truncated '{}' from '{}' to {} characters",
            column,
            record.source_file(),
            MAX_CELL_TEXT_CHARS
        );
        cell.value = CellValue::Text(text);
    }
    cell
}

/// One worksheet: a header row, data rows, and per-cell fills.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// 0-based indices of columns given the numeric width.
    pub numeric_columns: Vec<usize>,
    pub highlights: Vec<CellRef>,
}

impl SheetData {
    /// Header row plus data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Data cell by 0-based record position and column name.
    pub fn cell(&self, record: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(record)?.get(index)
    }
}

/// Schema-ordered view with numeric coercion and change highlights.
pub fn build_summary_sheet(
    ordered: &OrderedRecords,
    columns: &[String],
    highlights: Vec<CellRef>,
) -> SheetData {
    let numeric: Vec<bool> = columns
        .iter()
        .map(|c| is_numeric_format_column(c))
        .collect();

    let rows: Vec<Vec<Cell>> = ordered
        .iter()
        .map(|record| {
            columns
                .iter()
                .zip(&numeric)
                .map(|(column, &is_numeric)| summary_cell(record, column, is_numeric))
                .collect()
        })
        .collect();

    SheetData {
        name: SUMMARY_SHEET.to_string(),
        columns: columns.to_vec(),
        rows,
        numeric_columns: numeric
            .iter()
            .enumerate()
            .filter_map(|(i, &is_numeric)| is_numeric.then_some(i))
            .collect(),
        highlights,
    }
}

fn summary_cell(record: &Record, column: &str, is_numeric: bool) -> Cell {
    let cell = if is_numeric {
        let (value, hint) = coerce_numeric(record.get(column));
        Cell { value, hint }
    } else {
        Cell::general(cell_value(record.get(column)))
    };
    fit_cell(cell, record, column)
}

/// Every field of every record, values written as found.
pub fn build_raw_sheet(ordered: &OrderedRecords, summary_columns: &[String]) -> SheetData {
    let columns = raw_columns(ordered.records(), summary_columns);
    let rows: Vec<Vec<Cell>> = ordered
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    let cell = Cell::general(cell_value(record.get(column)));
                    fit_cell(cell, record, column)
                })
                .collect()
        })
        .collect();

    SheetData {
        name: RAW_SHEET.to_string(),
        columns,
        rows,
        numeric_columns: Vec::new(),
        highlights: Vec::new(),
    }
}

/// Union of all record keys: summary columns first in schema order, then
/// the remaining keys sorted.
pub fn raw_columns(records: &[Record], summary_columns: &[String]) -> Vec<String> {
    let mut keys: BTreeSet<&str> = records.iter().flat_map(Record::keys).collect();

    let mut ordered = Vec::with_capacity(keys.len());
    for column in summary_columns {
        if keys.remove(column.as_str()) {
            ordered.push(column.clone());
        }
    }
    ordered.extend(keys.into_iter().map(str::to_string));
    ordered
}
