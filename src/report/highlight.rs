//! Change detection between a model's two most recent runs.

use crate::config::BENCHMARK_COLUMNS;
use crate::core::FieldValue;
use crate::report::ordering::OrderedRecords;
use serde_json::Value;

/// Numeric values closer than this are treated as unchanged.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

/// A 1-based sheet coordinate. Row 1 is the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub column: u16,
}

impl CellRef {
    pub fn new(row: u32, column: u16) -> Self {
        Self { row, column }
    }
}

/// Whether a benchmark value changed between two runs. Missing fields count
/// as null.
pub fn values_differ(current: Option<&FieldValue>, previous: Option<&FieldValue>) -> bool {
    let current = current.filter(|v| !v.is_null());
    let previous = previous.filter(|v| !v.is_null());

    match (current, previous) {
        (None, None) => false,
        (None, Some(_)) | (Some(_), None) => true,
        (Some(FieldValue::Json(a)), Some(FieldValue::Json(b))) => json_values_differ(a, b),
        // at least one side is NaN or infinite
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => floats_differ(x, y),
            _ => true,
        },
    }
}

fn json_values_differ(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            if (a.is_i64() || a.is_u64()) && (b.is_i64() || b.is_u64()) {
                return a != b;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => floats_differ(x, y),
                _ => a != b,
            }
        }
        (a, b) => a != b,
    }
}

/// NaN equals NaN here; NaN against a number is a change. Equal
/// infinities are unchanged.
pub fn floats_differ(a: f64, b: f64) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => false,
        (true, false) | (false, true) => true,
        (false, false) if a == b => false,
        (false, false) => (a - b).abs() > FLOAT_TOLERANCE,
    }
}

/// Cells of each model's newest row whose benchmark value differs from the
/// model's previous run. Only benchmark columns present in `summary_columns`
/// are considered; models with a single run yield nothing.
pub fn find_changed_cells(ordered: &OrderedRecords, summary_columns: &[String]) -> Vec<CellRef> {
    let tracked: Vec<(&str, u16)> = BENCHMARK_COLUMNS
        .iter()
        .filter_map(|&name| {
            let position = summary_columns.iter().position(|c| c == name)?;
            let column = u16::try_from(position + 1).ok()?;
            Some((name, column))
        })
        .collect();

    let mut changed = Vec::new();
    for block in ordered.blocks() {
        let Some(previous) = block.previous() else {
            continue;
        };
        let Ok(row) = u32::try_from(block.start() + 2) else {
            continue;
        };
        let newest = block.newest();

        changed.extend(
            tracked
                .iter()
                .filter(|(name, _)| values_differ(newest.get(name), previous.get(name)))
                .map(|&(_, column)| CellRef::new(row, column)),
        );
    }
    changed
}
