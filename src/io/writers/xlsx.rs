use crate::core::{non_finite_literal, Result};
use crate::io::write_atomic;
use crate::io::writers::ReportWriter;
use crate::report::{
    truncate_cell_text, Cell, CellRef, CellValue, DisplayHint, Report, SheetData, DECIMAL_FORMAT,
    MAX_CELL_TEXT_CHARS, NUMERIC_COLUMN_WIDTH,
};
use rust_xlsxwriter::{
    ColNum, Color, Format, FormatPattern, RowNum, Workbook, Worksheet, XlsxError,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Light grey fill marking a changed metric.
pub const HIGHLIGHT_FILL_RGB: u32 = 0xD3D3D3;

/// Writes a [`Report`] as an `.xlsx` workbook. The workbook is assembled in
/// memory and replaces `path` in a single rename.
pub struct XlsxReportWriter {
    path: PathBuf,
}

impl XlsxReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        let mut workbook = render_workbook(report)?;
        let bytes = workbook.save_to_buffer()?;
        write_atomic(&self.path, &bytes)
    }
}

/// Build the workbook: `summary` first, then `raw` when present.
pub fn render_workbook(report: &Report) -> Result<Workbook> {
    let formats = CellFormats::new();
    let mut workbook = Workbook::new();
    for sheet in report.sheets() {
        workbook.push_worksheet(render_sheet(sheet, &formats)?);
    }
    Ok(workbook)
}

struct CellFormats {
    decimal: Format,
    highlight: Format,
    decimal_highlight: Format,
}

impl CellFormats {
    fn new() -> Self {
        let highlight = Format::new()
            .set_background_color(Color::RGB(HIGHLIGHT_FILL_RGB))
            .set_pattern(FormatPattern::Solid);
        Self {
            decimal: Format::new().set_num_format(DECIMAL_FORMAT),
            decimal_highlight: highlight.clone().set_num_format(DECIMAL_FORMAT),
            highlight,
        }
    }

    fn for_cell(&self, hint: DisplayHint, highlighted: bool) -> Option<&Format> {
        match (hint, highlighted) {
            (DisplayHint::General, false) => None,
            (DisplayHint::Decimal, false) => Some(&self.decimal),
            (DisplayHint::General, true) => Some(&self.highlight),
            (DisplayHint::Decimal, true) => Some(&self.decimal_highlight),
        }
    }
}

fn render_sheet(
    sheet: &SheetData,
    formats: &CellFormats,
) -> std::result::Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(&sheet.name)?;

    for (c, name) in sheet.columns.iter().enumerate() {
        worksheet.write_string(0, col_num(c), header_text(sheet, name))?;
    }

    let highlighted: HashSet<CellRef> = sheet.highlights.iter().copied().collect();
    for (r, row) in sheet.rows.iter().enumerate() {
        let sheet_row = row_num(r + 1);
        for (c, cell) in row.iter().enumerate() {
            let at = CellRef::new(sheet_row.saturating_add(1), col_num(c + 1));
            let format = formats.for_cell(cell.hint, highlighted.contains(&at));
            write_cell(&mut worksheet, sheet_row, col_num(c), cell, format)?;
        }
    }

    for &c in &sheet.numeric_columns {
        worksheet.set_column_width(col_num(c), NUMERIC_COLUMN_WIDTH)?;
    }

    Ok(worksheet)
}

fn header_text(sheet: &SheetData, name: &str) -> String {
    match truncate_cell_text(name) {
        Some(text) => {
            log::warn!(
                "Truncated a column name on the {} sheet to {} characters",
                sheet.name,
                MAX_CELL_TEXT_CHARS
            );
            text
        }
        None => name.to_string(),
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &Cell,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    match (&cell.value, format) {
        (CellValue::Empty, None) => {}
        (CellValue::Empty, Some(format)) => {
            worksheet.write_blank(row, col, format)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(format)) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        (CellValue::Number(n), None) if n.is_finite() => {
            worksheet.write_number(row, col, *n)?;
        }
        (CellValue::Number(n), Some(format)) if n.is_finite() => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        // a worksheet has no NaN or infinity
        (CellValue::Number(n), None) => {
            worksheet.write_string(row, col, non_finite_literal(*n))?;
        }
        (CellValue::Number(n), Some(format)) => {
            worksheet.write_string_with_format(row, col, non_finite_literal(*n), format)?;
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (CellValue::Text(s), Some(format)) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
    }
    Ok(())
}

// Out-of-range indices saturate so the worksheet reports its own limit error
fn row_num(index: usize) -> RowNum {
    RowNum::try_from(index).unwrap_or(RowNum::MAX)
}

fn col_num(index: usize) -> ColNum {
    ColNum::try_from(index).unwrap_or(ColNum::MAX)
}
