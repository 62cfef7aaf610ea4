use std::path::Path;

use anyhow::Context;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::models::{Cell, Sheet, SheetRow};

const HIGHLIGHT: Color = Color::RGB(0xFFFF00);

pub fn build_workbook(sheets: &[Sheet]) -> anyhow::Result<Workbook> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)
            .with_context(|| format!("failed to render sheet '{}'", sheet.name))?;
        debug!(sheet = %sheet.name, rows = sheet.rows.len(), "rendered sheet");
    }

    Ok(workbook)
}

pub fn write_report(path: &Path, sheets: &[Sheet]) -> anyhow::Result<()> {
    let mut workbook = build_workbook(sheets)?;
    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;

    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (row_index, row) in sheet.rows.iter().enumerate() {
        let row_num = row_index as u32;
        for (col_index, cell) in row.cells.iter().enumerate() {
            let col = col_index as u16;
            let format = cell_format(row, sheet.wrap_column == Some(col));
            match cell {
                Cell::Text(value) => {
                    worksheet.write_string_with_format(row_num, col, value, &format)?
                }
                Cell::Number(value) => {
                    worksheet.write_number_with_format(row_num, col, *value, &format)?
                }
                Cell::Empty => worksheet.write_blank(row_num, col, &format)?,
            };
        }
    }

    Ok(())
}

// Every cell is top-left aligned; only the wrap column wraps.
fn cell_format(row: &SheetRow, wrap: bool) -> Format {
    let mut format = Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::Top);
    if wrap {
        format = format.set_text_wrap();
    }
    if row.bold {
        format = format.set_bold();
    }
    if row.highlight {
        format = format.set_background_color(HIGHLIGHT);
    }
    format
}
