/*!
 * Spreadsheet reading.
 *
 * Only the first worksheet is read. Its first row names the columns, every
 * following row is data. Header cells that are empty are named
 * `Unnamed: <index>` so column names stay unique and non-blank.
 */

use calamine::{Data, Reader, Xlsx, XlsxError, open_workbook_from_rs};
use log::debug;
use std::io::Cursor;

use crate::document::{CellValue, Table};
use crate::errors::ExtractionError;

/// Read the first worksheet of an `.xlsx` workbook
pub fn read_table(bytes: &[u8]) -> Result<Table, ExtractionError> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: XlsxError| ExtractionError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractionError::Spreadsheet("Workbook has no worksheets".to_string()))?
        .map_err(|e| ExtractionError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(index, cell)| match cell {
                Data::Empty => format!("Unnamed: {}", index),
                other => other.to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<CellValue>> = rows.map(|row| row.iter().map(to_cell_value).collect()).collect();
    debug!("Read worksheet with {} columns and {} rows", columns.len(), data.len());

    Ok(Table::new(columns, data))
}

/// Convert a calamine cell to the crate's cell model
pub fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::Empty => CellValue::Empty,
        other => CellValue::Literal(other.to_string()),
    }
}
