// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::session::{io_common::FirmColumns, *};

/// Reads the firm table of an Excel workbook.
///
/// The table is read from the given worksheet, or from the first one.
/// Every row comes with its line number (the header is line 1).
pub fn read_excel_firms(
    path: &str,
    worksheet: Option<&str>,
) -> MapResult<Vec<(usize, RawRow)>> {
    let wrange = get_range(path, worksheet)?;
    read_range(&wrange)
}

fn get_range(path: &str, worksheet: Option<&str>) -> MapResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = if let Some(name) = worksheet {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?
    };
    Ok(wrange)
}

fn read_range(wrange: &Range<DataType>) -> MapResult<Vec<(usize, RawRow)>> {
    let mut iter = wrange.rows();
    let header_cells = iter.next().context(EmptyExcelSnafu {})?;
    let header = read_cells(header_cells, 1)?;
    debug!("read_excel_firms: header: {:?}", header);
    let columns = FirmColumns::from_header(&header);

    let mut res: Vec<(usize, RawRow)> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let cells = read_cells(row, lineno)?;
        // Blank lines at the bottom of a sheet are part of the range.
        if cells.iter().all(|c| c.trim().is_empty()) {
            debug!("read_excel_firms: lineno: {:?} blank row", lineno);
            continue;
        }
        let raw = columns.raw_row(&cells);
        debug!("read_excel_firms: lineno: {:?} row: {:?}", lineno, &raw);
        res.push((lineno, raw));
    }
    Ok(res)
}

fn read_cells(row: &[DataType], lineno: usize) -> MapResult<Vec<String>> {
    row.iter().map(|cell| read_cell(cell, lineno)).collect()
}

fn read_cell(cell: &DataType, lineno: usize) -> MapResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        // 9.0 is written 9, 7.5 stays 7.5 and is rejected later on.
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => Err(MapError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}
