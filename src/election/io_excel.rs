use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::election::{
    io_common::{assemble_row, parse_value},
    *,
};

pub fn read_excel_valuations(path: &str, source: &ValuationSource) -> BElectionResult<Vec<ParsedRow>> {
    let wrange = get_range(path, source)?;
    let first_row = source.first_value_row_index()?;
    let first_col = source.first_value_column_index()?;

    // The range does not necessarily start in the top-left corner of the sheet.
    let (start_row, start_col) = wrange
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    debug!(
        "read_excel_valuations: range starts at {:?}, first row: {} first column: {}",
        (start_row, start_col),
        first_row,
        first_col
    );

    let mut res: Vec<ParsedRow> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let lineno = start_row + idx + 1;
        if lineno <= first_row {
            continue;
        }
        let mut cells: Vec<Option<f64>> = Vec::new();
        for cell in row.iter().skip(first_col.saturating_sub(start_col)) {
            cells.push(read_cell(cell, lineno)?);
        }
        debug!("read_excel_valuations: lineno: {:?} row: {:?}", lineno, &cells);
        if let Some(row) = assemble_row(lineno, &cells)? {
            res.push(row);
        }
    }
    Ok(res)
}

fn read_cell(cell: &DataType, lineno: usize) -> ElectionResult<Option<f64>> {
    match cell {
        DataType::Int(i) => Ok(Some(*i as f64)),
        DataType::Float(f) => Ok(Some(*f)),
        DataType::String(s) => parse_value(s, lineno),
        DataType::Empty => Ok(None),
        _ => Err(ElectionError::WrongCellType {
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}

fn get_range(path: &str, source: &ValuationSource) -> ElectionResult<calamine::Range<DataType>> {
    let worksheet_name_o = source.excel_worksheet_name.clone();
    debug!("get_range: path: {:?} worksheet: {:?}", path, &worksheet_name_o);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => Err(ElectionError::EmptyExcel {
                path: path.to_string(),
            }),
            [(worksheet_name, wrange)] => {
                debug!("get_range: using the only worksheet {:?}", worksheet_name);
                Ok(wrange.clone())
            }
            _ => {
                let names: Vec<String> = all_worksheets.iter().map(|(n, _)| n.clone()).collect();
                whatever!(
                    "{} has several worksheets ({:?}), choose one with the worksheet name option",
                    path,
                    names
                )
            }
        }
    }
}
