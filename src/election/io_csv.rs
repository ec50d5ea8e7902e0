// Primitives for reading CSV files.

use crate::election::{
    io_common::{assemble_row, parse_value, simplify_file_name},
    *,
};

pub fn read_csv_valuations(path: &str, source: &ValuationSource) -> BElectionResult<Vec<ParsedRow>> {
    let first_row = source.first_value_row_index()?;
    let first_col = source.first_value_column_index()?;
    debug!(
        "read_csv_valuations: {}: first row: {} first column: {}",
        simplify_file_name(path),
        first_row,
        first_col
    );

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<ParsedRow> = Vec::new();
    // Blank lines produce no record: the line numbers come from the reader, starting at 1.
    let mut lineno: usize = 0;
    for line_r in rdr.into_records() {
        let line = match line_r {
            Ok(line) => line,
            Err(e) => {
                let lineno = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(lineno + 1);
                return Err(Box::new(ElectionError::CsvLineParse { source: e, lineno }));
            }
        };
        lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(lineno + 1);
        if lineno <= first_row {
            continue;
        }
        let mut cells: Vec<Option<f64>> = Vec::new();
        for s in line.iter().skip(first_col) {
            cells.push(parse_value(s, lineno)?);
        }
        debug!("read_csv_valuations: lineno: {:?} row: {:?}", lineno, &cells);
        if let Some(row) = assemble_row(lineno, &cells)? {
            res.push(row);
        }
    }
    Ok(res)
}
