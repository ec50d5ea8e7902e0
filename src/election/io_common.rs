use std::path::Path;

use crate::election::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads the text of a cell. Empty cells are `None`.
pub fn parse_value(content: &str, lineno: usize) -> ElectionResult<Option<f64>> {
    let s = content.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(Some(v)),
        _ => Err(ElectionError::WrongCellType {
            lineno,
            content: s.to_string(),
        }),
    }
}

/// Assembles the cells of a line into a row of valuations.
///
/// Trailing empty cells are dropped and a line without any value is skipped.
/// An empty cell between two values is an error.
pub fn assemble_row(lineno: usize, cells: &[Option<f64>]) -> ElectionResult<Option<ParsedRow>> {
    let last_filled = cells.iter().rposition(|c| c.is_some());
    let filled = match last_filled {
        Some(idx) => &cells[..=idx],
        None => {
            debug!("assemble_row: line {} is empty, skipping", lineno);
            return Ok(None);
        }
    };
    let mut values: Vec<f64> = Vec::with_capacity(filled.len());
    for (col, cell) in filled.iter().enumerate() {
        match cell {
            Some(v) => values.push(*v),
            None => {
                return Err(ElectionError::MissingValue {
                    lineno,
                    column: col + 1,
                })
            }
        }
    }
    Ok(Some(ParsedRow { lineno, values }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(parse_value(" 2.5 ", 1).unwrap(), Some(2.5));
        assert_eq!(parse_value("-3", 1).unwrap(), Some(-3.0));
        assert_eq!(parse_value("", 1).unwrap(), None);
        assert!(matches!(
            parse_value("abc", 4),
            Err(ElectionError::WrongCellType { lineno: 4, .. })
        ));
        assert!(parse_value("NaN", 1).is_err());
    }

    #[test]
    fn rows() {
        let row = assemble_row(3, &[Some(1.0), Some(2.0), None, None]).unwrap();
        assert_eq!(
            row,
            Some(ParsedRow {
                lineno: 3,
                values: vec![1.0, 2.0]
            })
        );
        assert_eq!(assemble_row(4, &[None, None]).unwrap(), None);
        assert!(matches!(
            assemble_row(5, &[Some(1.0), None, Some(2.0)]),
            Err(ElectionError::MissingValue {
                lineno: 5,
                column: 2
            })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/votes/values.csv"), "values.csv");
        assert_eq!(simplify_file_name("values.csv"), "values.csv");
    }
}
