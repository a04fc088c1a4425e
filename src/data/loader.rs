use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fail early with [`DataError::Missing`] when the input has not been produced.
pub fn ensure_exists(path: &Path) -> Result<(), DataError> {
    if path.exists() {
        Ok(())
    } else {
        Err(DataError::Missing {
            path: path.to_path_buf(),
        })
    }
}

/// Read a headed CSV file, deserializing every row by column name.
///
/// Headers and cells are trimmed, so `Iteration, Root` matches
/// `#[serde(rename = "Root")]`. Columns without a matching field are ignored.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    ensure_exists(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;

    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| csv_error(path, source))?;

    if records.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(records)
}

/// Read a CSV file whose header row is skipped and whose first `columns`
/// fields are numbers, whatever they are called.
pub fn read_positional(path: &Path, columns: usize) -> Result<Vec<Vec<f64>>, DataError> {
    ensure_exists(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| csv_error(path, source))?;
        // Header is line 1.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_no + 2);

        if record.len() < columns {
            return Err(DataError::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: columns,
                found: record.len(),
            });
        }

        let row = record
            .iter()
            .take(columns)
            .enumerate()
            .map(|(col, tok)| parse_number(path, line, col, tok))
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

/// Read a whitespace-delimited numeric table, skipping the first `skip_rows`
/// lines. Blank lines and `#` comments are ignored; every remaining row must
/// have the width of the first one.
pub fn read_whitespace_table(path: &Path, skip_rows: usize) -> Result<Vec<Vec<f64>>, DataError> {
    let text = read_text(path)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, raw) in text.lines().enumerate().skip(skip_rows) {
        let line = idx + 1;
        let content = strip_comment(raw);
        if content.is_empty() {
            continue;
        }

        let row = content
            .split_whitespace()
            .enumerate()
            .map(|(col, tok)| parse_number(path, line, col, tok))
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(DataError::RaggedRow {
                    path: path.to_path_buf(),
                    line,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

/// Read every number in a whitespace-separated file, in order.
pub fn read_values(path: &Path) -> Result<Vec<f64>, DataError> {
    let text = read_text(path)?;

    let mut values = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        for (col, tok) in strip_comment(raw).split_whitespace().enumerate() {
            values.push(parse_number(path, idx + 1, col, tok)?);
        }
    }

    if values.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_text(path: &Path) -> Result<String, DataError> {
    ensure_exists(path)?;
    std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

fn parse_number(path: &Path, line: usize, column: usize, tok: &str) -> Result<f64, DataError> {
    tok.trim().parse::<f64>().map_err(|_| DataError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        value: tok.to_string(),
    })
}

fn csv_error(path: &Path, source: csv::Error) -> DataError {
    DataError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
