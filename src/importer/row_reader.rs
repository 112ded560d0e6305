// ==========================================
// Nominal Compounds - Row Reader
// ==========================================
// Typed cell extraction over calamine row slices. A cell may be absent
// (past the end of the slice), blank, a string or a numeric; anything
// else is a malformed cell for the requested field kind.
// ==========================================

use calamine::Data;

use crate::importer::error::{ImportError, ImportResult};

/// Human-readable name of a cell kind, used in error messages.
pub fn cell_kind(cell: &Data) -> &'static str {
    match cell {
        Data::Empty => "empty",
        Data::String(_) => "string",
        Data::Float(_) | Data::Int(_) => "numeric",
        Data::Bool(_) => "boolean",
        Data::Error(_) => "error",
        Data::DateTime(_) => "datetime",
        Data::DateTimeIso(_) | Data::DurationIso(_) => "datetime",
    }
}

/// Reads a string-typed field at `col`.
///
/// Absent and blank cells yield `None`. Numeric cells are normalized to
/// their integer textual form (`3.0` becomes `"3"`, never `"3.0"`),
/// because subtype columns encode some labels as numbers.
pub fn string_cell(row: &[Data], col: usize, row_num: usize) -> ImportResult<Option<String>> {
    let Some(cell) = row.get(col) else {
        return Ok(None);
    };
    match cell {
        Data::Empty => Ok(None),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Data::Float(f) => Ok(Some(((*f) as i64).to_string())),
        Data::Int(i) => Ok(Some(i.to_string())),
        other => Err(ImportError::MalformedCell {
            row: row_num,
            col,
            expected: "string",
            found: cell_kind(other),
        }),
    }
}

/// Reads an integer-typed field at `col`. Absent and blank cells yield 0;
/// numeric cells are truncated to their integer part.
pub fn int_cell(row: &[Data], col: usize, row_num: usize) -> ImportResult<i64> {
    let Some(cell) = row.get(col) else {
        return Ok(0);
    };
    match cell {
        Data::Empty => Ok(0),
        Data::Float(f) => Ok((*f) as i64),
        Data::Int(i) => Ok(*i),
        other => Err(ImportError::MalformedCell {
            row: row_num,
            col,
            expected: "numeric",
            found: cell_kind(other),
        }),
    }
}

/// True when the cell at `col` is absent or blank.
pub fn is_blank(row: &[Data], col: usize) -> bool {
    match row.get(col) {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Index of the first column at which the row's populated prefix ends:
/// every cell from this index on is blank. Used by the duplicate
/// importer as the group terminator.
pub fn populated_prefix_len(row: &[Data]) -> usize {
    let mut col = 0;
    while !is_blank(row, col) {
        col += 1;
    }
    col
}

/// Index of the first populated cell of the row, if any.
pub fn first_populated_col(row: &[Data]) -> Option<usize> {
    (0..row.len()).find(|&col| !is_blank(row, col))
}

/// Scans left to right starting at `from` and returns the column index of
/// the first numeric cell, if any.
pub fn first_numeric_col(row: &[Data], from: usize) -> Option<usize> {
    row.iter()
        .enumerate()
        .skip(from)
        .find(|(_, cell)| matches!(cell, Data::Float(_) | Data::Int(_)))
        .map(|(col, _)| col)
}
