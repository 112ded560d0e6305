// ==========================================
// Shared test helpers
// ==========================================
// Builds calamine ranges in memory so importer tests never touch a real
// workbook on disk.
// ==========================================

use calamine::{Data, Range};

/// Builds a sheet from literal rows. Short rows are padded with empty
/// cells to the widest row.
pub fn sheet(rows: Vec<Vec<Data>>) -> Range<Data> {
    let height = rows.len().max(1);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let mut range = Range::new((0, 0), ((height - 1) as u32, (width - 1) as u32));
    for (r, row) in rows.into_iter().enumerate() {
        for (c, cell) in row.into_iter().enumerate() {
            if !matches!(cell, Data::Empty) {
                range.set_value((r as u32, c as u32), cell);
            }
        }
    }
    range
}

pub fn s(value: &str) -> Data {
    Data::String(value.to_string())
}

pub fn f(value: f64) -> Data {
    Data::Float(value)
}

pub fn e() -> Data {
    Data::Empty
}
