use serde::{Deserialize, Serialize};

use crate::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// The full **1-indexed** sequence of values in one column of a sheet.
///
/// Slot 0 is permanently unused (it always reads as [`CellValue::Empty`]),
/// matching the 1-based row convention of the rest of the model. The extract's
/// length is the highest row number with data in the column.
///
/// Reads past the end also return [`CellValue::Empty`]. This is what makes the
/// positional join forgiving when key and value extracts differ in length:
/// trailing key rows simply map to empty values. Callers depend on that
/// blank-fill behavior, so the mismatch is deliberately not checked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnExtract {
    cells: Vec<CellValue>,
}

impl ColumnExtract {
    /// An extract with no data rows.
    pub fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Build an extract from values for rows `1..`, in order.
    pub fn from_rows(values: impl IntoIterator<Item = CellValue>) -> Self {
        let mut extract = Self::empty();
        for value in values {
            extract.push_row(value);
        }
        extract
    }

    /// Append the value for the next row.
    pub fn push_row(&mut self, value: CellValue) {
        if self.cells.is_empty() {
            // Slot 0 is unused by convention.
            self.cells.push(CellValue::Empty);
        }
        self.cells.push(value);
    }

    /// The highest row number covered by this extract (0 when empty).
    pub fn last_row(&self) -> u32 {
        (self.cells.len().saturating_sub(1)) as u32
    }

    /// True if the extract covers no rows.
    pub fn is_empty(&self) -> bool {
        self.last_row() == 0
    }

    /// The value at a 1-indexed row. Row 0 and rows past the end read as
    /// [`CellValue::Empty`].
    pub fn value_at(&self, row: u32) -> &CellValue {
        if row == 0 {
            return &EMPTY_CELL;
        }
        self.cells.get(row as usize).unwrap_or(&EMPTY_CELL)
    }

    /// Iterate over `(row, value)` pairs for rows `1..=last_row()`.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &CellValue)> {
        self.cells.iter().enumerate().skip(1).map(|(i, v)| (i as u32, v))
    }
}
