use std::collections::BTreeMap;
use std::ops::Bound::Included;

use serde::{Deserialize, Serialize};

use crate::{CellKey, CellValue, ColRef, MAX_COLS};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// An ordered table of rows and columns within a [`Document`](crate::Document).
///
/// Cells are stored sparsely: writing [`CellValue::Empty`] removes the entry,
/// so a "blank write" genuinely blanks the cell rather than storing an empty
/// marker. Rows are 1-indexed; row 1 is conventionally the header row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name (shown in sheet-selection options).
    pub name: String,

    /// Sparse cell map in row-major key order.
    #[serde(default)]
    cells: BTreeMap<CellKey, CellValue>,
}

impl Sheet {
    /// Create a new empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// The value at `(row, col)`, or [`CellValue::Empty`] if the cell is blank.
    pub fn value(&self, row: u32, col: ColRef) -> &CellValue {
        if row == 0 {
            return &EMPTY_CELL;
        }
        self.cells.get(&CellKey::new(row, col)).unwrap_or(&EMPTY_CELL)
    }

    /// Write a value at `(row, col)`. Writing [`CellValue::Empty`] blanks the cell.
    pub fn set_value(&mut self, row: u32, col: ColRef, value: CellValue) {
        let key = CellKey::new(row, col);
        if value.is_empty() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, value);
        }
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over all non-empty cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellKey, &CellValue)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    /// Iterate over the non-empty cells of one row, in column order.
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (ColRef, &CellValue)> {
        let start = CellKey::new(row, ColRef::from_index(0));
        let end = CellKey::new(row, ColRef::from_index(MAX_COLS - 1));
        self.cells
            .range((Included(start), Included(end)))
            .map(|(k, v)| (k.col(), v))
    }

    /// The highest row number with data in `col`, or 0 if the column is empty.
    pub fn max_row_in_col(&self, col: ColRef) -> u32 {
        self.cells
            .keys()
            .filter(|k| k.col() == col)
            .map(|k| k.row())
            .max()
            .unwrap_or(0)
    }

    /// The highest row number with any data, or 0 if the sheet is empty.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map(|k| k.row()).unwrap_or(0)
    }

    /// The highest column index with any data, or `None` if the sheet is empty.
    pub fn max_col(&self) -> Option<ColRef> {
        self.cells.keys().map(|k| k.col()).max()
    }
}
