use serde::Serialize;

use lookfill_model::{ColRef, ColumnExtract, Sheet};

/// One header-row entry, used to populate column-selection options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderEntry {
    /// Human-readable "address + value" label (e.g. `"B1 Price"`).
    pub label: String,
    /// The entry's column, with the row digits stripped from its address.
    pub col: ColRef,
}

/// Read the header row (row 1), returning one entry per non-empty cell.
pub fn header(sheet: &Sheet) -> Vec<HeaderEntry> {
    sheet
        .row_cells(1)
        .map(|(col, value)| HeaderEntry {
            label: format!("{}1 {}", col, value),
            col,
        })
        .collect()
}

/// Extract the full 1-indexed value sequence for `col`.
///
/// A column with no data yields an empty extract rather than an error.
pub fn column(sheet: &Sheet, col: ColRef) -> ColumnExtract {
    let last_row = sheet.max_row_in_col(col);
    let mut extract = ColumnExtract::empty();
    for row in 1..=last_row {
        extract.push_row(sheet.value(row, col).clone());
    }
    extract
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookfill_model::CellValue;
    use pretty_assertions::assert_eq;

    fn col(name: &str) -> ColRef {
        ColRef::from_name(name).unwrap()
    }

    #[test]
    fn header_skips_empty_cells() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(1, col("A"), CellValue::from("Name"));
        // B1 left blank.
        sheet.set_value(1, col("C"), CellValue::from("Price"));
        sheet.set_value(2, col("B"), CellValue::from("not a header"));

        let entries = header(&sheet);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "A1 Name");
        assert_eq!(entries[0].col, col("A"));
        assert_eq!(entries[1].label, "C1 Price");
        assert_eq!(entries[1].col, col("C"));
    }

    #[test]
    fn column_covers_rows_up_to_last_data_row() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(1, col("B"), CellValue::from("h"));
        // B2 blank, B3 has data.
        sheet.set_value(3, col("B"), CellValue::from(7.0));

        let extract = column(&sheet, col("B"));
        assert_eq!(extract.last_row(), 3);
        assert_eq!(*extract.value_at(1), CellValue::from("h"));
        assert_eq!(*extract.value_at(2), CellValue::Empty);
        assert_eq!(*extract.value_at(3), CellValue::from(7.0));
    }

    #[test]
    fn nonexistent_column_yields_empty_extract() {
        let sheet = Sheet::new("Sheet1");
        let extract = column(&sheet, col("ZZ"));
        assert!(extract.is_empty());
    }
}
