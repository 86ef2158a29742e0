use lookfill_model::{CellValue, ColRef, Sheet};

use crate::accessor::column;
use crate::match_table::MatchTable;

/// What a single fill pass did, for reporting. The fill itself never depends
/// on these numbers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Cells written (one per key row, matched or not).
    pub rows_written: u32,
    /// Cells whose key had a match-table entry.
    pub rows_matched: u32,
}

/// Write looked-up values into `fill_col`, one cell per key row.
///
/// For each row `1..=last_row` of the key column, the cell at
/// `(fill_col, row)` receives the table value for the row's stringified key,
/// or a blank write when there is no match — previous content at that address
/// is overwritten either way ("last selection wins"). Re-running with new
/// column selections overwrites earlier fill results; re-running with
/// identical parameters is idempotent.
pub fn fill(
    sheet: &mut Sheet,
    table: &MatchTable,
    key_col: ColRef,
    fill_col: ColRef,
) -> FillOutcome {
    let keys = column(sheet, key_col);
    let mut outcome = FillOutcome::default();

    for (row, key) in keys.rows() {
        match table.get(&key.key_string()) {
            Some(value) => {
                sheet.set_value(row, fill_col, value.clone());
                outcome.rows_matched += 1;
            }
            None => sheet.set_value(row, fill_col, CellValue::Empty),
        }
        outcome.rows_written += 1;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookfill_model::ColumnExtract;
    use pretty_assertions::assert_eq;

    fn col(name: &str) -> ColRef {
        ColRef::from_name(name).unwrap()
    }

    fn reference_table() -> MatchTable {
        // Keys ["", "x", "y", "x"], values [1, 10, 20, 30] → {x: 30, y: 20}.
        let keys = ColumnExtract::from_rows([
            CellValue::Empty,
            CellValue::from("x"),
            CellValue::from("y"),
            CellValue::from("x"),
        ]);
        let values = ColumnExtract::from_rows([
            CellValue::from(1.0),
            CellValue::from(10.0),
            CellValue::from(20.0),
            CellValue::from(30.0),
        ]);
        MatchTable::build(&keys, &values)
    }

    fn target_sheet() -> Sheet {
        // Key column A: ["", "x", "z", "y"] (row 1 blank).
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(2, col("A"), CellValue::from("x"));
        sheet.set_value(3, col("A"), CellValue::from("z"));
        sheet.set_value(4, col("A"), CellValue::from("y"));
        sheet
    }

    #[test]
    fn matched_and_unmatched_rows() {
        let table = reference_table();
        let mut sheet = target_sheet();
        // Pre-existing content in the fill column must be overwritten.
        sheet.set_value(1, col("D"), CellValue::from("old"));
        sheet.set_value(3, col("D"), CellValue::from("stale"));

        let outcome = fill(&mut sheet, &table, col("A"), col("D"));

        assert_eq!(outcome.rows_written, 4);
        assert_eq!(outcome.rows_matched, 2);
        // Row 1's key is "" which was skipped when building the table, so the
        // lookup misses and D1 is blanked.
        assert_eq!(*sheet.value(1, col("D")), CellValue::Empty);
        assert_eq!(*sheet.value(2, col("D")), CellValue::from(30.0));
        assert_eq!(*sheet.value(3, col("D")), CellValue::Empty);
        assert_eq!(*sheet.value(4, col("D")), CellValue::from(20.0));
    }

    #[test]
    fn refill_is_idempotent() {
        let table = reference_table();
        let mut sheet = target_sheet();

        fill(&mut sheet, &table, col("A"), col("D"));
        let once = sheet.clone();
        fill(&mut sheet, &table, col("A"), col("D"));

        assert_eq!(sheet, once);
    }

    #[test]
    fn refill_with_new_columns_overwrites_not_appends() {
        let table = reference_table();
        let mut sheet = target_sheet();

        fill(&mut sheet, &table, col("A"), col("D"));
        // Same key column, new fill column: D keeps its previous results only
        // because nothing clears them, while E receives the same values.
        fill(&mut sheet, &table, col("A"), col("E"));
        assert_eq!(*sheet.value(2, col("E")), CellValue::from(30.0));

        // Re-running against D again rewrites all four cells in place.
        let outcome = fill(&mut sheet, &table, col("A"), col("D"));
        assert_eq!(outcome.rows_written, 4);
        assert_eq!(*sheet.value(2, col("D")), CellValue::from(30.0));
    }

    #[test]
    fn empty_key_column_writes_nothing() {
        let table = reference_table();
        let mut sheet = Sheet::new("Sheet1");

        let outcome = fill(&mut sheet, &table, col("A"), col("D"));
        assert_eq!(outcome, FillOutcome::default());
        assert_eq!(sheet.cell_count(), 0);
    }
}
