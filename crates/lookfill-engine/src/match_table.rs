use std::collections::HashMap;

use lookfill_model::{CellValue, ColumnExtract};

/// Key→value lookup built from a reference sheet's two selected columns.
///
/// Lookups are by exact equality on the stringified key; iteration order is
/// unspecified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchTable {
    entries: HashMap<String, CellValue>,
}

impl MatchTable {
    /// Build a table from parallel key/value extracts in a single
    /// left-to-right pass.
    ///
    /// - Rows whose key stringifies to `""` are skipped.
    /// - Duplicate keys are last-write-wins.
    /// - `values` is read positionally up to `keys.last_row()`; the lengths of
    ///   the two extracts are not verified, so key rows past the value
    ///   extract's end map to [`CellValue::Empty`].
    pub fn build(keys: &ColumnExtract, values: &ColumnExtract) -> Self {
        let mut entries = HashMap::new();
        for (row, key) in keys.rows() {
            let key = key.key_string();
            if key.is_empty() {
                continue;
            }
            entries.insert(key, values.value_at(row).clone());
        }
        Self { entries }
    }

    /// Look up the value for a stringified key.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries. Fills are gated on a non-empty table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_empty_keys_and_keeps_last_duplicate() {
        // Keys ["", "x", "y", "x"] with values [1, 10, 20, 30] (rows 1..=4).
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

        let table = MatchTable::build(&keys, &values);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("x"), Some(&CellValue::from(30.0)));
        assert_eq!(table.get("y"), Some(&CellValue::from(20.0)));
        assert_eq!(table.get(""), None);
    }

    #[test]
    fn shorter_value_extract_maps_trailing_keys_to_empty() {
        let keys = ColumnExtract::from_rows([CellValue::from("a"), CellValue::from("b")]);
        let values = ColumnExtract::from_rows([CellValue::from(5.0)]);

        let table = MatchTable::build(&keys, &values);
        assert_eq!(table.get("a"), Some(&CellValue::from(5.0)));
        assert_eq!(table.get("b"), Some(&CellValue::Empty));
    }

    #[test]
    fn numeric_keys_stringify() {
        let keys = ColumnExtract::from_rows([CellValue::from(1.0)]);
        let values = ColumnExtract::from_rows([CellValue::from("one")]);

        let table = MatchTable::build(&keys, &values);
        assert_eq!(table.get("1"), Some(&CellValue::from("one")));
    }

    #[test]
    fn empty_extracts_build_an_empty_table() {
        let table = MatchTable::build(&ColumnExtract::empty(), &ColumnExtract::empty());
        assert!(table.is_empty());
    }
}
