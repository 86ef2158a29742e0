use serde::{Deserialize, Serialize};

use crate::Sheet;

/// An in-memory tabular workbook composed of one or more [`Sheet`]s.
///
/// Documents carry no identity of their own: the batch queue identifies them
/// by registration order (and a queue-assigned identity).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Ordered sheets.
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet, returning its index.
    pub fn push_sheet(&mut self, sheet: Sheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    /// Get a sheet by index.
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by index.
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_keep_insertion_order() {
        let mut doc = Document::new();
        assert_eq!(doc.push_sheet(Sheet::new("First")), 0);
        assert_eq!(doc.push_sheet(Sheet::new("Second")), 1);

        assert_eq!(doc.sheet_count(), 2);
        assert_eq!(doc.sheet_names(), vec!["First", "Second"]);
        assert!(doc.sheet(2).is_none());
    }
}
