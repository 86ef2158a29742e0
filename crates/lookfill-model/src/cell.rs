use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ColRef;

/// Maximum rows per sheet (Excel-compatible: 1,048,576).
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum columns per sheet (Excel-compatible: 16,384).
pub const MAX_COLS: u32 = 16_384;

const COL_BITS: u32 = 14; // 2^14 = 16,384 columns.
const COL_MASK: u64 = (1u64 << COL_BITS) - 1;

/// Compact key used for sparse cell storage.
///
/// The key packs a `(row, col)` pair into a `u64`:
///
/// ```text
/// key = (row << 14) | col
/// ```
///
/// `row` is **1-indexed** (row 1 is the header row by convention) and `col` is
/// the 0-indexed [`ColRef`] number. Ordering a sheet's keys yields row-major
/// traversal order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
pub struct CellKey(u64);

impl CellKey {
    /// Encode a 1-indexed row and a column into a compact [`CellKey`].
    #[inline]
    pub fn new(row: u32, col: ColRef) -> Self {
        assert!(row >= 1, "rows are 1-indexed");
        assert!(row <= MAX_ROWS, "row out of bounds: {row}");
        Self(((row as u64) << COL_BITS) | (col.index() as u64))
    }

    /// Decode the row component (1-indexed).
    #[inline]
    pub const fn row(self) -> u32 {
        (self.0 >> COL_BITS) as u32
    }

    /// Decode the column component.
    #[inline]
    pub fn col(self) -> ColRef {
        ColRef::from_index((self.0 & COL_MASK) as u32)
    }

    /// The cell address in letter-style notation (e.g. `A1`).
    pub fn address(self) -> String {
        format!("{}{}", self.col(), self.row())
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let row = raw >> COL_BITS;
        let col = raw & COL_MASK;

        if row == 0 || row > MAX_ROWS as u64 {
            return Err(D::Error::custom(format!("CellKey row out of bounds: {row}")));
        }
        if col >= MAX_COLS as u64 {
            return Err(D::Error::custom(format!("CellKey col out of bounds: {col}")));
        }

        Ok(CellKey(raw))
    }
}

impl From<CellKey> for u64 {
    fn from(value: CellKey) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_key_roundtrip() {
        let key = CellKey::new(1, ColRef::from_index(0));
        assert_eq!(key.row(), 1);
        assert_eq!(key.col(), ColRef::from_index(0));
        assert_eq!(key.address(), "A1");

        let key2 = CellKey::new(MAX_ROWS, ColRef::from_index(MAX_COLS - 1));
        assert_eq!(key2.row(), MAX_ROWS);
        assert_eq!(key2.col().index(), MAX_COLS - 1);
    }

    #[test]
    fn keys_order_row_major() {
        let a2 = CellKey::new(2, ColRef::from_index(0));
        let d1 = CellKey::new(1, ColRef::from_index(3));
        assert!(d1 < a2);
    }

    #[test]
    fn deserialize_validates_bounds() {
        // Row 0 is never a valid packed key.
        let err = serde_json::from_str::<CellKey>("3").unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }
}
