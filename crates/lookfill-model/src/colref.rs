use core::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a single column within a sheet.
///
/// Columns are **0-indexed** internally: `ColRef::from_name("A")` is index `0`.
/// In the letter-style notation used throughout the pipeline, columns are
/// written `A`, `B`, … `Z`, `AA`, `AB`, and so on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColRef(u32);

impl ColRef {
    /// Construct from a 0-indexed column number.
    ///
    /// Panics if `index` is outside the supported column range.
    #[inline]
    pub fn from_index(index: u32) -> Self {
        assert!(index < crate::cell::MAX_COLS, "col out of bounds: {index}");
        Self(index)
    }

    /// The 0-indexed column number.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Parse a letter-style column name (e.g. `A`, `bc`).
    pub fn from_name(name: &str) -> Result<Self, ColRefParseError> {
        let s = name.trim();
        if s.is_empty() {
            return Err(ColRefParseError::Empty);
        }
        let mut col: u32 = 0;
        for b in s.bytes() {
            if !b.is_ascii_alphabetic() {
                return Err(ColRefParseError::InvalidCharacter);
            }
            let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add(v))
                .ok_or(ColRefParseError::OutOfRange)?;
        }
        if col == 0 || col > crate::cell::MAX_COLS {
            return Err(ColRefParseError::OutOfRange);
        }
        Ok(Self(col - 1))
    }

    /// Parse a column out of a cell address by stripping the row digits
    /// (e.g. `"BC32"` → column `BC`).
    pub fn from_cell_address(address: &str) -> Result<Self, ColRefParseError> {
        let letters: String = address.chars().filter(|c| !c.is_ascii_digit()).collect();
        Self::from_name(&letters)
    }

    /// Convert to the letter-style column name (e.g. `A`, `BC`).
    pub fn name(self) -> String {
        // Letter names are 1-based; we store 0-based internally.
        let mut n = self.0 + 1;
        let mut out = Vec::<u8>::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            out.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        out.reverse();
        String::from_utf8(out).expect("column letters are always valid UTF-8")
    }
}

impl fmt::Display for ColRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl std::str::FromStr for ColRef {
    type Err = ColRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Errors that can occur when parsing a column reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColRefParseError {
    Empty,
    InvalidCharacter,
    OutOfRange,
}

impl fmt::Display for ColRefParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ColRefParseError::Empty => "empty column reference",
            ColRefParseError::InvalidCharacter => "invalid character in column reference",
            ColRefParseError::OutOfRange => "column reference out of range",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColRefParseError {}
