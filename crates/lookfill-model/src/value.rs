use std::fmt;

use serde::{Deserialize, Serialize};

/// JSON-friendly representation of a cell value.
///
/// The enum uses an explicit `{type, value}` tagged layout for stable IPC.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Empty / unset cell value.
    Empty,
    /// IEEE-754 double precision number.
    Number(f64),
    /// Plain string.
    String(String),
    /// Boolean.
    Boolean(bool),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    /// Returns true if the value is [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The stringified form used as a match-table join key.
    ///
    /// Empty values stringify to `""` (and are therefore skipped when building
    /// a match table). Integral numbers render without a fractional part so
    /// that `1` and `1.0` produce the same key.
    pub fn key_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::String(s) => f.write_str(s),
            CellValue::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strings() {
        assert_eq!(CellValue::Empty.key_string(), "");
        assert_eq!(CellValue::from("x").key_string(), "x");
        assert_eq!(CellValue::from(30.0).key_string(), "30");
        assert_eq!(CellValue::from(1.5).key_string(), "1.5");
        assert_eq!(CellValue::from(true).key_string(), "true");
    }

    #[test]
    fn tagged_serde_layout() {
        let json = serde_json::to_string(&CellValue::Number(42.0)).unwrap();
        assert_eq!(json, r#"{"type":"number","value":42.0}"#);
        let back: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CellValue::Number(42.0));
    }
}
