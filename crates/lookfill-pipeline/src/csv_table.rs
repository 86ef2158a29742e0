use lookfill_model::{CellValue, ColRef, Document, Sheet, MAX_COLS, MAX_ROWS};

use crate::error::{LoadError, SerializeError};
use crate::io::{DocumentLoader, DocumentSerializer};

/// Media type reported for CSV exports.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// Reference loader/serializer for delimiter-separated text.
///
/// A CSV stream loads as a single-sheet document named `Sheet1`, with the
/// first record landing in row 1 (the conventional header row). Fields that
/// parse as numbers or booleans are typed accordingly; everything else stays
/// a string.
#[derive(Clone, Debug)]
pub struct CsvTable {
    delimiter: u8,
}

impl Default for CsvTable {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvTable {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl DocumentLoader for CsvTable {
    async fn load(&self, bytes: &[u8]) -> Result<Document, LoadError> {
        if bytes.is_empty() {
            return Err(LoadError::EmptyInput);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            // Row 1 is data like any other row; header handling is the
            // column accessor's concern.
            .has_headers(false)
            // Accept records with varying field counts.
            .flexible(true)
            .from_reader(bytes);

        let mut sheet = Sheet::new("Sheet1");
        let mut row: u32 = 1;
        for record in reader.records() {
            let record = record.map_err(|e| LoadError::Parse {
                row,
                reason: e.to_string(),
            })?;
            if row > MAX_ROWS {
                return Err(LoadError::Parse {
                    row,
                    reason: format!("too many records (limit {MAX_ROWS})"),
                });
            }
            if record.len() as u32 > MAX_COLS {
                return Err(LoadError::Parse {
                    row,
                    reason: format!("record has {} fields (limit {MAX_COLS})", record.len()),
                });
            }
            for (idx, field) in record.iter().enumerate() {
                let value = parse_field(field);
                if !value.is_empty() {
                    sheet.set_value(row, ColRef::from_index(idx as u32), value);
                }
            }
            row += 1;
        }

        let mut document = Document::new();
        document.push_sheet(sheet);
        Ok(document)
    }
}

impl DocumentSerializer for CsvTable {
    async fn serialize(&self, document: &Document) -> Result<Vec<u8>, SerializeError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        // CSV documents are single-sheet; serialize the first sheet's full
        // rectangle so blank cells keep their positions.
        if let Some(sheet) = document.sheet(0) {
            let max_row = sheet.max_row();
            let max_col = sheet.max_col().map(|c| c.index()).unwrap_or(0);
            for row in 1..=max_row {
                let record: Vec<String> = (0..=max_col)
                    .map(|c| sheet.value(row, ColRef::from_index(c)).to_string())
                    .collect();
                writer.write_record(&record)?;
            }
        }

        writer
            .into_inner()
            .map_err(|e| SerializeError::Io(e.into_error()))
    }
}

fn parse_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = field.parse::<f64>() {
        return CellValue::Number(n);
    }
    if field.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if field.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }
    CellValue::String(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(name: &str) -> ColRef {
        ColRef::from_name(name).unwrap()
    }

    #[tokio::test]
    async fn loads_typed_cells_into_row_one_onward() {
        let table = CsvTable::default();
        let doc = table.load(b"name,qty\nwidget,3\n").await.unwrap();

        let sheet = doc.sheet(0).unwrap();
        assert_eq!(*sheet.value(1, col("A")), CellValue::from("name"));
        assert_eq!(*sheet.value(2, col("B")), CellValue::from(3.0));
    }

    #[tokio::test]
    async fn empty_input_is_a_load_failure() {
        let table = CsvTable::default();
        assert!(matches!(
            table.load(b"").await,
            Err(LoadError::EmptyInput)
        ));
    }

    #[tokio::test]
    async fn record_with_too_many_fields_is_a_load_failure() {
        let table = CsvTable::default();
        let wide = vec!["x"; MAX_COLS as usize + 1].join(",");
        let err = table.load(wide.as_bytes()).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { row: 1, .. }));
    }

    #[tokio::test]
    async fn too_many_records_is_a_load_failure() {
        let table = CsvTable::default();
        let mut bytes = Vec::new();
        for _ in 0..=MAX_ROWS {
            bytes.extend_from_slice(b"x\n");
        }
        let err = table.load(&bytes).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { row, .. } if row == MAX_ROWS + 1));
    }

    #[tokio::test]
    async fn blank_fields_stay_blank_through_a_round_trip() {
        let table = CsvTable::default();
        let bytes = b"a,,c\n1,2,3\n";
        let doc = table.load(bytes).await.unwrap();
        assert_eq!(*doc.sheet(0).unwrap().value(1, col("B")), CellValue::Empty);

        let out = table.serialize(&doc).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,,c\n1,2,3\n");
    }
}
