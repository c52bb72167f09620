//! Spreadsheet container decoding.
//!
//! The orchestrator only sees the [`SpreadsheetCodec`] trait; [`CalamineCodec`] is the real
//! `.xlsx` implementation (feature `excel`). Tests and callers may inject any other codec.

use crate::error::ExtractionResult;
use crate::types::RowRecord;

use super::column::extract_comment;

/// Decodes a spreadsheet container into the rows of a single sheet.
///
/// Implementations must be stateless (or internally synchronized): one codec is shared by every
/// upload processed with the same options.
pub trait SpreadsheetCodec: Send + Sync {
    /// Decode `bytes` and return the data rows of the first sheet, keyed by its header row.
    fn decode(&self, bytes: &[u8]) -> ExtractionResult<Vec<RowRecord>>;
}

/// Decode `bytes` with `codec` and extract comments from every row, in order.
pub fn extract_spreadsheet_comments(codec: &dyn SpreadsheetCodec, bytes: &[u8]) -> ExtractionResult<Vec<String>> {
    let rows = codec.decode(bytes)?;
    Ok(rows.iter().filter_map(extract_comment).collect())
}

#[cfg(feature = "excel")]
pub use calamine_codec::CalamineCodec;

#[cfg(feature = "excel")]
mod calamine_codec {
    use std::io::Cursor;

    use calamine::{Data, Range, Reader, Xlsx};

    use crate::error::ExtractionResult;
    use crate::types::{RowRecord, Value};

    use super::SpreadsheetCodec;

    /// Header used for columns whose header cell is empty.
    const EMPTY_HEADER: &str = "__EMPTY";

    /// `.xlsx` codec backed by `calamine`.
    ///
    /// Behavior:
    /// - Uses the first sheet in workbook order; other sheets are ignored
    /// - The first row of the sheet's used range is the header row
    /// - Empty cells are left out of the row record; fully blank rows are skipped
    #[derive(Debug, Clone, Copy, Default)]
    pub struct CalamineCodec;

    impl SpreadsheetCodec for CalamineCodec {
        fn decode(&self, bytes: &[u8]) -> ExtractionResult<Vec<RowRecord>> {
            let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

            let Some(sheet) = workbook.sheet_names().first().cloned() else {
                return Ok(Vec::new());
            };
            let range = workbook.worksheet_range(&sheet)?;
            Ok(sheet_rows(&range))
        }
    }

    fn sheet_rows(range: &Range<Data>) -> Vec<RowRecord> {
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Vec::new();
        };
        let headers = header_keys(header_row);

        rows.filter_map(|row| {
            let record: RowRecord = headers
                .iter()
                .zip(row.iter())
                .filter_map(|(header, cell)| convert_cell(cell).map(|v| (header.as_str(), v)))
                .collect();
            (!record.is_empty()).then_some(record)
        })
        .collect()
    }

    /// Header strings for the first row; empty header cells get `__EMPTY`, `__EMPTY_1`, ...
    fn header_keys(row: &[Data]) -> Vec<String> {
        let mut empty_seen = 0usize;
        row.iter()
            .map(|cell| {
                let text = cell_to_string(cell);
                if !text.is_empty() {
                    return text;
                }
                let key = match empty_seen {
                    0 => EMPTY_HEADER.to_string(),
                    n => format!("{EMPTY_HEADER}_{n}"),
                };
                empty_seen += 1;
                key
            })
            .collect()
    }

    fn convert_cell(c: &Data) -> Option<Value> {
        match c {
            Data::Empty => None,
            Data::Int(i) => Some(Value::Int64(*i)),
            Data::Float(f) => Some(Value::Float64(*f)),
            Data::Bool(b) => Some(Value::Bool(*b)),
            _ => Some(Value::Utf8(cell_to_string(c))),
        }
    }

    fn cell_to_string(c: &Data) -> String {
        match c {
            Data::String(s) => s.clone(),
            Data::Empty => String::new(),
            _ => c.to_string(),
        }
    }

}
