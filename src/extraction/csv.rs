//! Delimited-text decoding.

use std::io::Read;

use crate::error::ExtractionResult;
use crate::types::{RowRecord, Value};

use super::column::extract_comment;

/// Reader configuration used for uploads.
///
/// - the first row is the header row
/// - rows may be shorter or longer than the header
/// - cells are kept exactly as written (trimming is left to the column extractor)
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::None);
    builder
}

/// Extract comments from an in-memory CSV document.
pub fn extract_csv_comments(bytes: &[u8]) -> ExtractionResult<Vec<String>> {
    let mut rdr = reader_builder().from_reader(bytes);
    extract_csv_comments_from_reader(&mut rdr)
}

/// Extract comments from an existing CSV reader, streaming row by row.
///
/// The first read error aborts the whole extraction; comments gathered before it are dropped.
pub fn extract_csv_comments_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> ExtractionResult<Vec<String>> {
    let mut comments = Vec::new();
    for row in csv_rows(rdr)? {
        if let Some(comment) = extract_comment(&row?) {
            comments.push(comment);
        }
    }
    Ok(comments)
}

/// Read the header row and return an iterator over the remaining rows as [`RowRecord`]s.
///
/// Header strings become the record keys verbatim. A row shorter than the header omits the
/// missing keys; cells beyond the header are dropped. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD rather than failing the row.
pub fn csv_rows<R: Read>(rdr: &mut csv::Reader<R>) -> ExtractionResult<CsvRows<'_, R>> {
    let headers = rdr.byte_headers()?.iter().map(lossy_cell).collect();
    Ok(CsvRows {
        headers,
        records: rdr.byte_records(),
        failed: false,
    })
}

/// Pull-based row iterator returned by [`csv_rows`].
///
/// Yields at most one `Err`, after which the iterator is exhausted.
pub struct CsvRows<'r, R: 'r> {
    headers: Vec<String>,
    records: csv::ByteRecordsIter<'r, R>,
    failed: bool,
}

impl<R: Read> Iterator for CsvRows<'_, R> {
    type Item = ExtractionResult<RowRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.records.next()? {
            Ok(record) => Some(Ok(to_row_record(&self.headers, &record))),
            Err(e) => {
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}

fn to_row_record(headers: &[String], record: &csv::ByteRecord) -> RowRecord {
    let mut row = RowRecord::with_capacity(headers.len());
    for (header, cell) in headers.iter().zip(record.iter()) {
        row.push(header.as_str(), Value::Utf8(lossy_cell(cell)));
    }
    row
}

fn lossy_cell(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}
