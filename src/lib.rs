//! `comments-ingest` validates untrusted CSV/XLSX uploads by their actual bytes and extracts the
//! values of their `comments` column.
//!
//! The primary entrypoint is [`extraction::process_upload`], which validates an
//! [`types::UploadedFile`] and, if it is accepted, decodes it into [`types::CommentsData`].
//!
//! ## What is accepted
//!
//! Validation ([`upload::validate_upload`]) applies, in order:
//!
//! - a file must be present
//! - the declared size must be at most 10 MiB
//! - the declared extension must be `.csv` or `.xlsx` (case-insensitive)
//! - the buffer must be non-empty
//! - the bytes must *look* like a zip-based spreadsheet container or delimited text
//!
//! Rejections are values ([`types::ValidationOutcome::Rejected`]) carrying a fixed user-facing
//! message, never errors.
//!
//! ## What is extracted
//!
//! The first row is the header row. In every later row, the first column whose header is
//! `comments` (ignoring case and surrounding whitespace) is read; blank values are skipped.
//! Comments keep row order and duplicates. `.xlsx` uploads read only the first sheet.
//!
//! ## Quick example
//!
//! ```rust
//! use comments_ingest::extraction::{process_upload, ExtractionOptions};
//! use comments_ingest::types::{FileType, UploadOutcome, UploadedFile};
//!
//! # fn main() -> Result<(), comments_ingest::ExtractionError> {
//! let upload = UploadedFile::from_bytes(
//!     "upload.csv",
//!     "Comments,Other\nFirst,1\nSecond,2\nCoMmEnTs,3",
//! );
//!
//! match process_upload(Some(&upload), &ExtractionOptions::default())? {
//!     UploadOutcome::Extracted(data) => {
//!         assert_eq!(data.file_type(), FileType::Csv);
//!         assert_eq!(data.comments(), ["First", "Second", "CoMmEnTs"]);
//!         assert_eq!(data.total_count(), 3);
//!     }
//!     UploadOutcome::Rejected(reason) => panic!("rejected: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`upload`]: extension/size policy, content sniffing, validation
//! - [`extraction`]: column extraction, CSV and spreadsheet decoders, orchestration, observers
//! - [`types`]: upload, outcome, row and result types
//! - [`error`]: decode error type
//!
//! ## Cargo features
//!
//! - `excel` (default): `.xlsx` decoding via `calamine`
//! - `excel_test_writer`: integration tests that build workbooks with `rust_xlsxwriter`

pub mod error;
pub mod extraction;
pub mod types;
pub mod upload;

pub use error::{ExtractionError, ExtractionResult};
