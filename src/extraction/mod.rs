//! Comment extraction from accepted uploads.
//!
//! Most callers should use [`process_upload`] (from [`unified`]) which:
//!
//! - validates the upload (see [`crate::upload`])
//! - dispatches to the delimited-text or spreadsheet decoder by the declared extension
//! - optionally reports rejections/successes/failures/alerts to an [`UploadObserver`]
//!
//! Decoder-specific functions are also available under:
//! - [`csv`]
//! - [`excel`]
//!
//! Both decoders resolve the comment of each row through [`column::extract_comment`].

pub mod column;
pub mod csv;
pub mod excel;
pub mod observability;
pub mod unified;

pub use column::{extract_comment, normalize_header, COMMENTS_COLUMN};
#[cfg(feature = "excel")]
pub use excel::CalamineCodec;
pub use excel::SpreadsheetCodec;
pub use observability::{
    CompositeObserver, FileObserver, StdErrObserver, UploadContext, UploadObserver, UploadSeverity, UploadStats,
};
pub use unified::{extract_comments, process_upload, ExtractionOptions};
