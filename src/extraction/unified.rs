//! Extraction orchestrator.
//!
//! - [`extract_comments`] decodes an upload that already passed validation.
//! - [`process_upload`] runs the whole pipeline (validate, then decode) and reports the outcome
//!   to an optional [`UploadObserver`].
//!
//! The pipeline is a straight line with no retries:
//! `validating -> rejected | decoding -> completed | failed`.

use std::fmt;
use std::sync::Arc;

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{
    AcceptedExtension, CommentsData, RejectionReason, UploadOutcome, UploadedFile, ValidationOutcome,
};
use crate::upload::validate_upload;

use super::csv::extract_csv_comments;
use super::excel::{extract_spreadsheet_comments, SpreadsheetCodec};
use super::observability::{UploadContext, UploadObserver, UploadSeverity, UploadStats};

/// Options controlling extraction.
///
/// Use [`Default`] for common cases: the `calamine` codec (with feature `excel`), no observer,
/// alerts only for critical failures.
#[derive(Clone)]
pub struct ExtractionOptions {
    /// Codec used for `.xlsx` uploads. `None` makes spreadsheet uploads fail as unsupported.
    pub spreadsheet_codec: Option<Arc<dyn SpreadsheetCodec>>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn UploadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: UploadSeverity,
}

impl ExtractionOptions {
    /// Options using `codec` for spreadsheet uploads.
    pub fn with_codec(codec: Arc<dyn SpreadsheetCodec>) -> Self {
        Self {
            spreadsheet_codec: Some(codec),
            ..Default::default()
        }
    }
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("spreadsheet_codec_set", &self.spreadsheet_codec.is_some())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            spreadsheet_codec: default_codec(),
            observer: None,
            alert_at_or_above: UploadSeverity::Critical,
        }
    }
}

#[cfg(feature = "excel")]
fn default_codec() -> Option<Arc<dyn SpreadsheetCodec>> {
    Some(Arc::new(super::excel::CalamineCodec))
}

#[cfg(not(feature = "excel"))]
fn default_codec() -> Option<Arc<dyn SpreadsheetCodec>> {
    None
}

/// Decode an accepted upload and collect its comments.
///
/// `extension` selects the decoder (`csv` -> delimited text, `xlsx` -> spreadsheet codec) and
/// the reported [`crate::types::FileType`]. The filename is passed through unmodified.
///
/// Decode faults fail the whole call; no partial result is returned.
///
/// # Examples
///
/// ```rust
/// use comments_ingest::extraction::{extract_comments, ExtractionOptions};
/// use comments_ingest::types::{AcceptedExtension, FileType, UploadedFile};
///
/// # fn main() -> Result<(), comments_ingest::ExtractionError> {
/// let upload = UploadedFile::from_bytes("upload.csv", "Comments,Other\nFirst,1\nSecond,2\n");
/// let data = extract_comments(&upload, AcceptedExtension::Csv, &ExtractionOptions::default())?;
///
/// assert_eq!(data.file_type(), FileType::Csv);
/// assert_eq!(data.comments(), ["First", "Second"]);
/// assert_eq!(data.total_count(), 2);
/// # Ok(())
/// # }
/// ```
pub fn extract_comments(
    upload: &UploadedFile,
    extension: AcceptedExtension,
    options: &ExtractionOptions,
) -> ExtractionResult<CommentsData> {
    let bytes = upload.bytes();
    let comments = match extension {
        AcceptedExtension::Csv => extract_csv_comments(bytes)?,
        AcceptedExtension::Xlsx => {
            let codec = options
                .spreadsheet_codec
                .as_deref()
                .ok_or_else(|| ExtractionError::Unsupported {
                    message: "no spreadsheet codec configured (enable cargo feature 'excel')".to_string(),
                })?;
            extract_spreadsheet_comments(codec, bytes)?
        }
    };

    Ok(CommentsData::new(extension.file_type(), upload.file_name.as_str(), comments))
}

/// Validate `upload` and, if accepted, extract its comments.
///
/// - `Ok(UploadOutcome::Rejected)` for user-input problems (see [`validate_upload`])
/// - `Ok(UploadOutcome::Extracted)` on success
/// - `Err` when an accepted upload cannot be decoded
///
/// When an observer is configured, this function reports:
///
/// - `on_rejected` when validation rejects the upload
/// - `on_success` on success, with the comment count
/// - `on_failure` on decode failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn process_upload(upload: Option<&UploadedFile>, options: &ExtractionOptions) -> ExtractionResult<UploadOutcome> {
    let mut ctx = UploadContext {
        file_name: upload.map(|u| u.file_name.clone()).unwrap_or_default(),
        extension: None,
    };
    let reject = |reason: RejectionReason| -> ExtractionResult<UploadOutcome> {
        if let Some(obs) = options.observer.as_ref() {
            obs.on_rejected(&ctx, UploadSeverity::Warning, reason);
        }
        Ok(UploadOutcome::Rejected(reason))
    };

    let Some(upload) = upload else {
        return reject(RejectionReason::NoFile);
    };
    let extension = match validate_upload(Some(upload)) {
        ValidationOutcome::Accepted { extension } => extension,
        ValidationOutcome::Rejected { reason } => return reject(reason),
    };
    ctx.extension = Some(extension);

    let result = extract_comments(upload, extension, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(data) => obs.on_success(
                &ctx,
                UploadStats {
                    comments: data.total_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(UploadOutcome::Extracted)
}

fn severity_for_error(e: &ExtractionError) -> UploadSeverity {
    match e {
        ExtractionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => UploadSeverity::Critical,
            _ => UploadSeverity::Error,
        },
        #[cfg(feature = "excel")]
        ExtractionError::Xlsx(calamine::XlsxError::Io(_)) => UploadSeverity::Critical,
        #[cfg(feature = "excel")]
        ExtractionError::Xlsx(_) => UploadSeverity::Error,
        ExtractionError::Spreadsheet { .. } => UploadSeverity::Error,
        ExtractionError::Unsupported { .. } => UploadSeverity::Critical,
    }
}
