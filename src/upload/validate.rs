//! Upload validation entrypoint.

use crate::types::{RejectionReason, SniffResult, UploadedFile, ValidationOutcome};

use super::policy::check_policy;
use super::sniff::sniff;

/// Decide whether an upload may be decoded.
///
/// Runs [`check_policy`] and, only if that passes, [`sniff`]. An unrecognized sniff rejects
/// with [`RejectionReason::InvalidFormat`]. The accepted extension is always the *declared*
/// one; sniffing never relabels the file.
///
/// Pure: no I/O and no observer callbacks.
///
/// # Examples
///
/// ```rust
/// use comments_ingest::types::{AcceptedExtension, UploadedFile, ValidationOutcome};
/// use comments_ingest::upload::validate_upload;
///
/// let upload = UploadedFile::from_bytes("upload.CSV", "Comments,Other\nFirst,1\n");
/// assert_eq!(
///     validate_upload(Some(&upload)),
///     ValidationOutcome::Accepted { extension: AcceptedExtension::Csv }
/// );
/// ```
pub fn validate_upload(upload: Option<&UploadedFile>) -> ValidationOutcome {
    let extension = match check_policy(upload) {
        Ok(extension) => extension,
        Err(reason) => return ValidationOutcome::Rejected { reason },
    };

    let bytes = upload.map(UploadedFile::bytes).unwrap_or_default();
    match sniff(bytes) {
        SniffResult::Recognized => ValidationOutcome::Accepted { extension },
        SniffResult::Unrecognized => ValidationOutcome::Rejected {
            reason: RejectionReason::InvalidFormat,
        },
    }
}
