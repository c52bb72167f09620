//! Static rules on the declared filename and size.

use std::path::Path;

use crate::types::{AcceptedExtension, RejectionReason, UploadedFile};

/// Largest accepted declared size, in bytes (10 MiB, inclusive).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Apply the presence/size/extension/emptiness rules, in that order.
///
/// Returns the declared extension when every rule passes. The content itself is not looked at
/// beyond its length; see [`super::sniff`].
pub fn check_policy(upload: Option<&UploadedFile>) -> Result<AcceptedExtension, RejectionReason> {
    let upload = upload.ok_or(RejectionReason::NoFile)?;

    if upload.size > MAX_FILE_SIZE {
        return Err(RejectionReason::TooLarge);
    }

    let extension = declared_extension(&upload.file_name)
        .as_deref()
        .and_then(AcceptedExtension::from_extension)
        .ok_or(RejectionReason::UnsupportedExtension)?;

    if upload.bytes().is_empty() {
        return Err(RejectionReason::EmptyFile);
    }

    Ok(extension)
}

/// Lower-cased extension of `file_name`, if it has a non-empty one.
///
/// Follows [`Path::extension`]: `".csv"` and `"upload."` have no extension.
pub fn declared_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
}
