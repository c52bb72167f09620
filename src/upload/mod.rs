//! Upload validation: declared metadata policy plus byte-level content sniffing.
//!
//! Most callers should use [`validate_upload`], which runs:
//!
//! - [`policy::check_policy`]: presence, declared size and declared extension
//! - [`sniff::sniff`]: whether the bytes plausibly are a spreadsheet container or delimited text
//!
//! and folds both into one [`crate::types::ValidationOutcome`].

pub mod policy;
pub mod sniff;
pub mod validate;

pub use policy::{check_policy, declared_extension, MAX_FILE_SIZE};
pub use sniff::{sniff, CONTAINER_SIGNATURE, SNIFF_SAMPLE_LEN};
pub use validate::validate_upload;
