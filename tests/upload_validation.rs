use comments_ingest::types::{AcceptedExtension, RejectionReason, SniffResult, UploadedFile, ValidationOutcome};
use comments_ingest::upload::{sniff, validate_upload, MAX_FILE_SIZE};

const XLSX_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const CSV_SAMPLE: &[u8] = b"a,b\n1,2";

fn declared(name: &str, size: u64) -> UploadedFile {
    UploadedFile::new(name, size, None)
}

fn rejection(upload: Option<&UploadedFile>) -> Option<&'static str> {
    validate_upload(upload).reason().map(RejectionReason::message)
}

#[test]
fn rejects_missing_file() {
    assert_eq!(rejection(None), Some("Please Select a file"));
}

#[test]
fn rejects_oversize_file() {
    let f = declared("data.csv", MAX_FILE_SIZE + 1);
    assert_eq!(rejection(Some(&f)), Some("Maximum file size is 10MB"));
}

#[test]
fn size_exactly_at_limit_passes_size_check() {
    let f = UploadedFile::new("data.csv", 10 * 1024 * 1024, Some(CSV_SAMPLE.to_vec()));
    assert_eq!(
        validate_upload(Some(&f)),
        ValidationOutcome::Accepted {
            extension: AcceptedExtension::Csv
        }
    );
}

#[test]
fn rejects_unsupported_extension() {
    for name in ["notes.txt", "upload", "upload.", ".csv", "archive.xlsx.zip"] {
        let f = declared(name, 1024);
        assert_eq!(rejection(Some(&f)), Some("Please upload a CSV or XLSX file"), "{name}");
    }
}

#[test]
fn accepted_extensions_fall_through_to_empty_check() {
    for name in ["upload.CSV", "upload.csv", "upload.xlsx", "Upload.XLSX"] {
        let f = declared(name, 2048);
        assert_eq!(rejection(Some(&f)), Some("Empty file"), "{name}");
    }

    let f = UploadedFile::new("upload.csv", 0, Some(Vec::new()));
    assert_eq!(rejection(Some(&f)), Some("Empty file"));
}

#[test]
fn accepts_csv_content() {
    let f = UploadedFile::from_bytes("upload.CSV", CSV_SAMPLE);
    assert_eq!(validate_upload(Some(&f)).extension(), Some(AcceptedExtension::Csv));
}

#[test]
fn accepts_xlsx_signature() {
    let f = UploadedFile::from_bytes("upload.xlsx", XLSX_MAGIC);
    assert_eq!(validate_upload(Some(&f)).extension(), Some(AcceptedExtension::Xlsx));
}

#[test]
fn rejects_binary_content() {
    let f = UploadedFile::from_bytes("upload.csv", [0x00, 0x01, 0x02, 0x03]);
    assert_eq!(rejection(Some(&f)), Some("Invalid file format"));
}

#[test]
fn rejects_plain_text_without_delimiters() {
    let f = UploadedFile::from_bytes("upload.csv", "just some words");
    assert_eq!(rejection(Some(&f)), Some("Invalid file format"));
}

#[test]
fn xlsx_extension_with_non_container_text_is_accepted_as_declared() {
    // Content is only checked for plausibility; the declared extension is kept.
    let f = UploadedFile::from_bytes("upload.xlsx", CSV_SAMPLE);
    assert_eq!(validate_upload(Some(&f)).extension(), Some(AcceptedExtension::Xlsx));
}

#[test]
fn xlsx_extension_with_corrupt_binary_is_rejected() {
    let f = UploadedFile::from_bytes("upload.xlsx", [0x50, 0x4B, 0x00, 0x04, 0x00]);
    assert_eq!(rejection(Some(&f)), Some("Invalid file format"));
}

#[test]
fn csv_extension_with_container_bytes_stays_csv() {
    let f = UploadedFile::from_bytes("upload.csv", XLSX_MAGIC);
    assert_eq!(validate_upload(Some(&f)).extension(), Some(AcceptedExtension::Csv));
}

#[test]
fn sniff_matches_documented_scenarios() {
    assert_eq!(sniff(&XLSX_MAGIC), SniffResult::Recognized);
    assert_eq!(sniff(&[0x00, 0x01, 0x02, 0x03]), SniffResult::Unrecognized);
    assert_eq!(sniff(CSV_SAMPLE), SniffResult::Recognized);
    assert_eq!(sniff(b""), SniffResult::Unrecognized);
}

#[test]
fn validation_outcome_serializes_to_one_field() {
    let accepted = ValidationOutcome::Accepted {
        extension: AcceptedExtension::Xlsx,
    };
    assert_eq!(serde_json::to_value(accepted).unwrap(), serde_json::json!({ "extension": "xlsx" }));

    let rejected = ValidationOutcome::Rejected {
        reason: RejectionReason::InvalidFormat,
    };
    assert_eq!(
        serde_json::to_value(rejected).unwrap(),
        serde_json::json!({ "text": "Invalid file format" })
    );
}
