use std::sync::{Arc, Mutex};

use comments_ingest::extraction::{
    process_upload, CompositeObserver, ExtractionOptions, FileObserver, SpreadsheetCodec, UploadContext,
    UploadObserver, UploadSeverity, UploadStats,
};
use comments_ingest::types::{AcceptedExtension, RejectionReason, RowRecord, UploadedFile};
use comments_ingest::{ExtractionError, ExtractionResult};

#[derive(Default)]
struct RecordingObserver {
    rejections: Mutex<Vec<(UploadSeverity, RejectionReason)>>,
    successes: Mutex<Vec<(Option<AcceptedExtension>, usize)>>,
    failures: Mutex<Vec<UploadSeverity>>,
    alerts: Mutex<Vec<UploadSeverity>>,
}

impl UploadObserver for RecordingObserver {
    fn on_rejected(&self, _ctx: &UploadContext, severity: UploadSeverity, reason: RejectionReason) {
        self.rejections.lock().unwrap().push((severity, reason));
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        self.successes.lock().unwrap().push((ctx.extension, stats.comments));
    }

    fn on_failure(&self, _ctx: &UploadContext, severity: UploadSeverity, _error: &ExtractionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &UploadContext, severity: UploadSeverity, _error: &ExtractionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

struct FailingCodec;

impl SpreadsheetCodec for FailingCodec {
    fn decode(&self, _bytes: &[u8]) -> ExtractionResult<Vec<RowRecord>> {
        Err(ExtractionError::Spreadsheet {
            message: "corrupt workbook".to_string(),
        })
    }
}

fn options_with(obs: Arc<RecordingObserver>, alert_at_or_above: UploadSeverity) -> ExtractionOptions {
    ExtractionOptions {
        spreadsheet_codec: Some(Arc::new(FailingCodec)),
        observer: Some(obs),
        alert_at_or_above,
    }
}

fn bad_workbook() -> UploadedFile {
    UploadedFile::from_bytes("bad.xlsx", [0x50, 0x4B, 0x03, 0x04])
}

#[test]
fn observer_receives_success_with_comment_count() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), UploadSeverity::Critical);

    let upload = UploadedFile::from_bytes("upload.csv", "comments\na\nb\n\n");
    process_upload(Some(&upload), &opts).unwrap();

    assert_eq!(*obs.successes.lock().unwrap(), vec![(Some(AcceptedExtension::Csv), 2)]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_rejections() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), UploadSeverity::Critical);

    process_upload(None, &opts).unwrap();
    process_upload(Some(&UploadedFile::from_bytes("notes.txt", "a,b")), &opts).unwrap();

    assert_eq!(
        *obs.rejections.lock().unwrap(),
        vec![
            (UploadSeverity::Warning, RejectionReason::NoFile),
            (UploadSeverity::Warning, RejectionReason::UnsupportedExtension),
        ]
    );
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_decode_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), UploadSeverity::Critical);

    let _ = process_upload(Some(&bad_workbook()), &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![UploadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_alerts_when_threshold_is_lowered() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), UploadSeverity::Error);

    let _ = process_upload(Some(&bad_workbook()), &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![UploadSeverity::Error]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![UploadSeverity::Error]);
}

#[test]
fn composite_and_file_observers_fan_out() {
    let log_path = std::env::temp_dir().join(format!(
        "comments-ingest-observer-{}-{}.log",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let recorder = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        recorder.clone() as Arc<dyn UploadObserver>,
        Arc::new(FileObserver::new(&log_path)) as Arc<dyn UploadObserver>,
    ]);
    let opts = ExtractionOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    process_upload(Some(&UploadedFile::from_bytes("upload.csv", "comments\nhi\n")), &opts).unwrap();
    process_upload(Some(&UploadedFile::from_bytes("upload.csv", [0u8, 1, 2])), &opts).unwrap();

    assert_eq!(recorder.successes.lock().unwrap().len(), 1);
    assert_eq!(*recorder.rejections.lock().unwrap(), vec![(UploadSeverity::Warning, RejectionReason::InvalidFormat)]);

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("ok ext=csv file=upload.csv comments=1"), "{log}");
    assert!(lines[1].contains("rejected severity=Warning file=upload.csv reason=Invalid file format"), "{log}");

    let _ = std::fs::remove_file(&log_path);
}
