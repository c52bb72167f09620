use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExtractionError;
use crate::types::{AcceptedExtension, RejectionReason};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadSeverity {
    /// User-input problem; the upload was rejected.
    Warning,
    /// Decode failure (the upload passed validation but could not be read).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about one upload attempt.
#[derive(Debug, Clone)]
pub struct UploadContext {
    /// Declared filename.
    pub file_name: String,
    /// Accepted extension; `None` until validation passes.
    pub extension: Option<AcceptedExtension>,
}

/// Minimal stats reported on successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// Number of extracted comments.
    pub comments: usize,
}

/// Observer interface for upload outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait UploadObserver: Send + Sync {
    /// Called when validation rejects an upload (always [`UploadSeverity::Warning`]).
    fn on_rejected(&self, _ctx: &UploadContext, _severity: UploadSeverity, _reason: RejectionReason) {}

    /// Called when extraction succeeds.
    fn on_success(&self, _ctx: &UploadContext, _stats: UploadStats) {}

    /// Called when decoding an accepted upload fails.
    fn on_failure(&self, _ctx: &UploadContext, _severity: UploadSeverity, _error: &ExtractionError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn UploadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn UploadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl UploadObserver for CompositeObserver {
    fn on_rejected(&self, ctx: &UploadContext, severity: UploadSeverity, reason: RejectionReason) {
        for o in &self.observers {
            o.on_rejected(ctx, severity, reason);
        }
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs upload events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl UploadObserver for StdErrObserver {
    fn on_rejected(&self, ctx: &UploadContext, severity: UploadSeverity, reason: RejectionReason) {
        eprintln!("[upload][{severity:?}] rejected file={} reason={reason}", ctx.file_name);
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        eprintln!(
            "[upload][ok] ext={} file={} comments={}",
            ext_label(ctx),
            ctx.file_name,
            stats.comments
        );
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        eprintln!(
            "[upload][{:?}] ext={} file={} err={}",
            severity,
            ext_label(ctx),
            ctx.file_name,
            error
        );
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        eprintln!(
            "[ALERT][upload][{:?}] ext={} file={} err={}",
            severity,
            ext_label(ctx),
            ctx.file_name,
            error
        );
    }
}

/// Appends upload events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl UploadObserver for FileObserver {
    fn on_rejected(&self, ctx: &UploadContext, severity: UploadSeverity, reason: RejectionReason) {
        self.append_line(&format!(
            "{} rejected severity={severity:?} file={} reason={reason}",
            unix_ts(),
            ctx.file_name
        ));
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        self.append_line(&format!(
            "{} ok ext={} file={} comments={}",
            unix_ts(),
            ext_label(ctx),
            ctx.file_name,
            stats.comments
        ));
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        self.append_line(&format!(
            "{} fail severity={:?} ext={} file={} err={}",
            unix_ts(),
            severity,
            ext_label(ctx),
            ctx.file_name,
            error
        ));
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &ExtractionError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} ext={} file={} err={}",
            unix_ts(),
            severity,
            ext_label(ctx),
            ctx.file_name,
            error
        ));
    }
}

fn ext_label(ctx: &UploadContext) -> &'static str {
    ctx.extension.map_or("-", AcceptedExtension::as_str)
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
