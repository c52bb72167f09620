//! Core data model types for upload validation and comment extraction.
//!
//! Every value here is created fresh per upload and dropped once the caller has its answer;
//! nothing is shared across uploads.

use std::fmt;

use serde::{Serialize, Serializer};

/// A user-supplied upload as handed over by the upload-handling layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Declared (client-provided) filename.
    pub file_name: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Raw file content, if any was received.
    pub buffer: Option<Vec<u8>>,
}

impl UploadedFile {
    /// Create an upload from its declared metadata and (optional) content.
    pub fn new(file_name: impl Into<String>, size: u64, buffer: Option<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            buffer,
        }
    }

    /// Create an upload whose declared size is the length of `bytes`.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self::new(file_name, bytes.len() as u64, Some(bytes))
    }

    /// The content as a slice; an absent buffer reads as empty.
    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_deref().unwrap_or_default()
    }
}

/// File extensions accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptedExtension {
    /// `.csv`
    Csv,
    /// `.xlsx`
    Xlsx,
}

impl AcceptedExtension {
    /// Parse an accepted extension (case-insensitive, without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// The result label reported for uploads with this extension.
    pub fn file_type(self) -> FileType {
        match self {
            Self::Csv => FileType::Csv,
            Self::Xlsx => FileType::Excel,
        }
    }
}

impl fmt::Display for AcceptedExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an upload was turned away. Each reason renders a fixed, user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// No file object was provided.
    NoFile,
    /// Declared size is above [`crate::upload::MAX_FILE_SIZE`].
    TooLarge,
    /// Missing extension, or not one of `csv`/`xlsx`.
    UnsupportedExtension,
    /// Buffer absent or zero-length.
    EmptyFile,
    /// The content sniffer did not recognize the bytes.
    InvalidFormat,
}

impl RejectionReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoFile => "Please Select a file",
            Self::TooLarge => "Maximum file size is 10MB",
            Self::UnsupportedExtension => "Please upload a CSV or XLSX file",
            Self::EmptyFile => "Empty file",
            Self::InvalidFormat => "Invalid file format",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for RejectionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Result of validating an upload.
///
/// Serializes to `{"extension": "csv"}` when accepted and `{"text": "<message>"}` when rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationOutcome {
    /// The upload may be decoded; `extension` is the declared one.
    Accepted { extension: AcceptedExtension },
    /// The upload was refused.
    Rejected {
        #[serde(rename = "text")]
        reason: RejectionReason,
    },
}

impl ValidationOutcome {
    /// The accepted extension, if any.
    pub fn extension(&self) -> Option<AcceptedExtension> {
        match self {
            Self::Accepted { extension } => Some(*extension),
            Self::Rejected { .. } => None,
        }
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Outcome of content sniffing.
///
/// There is no "definitely invalid" state: lack of evidence and evidence against collapse into
/// [`SniffResult::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffResult {
    /// The bytes look like a spreadsheet container or delimited text.
    Recognized,
    /// No evidence the bytes are an accepted format.
    Unrecognized,
}

/// A single cell value in a [`RowRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int64(i) => write!(f, "{i}"),
            // `f64` renders whole numbers without a fractional part (3.0 -> "3").
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Utf8(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Utf8(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Utf8(s)
    }
}

/// One data row as an ordered header -> value mapping.
///
/// Keys are the exact header strings of the decoder that produced the row. Duplicate keys are
/// kept in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    fields: Vec<(String, Value)>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Build a record from `(header, value)` pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs.into_iter().collect()
    }

    /// Append a field after the existing ones.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((key.into(), value.into()));
    }

    /// First value stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate fields in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Result label for extracted data. Note the spreadsheet label is `excel`, not `xlsx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Excel,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comments extracted from one accepted upload.
///
/// `total_count` always equals `comments.len()`: it is computed by [`CommentsData::new`], the
/// only way to build a value.
///
/// Serializes as `{"fileType", "fileName", "comments", "totalCount"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsData {
    file_type: FileType,
    file_name: String,
    comments: Vec<String>,
    total_count: usize,
}

impl CommentsData {
    pub fn new(file_type: FileType, file_name: impl Into<String>, comments: Vec<String>) -> Self {
        let total_count = comments.len();
        Self {
            file_type,
            file_name: file_name.into(),
            comments,
            total_count,
        }
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// The declared filename, unmodified.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Extracted comments in row order (duplicates kept).
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Consume the result, returning the comments.
    pub fn into_comments(self) -> Vec<String> {
        self.comments
    }
}

/// Terminal outcome of the whole upload pipeline when no decode fault occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Validation refused the upload.
    Rejected(RejectionReason),
    /// Validation passed and the comments were extracted.
    Extracted(CommentsData),
}

impl UploadOutcome {
    pub fn comments_data(&self) -> Option<&CommentsData> {
        match self {
            Self::Extracted(data) => Some(data),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Extracted(_) => None,
        }
    }
}
